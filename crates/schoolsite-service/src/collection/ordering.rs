//! Pure ordering rules for parent-scoped lists.

use schoolsite_database::OrderAssignment;
use schoolsite_entity::collection::OrderedItem;

/// Direction of a single-step move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards smaller order values.
    Up,
    /// Towards larger order values.
    Down,
}

/// Order value for an item appended after `max`.
pub fn next_order(max: Option<i64>) -> i64 {
    max.map_or(0, |m| m + 1)
}

/// The sibling a move swaps with.
///
/// Up picks the closest strictly smaller order, down the closest strictly
/// larger one. Equally ranked candidates resolve to the smallest id.
/// `None` means the mover is already at that end.
pub fn neighbor<'a>(
    siblings: &'a [OrderedItem],
    mover: &OrderedItem,
    direction: Direction,
) -> Option<&'a OrderedItem> {
    let candidates = siblings.iter().filter(|s| s.id != mover.id);
    match direction {
        Direction::Up => candidates
            .filter(|s| s.order_index < mover.order_index)
            .min_by(|a, b| b.order_index.cmp(&a.order_index).then(a.id.cmp(&b.id))),
        Direction::Down => candidates
            .filter(|s| s.order_index > mover.order_index)
            .min_by(|a, b| a.order_index.cmp(&b.order_index).then(a.id.cmp(&b.id))),
    }
}

/// The two writes of a swap: the neighbor takes the mover's order first,
/// then the mover takes the neighbor's.
pub fn swap_assignments(
    mover: &OrderedItem,
    neighbor: &OrderedItem,
) -> (OrderAssignment, OrderAssignment) {
    (
        OrderAssignment {
            id: neighbor.id,
            order_index: mover.order_index,
        },
        OrderAssignment {
            id: mover.id,
            order_index: neighbor.order_index,
        },
    )
}

/// Writes that reset `items` (already in list order) to `0..n-1`.
/// Items already at their target are skipped.
pub fn renumber_plan(items: &[OrderedItem]) -> Vec<OrderAssignment> {
    items
        .iter()
        .zip(0_i64..)
        .filter(|(item, target)| item.order_index != *target)
        .map(|(item, target)| OrderAssignment {
            id: item.id,
            order_index: target,
        })
        .collect()
}
