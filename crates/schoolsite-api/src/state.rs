//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use schoolsite_auth::Authenticator;
use schoolsite_core::config::AppConfig;
use schoolsite_database::{CollectionStore, DocumentStore};
use schoolsite_entity::catalog::Catalog;
use schoolsite_service::{ActionGuard, AssetService, CollectionService, SectionService};
use schoolsite_storage::StorageManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Collections and sections the site manages
    pub catalog: Arc<Catalog>,

    // ── Infrastructure ───────────────────────────────────────
    /// Object store buckets
    pub storage: StorageManager,
    /// Row store for ordered collections
    pub collection_store: Arc<dyn CollectionStore>,
    /// Row store for section documents
    pub document_store: Arc<dyn DocumentStore>,

    // ── Auth ─────────────────────────────────────────────────
    /// Admin authenticator selected by `auth.mode`
    pub authenticator: Arc<dyn Authenticator>,

    // ── Services ─────────────────────────────────────────────
    /// Ordered collection service
    pub collections: Arc<CollectionService>,
    /// Section document service
    pub sections: Arc<SectionService>,
}

impl AppState {
    /// Wire the services on top of the given backends.
    ///
    /// Both services share one [`ActionGuard`] and one [`AssetService`].
    pub fn new(
        config: AppConfig,
        catalog: Catalog,
        storage: StorageManager,
        collection_store: Arc<dyn CollectionStore>,
        document_store: Arc<dyn DocumentStore>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let guard = ActionGuard::new();
        let assets = Arc::new(AssetService::new(
            storage.clone(),
            config.storage.max_asset_bytes,
        ));

        let collections = Arc::new(CollectionService::new(
            Arc::clone(&catalog),
            Arc::clone(&collection_store),
            Arc::clone(&assets),
            guard.clone(),
        ));
        let sections = Arc::new(SectionService::new(
            Arc::clone(&catalog),
            Arc::clone(&document_store),
            assets,
            guard,
        ));

        Self {
            config: Arc::new(config),
            catalog,
            storage,
            collection_store,
            document_store,
            authenticator,
            collections,
            sections,
        }
    }
}
