//! Payload validation and lossy coercion.

use serde_json::{Map, Value};

use schoolsite_core::error::AppError;
use schoolsite_core::result::AppResult;

use super::{FieldKind, FieldSpec, Shape};

impl Shape {
    /// Validate `payload` against this shape and return the normalized value.
    ///
    /// Required text must be non-blank and required lists non-empty.
    /// Numbers are coerced to `f64`, with `0` for anything unparseable.
    /// Optional fields the payload leaves out stay absent.
    pub fn normalize(&self, payload: &Value) -> AppResult<Value> {
        self.normalize_at(payload, "")
    }

    fn normalize_at(&self, payload: &Value, path: &str) -> AppResult<Value> {
        let Value::Object(input) = payload else {
            let what = if path.is_empty() { "payload" } else { path };
            return Err(AppError::validation(format!("{what} must be an object")));
        };

        let mut out: Map<String, Value> = input.clone();
        for field in &self.fields {
            let field_path = join_path(path, &field.name);
            match input.get(&field.name) {
                Some(value) => {
                    out.insert(field.name.clone(), field.normalize(value, &field_path)?);
                }
                None if field.required => {
                    return Err(AppError::validation(format!("{field_path} is required")));
                }
                None => {}
            }
        }
        Ok(Value::Object(out))
    }
}

impl FieldSpec {
    fn normalize(&self, value: &Value, path: &str) -> AppResult<Value> {
        match &self.kind {
            FieldKind::Text => {
                let text = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null => String::new(),
                    _ => return Err(AppError::validation(format!("{path} must be text"))),
                };
                if self.required && text.trim().is_empty() {
                    return Err(AppError::validation(format!("{path} is required")));
                }
                Ok(Value::String(text))
            }
            FieldKind::Number => Ok(Value::from(coerce_number(value))),
            FieldKind::Flag => Ok(Value::Bool(coerce_flag(value))),
            FieldKind::TextList => {
                let items: Vec<Value> = match value {
                    Value::Array(items) => items
                        .iter()
                        .filter_map(scalar_text)
                        .filter(|s| !s.trim().is_empty())
                        .map(Value::String)
                        .collect(),
                    Value::String(s) => s
                        .lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty())
                        .map(|line| Value::String(line.to_string()))
                        .collect(),
                    Value::Null => Vec::new(),
                    _ => return Err(AppError::validation(format!("{path} must be a list"))),
                };
                if self.required && items.is_empty() {
                    return Err(AppError::validation(format!(
                        "{path} needs at least one entry"
                    )));
                }
                Ok(Value::Array(items))
            }
            FieldKind::Record(shape) => match value {
                Value::Null if self.required => {
                    Err(AppError::validation(format!("{path} is required")))
                }
                Value::Null => Ok(Value::Null),
                other => shape.normalize_at(other, path),
            },
            FieldKind::Table(shape) => {
                let rows = match value {
                    Value::Array(rows) => rows
                        .iter()
                        .enumerate()
                        .map(|(i, row)| shape.normalize_at(row, &format!("{path}[{i}]")))
                        .collect::<AppResult<Vec<_>>>()?,
                    Value::Null => Vec::new(),
                    _ => return Err(AppError::validation(format!("{path} must be a list"))),
                };
                if self.required && rows.is_empty() {
                    return Err(AppError::validation(format!("{path} needs at least one row")));
                }
                Ok(Value::Array(rows))
            }
        }
    }
}

/// Coerce numeric-looking input to `f64`.
///
/// Strings are trimmed and a lone `,` is read as the decimal separator.
/// Anything that does not parse to a finite number becomes `0`.
pub fn coerce_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(0.0)
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replace(',', ".").parse().ok()
    } else {
        trimmed.parse().ok()
    }
}

fn coerce_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes" | "on" | "si" | "sí"
        ),
        _ => false,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn join_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use schoolsite_core::error::ErrorKind;

    fn tuition_shape() -> Shape {
        Shape::new(vec![
            FieldSpec::number("year"),
            FieldSpec::table(
                "levels",
                Shape::new(vec![
                    FieldSpec::text("level").required(),
                    FieldSpec::number("monthly"),
                ]),
            ),
        ])
    }

    #[test]
    fn test_number_coercion_is_lossy() {
        assert_eq!(coerce_number(&json!("150000")), 150000.0);
        assert_eq!(coerce_number(&json!(" 12,5 ")), 12.5);
        assert_eq!(coerce_number(&json!("abc")), 0.0);
        assert_eq!(coerce_number(&json!(null)), 0.0);
        assert_eq!(coerce_number(&json!([1])), 0.0);
        assert_eq!(coerce_number(&json!(7)), 7.0);
    }

    #[test]
    fn test_table_rows_are_normalized() {
        let out = tuition_shape()
            .normalize(&json!({
                "year": "2025",
                "levels": [{"level": "Kinder", "monthly": "not a number"}]
            }))
            .unwrap();

        assert_eq!(out["year"], json!(2025.0));
        assert_eq!(out["levels"][0]["monthly"], json!(0.0));
        assert_eq!(out["levels"][0]["level"], json!("Kinder"));
    }

    #[test]
    fn test_required_text_inside_table_reports_path() {
        let err = tuition_shape()
            .normalize(&json!({"levels": [{"level": "  "}]}))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("levels[0].level"));
    }

    #[test]
    fn test_unknown_keys_are_preserved() {
        let shape = Shape::new(vec![FieldSpec::text("name").required()]);
        let out = shape
            .normalize(&json!({"name": "Ana", "nickname": "Anita"}))
            .unwrap();
        assert_eq!(out, json!({"name": "Ana", "nickname": "Anita"}));
    }

    #[test]
    fn test_text_list_from_multiline_string() {
        let shape = Shape::new(vec![FieldSpec::text_list("names").required()]);
        let out = shape.normalize(&json!({"names": "Ana\n\n Luis "})).unwrap();
        assert_eq!(out["names"], json!(["Ana", "Luis"]));

        assert!(shape.normalize(&json!({"names": []})).is_err());
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        let shape = Shape::default();
        assert!(shape.normalize(&json!("text")).is_err());
        assert_eq!(shape.normalize(&json!({})).unwrap(), json!({}));
    }

    #[test]
    fn test_absent_optional_fields_stay_absent() {
        let shape = Shape::new(vec![
            FieldSpec::text("title").required(),
            FieldSpec::text_list("names"),
            FieldSpec::flag("public"),
            FieldSpec::record(
                "contact",
                Shape::new(vec![FieldSpec::text("email"), FieldSpec::flag("public")]),
            ),
        ]);
        let payload = json!({"title": "Consejo", "contact": {"email": "a@b.cl"}});
        assert_eq!(shape.normalize(&payload).unwrap(), payload);
    }

    #[test]
    fn test_absent_required_field_is_rejected() {
        let shape = Shape::new(vec![
            FieldSpec::text("title").required(),
            FieldSpec::number("year").required(),
        ]);
        let err = shape.normalize(&json!({"title": "PEI"})).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.message.contains("year is required"));
    }
}
