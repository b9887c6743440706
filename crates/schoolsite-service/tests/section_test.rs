//! Single-document section behavior against in-memory stores.

mod helpers;

use std::sync::atomic::Ordering;

use serde_json::json;

use schoolsite_core::error::ErrorKind;
use schoolsite_service::ActionGuard;

use helpers::{TestServices, ctx, pdf, png};

#[tokio::test]
async fn test_unsaved_section_is_absent() {
    let t = TestServices::new().await;
    assert!(t.sections.get("consejo_directivo").await.unwrap().is_none());

    let err = t.sections.get("no_such_section").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_save_then_get_returns_payload_unchanged() {
    let t = TestServices::new().await;
    let payload = json!({ "description": "x", "names": ["A", "B"] });

    t.sections
        .save(&ctx(), "consejo_directivo", &payload, None)
        .await
        .unwrap();
    let view = t.sections.get("consejo_directivo").await.unwrap().unwrap();
    assert_eq!(view.payload, payload);
    assert_eq!(view.asset_key, None);
}

#[tokio::test]
async fn test_save_replaces_wholesale() {
    let t = TestServices::new().await;
    t.sections
        .save(
            &ctx(),
            "pagos",
            &json!({ "instructions": "Transferir", "bank": "Banco Uno", "legacy": true }),
            None,
        )
        .await
        .unwrap();
    t.sections
        .save(&ctx(), "pagos", &json!({ "instructions": "Pagar en caja" }), None)
        .await
        .unwrap();

    let view = t.sections.get("pagos").await.unwrap().unwrap();
    assert_eq!(view.payload, json!({ "instructions": "Pagar en caja" }));
}

#[tokio::test]
async fn test_partial_payload_reads_back_unchanged() {
    let t = TestServices::new().await;
    let payload = json!({ "description": "x" });

    let saved = t
        .sections
        .save(&ctx(), "consejo_directivo", &payload, None)
        .await
        .unwrap();
    assert_eq!(saved.payload, payload);

    let view = t.sections.get("consejo_directivo").await.unwrap().unwrap();
    assert_eq!(view.payload, payload);
}

#[tokio::test]
async fn test_required_field_is_validated_before_store() {
    let t = TestServices::new().await;
    let err = t
        .sections
        .save(&ctx(), "consejo_directivo", &json!({ "names": ["A"] }), None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(err.message.contains("description"));
    assert!(t.sections.get("consejo_directivo").await.unwrap().is_none());
}

#[tokio::test]
async fn test_tuition_numbers_are_coerced() {
    let t = TestServices::new().await;
    let view = t
        .sections
        .save(
            &ctx(),
            "valores_matricula",
            &json!({
                "year": "2025",
                "levels": [
                    { "level": "Kinder", "enrollment": "150000", "monthly": "ciento", "annual": 1_500_000 }
                ]
            }),
            None,
        )
        .await
        .unwrap();

    let level = &view.payload["levels"][0];
    assert_eq!(view.payload["year"], json!(2025.0));
    assert_eq!(level["enrollment"], json!(150000.0));
    assert_eq!(level["monthly"], json!(0.0));
    assert_eq!(level["annual"], json!(1500000.0));

    let stored = t.sections.get("valores_matricula").await.unwrap().unwrap();
    assert_eq!(stored.payload, view.payload);
}

#[tokio::test]
async fn test_pdf_replacement_leaves_exactly_one_object() {
    let t = TestServices::new().await;
    let payload = json!({ "title": "PEI", "summary": "" });

    let first = t
        .sections
        .save(&ctx(), "proyecto_educativo", &payload, Some(pdf("pei-2024.pdf")))
        .await
        .unwrap();
    let second = t
        .sections
        .save(&ctx(), "proyecto_educativo", &payload, Some(pdf("pei-2025.pdf")))
        .await
        .unwrap();

    let new_key = second.asset_key.clone().unwrap();
    assert_ne!(first.asset_key, second.asset_key);
    assert_eq!(t.documents.keys().await, vec![new_key.clone()]);
    assert_eq!(
        second.asset_url.as_deref(),
        Some(format!("/assets/documents/{new_key}").as_str())
    );
}

#[tokio::test]
async fn test_save_without_asset_keeps_current_asset() {
    let t = TestServices::new().await;
    let first = t
        .sections
        .save(
            &ctx(),
            "historia",
            &json!({ "body": "Fundado en 1952" }),
            Some(png("fachada.png")),
        )
        .await
        .unwrap();
    let second = t
        .sections
        .save(&ctx(), "historia", &json!({ "body": "Fundado en 1953" }), None)
        .await
        .unwrap();
    assert_eq!(second.asset_key, first.asset_key);
    assert_eq!(t.images.keys().await.len(), 1);
}

#[tokio::test]
async fn test_old_asset_delete_failure_is_logged_not_fatal() {
    let t = TestServices::new().await;
    let payload = json!({ "title": "PEI" });
    t.sections
        .save(&ctx(), "proyecto_educativo", &payload, Some(pdf("a.pdf")))
        .await
        .unwrap();
    t.documents.fail_remove.store(true, Ordering::SeqCst);

    let view = t
        .sections
        .save(&ctx(), "proyecto_educativo", &payload, Some(pdf("b.pdf")))
        .await
        .unwrap();
    assert!(view.asset_key.unwrap().ends_with("-b.pdf"));
    assert_eq!(t.documents.keys().await.len(), 2);
}

#[tokio::test]
async fn test_failed_upsert_removes_fresh_upload() {
    let t = TestServices::new().await;
    t.document_store.fail_upsert.store(true, Ordering::SeqCst);

    let err = t
        .sections
        .save(
            &ctx(),
            "proyecto_educativo",
            &json!({ "title": "PEI" }),
            Some(pdf("a.pdf")),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::StoreUnavailable);
    assert!(t.documents.keys().await.is_empty());
}

#[tokio::test]
async fn test_remove_asset_keeps_payload() {
    let t = TestServices::new().await;
    let payload = json!({ "description": "Directiva 2025", "names": ["Ana"] });
    t.sections
        .save(&ctx(), "consejo_directivo", &payload, Some(png("foto.png")))
        .await
        .unwrap();

    let view = t
        .sections
        .remove_asset(&ctx(), "consejo_directivo")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.asset_key, None);
    assert_eq!(view.asset_url, None);
    assert_eq!(view.payload, payload);
    assert!(t.images.keys().await.is_empty());
}

#[tokio::test]
async fn test_remove_asset_without_asset_is_noop() {
    let t = TestServices::new().await;
    assert!(
        t.sections
            .remove_asset(&ctx(), "historia")
            .await
            .unwrap()
            .is_none()
    );

    t.sections
        .save(&ctx(), "historia", &json!({ "body": "x" }), None)
        .await
        .unwrap();
    let view = t
        .sections
        .remove_asset(&ctx(), "historia")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(view.payload["body"], "x");
}

#[tokio::test]
async fn test_concurrent_save_is_rejected() {
    let t = TestServices::new().await;
    let _ticket = t
        .guard
        .acquire(ActionGuard::section_target("historia"), "save")
        .unwrap();

    let err = t
        .sections
        .save(&ctx(), "historia", &json!({ "body": "x" }), None)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}
