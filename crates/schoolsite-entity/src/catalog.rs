//! Built-in catalog of the site's ordered collections and sections.

use schoolsite_core::error::AppError;
use schoolsite_core::result::AppResult;

use crate::asset::AssetKind;
use crate::collection::CollectionSpec;
use crate::document::SectionSpec;
use crate::shape::{FieldSpec, Shape};

/// Bucket for photos and illustrations.
pub const IMAGES_BUCKET: &str = "images";
/// Bucket for downloadable PDFs.
pub const DOCUMENTS_BUCKET: &str = "documents";

/// Registry of every collection and section the site manages.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    collections: Vec<CollectionSpec>,
    sections: Vec<SectionSpec>,
}

impl Catalog {
    /// Create a catalog from explicit descriptors.
    pub fn new(collections: Vec<CollectionSpec>, sections: Vec<SectionSpec>) -> Self {
        Self {
            collections,
            sections,
        }
    }

    /// The catalog of the school's public site.
    pub fn builtin() -> Self {
        Self::new(builtin_collections(), builtin_sections())
    }

    /// Look up a collection descriptor.
    pub fn collection(&self, name: &str) -> AppResult<&CollectionSpec> {
        self.collections
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| AppError::not_found(format!("Unknown collection '{name}'")))
    }

    /// Look up a section descriptor.
    pub fn section(&self, key: &str) -> AppResult<&SectionSpec> {
        self.sections
            .iter()
            .find(|s| s.key == key)
            .ok_or_else(|| AppError::not_found(format!("Unknown section '{key}'")))
    }

    /// All collection descriptors.
    pub fn collections(&self) -> &[CollectionSpec] {
        &self.collections
    }

    /// All section descriptors.
    pub fn sections(&self) -> &[SectionSpec] {
        &self.sections
    }

    /// Names of all buckets referenced by the catalog, deduplicated.
    pub fn buckets(&self) -> Vec<String> {
        let mut buckets: Vec<String> = self
            .collections
            .iter()
            .map(|c| c.bucket.clone())
            .chain(self.sections.iter().map(|s| s.bucket.clone()))
            .collect();
        buckets.sort();
        buckets.dedup();
        buckets
    }
}

fn builtin_collections() -> Vec<CollectionSpec> {
    vec![
        CollectionSpec::new(
            "council_members",
            "Consejo directivo",
            Shape::new(vec![
                FieldSpec::text("name").required(),
                FieldSpec::text("role"),
            ]),
        )
        .with_assets(IMAGES_BUCKET, &[AssetKind::Image]),
        CollectionSpec::new(
            "carousel_photos",
            "Carrusel de fotos",
            Shape::new(vec![FieldSpec::text("caption")]),
        )
        .with_assets(IMAGES_BUCKET, &[AssetKind::Image])
        .requiring_asset(),
        CollectionSpec::new(
            "admission_steps",
            "Proceso de admisión",
            Shape::new(vec![
                FieldSpec::text("title").required(),
                FieldSpec::text("description"),
            ]),
        ),
        CollectionSpec::new(
            "foundation_directory",
            "Directorio de la fundación",
            Shape::new(vec![
                FieldSpec::text("name").required(),
                FieldSpec::text("position"),
                FieldSpec::text("email"),
                FieldSpec::text("phone"),
            ]),
        )
        .with_assets(IMAGES_BUCKET, &[AssetKind::Image]),
        CollectionSpec::new(
            "library_resources",
            "Biblioteca",
            Shape::new(vec![
                FieldSpec::text("title").required(),
                FieldSpec::text("description"),
                FieldSpec::text("url"),
            ]),
        )
        .with_assets(DOCUMENTS_BUCKET, &[AssetKind::Pdf, AssetKind::Image]),
        CollectionSpec::new(
            "uniform_items",
            "Uniformes",
            Shape::new(vec![
                FieldSpec::text("name").required(),
                FieldSpec::text("description"),
                FieldSpec::number("price"),
            ]),
        )
        .with_assets(IMAGES_BUCKET, &[AssetKind::Image]),
        CollectionSpec::new(
            "schedule_blocks",
            "Horarios",
            Shape::new(vec![
                FieldSpec::text("label").required(),
                FieldSpec::text("start"),
                FieldSpec::text("end"),
            ]),
        ),
        CollectionSpec::new(
            "payment_methods",
            "Medios de pago",
            Shape::new(vec![
                FieldSpec::text("name").required(),
                FieldSpec::text("details"),
            ]),
        ),
    ]
}

fn builtin_sections() -> Vec<SectionSpec> {
    vec![
        SectionSpec::new(
            "historia",
            "Historia",
            Shape::new(vec![FieldSpec::text("body").required()]),
        )
        .with_assets(IMAGES_BUCKET, &[AssetKind::Image]),
        SectionSpec::new(
            "mision_vision",
            "Misión y visión",
            Shape::new(vec![
                FieldSpec::text("mission").required(),
                FieldSpec::text("vision").required(),
            ]),
        ),
        SectionSpec::new(
            "valores",
            "Valores",
            Shape::new(vec![FieldSpec::text_list("values").required()]),
        ),
        SectionSpec::new(
            "consejo_directivo",
            "Consejo directivo",
            Shape::new(vec![
                FieldSpec::text("description").required(),
                FieldSpec::text_list("names"),
            ]),
        )
        .with_assets(IMAGES_BUCKET, &[AssetKind::Image]),
        SectionSpec::new(
            "proyecto_educativo",
            "Proyecto educativo",
            Shape::new(vec![
                FieldSpec::text("title").required(),
                FieldSpec::text("summary"),
            ]),
        )
        .with_assets(DOCUMENTS_BUCKET, &[AssetKind::Pdf]),
        SectionSpec::new(
            "admisiones",
            "Admisiones",
            Shape::new(vec![FieldSpec::text("intro").required()]),
        )
        .with_assets(DOCUMENTS_BUCKET, &[AssetKind::Pdf]),
        SectionSpec::new(
            "biblioteca",
            "Biblioteca",
            Shape::new(vec![
                FieldSpec::text("description").required(),
                FieldSpec::text("hours"),
            ]),
        )
        .with_assets(IMAGES_BUCKET, &[AssetKind::Image]),
        SectionSpec::new(
            "uniformes",
            "Uniformes",
            Shape::new(vec![FieldSpec::text("description").required()]),
        )
        .with_assets(DOCUMENTS_BUCKET, &[AssetKind::Pdf, AssetKind::Image]),
        SectionSpec::new(
            "horarios",
            "Horarios",
            Shape::new(vec![FieldSpec::text("description").required()]),
        )
        .with_assets(DOCUMENTS_BUCKET, &[AssetKind::Pdf, AssetKind::Image]),
        SectionSpec::new(
            "pagos",
            "Pagos",
            Shape::new(vec![
                FieldSpec::text("instructions").required(),
                FieldSpec::text("bank"),
                FieldSpec::text("account"),
            ]),
        ),
        SectionSpec::new(
            "valores_matricula",
            "Valores de matrícula y mensualidad",
            Shape::new(vec![
                FieldSpec::number("year"),
                FieldSpec::table(
                    "levels",
                    Shape::new(vec![
                        FieldSpec::text("level").required(),
                        FieldSpec::number("enrollment"),
                        FieldSpec::number("monthly"),
                        FieldSpec::number("annual"),
                    ]),
                ),
                FieldSpec::text("notes"),
            ]),
        ),
    ]
}
