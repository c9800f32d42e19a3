use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Запись каталога (агрегат a001)
///
/// Загружается целиком из статического JSON и в UI только читается.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub name: String,
    pub category: String,
    pub subcategory: String,
    pub price: f64,

    #[serde(with = "crate::shared::timestamp")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "crate::shared::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl CatalogItem {
    /// Текстовое значение поля (для группировки и списков выбора)
    pub fn text_field(&self, field: CatalogField) -> Option<&str> {
        match field {
            CatalogField::Name => Some(self.name.as_str()),
            CatalogField::Category => Some(self.category.as_str()),
            CatalogField::Subcategory => Some(self.subcategory.as_str()),
            _ => None,
        }
    }
}

/// Колонки таблицы каталога
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CatalogField {
    Name,
    Category,
    Subcategory,
    Price,
    CreatedAt,
    UpdatedAt,
}

impl CatalogField {
    pub const ALL: [CatalogField; 6] = [
        CatalogField::Name,
        CatalogField::Category,
        CatalogField::Subcategory,
        CatalogField::Price,
        CatalogField::CreatedAt,
        CatalogField::UpdatedAt,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CatalogField::Name => "Name",
            CatalogField::Category => "Category",
            CatalogField::Subcategory => "Subcategory",
            CatalogField::Price => "Price",
            CatalogField::CreatedAt => "Created At",
            CatalogField::UpdatedAt => "Updated At",
        }
    }
}

/// Разбирает тело ответа: JSON-массив записей каталога
pub fn parse_catalog_items(body: &str) -> anyhow::Result<Vec<CatalogItem>> {
    serde_json::from_str::<Vec<CatalogItem>>(body).context("failed to decode catalog items")
}
