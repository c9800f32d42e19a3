//! Настройки таблицы каталога.
//!
//! Значения по умолчанию совпадают с поведением виджета "из коробки";
//! компонент принимает `TableConfig` пропсом, чтобы их можно было переопределить.

/// Путь к статическому JSON с записями
pub const DATA_PATH: &str = "/sample-data.json";

/// Фиксированный размер страницы
pub const PAGE_SIZE: usize = 10;

/// Границы ползунков цены
pub const PRICE_MIN: f64 = 0.0;
pub const PRICE_MAX: f64 = 500.0;

/// Порог нечёткого поиска: 0.0 - точное совпадение, 1.0 - что угодно
pub const FUZZY_THRESHOLD: f64 = 0.3;

/// Насколько далеко от начала строки совпадение ещё считается близким
pub const FUZZY_DISTANCE: usize = 100;

/// Ключ localStorage для настроек вида (версия в суффиксе)
pub const STORAGE_KEY: &str = "a001_catalog_item_list_state_v1";

#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    pub data_path: String,
    pub page_size: usize,
    pub price_min: f64,
    pub price_max: f64,
    pub fuzzy_threshold: f64,
    pub fuzzy_distance: usize,
    pub storage_key: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            data_path: DATA_PATH.to_string(),
            page_size: PAGE_SIZE,
            price_min: PRICE_MIN,
            price_max: PRICE_MAX,
            fuzzy_threshold: FUZZY_THRESHOLD,
            fuzzy_distance: FUZZY_DISTANCE,
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}
