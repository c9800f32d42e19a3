use super::query::{DateRange, GroupBy, ListQuery, PriceRange, SortConfig, SortDirection};
use crate::shared::config::TableConfig;
use chrono::NaiveDate;
use contracts::domain::a001_catalog_item::{CatalogField, CatalogItem};
use leptos::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Открытая боковая панель
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidePanelKind {
    Columns,
    Grouping,
    Filters,
}

/// Скрытые колонки; по умолчанию видны все
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnVisibility {
    hidden: Vec<CatalogField>,
}

impl ColumnVisibility {
    pub fn is_visible(&self, field: CatalogField) -> bool {
        !self.hidden.contains(&field)
    }

    pub fn set_visible(&mut self, field: CatalogField, visible: bool) {
        self.hidden.retain(|f| *f != field);
        if !visible {
            self.hidden.push(field);
        }
    }

    /// Видимые колонки в порядке таблицы
    pub fn visible_columns(&self) -> Vec<CatalogField> {
        CatalogField::ALL
            .into_iter()
            .filter(|f| self.is_visible(*f))
            .collect()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct PersistedState {
    pub search: String,
    pub price_min: f64,
    pub price_max: f64,
    pub created_from: Option<NaiveDate>,
    pub created_to: Option<NaiveDate>,
    pub categories: Vec<String>,
    pub subcategories: Vec<String>,
    pub sort: Option<SortConfig>,
    pub group_by: GroupBy,
    pub columns: ColumnVisibility,
}

#[derive(Clone, Debug)]
pub struct CatalogListState {
    // Data
    pub items: Vec<CatalogItem>,
    pub is_loading: bool,
    pub is_loaded: bool,
    pub error: Option<String>,

    // Search, filters, sorting, grouping, pagination
    pub query: ListQuery,

    // Presentation
    pub columns: ColumnVisibility,
    pub open_panel: Option<SidePanelKind>,

    storage_key: String,
}

impl CatalogListState {
    /// Начальное состояние - "загрузка": записей ещё нет, и пустую таблицу
    /// до первого запроса показывать нельзя
    pub fn new(config: &TableConfig) -> Self {
        Self {
            items: Vec::new(),
            is_loading: true,
            is_loaded: false,
            error: None,
            query: ListQuery::new(config),
            columns: ColumnVisibility::default(),
            open_panel: None,
            storage_key: config.storage_key.clone(),
        }
    }

    pub fn start_loading(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub fn apply_loaded(&mut self, items: Vec<CatalogItem>) {
        self.items = items;
        self.is_loading = false;
        self.is_loaded = true;
        self.error = None;
    }

    pub fn apply_error(&mut self, message: String) {
        self.is_loading = false;
        self.is_loaded = true;
        self.error = Some(message);
    }

    // Изменение поиска, фильтров или группировки возвращает на первую страницу

    pub fn set_search(&mut self, search: String) {
        if self.query.search != search {
            self.query.search = search;
            self.query.page = 0;
        }
    }

    pub fn set_price_min(&mut self, min: f64) {
        if self.query.price.min != min {
            self.query.price.min = min;
            self.query.page = 0;
        }
    }

    pub fn set_price_max(&mut self, max: f64) {
        if self.query.price.max != max {
            self.query.price.max = max;
            self.query.page = 0;
        }
    }

    pub fn set_created_range(&mut self, range: DateRange) {
        if self.query.created != range {
            self.query.created = range;
            self.query.page = 0;
        }
    }

    pub fn set_categories(&mut self, categories: HashSet<String>) {
        if self.query.categories != categories {
            self.query.categories = categories;
            self.query.page = 0;
        }
    }

    pub fn set_subcategories(&mut self, subcategories: HashSet<String>) {
        if self.query.subcategories != subcategories {
            self.query.subcategories = subcategories;
            self.query.page = 0;
        }
    }

    pub fn set_group_by(&mut self, group_by: GroupBy) {
        if self.query.group_by != group_by {
            self.query.group_by = group_by;
            self.query.page = 0;
        }
    }

    /// Клик по заголовку колонки
    pub fn toggle_sort(&mut self, field: CatalogField) {
        self.query.sort = Some(SortConfig::toggle(self.query.sort, field));
    }

    /// Стрелки ▲/▼ на панели инструментов
    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.query.sort = Some(SortConfig::with_direction(self.query.sort, direction));
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.query.page = page;
    }

    pub fn reset_filters(&mut self, config: &TableConfig) {
        self.set_search(String::new());
        self.query.price = PriceRange {
            min: config.price_min,
            max: config.price_max,
        };
        self.query.created = DateRange::default();
        self.query.categories.clear();
        self.query.subcategories.clear();
        self.query.page = 0;
    }

    pub fn toggle_panel(&mut self, panel: SidePanelKind) {
        self.open_panel = if self.open_panel == Some(panel) {
            None
        } else {
            Some(panel)
        };
    }

    pub fn close_panel(&mut self) {
        self.open_panel = None;
    }

    fn to_persisted(&self) -> PersistedState {
        let mut categories: Vec<String> = self.query.categories.iter().cloned().collect();
        categories.sort();
        let mut subcategories: Vec<String> = self.query.subcategories.iter().cloned().collect();
        subcategories.sort();

        PersistedState {
            search: self.query.search.clone(),
            price_min: self.query.price.min,
            price_max: self.query.price.max,
            created_from: self.query.created.from,
            created_to: self.query.created.to,
            categories,
            subcategories,
            sort: self.query.sort,
            group_by: self.query.group_by,
            columns: self.columns.clone(),
        }
    }

    fn restore(&mut self, p: PersistedState) {
        self.query.search = p.search;
        self.query.price = PriceRange {
            min: p.price_min,
            max: p.price_max,
        };
        self.query.created = DateRange {
            from: p.created_from,
            to: p.created_to,
        };
        self.query.categories = p.categories.into_iter().collect();
        self.query.subcategories = p.subcategories.into_iter().collect();
        self.query.sort = p.sort;
        self.query.group_by = p.group_by;
        self.columns = p.columns;
    }
}

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn load_persisted(key: &str) -> Option<PersistedState> {
    let raw = storage()?.get_item(key).ok().flatten()?;
    match serde_json::from_str::<PersistedState>(&raw) {
        Ok(p) => Some(p),
        Err(e) => {
            log::warn!("Ignoring stored list state {}: {}", key, e);
            None
        }
    }
}

fn save_persisted(key: &str, st: &PersistedState) {
    let Some(storage) = storage() else { return };
    let Ok(raw) = serde_json::to_string(st) else {
        return;
    };
    let _ = storage.set_item(key, &raw);
}

pub fn persist_state(signal: RwSignal<CatalogListState>) {
    signal.with_untracked(|st| save_persisted(&st.storage_key, &st.to_persisted()));
}

// Create state within component scope instead of thread-local
// This ensures state is properly disposed when component unmounts
pub fn create_state(config: &TableConfig) -> RwSignal<CatalogListState> {
    let mut st = CatalogListState::new(config);
    if let Some(p) = load_persisted(&config.storage_key) {
        st.restore(p);
    }
    RwSignal::new(st)
}
