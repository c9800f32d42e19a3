//! Построение отображаемой страницы из загруженных записей.
//!
//! Порядок: поиск → фильтры → сортировка → группировка → страница.
//! Всё считается заново на каждое изменение параметров, исходный список
//! не меняется.

use crate::shared::config::TableConfig;
use crate::shared::fuzzy::FuzzySearch;
use crate::shared::list_utils::{
    compare_f64, compare_text, group_by_key, page_window, sort_list, unique_values, Sortable,
};
use chrono::{DateTime, NaiveDate, Utc};
use contracts::domain::a001_catalog_item::{CatalogField, CatalogItem};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

impl Sortable for CatalogItem {
    type Field = CatalogField;

    fn compare_by_field(&self, other: &Self, field: CatalogField) -> Ordering {
        match field {
            CatalogField::Name => compare_text(&self.name, &other.name),
            CatalogField::Category => compare_text(&self.category, &other.category),
            CatalogField::Subcategory => compare_text(&self.subcategory, &other.subcategory),
            CatalogField::Price => compare_f64(self.price, other.price),
            CatalogField::CreatedAt => self.created_at.cmp(&other.created_at),
            CatalogField::UpdatedAt => self.updated_at.cmp(&other.updated_at),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: CatalogField,
    pub direction: SortDirection,
}

impl SortConfig {
    /// Клик по заголовку: та же колонка по возрастанию → по убыванию,
    /// иначе - по возрастанию по этой колонке
    pub fn toggle(current: Option<SortConfig>, field: CatalogField) -> SortConfig {
        let direction = match current {
            Some(c) if c.field == field && c.direction == SortDirection::Asc => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        SortConfig { field, direction }
    }

    /// Стрелки на панели: направление задаётся явно, колонка - текущая или Name
    pub fn with_direction(current: Option<SortConfig>, direction: SortDirection) -> SortConfig {
        SortConfig {
            field: current.map(|c| c.field).unwrap_or(CatalogField::Name),
            direction,
        }
    }

    pub fn is_ascending(&self) -> bool {
        self.direction == SortDirection::Asc
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    None,
    Category,
    Subcategory,
}

impl GroupBy {
    pub const ALL: [GroupBy; 3] = [GroupBy::Category, GroupBy::Subcategory, GroupBy::None];

    pub fn field(&self) -> Option<CatalogField> {
        match self {
            GroupBy::None => None,
            GroupBy::Category => Some(CatalogField::Category),
            GroupBy::Subcategory => Some(CatalogField::Subcategory),
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            GroupBy::None => "none",
            GroupBy::Category => "category",
            GroupBy::Subcategory => "subcategory",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupBy::None => "None",
            GroupBy::Category => "Category",
            GroupBy::Subcategory => "Subcategory",
        }
    }

    pub fn from_key(key: &str) -> GroupBy {
        GroupBy::ALL
            .into_iter()
            .find(|g| g.key() == key)
            .unwrap_or_default()
    }
}

/// Диапазон цены, включительно с обеих сторон
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// Период по дате создания, включительно по календарным дням (UTC).
/// Каждая граница применяется независимо.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_set(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }

    pub fn contains(&self, value: &DateTime<Utc>) -> bool {
        let day = value.date_naive();
        self.from.map_or(true, |from| day >= from) && self.to.map_or(true, |to| day <= to)
    }
}

/// Параметры отображения таблицы
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub search: String,
    pub price: PriceRange,
    pub created: DateRange,
    pub categories: HashSet<String>,
    pub subcategories: HashSet<String>,
    pub sort: Option<SortConfig>,
    pub group_by: GroupBy,
    /// Номер страницы (с 0)
    pub page: usize,
    pub page_size: usize,
}

impl ListQuery {
    pub fn new(config: &TableConfig) -> Self {
        Self {
            search: String::new(),
            price: PriceRange {
                min: config.price_min,
                max: config.price_max,
            },
            created: DateRange::default(),
            categories: HashSet::new(),
            subcategories: HashSet::new(),
            sort: None,
            group_by: GroupBy::None,
            page: 0,
            page_size: config.page_size,
        }
    }

    /// Количество активных фильтров (для бейджа)
    pub fn active_filters_count(&self, config: &TableConfig) -> usize {
        let mut count = 0usize;
        if !self.search.trim().is_empty() {
            count += 1;
        }
        if self.price.min > config.price_min || self.price.max < config.price_max {
            count += 1;
        }
        if self.created.is_set() {
            count += 1;
        }
        if !self.categories.is_empty() {
            count += 1;
        }
        if !self.subcategories.is_empty() {
            count += 1;
        }
        count
    }

    fn matches(&self, item: &CatalogItem) -> bool {
        self.price.contains(item.price)
            && self.created.contains(&item.created_at)
            && (self.categories.is_empty() || self.categories.contains(&item.category))
            && (self.subcategories.is_empty() || self.subcategories.contains(&item.subcategory))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogGroup {
    pub key: String,
    pub items: Vec<CatalogItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageBody {
    Rows(Vec<CatalogItem>),
    Groups(Vec<CatalogGroup>),
}

/// Одна страница таблицы
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub body: PageBody,
    /// Номер страницы (с 0), приведённый к допустимому диапазону
    pub page: usize,
    pub total_pages: usize,
    /// Строк, прошедших поиск и фильтры
    pub matched_rows: usize,
}

impl CatalogPage {
    pub fn has_prev(&self) -> bool {
        self.page > 0
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages
    }

    pub fn is_empty(&self) -> bool {
        self.matched_rows == 0
    }
}

/// Поиск и фильтры; при поиске порядок - по релевантности
pub fn filter_items(
    items: &[CatalogItem],
    query: &ListQuery,
    config: &TableConfig,
) -> Vec<CatalogItem> {
    let fuzzy =
        FuzzySearch::with_options(&query.search, config.fuzzy_threshold, config.fuzzy_distance);
    let found = fuzzy.search(items, |item| item.name.as_str());
    found.into_iter().filter(|item| query.matches(item)).collect()
}

pub fn build_view(items: &[CatalogItem], query: &ListQuery, config: &TableConfig) -> CatalogPage {
    let mut rows = filter_items(items, query, config);
    let matched_rows = rows.len();

    if let Some(sort) = query.sort {
        sort_list(&mut rows, sort.field, sort.is_ascending());
    }

    match query.group_by.field() {
        None => {
            let window = page_window(rows.len(), query.page, query.page_size);
            let page_rows = rows[window.start..window.end].to_vec();
            CatalogPage {
                body: PageBody::Rows(page_rows),
                page: window.page,
                total_pages: window.total_pages,
                matched_rows,
            }
        }
        Some(field) => {
            let groups: Vec<CatalogGroup> = group_by_key(rows, |item| {
                item.text_field(field).unwrap_or_default().to_string()
            })
            .into_iter()
            .map(|(key, items)| CatalogGroup { key, items })
            .collect();

            let window = page_window(groups.len(), query.page, query.page_size);
            let page_groups = groups
                .into_iter()
                .skip(window.start)
                .take(window.end - window.start)
                .collect();
            CatalogPage {
                body: PageBody::Groups(page_groups),
                page: window.page,
                total_pages: window.total_pages,
                matched_rows,
            }
        }
    }
}

/// Варианты для списка выбора (категории, подкатегории)
pub fn field_options(items: &[CatalogItem], field: CatalogField) -> Vec<String> {
    unique_values(items.iter().filter_map(|item| item.text_field(field)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(name: &str, category: &str, subcategory: &str, price: f64, day: u32) -> CatalogItem {
        CatalogItem {
            name: name.to_string(),
            category: category.to_string(),
            subcategory: subcategory.to_string(),
            price,
            created_at: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 4, day, 9, 30, 0).unwrap(),
        }
    }

    fn sample() -> Vec<CatalogItem> {
        vec![
            item("Wireless Mouse", "Electronics", "Accessories", 25.99, 1),
            item("Desk Lamp", "Home", "Lighting", 40.0, 5),
            item("Mouse Pad", "Electronics", "Accessories", 9.5, 10),
            item("Gaming Laptop", "Electronics", "Computers", 1499.0, 12),
            item("Floor Lamp", "Home", "Lighting", 120.0, 15),
            item("Garden Hose", "Garden", "Tools", 35.0, 20),
            item("Office Chair", "Home", "Furniture", 250.0, 25),
        ]
    }

    fn query() -> ListQuery {
        ListQuery::new(&TableConfig::default())
    }

    fn names(page: &CatalogPage) -> Vec<String> {
        match &page.body {
            PageBody::Rows(rows) => rows.iter().map(|i| i.name.clone()).collect(),
            PageBody::Groups(groups) => groups
                .iter()
                .flat_map(|g| g.items.iter().map(|i| i.name.clone()))
                .collect(),
        }
    }

    #[test]
    fn test_default_query_applies_price_bounds() {
        // ноутбук дороже 500 - по умолчанию не попадает
        let page = build_view(&sample(), &query(), &TableConfig::default());
        assert_eq!(page.matched_rows, 6);
        assert!(!names(&page).contains(&"Gaming Laptop".to_string()));
        assert_eq!(names(&page)[0], "Wireless Mouse");
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let mut q = query();
        q.price = PriceRange { min: 35.0, max: 120.0 };
        let page = build_view(&sample(), &q, &TableConfig::default());
        assert_eq!(names(&page), vec!["Desk Lamp", "Floor Lamp", "Garden Hose"]);
    }

    #[test]
    fn test_min_above_max_matches_nothing() {
        let mut q = query();
        q.price = PriceRange { min: 300.0, max: 100.0 };
        let page = build_view(&sample(), &q, &TableConfig::default());
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn test_fuzzy_search_ranks_results() {
        let mut q = query();
        q.search = "mouse".to_string();
        let page = build_view(&sample(), &q, &TableConfig::default());
        assert_eq!(names(&page), vec!["Mouse Pad", "Wireless Mouse"]);
    }

    #[test]
    fn test_fuzzy_search_tolerates_typo() {
        let mut q = query();
        q.search = "lmap".to_string();
        let page = build_view(&sample(), &q, &TableConfig::default());
        assert!(page.is_empty());

        q.search = "flor lamp".to_string();
        let page = build_view(&sample(), &q, &TableConfig::default());
        assert_eq!(names(&page), vec!["Floor Lamp"]);
    }

    #[test]
    fn test_date_range_inclusive_by_day() {
        let mut q = query();
        q.created = DateRange {
            from: NaiveDate::from_ymd_opt(2024, 3, 5),
            to: NaiveDate::from_ymd_opt(2024, 3, 15),
        };
        let page = build_view(&sample(), &q, &TableConfig::default());
        // записи за 5-е и 15-е (12:00) входят
        assert_eq!(names(&page), vec!["Desk Lamp", "Mouse Pad", "Floor Lamp"]);
    }

    #[test]
    fn test_date_range_single_bound() {
        let mut q = query();
        q.created = DateRange {
            from: NaiveDate::from_ymd_opt(2024, 3, 20),
            to: None,
        };
        let page = build_view(&sample(), &q, &TableConfig::default());
        assert_eq!(names(&page), vec!["Garden Hose", "Office Chair"]);
    }

    #[test]
    fn test_category_and_subcategory_filters() {
        let mut q = query();
        q.categories = HashSet::from(["Home".to_string(), "Garden".to_string()]);
        let page = build_view(&sample(), &q, &TableConfig::default());
        assert_eq!(
            names(&page),
            vec!["Desk Lamp", "Floor Lamp", "Garden Hose", "Office Chair"]
        );

        q.subcategories = HashSet::from(["Lighting".to_string()]);
        let page = build_view(&sample(), &q, &TableConfig::default());
        assert_eq!(names(&page), vec!["Desk Lamp", "Floor Lamp"]);
    }

    #[test]
    fn test_sort_by_each_kind() {
        let mut q = query();
        q.sort = Some(SortConfig { field: CatalogField::Price, direction: SortDirection::Desc });
        let page = build_view(&sample(), &q, &TableConfig::default());
        assert_eq!(names(&page)[0], "Office Chair");
        assert_eq!(names(&page)[5], "Mouse Pad");

        q.sort = Some(SortConfig { field: CatalogField::Name, direction: SortDirection::Asc });
        let page = build_view(&sample(), &q, &TableConfig::default());
        assert_eq!(names(&page)[0], "Desk Lamp");

        q.sort = Some(SortConfig {
            field: CatalogField::CreatedAt,
            direction: SortDirection::Desc,
        });
        let page = build_view(&sample(), &q, &TableConfig::default());
        assert_eq!(names(&page)[0], "Office Chair");
    }

    #[test]
    fn test_sort_survives_filter_change() {
        let mut q = query();
        q.sort = Some(SortConfig { field: CatalogField::Price, direction: SortDirection::Asc });
        q.categories = HashSet::from(["Home".to_string()]);
        let page = build_view(&sample(), &q, &TableConfig::default());
        assert_eq!(names(&page), vec!["Desk Lamp", "Floor Lamp", "Office Chair"]);
    }

    #[test]
    fn test_toggle_sort() {
        let first = SortConfig::toggle(None, CatalogField::Price);
        assert_eq!(first.direction, SortDirection::Asc);

        let second = SortConfig::toggle(Some(first), CatalogField::Price);
        assert_eq!(second.direction, SortDirection::Desc);

        let third = SortConfig::toggle(Some(second), CatalogField::Price);
        assert_eq!(third.direction, SortDirection::Asc);

        let other = SortConfig::toggle(Some(second), CatalogField::Name);
        assert_eq!(other, SortConfig { field: CatalogField::Name, direction: SortDirection::Asc });
    }

    #[test]
    fn test_with_direction_defaults_to_name() {
        let s = SortConfig::with_direction(None, SortDirection::Desc);
        assert_eq!(s, SortConfig { field: CatalogField::Name, direction: SortDirection::Desc });

        let current = SortConfig { field: CatalogField::Price, direction: SortDirection::Desc };
        let s = SortConfig::with_direction(Some(current), SortDirection::Asc);
        assert_eq!(s.field, CatalogField::Price);
        assert!(s.is_ascending());
    }

    #[test]
    fn test_group_by_category() {
        let mut q = query();
        q.group_by = GroupBy::Category;
        let page = build_view(&sample(), &q, &TableConfig::default());

        let PageBody::Groups(groups) = &page.body else {
            panic!("expected groups");
        };
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Electronics", "Home", "Garden"]);
        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(groups[1].items.len(), 3);
        assert_eq!(page.matched_rows, 6);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn test_group_order_follows_sort() {
        let mut q = query();
        q.group_by = GroupBy::Subcategory;
        q.sort = Some(SortConfig { field: CatalogField::Price, direction: SortDirection::Desc });
        let page = build_view(&sample(), &q, &TableConfig::default());

        let PageBody::Groups(groups) = &page.body else {
            panic!("expected groups");
        };
        let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["Furniture", "Lighting", "Tools", "Accessories"]);
        let lighting: Vec<&str> = groups[1].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(lighting, vec!["Floor Lamp", "Desk Lamp"]);
    }

    #[test]
    fn test_pagination_over_rows() {
        let items: Vec<CatalogItem> = (1..=25)
            .map(|n| item(&format!("Item {n:02}"), "C", "S", n as f64, 1))
            .collect();
        let mut q = query();

        let page = build_view(&items, &q, &TableConfig::default());
        assert_eq!(page.total_pages, 3);
        assert_eq!(names(&page).len(), 10);
        assert!(!page.has_prev());
        assert!(page.has_next());

        q.page = 2;
        let page = build_view(&items, &q, &TableConfig::default());
        assert_eq!(names(&page), vec!["Item 21", "Item 22", "Item 23", "Item 24", "Item 25"]);
        assert!(page.has_prev());
        assert!(!page.has_next());

        // фильтр сузил выборку - страница прижимается к последней
        q.page = 2;
        q.price = PriceRange { min: 0.0, max: 12.0 };
        let page = build_view(&items, &q, &TableConfig::default());
        assert_eq!(page.page, 1);
        assert_eq!(names(&page), vec!["Item 11", "Item 12"]);
    }

    #[test]
    fn test_pagination_over_groups() {
        let items: Vec<CatalogItem> = (1..=12)
            .map(|n| item(&format!("Item {n}"), &format!("Cat {n:02}"), "S", 1.0, 1))
            .collect();
        let mut q = query();
        q.group_by = GroupBy::Category;
        q.page = 1;
        let page = build_view(&items, &q, &TableConfig::default());
        assert_eq!(page.total_pages, 2);
        let PageBody::Groups(groups) = &page.body else {
            panic!("expected groups");
        };
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, "Cat 11");
    }

    #[test]
    fn test_active_filters_count() {
        let config = TableConfig::default();
        let mut q = query();
        assert_eq!(q.active_filters_count(&config), 0);

        q.search = "lamp".to_string();
        q.price.max = 200.0;
        q.created.to = NaiveDate::from_ymd_opt(2024, 1, 1);
        q.categories.insert("Home".to_string());
        assert_eq!(q.active_filters_count(&config), 4);
    }

    #[test]
    fn test_field_options_first_appearance() {
        assert_eq!(
            field_options(&sample(), CatalogField::Category),
            vec!["Electronics", "Home", "Garden"]
        );
        assert_eq!(
            field_options(&sample(), CatalogField::Subcategory),
            vec!["Accessories", "Lighting", "Computers", "Tools", "Furniture"]
        );
    }

    #[test]
    fn test_group_by_keys() {
        for g in GroupBy::ALL {
            assert_eq!(GroupBy::from_key(g.key()), g);
        }
        assert_eq!(GroupBy::from_key(""), GroupBy::None);
    }
}
