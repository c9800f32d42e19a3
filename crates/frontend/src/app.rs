use crate::domain::a001_catalog_item::ui::list::CatalogItemList;
use crate::shared::config::TableConfig;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <div class="app-layout">
            <CatalogItemList config=TableConfig::default() />
        </div>
    }
}
