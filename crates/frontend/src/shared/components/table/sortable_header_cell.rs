//! Компонент сортируемой ячейки заголовка таблицы
//!
//! # Пример
//!
//! ```rust,ignore
//! <SortableHeaderCell
//!     label="Price"
//!     is_active=Signal::derive(move || sort_field.get() == Some(CatalogField::Price))
//!     ascending=Signal::derive(move || sort_ascending.get())
//!     on_sort=Callback::new(move |_| toggle_sort(CatalogField::Price))
//! />
//! ```

use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use leptos::prelude::*;
use thaw::*;

/// Ячейка заголовка: текст, индикатор сортировки (▲▼), клик переключает сортировку
#[component]
pub fn SortableHeaderCell(
    /// Текст заголовка
    #[prop(into)]
    label: String,

    /// Сортируется ли таблица по этой колонке
    #[prop(into)]
    is_active: Signal<bool>,

    /// Направление сортировки
    #[prop(into)]
    ascending: Signal<bool>,

    /// Callback при клике на заголовок
    on_sort: Callback<()>,

    /// Минимальная ширина колонки
    #[prop(optional, default = 100.0)]
    min_width: f64,
) -> impl IntoView {
    view! {
        <TableHeaderCell min_width=min_width>
            <div
                class="table__sortable-header"
                on:click=move |_| on_sort.run(())
            >
                {label}
                <span class=move || get_sort_class(is_active.get())>
                    {move || get_sort_indicator(is_active.get(), ascending.get())}
                </span>
            </div>
        </TableHeaderCell>
    }
}
