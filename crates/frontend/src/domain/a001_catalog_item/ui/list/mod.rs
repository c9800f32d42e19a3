mod panels;
pub mod query;
pub mod state;

use self::panels::{ColumnsPanel, FiltersPanel, GroupingPanel};
use self::query::{build_view, field_options, CatalogPage, PageBody, SortDirection};
use self::state::{create_state, persist_state, SidePanelKind};
use crate::domain::a001_catalog_item::api::fetch_catalog_items;
use crate::shared::api_utils::resource_url;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::side_panel::SidePanel;
use crate::shared::components::table::{format_price, SortableHeaderCell};
use crate::shared::config::TableConfig;
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use crate::shared::list_utils::{highlight_matches, SearchInput};
use contracts::domain::a001_catalog_item::{CatalogField, CatalogItem};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn CatalogItemList(#[prop(optional)] config: Option<TableConfig>) -> impl IntoView {
    let config = config.unwrap_or_default();
    let state = create_state(&config);
    let config = StoredValue::new(config);

    let load = move || {
        state.update(|s| s.start_loading());
        let url = config.with_value(|c| resource_url(&c.data_path));

        wasm_bindgen_futures::spawn_local(async move {
            match fetch_catalog_items(&url).await {
                Ok(items) => state.update(|s| s.apply_loaded(items)),
                Err(e) => {
                    log::error!("Failed to load catalog items: {}", e);
                    state.update(|s| s.apply_error(e));
                }
            }
        });
    };

    // Загружаем один раз при монтировании
    Effect::new(move |_| {
        if state.with_untracked(|s| !s.is_loaded) {
            load();
        }
    });

    let category_options =
        Memo::new(move |_| state.with(|s| field_options(&s.items, CatalogField::Category)));
    let subcategory_options =
        Memo::new(move |_| state.with(|s| field_options(&s.items, CatalogField::Subcategory)));
    let visible_columns = Memo::new(move |_| state.with(|s| s.columns.visible_columns()));
    let search = Memo::new(move |_| state.with(|s| s.query.search.clone()));
    let sort = Memo::new(move |_| state.with(|s| s.query.sort));
    let page = Memo::new(move |_| {
        state.with(|s| config.with_value(|c| build_view(&s.items, &s.query, c)))
    });
    let active_filters =
        Memo::new(move |_| state.with(|s| config.with_value(|c| s.query.active_filters_count(c))));

    let on_search = Callback::new(move |value: String| {
        state.update(|s| s.set_search(value));
        persist_state(state);
    });

    let set_direction = move |direction: SortDirection| {
        state.update(|s| s.set_sort_direction(direction));
        persist_state(state);
    };
    // Без явной сортировки стрелка "по возрастанию" считается выбранной
    let is_direction = move |direction: SortDirection| {
        sort.get().map(|c| c.direction).unwrap_or_default() == direction
    };
    let arrow_class = move |direction: SortDirection| {
        if is_direction(direction) {
            "toolbar__icon toolbar__icon--active"
        } else {
            "toolbar__icon"
        }
    };

    let toggle_panel = move |panel: SidePanelKind| state.update(|s| s.toggle_panel(panel));
    let close_panel = Callback::new(move |_: ()| state.update(|s| s.close_panel()));
    let panel_open = move |panel: SidePanelKind| {
        Signal::derive(move || state.with(|s| s.open_panel == Some(panel)))
    };

    view! {
        <div class="page catalog-table">
            <div class="page__header">
                <h2 class="page__title">"Table View"</h2>
            </div>
            <hr class="page__divider" />

            {move || state.with(|s| s.is_loading).then(|| view! {
                <div class="page__loading">"Loading..."</div>
            })}

            {move || state.with(|s| s.error.clone()).map(|e| view! {
                <div class="alert alert--error">{format!("Error: {}", e)}</div>
            })}

            <Show when=move || state.with(|s| !s.is_loading && s.error.is_none())>
                <div class="catalog-table__toolbar">
                    <SearchInput
                        value=search
                        on_change=on_search
                        placeholder="Search by name"
                    />
                    <div class="toolbar__actions">
                        <span
                            class=move || arrow_class(SortDirection::Asc)
                            title="Sort ascending"
                            on:click=move |_| set_direction(SortDirection::Asc)
                        >
                            {icon("arrow-up")}
                        </span>
                        <span
                            class=move || arrow_class(SortDirection::Desc)
                            title="Sort descending"
                            on:click=move |_| set_direction(SortDirection::Desc)
                        >
                            {icon("arrow-down")}
                        </span>
                        <span
                            class="toolbar__icon"
                            title="Show/Hide Columns"
                            on:click=move |_| toggle_panel(SidePanelKind::Columns)
                        >
                            {icon("eye")}
                        </span>
                        <span
                            class="toolbar__icon"
                            title="Group by"
                            on:click=move |_| toggle_panel(SidePanelKind::Grouping)
                        >
                            {icon("bars")}
                        </span>
                        <span
                            class="toolbar__icon"
                            title="Advanced Filters"
                            on:click=move |_| toggle_panel(SidePanelKind::Filters)
                        >
                            {icon("layers")}
                            {move || {
                                let count = active_filters.get();
                                (count > 0).then(|| view! {
                                    <span class="badge badge--primary">{count}</span>
                                })
                            }}
                        </span>
                        <span class="toolbar__count">
                            {move || format!("{} records", page.with(|p| p.matched_rows))}
                        </span>
                    </div>
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                {move || visible_columns.get().into_iter().map(|field| {
                                    view! {
                                        <SortableHeaderCell
                                            label=field.label()
                                            is_active=Signal::derive(move || {
                                                sort.get().map(|c| c.field) == Some(field)
                                            })
                                            ascending=Signal::derive(move || {
                                                sort.get().map(|c| c.is_ascending()).unwrap_or(true)
                                            })
                                            on_sort=Callback::new(move |_: ()| {
                                                state.update(|s| s.toggle_sort(field));
                                                persist_state(state);
                                            })
                                        />
                                    }
                                }).collect_view()}
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || {
                                let columns = visible_columns.get();
                                let search = search.get();
                                page.with(|p| render_body(p, &columns, &search))
                            }}
                        </TableBody>
                    </Table>
                </div>

                <PaginationControls
                    current_page=Signal::derive(move || page.with(|p| p.page))
                    total_pages=Signal::derive(move || page.with(|p| p.total_pages))
                    has_prev=Signal::derive(move || page.with(|p| p.has_prev()))
                    has_next=Signal::derive(move || page.with(|p| p.has_next()))
                    on_page_change=Callback::new(move |p: usize| {
                        state.update(|s| s.go_to_page(p));
                    })
                />
            </Show>

            <SidePanel
                open=panel_open(SidePanelKind::Columns)
                title="Show/Hide Columns"
                on_close=close_panel
            >
                <ColumnsPanel state=state />
            </SidePanel>

            <SidePanel
                open=panel_open(SidePanelKind::Grouping)
                title="Create Groups"
                on_close=close_panel
            >
                <GroupingPanel state=state />
            </SidePanel>

            <SidePanel
                open=panel_open(SidePanelKind::Filters)
                title="Advanced Filters"
                on_close=close_panel
            >
                <FiltersPanel
                    state=state
                    config=config
                    category_options=category_options
                    subcategory_options=subcategory_options
                />
            </SidePanel>
        </div>
    }
}

fn render_body(page: &CatalogPage, columns: &[CatalogField], search: &str) -> AnyView {
    let colspan = columns.len().max(1).to_string();

    if page.is_empty() {
        return view! {
            <TableRow>
                <TableCell attr:colspan=colspan class="table__empty">
                    "No records found"
                </TableCell>
            </TableRow>
        }
        .into_any();
    }

    match &page.body {
        PageBody::Rows(rows) => rows
            .iter()
            .map(|item| render_row(item, columns, search))
            .collect_view()
            .into_any(),
        PageBody::Groups(groups) => groups
            .iter()
            .map(|group| {
                let colspan = colspan.clone();
                let header = group_header(&group.key, group.items.len());
                let rows = group
                    .items
                    .iter()
                    .map(|item| render_row(item, columns, search))
                    .collect_view();
                view! {
                    <TableRow class="table__group-row">
                        <TableCell attr:colspan=colspan>
                            <strong>{header}</strong>
                        </TableCell>
                    </TableRow>
                    {rows}
                }
            })
            .collect_view()
            .into_any(),
    }
}

fn render_row(item: &CatalogItem, columns: &[CatalogField], search: &str) -> impl IntoView {
    let cells = columns
        .iter()
        .map(|field| render_cell(item, *field, search))
        .collect_view();

    view! { <TableRow>{cells}</TableRow> }
}

/// Текст ячейки для всех колонок, кроме Name (там подсветка поиска)
fn cell_text(item: &CatalogItem, field: CatalogField) -> String {
    match field {
        CatalogField::Name | CatalogField::Category | CatalogField::Subcategory => {
            item.text_field(field).unwrap_or_default().to_string()
        }
        CatalogField::Price => format_price(item.price),
        CatalogField::CreatedAt => format_datetime(&item.created_at),
        CatalogField::UpdatedAt => format_datetime(&item.updated_at),
    }
}

fn group_header(key: &str, count: usize) -> String {
    format!("{} ({})", key, count)
}

// Ячейки получают только владеющие значения: дочерние view должны быть 'static
fn render_cell(item: &CatalogItem, field: CatalogField, search: &str) -> AnyView {
    match field {
        CatalogField::Name => {
            let name = highlight_matches(&item.name, search);
            view! {
                <TableCell>
                    <TableCellLayout>{name}</TableCellLayout>
                </TableCell>
            }
            .into_any()
        }
        CatalogField::Price => {
            let price = cell_text(item, field);
            view! { <TableCell class="text-right">{price}</TableCell> }.into_any()
        }
        _ => {
            let text = cell_text(item, field);
            view! {
                <TableCell>
                    <TableCellLayout>{text}</TableCellLayout>
                </TableCell>
            }
            .into_any()
        }
    }
}
