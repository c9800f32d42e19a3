//! Содержимое боковых панелей списка: колонки, группировка, фильтры.
//!
//! Панели создают свои сигналы для контролов при открытии (из текущего
//! состояния) и синхронизируют их обратно в state через Effect.

use super::query::{DateRange, GroupBy};
use super::state::{persist_state, CatalogListState};
use crate::shared::components::multi_select::MultiSelect;
use crate::shared::config::TableConfig;
use crate::shared::date_utils::{format_date_input, parse_date_input};
use crate::shared::list_utils::SearchInput;
use contracts::domain::a001_catalog_item::CatalogField;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn ColumnsPanel(state: RwSignal<CatalogListState>) -> impl IntoView {
    view! {
        <div class="column-toggles">
            {CatalogField::ALL.into_iter().map(|field| {
                let checked = RwSignal::new(state.with_untracked(|s| s.columns.is_visible(field)));

                Effect::new(move |_| {
                    let visible = checked.get();
                    if state.with_untracked(|s| s.columns.is_visible(field)) != visible {
                        state.update(|s| s.columns.set_visible(field, visible));
                        persist_state(state);
                    }
                });

                view! {
                    <div class="column-toggles__row">
                        <span>{field.label()}</span>
                        <Switch checked=checked />
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[component]
pub fn GroupingPanel(state: RwSignal<CatalogListState>) -> impl IntoView {
    // Radio group value (for thaw RadioGroup API)
    let radio_value = RwSignal::new(state.with_untracked(|s| s.query.group_by.key().to_string()));

    Effect::new(move |_| {
        let group_by = GroupBy::from_key(&radio_value.get());
        if state.with_untracked(|s| s.query.group_by) != group_by {
            state.update(|s| s.set_group_by(group_by));
            persist_state(state);
        }
    });

    view! {
        <div class="grouping-options">
            <RadioGroup value=radio_value>
                {GroupBy::ALL.into_iter().map(|g| view! {
                    <Radio value=g.key() label=g.label() />
                }).collect_view()}
            </RadioGroup>
        </div>
    }
}

#[component]
pub fn FiltersPanel(
    state: RwSignal<CatalogListState>,
    config: StoredValue<TableConfig>,
    #[prop(into)] category_options: Signal<Vec<String>>,
    #[prop(into)] subcategory_options: Signal<Vec<String>>,
) -> impl IntoView {
    let selected_categories = RwSignal::new(state.with_untracked(|s| s.query.categories.clone()));
    let selected_subcategories =
        RwSignal::new(state.with_untracked(|s| s.query.subcategories.clone()));

    // Sync RwSignals → state
    Effect::new(move |_| {
        let v = selected_categories.get();
        state.update(|s| s.set_categories(v));
        persist_state(state);
    });
    Effect::new(move |_| {
        let v = selected_subcategories.get();
        state.update(|s| s.set_subcategories(v));
        persist_state(state);
    });

    let (price_min, price_max) =
        config.with_value(|c| (c.price_min.to_string(), c.price_max.to_string()));
    let query_price = move || state.with(|s| s.query.price);
    let created = move || state.with(|s| s.query.created);

    let on_search = Callback::new(move |value: String| {
        state.update(|s| s.set_search(value));
        persist_state(state);
    });

    let set_min = move |raw: String| {
        if let Ok(v) = raw.parse::<f64>() {
            state.update(|s| s.set_price_min(v));
            persist_state(state);
        }
    };
    let set_max = move |raw: String| {
        if let Ok(v) = raw.parse::<f64>() {
            state.update(|s| s.set_price_max(v));
            persist_state(state);
        }
    };

    let set_from = move |raw: String| {
        let range = DateRange {
            from: parse_date_input(&raw),
            to: state.with_untracked(|s| s.query.created.to),
        };
        state.update(|s| s.set_created_range(range));
        persist_state(state);
    };
    let set_to = move |raw: String| {
        let range = DateRange {
            from: state.with_untracked(|s| s.query.created.from),
            to: parse_date_input(&raw),
        };
        state.update(|s| s.set_created_range(range));
        persist_state(state);
    };

    let reset = move |_| {
        config.with_value(|c| state.update(|s| s.reset_filters(c)));
        selected_categories.set(Default::default());
        selected_subcategories.set(Default::default());
        persist_state(state);
    };

    view! {
        <Flex vertical=true gap=FlexGap::Large>
            <Flex vertical=true gap=FlexGap::Small>
                <Label>"Fuzzy search"</Label>
                <SearchInput
                    value=Signal::derive(move || state.with(|s| s.query.search.clone()))
                    on_change=on_search
                    placeholder="Fuzzy search by name..."
                />
            </Flex>

            <MultiSelect
                label="Category"
                placeholder="Select Categories"
                options=category_options
                selected=selected_categories
            />

            <MultiSelect
                label="Sub-Category"
                placeholder="Select Subcategories"
                options=subcategory_options
                selected=selected_subcategories
            />

            <Flex vertical=true gap=FlexGap::Small>
                <Label>"Price Range"</Label>
                <span class="price-range__label">
                    {move || {
                        let p = query_price();
                        format!("Price Range: {:.0} - {:.0}", p.min, p.max)
                    }}
                </span>
                <input
                    type="range"
                    class="price-range__slider"
                    min=price_min.clone()
                    max=price_max.clone()
                    step="1"
                    prop:value=move || query_price().min.to_string()
                    on:input=move |ev| set_min(event_target_value(&ev))
                />
                <input
                    type="range"
                    class="price-range__slider"
                    min=price_min.clone()
                    max=price_max.clone()
                    step="1"
                    prop:value=move || query_price().max.to_string()
                    on:input=move |ev| set_max(event_target_value(&ev))
                />
            </Flex>

            <Flex vertical=true gap=FlexGap::Small>
                <Label>"Date Range"</Label>
                <label class="date-range__label">"Created At (Start Date)"</label>
                <input
                    type="date"
                    class="date-range__input"
                    prop:value=move || format_date_input(created().from)
                    on:input=move |ev| set_from(event_target_value(&ev))
                />
                <label class="date-range__label">"Created At (End Date)"</label>
                <input
                    type="date"
                    class="date-range__input"
                    prop:value=move || format_date_input(created().to)
                    on:input=move |ev| set_to(event_target_value(&ev))
                />
            </Flex>

            <Button appearance=ButtonAppearance::Secondary on_click=reset>
                "Reset filters"
            </Button>
        </Flex>
    }
}
