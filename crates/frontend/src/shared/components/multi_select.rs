use crate::shared::icons::icon;
use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;

/// MultiSelect component - список флажков с "чипами" выбранных значений
///
/// Пустой выбор означает "без фильтра".
#[component]
pub fn MultiSelect(
    /// Подпись над списком
    #[prop(into)]
    label: String,

    /// Текст, когда ничего не выбрано
    #[prop(into)]
    placeholder: String,

    /// Доступные значения (в порядке отображения)
    #[prop(into)]
    options: Signal<Vec<String>>,

    /// Выбранные значения
    selected: RwSignal<HashSet<String>>,
) -> impl IntoView {
    // выбранные в порядке options, чтобы чипы не прыгали
    let selected_ordered = move || {
        let chosen = selected.get();
        options
            .get()
            .into_iter()
            .filter(|o| chosen.contains(o))
            .collect::<Vec<_>>()
    };

    view! {
        <div class="multi-select">
            <Label>{label}</Label>
            <div class="multi-select__tags">
                {move || {
                    let values = selected_ordered();
                    if values.is_empty() {
                        view! {
                            <span class="multi-select__placeholder">{placeholder.clone()}</span>
                        }.into_any()
                    } else {
                        values.into_iter().map(|value| {
                            let to_remove = value.clone();
                            view! {
                                <FilterTag
                                    label=value
                                    on_remove=Callback::new(move |_| {
                                        let v = to_remove.clone();
                                        selected.update(|s| { s.remove(&v); });
                                    })
                                />
                            }
                        }).collect_view().into_any()
                    }
                }}
            </div>
            <CheckboxGroup value=selected>
                <div class="multi-select__options">
                    {move || options.get().into_iter().map(|option| {
                        view! { <Checkbox value=option.clone() label=option /> }
                    }).collect_view()}
                </div>
            </CheckboxGroup>
        </div>
    }
}

/// FilterTag component - individual filter tag/chip
#[component]
pub fn FilterTag(
    /// Tag label
    #[prop(into)]
    label: String,

    /// Callback when remove is clicked
    on_remove: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="filter-tag">
            <span>{label}</span>
            <span
                class="filter-tag__remove"
                on:click=move |e| {
                    e.stop_propagation();
                    on_remove.run(());
                }
            >
                {icon("x")}
            </span>
        </div>
    }
}
