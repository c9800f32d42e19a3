use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

/// PaginationControls component - previous/next buttons with "Page X of Y"
#[component]
pub fn PaginationControls(
    /// Current page (0-indexed)
    #[prop(into)]
    current_page: Signal<usize>,

    /// Total number of pages
    #[prop(into)]
    total_pages: Signal<usize>,

    /// Есть ли предыдущая страница
    #[prop(into)]
    has_prev: Signal<bool>,

    /// Есть ли следующая страница
    #[prop(into)]
    has_next: Signal<bool>,

    /// Callback when page changes
    on_page_change: Callback<usize>,
) -> impl IntoView {
    view! {
        <div class="pagination-controls">
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| {
                    if has_prev.get_untracked() {
                        on_page_change.run(current_page.get_untracked().saturating_sub(1));
                    }
                }
                disabled=Signal::derive(move || !has_prev.get())
                attr:title="Previous page"
            >
                {icon("chevron-left")}
            </Button>
            <span class="pagination-info">
                {move || pagination_label(current_page.get(), total_pages.get())}
            </span>
            <Button
                appearance=ButtonAppearance::Primary
                on_click=move |_| {
                    if has_next.get_untracked() {
                        on_page_change.run(current_page.get_untracked() + 1);
                    }
                }
                disabled=Signal::derive(move || !has_next.get())
                attr:title="Next page"
            >
                {icon("chevron-right")}
            </Button>
        </div>
    }
}

/// "Page X of Y"; пустой результат показывается как одна страница
pub fn pagination_label(current_page: usize, total_pages: usize) -> String {
    let total = total_pages.max(1);
    format!("Page {} of {}", current_page.min(total - 1) + 1, total)
}
