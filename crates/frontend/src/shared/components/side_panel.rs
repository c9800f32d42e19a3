use crate::shared::icons::icon;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Боковая панель справа поверх затемнения.
///
/// Закрывается кликом по затемнению или по крестику в заголовке.
#[component]
pub fn SidePanel(
    /// Открыта ли панель
    #[prop(into)]
    open: Signal<bool>,
    /// Заголовок панели
    #[prop(into)]
    title: String,
    /// Вызывается при закрытии
    on_close: Callback<()>,
    children: ChildrenFn,
) -> impl IntoView {
    let overlay_mouse_down = RwSignal::new(false);

    let is_direct_overlay_event = |ev: &ev::MouseEvent| -> bool {
        match (ev.target(), ev.current_target()) {
            (Some(t), Some(ct)) => t == ct,
            _ => false,
        }
    };

    // Закрываем только если нажатие и отпускание были на самом затемнении
    let handle_overlay_mouse_down = move |ev: ev::MouseEvent| {
        overlay_mouse_down.set(is_direct_overlay_event(&ev));
    };

    let close_deferred = move || {
        // Defer close to next tick: the overlay is removed during its own click dispatch
        spawn_local(async move {
            TimeoutFuture::new(0).await;
            on_close.run(());
        });
    };

    let handle_overlay_click = move |ev: ev::MouseEvent| {
        let should_close = overlay_mouse_down.get_untracked() && is_direct_overlay_event(&ev);
        overlay_mouse_down.set(false);
        if should_close {
            close_deferred();
        }
    };

    let title = StoredValue::new(title);
    let children = StoredValue::new(children);

    view! {
        <Show when=move || open.get()>
            <div
                class="side-panel-overlay"
                on:mousedown=handle_overlay_mouse_down
                on:click=handle_overlay_click
            ></div>
            <aside class="side-panel side-panel--visible">
                <div class="side-panel__header">
                    <h4 class="side-panel__title">{title.get_value()}</h4>
                    <button
                        class="side-panel__close"
                        title="Close"
                        on:click=move |_| close_deferred()
                    >
                        {icon("x")}
                    </button>
                </div>
                <div class="side-panel__content">
                    {children.with_value(|children| children())}
                </div>
            </aside>
        </Show>
    }
}
