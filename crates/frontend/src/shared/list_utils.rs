/// Универсальные утилиты для работы со списками (сортировка, группировка, страницы, UI компоненты)
use leptos::prelude::*;
use std::cmp::Ordering;
use std::ops::Range;
use std::sync::atomic::{AtomicI32, Ordering as AtomicOrdering};
use std::sync::Arc;
use wasm_bindgen::JsCast;

/// Trait для типов данных, поддерживающих сортировку
pub trait Sortable {
    type Field: Copy;

    /// Сравнивает два объекта по указанному полю
    fn compare_by_field(&self, other: &Self, field: Self::Field) -> Ordering;
}

/// Сравнение строк без учёта регистра; при равенстве - с учётом
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Сравнение чисел; NaN считается равным всему
pub fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Сортирует список по указанному полю (стабильно)
pub fn sort_list<T: Sortable>(items: &mut [T], field: T::Field, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending { cmp } else { cmp.reverse() }
    });
}

/// Группирует элементы по ключу. Группы идут в порядке первого появления ключа,
/// элементы внутри группы сохраняют исходный порядок.
pub fn group_by_key<T, F>(items: Vec<T>, key: F) -> Vec<(String, Vec<T>)>
where
    F: Fn(&T) -> String,
{
    let mut groups: Vec<(String, Vec<T>)> = Vec::new();
    for item in items {
        let k = key(&item);
        match groups.iter_mut().find(|(existing, _)| *existing == k) {
            Some((_, bucket)) => bucket.push(item),
            None => groups.push((k, vec![item])),
        }
    }
    groups
}

/// Уникальные значения в порядке первого появления
pub fn unique_values<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut result: Vec<String> = Vec::new();
    for v in values {
        if !result.iter().any(|existing| existing == v) {
            result.push(v.to_string());
        }
    }
    result
}

/// Окно страницы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Номер страницы (с 0), приведённый к допустимому диапазону
    pub page: usize,
    pub total_pages: usize,
    pub start: usize,
    pub end: usize,
}

/// Считает границы страницы для `total` элементов
pub fn page_window(total: usize, page: usize, page_size: usize) -> PageWindow {
    let page_size = page_size.max(1);
    let total_pages = total.div_ceil(page_size);
    let page = page.min(total_pages.saturating_sub(1));
    let start = (page * page_size).min(total);
    let end = (start + page_size).min(total);
    PageWindow {
        page,
        total_pages,
        start,
        end,
    }
}

/// Байтовые диапазоны совпадений `filter` в `text` (без учёта регистра).
///
/// Если у какого-то символа строчная форма другой длины в байтах, смещения
/// в строчной копии не совпадут с исходными - тогда совпадений нет.
pub fn match_ranges(text: &str, filter: &str) -> Vec<Range<usize>> {
    let filter = filter.trim();
    if filter.is_empty() {
        return Vec::new();
    }

    let same_width = |s: &str| {
        s.chars()
            .all(|c| c.to_lowercase().map(char::len_utf8).sum::<usize>() == c.len_utf8())
    };
    if !same_width(text) {
        return Vec::new();
    }

    let text_lower = text.to_lowercase();
    let filter_lower = filter.to_lowercase();

    let mut ranges = Vec::new();
    let mut last_pos = 0;
    while let Some(pos) = text_lower[last_pos..].find(&filter_lower) {
        let start = last_pos + pos;
        let end = start + filter_lower.len();
        ranges.push(start..end);
        last_pos = end;
    }
    ranges
}

/// Подсветка совпадений в тексте (case-insensitive)
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let ranges = match_ranges(text, filter);
    if ranges.is_empty() {
        return view! { <span>{text.to_string()}</span> }.into_any();
    }

    let mut parts: Vec<AnyView> = Vec::new();
    let mut last_pos = 0;

    for range in ranges {
        if range.start > last_pos {
            parts.push(view! { <span>{text[last_pos..range.start].to_string()}</span> }.into_any());
        }
        parts.push(view! {
            <mark class="search-highlight">{text[range.clone()].to_string()}</mark>
        }.into_any());
        last_pos = range.end;
    }

    if last_pos < text.len() {
        parts.push(view! { <span>{text[last_pos..].to_string()}</span> }.into_any());
    }

    view! { <>{parts}</> }.into_any()
}

/// Получить индикатор сортировки для заголовка
pub fn get_sort_indicator(is_active: bool, ascending: bool) -> &'static str {
    if is_active {
        if ascending { " ▲" } else { " ▼" }
    } else {
        " ⇅"
    }
}

/// CSS класс индикатора сортировки
pub fn get_sort_class(is_active: bool) -> &'static str {
    if is_active {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

/// Отложенный вызов `setTimeout`; 0 - таймера нет
#[derive(Debug, Clone, Default)]
pub struct PendingTimer(Arc<AtomicI32>);

impl PendingTimer {
    /// Запоминает новый таймер, возвращает предыдущий
    pub fn replace(&self, handle: i32) -> Option<i32> {
        non_zero(self.0.swap(handle, AtomicOrdering::SeqCst))
    }

    pub fn take(&self) -> Option<i32> {
        non_zero(self.0.swap(0, AtomicOrdering::SeqCst))
    }

    pub fn is_idle(&self) -> bool {
        self.0.load(AtomicOrdering::SeqCst) == 0
    }

    /// Отменяет ожидающий вызов, если он есть
    pub fn cancel(&self) {
        if let Some(handle) = self.take() {
            clear_timeout(handle);
        }
    }

    /// Отмена при уничтожении владельца: колбэк компонента к тому моменту уже недоступен
    pub fn cancel_on_cleanup(&self) {
        let pending = self.clone();
        on_cleanup(move || pending.cancel());
    }
}

fn non_zero(handle: i32) -> Option<i32> {
    (handle != 0).then_some(handle)
}

#[cfg(target_arch = "wasm32")]
fn clear_timeout(handle: i32) {
    if let Some(window) = web_sys::window() {
        window.clear_timeout_with_handle(handle);
    }
}

// Вне браузера таймеров нет
#[cfg(not(target_arch = "wasm32"))]
fn clear_timeout(_handle: i32) {}

/// Компонент поиска с debounce и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение фильтра
    #[prop(into)]
    value: Signal<String>,
    /// Callback для обновления значения фильтра
    #[prop(into)]
    on_change: Callback<String>,
    /// Placeholder текст
    #[prop(optional, into)]
    placeholder: String,
    /// Задержка перед применением, мс
    #[prop(optional, default = 200)]
    debounce_ms: i32,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    // Локальное состояние для input (до debounce)
    let (input_value, set_input_value) = signal(value.get_untracked());

    // Значение могли поменять снаружи (второе поле поиска, сброс фильтров)
    Effect::new(move |_| {
        let external = value.get();
        if external != input_value.get_untracked() {
            set_input_value.set(external);
        }
    });

    let pending = PendingTimer::default();
    pending.cancel_on_cleanup();

    let handle_input_change = {
        let pending = pending.clone();
        move |new_value: String| {
            set_input_value.set(new_value.clone());

            let Some(window) = web_sys::window() else {
                on_change.run(new_value);
                return;
            };

            // Отменяем предыдущий таймер если есть
            pending.cancel();

            let fired = pending.clone();
            let callback = wasm_bindgen::closure::Closure::once_into_js(move || {
                fired.take();
                on_change.run(new_value);
            });

            match window.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.unchecked_ref::<js_sys::Function>(),
                debounce_ms,
            ) {
                Ok(handle) => {
                    pending.replace(handle);
                }
                Err(e) => log::warn!("setTimeout failed: {:?}", e),
            }
        }
    };

    let is_filter_active = move || !value.get().trim().is_empty();

    let clear_filter = move |_: leptos::ev::MouseEvent| {
        // иначе отложенный ввод вернёт стёртый текст
        pending.cancel();
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                placeholder={placeholder}
                class=move || if is_filter_active() {
                    "search-input__field search-input__field--active"
                } else {
                    "search-input__field"
                }
                prop:value=move || input_value.get()
                on:input=move |ev| {
                    handle_input_change(event_target_value(&ev));
                }
            />
            {move || if !input_value.get().is_empty() {
                view! {
                    <button
                        class="search-input__clear"
                        on:click=clear_filter.clone()
                        title="Clear"
                    >
                        {crate::shared::icons::icon("x")}
                    </button>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row(&'static str, f64);

    impl Sortable for Row {
        type Field = u8;

        fn compare_by_field(&self, other: &Self, field: u8) -> Ordering {
            match field {
                0 => compare_text(self.0, other.0),
                _ => compare_f64(self.1, other.1),
            }
        }
    }

    #[test]
    fn test_sort_list() {
        let mut rows = vec![Row("b", 2.0), Row("A", 3.0), Row("a", 1.0)];
        sort_list(&mut rows, 0, true);
        assert_eq!(rows, vec![Row("A", 3.0), Row("a", 1.0), Row("b", 2.0)]);

        sort_list(&mut rows, 1, false);
        assert_eq!(rows, vec![Row("A", 3.0), Row("b", 2.0), Row("a", 1.0)]);
    }

    #[test]
    fn test_group_by_key_keeps_first_appearance() {
        let groups = group_by_key(vec!["b1", "a1", "b2", "c1", "a2"], |s| s[..1].to_string());
        let keys: Vec<&str> = groups.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(groups[0].1, vec!["b1", "b2"]);
        assert_eq!(groups[1].1, vec!["a1", "a2"]);
    }

    #[test]
    fn test_unique_values() {
        assert_eq!(
            unique_values(["Home", "Toys", "Home", "Garden"]),
            vec!["Home", "Toys", "Garden"]
        );
    }

    #[test]
    fn test_page_window() {
        assert_eq!(
            page_window(25, 2, 10),
            PageWindow { page: 2, total_pages: 3, start: 20, end: 25 }
        );
        // номер страницы за пределами - прижимаем к последней
        assert_eq!(
            page_window(25, 7, 10),
            PageWindow { page: 2, total_pages: 3, start: 20, end: 25 }
        );
        assert_eq!(
            page_window(0, 3, 10),
            PageWindow { page: 0, total_pages: 0, start: 0, end: 0 }
        );
        assert_eq!(page_window(10, 0, 10).total_pages, 1);
    }

    #[test]
    fn test_match_ranges() {
        assert_eq!(match_ranges("Desk Lamp", "lamp"), vec![5..9]);
        assert_eq!(match_ranges("Lamp lamp", " LAMP "), vec![0..4, 5..9]);
        assert!(match_ranges("Desk Lamp", "").is_empty());
        assert!(match_ranges("Desk Lamp", "chair").is_empty());
    }

    #[test]
    fn test_match_ranges_skips_width_changing_case() {
        // İ при lowercase растёт на байт, ẞ - уменьшается: суммарная длина та же
        assert!(match_ranges("İẞx", "ß").is_empty());
        assert!(match_ranges("İẞx", "x").is_empty());
        assert_eq!(match_ranges("Straße", "SSE").len(), 0);
        assert_eq!(match_ranges("Straße", "ße"), vec![4..7]);
    }

    #[test]
    fn test_pending_timer_replace_and_take() {
        let pending = PendingTimer::default();
        assert!(pending.is_idle());
        assert_eq!(pending.replace(7), None);
        assert_eq!(pending.replace(9), Some(7));
        assert_eq!(pending.take(), Some(9));
        assert_eq!(pending.take(), None);
    }

    #[test]
    fn test_pending_timer_cancel_clears_handle() {
        let pending = PendingTimer::default();
        pending.replace(3);
        pending.cancel();
        assert!(pending.is_idle());
    }

    #[test]
    fn test_pending_timer_cancelled_when_owner_disposed() {
        let owner = Owner::new();
        let pending = PendingTimer::default();
        owner.with(|| pending.cancel_on_cleanup());

        pending.replace(42);
        owner.cleanup();
        assert!(pending.is_idle());
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator(true, true), " ▲");
        assert_eq!(get_sort_indicator(true, false), " ▼");
        assert_eq!(get_sort_indicator(false, true), " ⇅");
    }
}
