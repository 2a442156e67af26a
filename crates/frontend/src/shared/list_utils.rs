/// Table helpers shared by the list widgets (sort headers, debounced search)
use contracts::shared::list_query::SortSpec;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Indicator shown next to a sortable column header
pub fn get_sort_indicator<K: PartialEq>(spec: &SortSpec<K>, column: K) -> &'static str {
    if spec.key == column {
        if spec.direction.is_ascending() { " ▲" } else { " ▼" }
    } else {
        " ⇅"
    }
}

pub fn get_sort_class<K: PartialEq>(spec: &SortSpec<K>, column: K) -> &'static str {
    if spec.key == column {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

/// Text input that reports its value after `debounce_ms` of inactivity.
/// Clearing reports immediately.
#[component]
pub fn SearchInput(
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
    #[prop(default = 250)]
    debounce_ms: u32,
) -> impl IntoView {
    let (input_value, set_input_value) = signal(value.get_untracked());
    let pending = StoredValue::new_local(None::<Timeout>);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        // Dropping the previous timeout cancels it.
        let timeout = Timeout::new(debounce_ms, move || on_change.run(new_value));
        pending.set_value(Some(timeout));
    };

    let clear_filter = move |_| {
        pending.set_value(None);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class=move || {
                    if value.get().trim().is_empty() { "search-input__field" } else { "search-input__field search-input__field--active" }
                }
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Clear">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::list_query::SortDirection;

    #[test]
    fn test_sort_indicator() {
        let spec = SortSpec::new("due_date", SortDirection::Desc);
        assert_eq!(get_sort_indicator(&spec, "due_date"), " ▼");
        assert_eq!(get_sort_indicator(&spec, "client"), " ⇅");
        assert!(get_sort_class(&spec, "due_date").ends_with("--active"));
    }
}
