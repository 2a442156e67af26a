use crate::shared::icons::icon;
use leptos::prelude::*;

/// Page reached by moving `delta` pages from `page`, or `None` when that
/// falls outside `1..=page_count`.
fn step(page: usize, page_count: usize, delta: isize) -> Option<usize> {
    let target = page.checked_add_signed(delta)?;
    (1..=page_count.max(1)).contains(&target).then_some(target)
}

/// Prev/next pager over a 1-based page index with a "Showing a-b of n" caption.
#[component]
pub fn PaginationControls(
    /// Clamped 1-based page
    #[prop(into)]
    current_page: Signal<usize>,
    #[prop(into)] total_pages: Signal<usize>,
    #[prop(into)] total_count: Signal<usize>,
    /// First and last row numbers on the page; (0, 0) when nothing matches
    #[prop(into)]
    shown_range: Signal<(usize, usize)>,
    on_page_change: Callback<usize>,
) -> impl IntoView {
    let target = move |delta: isize| step(current_page.get(), total_pages.get(), delta);
    let go = move |delta: isize| {
        if let Some(page) = target(delta) {
            on_page_change.run(page);
        }
    };

    let caption = move || {
        let (first, last) = shown_range.get();
        format!("Showing {first}-{last} of {}", total_count.get())
    };
    let position = move || format!("{} / {}", current_page.get(), total_pages.get().max(1));

    view! {
        <div class="pagination-controls">
            <span class="pagination-info">{caption}</span>
            <button
                class="pagination-btn"
                title="Previous page"
                disabled=move || target(-1).is_none()
                on:click=move |_| go(-1)
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">{position}</span>
            <button
                class="pagination-btn"
                title="Next page"
                disabled=move || target(1).is_none()
                on:click=move |_| go(1)
            >
                {icon("chevron-right")}
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_stays_in_range() {
        assert_eq!(step(1, 3, -1), None);
        assert_eq!(step(1, 3, 1), Some(2));
        assert_eq!(step(3, 3, 1), None);
        assert_eq!(step(1, 0, 1), None);
    }
}
