use crate::shared::date_utils::today;
use crate::shared::icons::icon;
use crate::shared::store_client::StoreHandle;
use chrono::Datelike;
use contracts::shared::calendar::{
    legend, month_grid, month_title, shift_month, CalendarCell, DayCell, DayEvent, DotCategory,
    WEEKDAY_INITIALS,
};
use contracts::shared::fetch_sequence::FetchSequence;
use contracts::shared::load_state::LoadState;
use contracts::store::ops::fetch_month_events;
use leptos::prelude::*;
use leptos::task::spawn_local;

fn dot_class(category: DotCategory) -> &'static str {
    match category {
        DotCategory::Info => "calendar__dot calendar__dot--info",
        DotCategory::Warning => "calendar__dot calendar__dot--warning",
        DotCategory::Success => "calendar__dot calendar__dot--success",
        DotCategory::Destructive => "calendar__dot calendar__dot--destructive",
        DotCategory::Neutral => "calendar__dot calendar__dot--neutral",
    }
}

fn day_view(cell: DayCell) -> AnyView {
    let class = if cell.is_today {
        "calendar__day calendar__day--today"
    } else {
        "calendar__day"
    };
    let title = cell.tooltip().unwrap_or_default();

    view! {
        <div class=class title=title>
            <span class="calendar__day-number">{cell.day}</span>
            {cell.dot().map(|dot| view! { <span class=dot_class(dot)></span> })}
            {cell.shows_count().then(|| view! {
                <span class="calendar__count">{cell.event_count}</span>
            })}
        </div>
    }
    .into_any()
}

/// Month calendar of RFP due dates, one dot per day coloured by the most
/// advanced stage due that day.
#[component]
pub fn CalendarWidget() -> impl IntoView {
    let store = expect_context::<StoreHandle>();
    let now = today();
    let shown = RwSignal::new((now.year(), now.month()));
    let events = RwSignal::new(LoadState::<Vec<DayEvent>>::Loading);
    let sequence = StoredValue::new(FetchSequence::new());

    Effect::new(move |_| {
        let (year, month) = shown.get();
        let ticket = sequence.with_value(|s| s.issue());
        let store = store.clone();
        events.set(LoadState::Loading);

        spawn_local(async move {
            let result = fetch_month_events(store.store(), year, month).await;
            if !sequence.with_value(|s| s.is_current(ticket)) {
                log::debug!("dropping stale calendar response for {year}-{month:02}");
                return;
            }
            if let Err(e) = &result {
                log::error!("calendar fetch failed: {e}");
            }
            events.set(LoadState::from_rows(result));
        });
    });

    let navigate = move |delta: i32| {
        let (year, month) = shown.get_untracked();
        match shift_month(year, month, delta) {
            Ok(next) => shown.set(next),
            Err(e) => log::warn!("cannot move calendar: {e}"),
        }
    };

    let title = move || {
        let (year, month) = shown.get();
        month_title(year, month).unwrap_or_default()
    };

    let grid = move || {
        let (year, month) = shown.get();
        let state = events.get();
        if let Some(err) = state.error() {
            return view! { <div class="alert alert--error">{err.to_string()}</div> }.into_any();
        }

        let day_events = state.loaded().cloned().unwrap_or_default();
        match month_grid(year, month, &day_events, today()) {
            Ok(calendar) => view! {
                <div class="calendar__grid">
                    {WEEKDAY_INITIALS
                        .iter()
                        .map(|d| view! { <div class="calendar__weekday">{*d}</div> })
                        .collect_view()}
                    {calendar
                        .cells
                        .into_iter()
                        .map(|cell| match cell {
                            CalendarCell::Blank => view! { <div class="calendar__blank"></div> }.into_any(),
                            CalendarCell::Day(day) => day_view(day),
                        })
                        .collect_view()}
                </div>
            }
            .into_any(),
            Err(e) => view! { <div class="alert alert--error">{e.to_string()}</div> }.into_any(),
        }
    };

    view! {
        <div class="card calendar">
            <div class="card__header">
                <div class="card__title">
                    {icon("calendar")}
                    <span>"Upcoming Deadlines"</span>
                </div>
                <div class="calendar__nav">
                    <button class="calendar__nav-btn" title="Previous month" on:click=move |_| navigate(-1)>
                        {icon("chevron-left")}
                    </button>
                    <span class="calendar__title">{title}</span>
                    <button class="calendar__nav-btn" title="Next month" on:click=move |_| navigate(1)>
                        {icon("chevron-right")}
                    </button>
                </div>
            </div>
            <Show when=move || events.with(LoadState::is_loading)>
                <div class="card__loading">"Loading..."</div>
            </Show>
            {grid}
            <div class="calendar__legend">
                {legend()
                    .into_iter()
                    .map(|(category, label)| view! {
                        <span class="calendar__legend-item">
                            <span class=dot_class(category)></span>
                            {label}
                        </span>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}
