use super::{confidence_class, stage_badge_color};
use crate::shared::config::ConsoleConfig;
use crate::shared::date_utils::{days_left_label, today};
use crate::shared::icons::icon;
use crate::shared::store_client::StoreHandle;
use contracts::domain::a001_rfp::Rfp;
use contracts::shared::load_state::LoadState;
use contracts::store::ops::fetch_recent_rfps;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn progress_class(rfp: &Rfp) -> &'static str {
    match stage_badge_color(rfp.stage) {
        BadgeColor::Success => "progress__bar progress__bar--success",
        BadgeColor::Warning => "progress__bar progress__bar--warning",
        _ => "progress__bar progress__bar--info",
    }
}

fn rfp_card(rfp: Rfp, urgent_days: i64) -> impl IntoView {
    let today = today();
    let urgent = rfp.is_urgent(today, urgent_days);
    let width = format!("width: {}%;", rfp.stage.progress_percent());
    let activity = format!(
        "{} · {}",
        rfp.assigned_agent.label(),
        days_left_label(rfp.days_left(today))
    );

    view! {
        <div class="live-status__item" class:live-status__item--urgent=urgent>
            <div class="live-status__row">
                <div class="live-status__id">
                    <span>{rfp.id.clone()}</span>
                    <Badge appearance=BadgeAppearance::Tint color=stage_badge_color(rfp.stage)>
                        {rfp.stage.label()}
                    </Badge>
                </div>
                <span class=confidence_class(rfp.confidence)>{format!("{}%", rfp.confidence)}</span>
            </div>
            <div class="live-status__client">{rfp.client.clone()}</div>
            <div class="live-status__activity">{activity}</div>
            <div class="progress">
                <div class=progress_class(&rfp) style=width></div>
            </div>
        </div>
    }
}

/// The next few RFPs coming due, with their workflow progress.
#[component]
pub fn LiveStatus() -> impl IntoView {
    let store = expect_context::<StoreHandle>();
    let config = expect_context::<ConsoleConfig>();
    let limit = config.dashboard.recent_limit;
    let urgent_days = config.dashboard.urgent_days;
    let rows = RwSignal::new(LoadState::<Vec<Rfp>>::Loading);

    Effect::new(move |_| {
        let store = store.clone();
        spawn_local(async move {
            let result = fetch_recent_rfps(store.store(), today(), limit).await;
            if let Err(e) = &result {
                log::error!("recent rfps fetch failed: {e}");
            }
            rows.set(LoadState::from_rows(result));
        });
    });

    view! {
        <div class="card live-status">
            <div class="card__header">
                <div class="card__title">
                    {icon("clock")}
                    <div>
                        <div>"Live RFP Status"</div>
                        <div class="card__subtitle">"Next RFPs coming due"</div>
                    </div>
                </div>
            </div>
            {move || match rows.get() {
                LoadState::Loading => view! { <div class="card__loading"><Spinner /></div> }.into_any(),
                LoadState::Failed(err) => view! { <div class="alert alert--error">{err}</div> }.into_any(),
                LoadState::Empty => view! { <div class="card__empty">"No upcoming RFPs"</div> }.into_any(),
                LoadState::Loaded(rfps) => rfps
                    .into_iter()
                    .map(|rfp| rfp_card(rfp, urgent_days))
                    .collect_view()
                    .into_any(),
            }}
        </div>
    }
}
