use crate::shared::components::stat_card::StatCard;
use crate::shared::store_client::StoreHandle;
use contracts::dashboards::d001_rfp_console::PipelineStats;
use contracts::domain::a001_rfp::Rfp;
use contracts::shared::load_state::LoadState;
use contracts::store::ops::fetch_all_rfps;
use contracts::store::StoreError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::Spinner;

fn stats_state(result: Result<Vec<Rfp>, StoreError>) -> LoadState<PipelineStats> {
    LoadState::from_rows(result).map(|rfps| PipelineStats::from_rfps(&rfps))
}

fn stat_cards(stats: PipelineStats) -> impl IntoView {
    let fixed = |text: String| Signal::derive(move || Some(text.clone()));
    view! {
        <div class="stats-row">
            <StatCard
                label="RFPs Scanned"
                icon_name="file-search"
                value=fixed(stats.total.to_string())
                confidence=fixed(stats.avg_confidence_label())
            />
            <StatCard label="Qualified" icon_name="check-circle" tone="info" value=fixed(stats.qualified.to_string()) />
            <StatCard label="In Progress" icon_name="clock" tone="warning" value=fixed(stats.in_progress.to_string()) />
            <StatCard
                label="Responses Submitted"
                icon_name="send"
                tone="success"
                value=fixed(stats.submitted.to_string())
            />
            <StatCard
                label="Success Rate"
                icon_name="trophy"
                tone="success"
                value=fixed(stats.success_rate_label())
                subtitle=fixed("Submitted share of all RFPs".to_string())
            />
        </div>
    }
}

/// Headline counters over every stored RFP.
#[component]
pub fn PipelineStatsRow() -> impl IntoView {
    let store = expect_context::<StoreHandle>();
    let state = RwSignal::new(LoadState::<PipelineStats>::Loading);

    Effect::new(move |_| {
        let store = store.clone();
        spawn_local(async move {
            let result = fetch_all_rfps(store.store()).await;
            if let Err(e) = &result {
                log::error!("pipeline stats fetch failed: {e}");
            }
            state.set(stats_state(result));
        });
    });

    move || match state.get() {
        LoadState::Loading => view! { <div class="card__loading"><Spinner /></div> }.into_any(),
        LoadState::Failed(err) => view! { <div class="alert alert--error">{err}</div> }.into_any(),
        LoadState::Empty => view! { <div class="card card__empty">"No RFPs scanned yet"</div> }.into_any(),
        LoadState::Loaded(stats) => stat_cards(stats).into_any(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_rfp::{Agent, Stage};
    use chrono::NaiveDate;

    fn rfp(stage: Stage) -> Rfp {
        Rfp {
            id: "RFP-1".into(),
            client: "NTPC".into(),
            due_date: NaiveDate::from_ymd_opt(2025, 11, 7).unwrap(),
            stage,
            confidence: 80,
            assigned_agent: Agent::Main,
            stock_requirement: None,
        }
    }

    #[test]
    fn test_stats_state_is_exclusive() {
        assert_eq!(stats_state(Ok(Vec::new())), LoadState::Empty);

        let failed = stats_state(Err(StoreError::Network("offline".into())));
        assert_eq!(failed, LoadState::Failed("network error: offline".into()));

        let loaded = stats_state(Ok(vec![rfp(Stage::Submitted), rfp(Stage::Qualified)]));
        let stats = loaded.loaded().copied().unwrap();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.success_rate_label(), "50%");
    }
}
