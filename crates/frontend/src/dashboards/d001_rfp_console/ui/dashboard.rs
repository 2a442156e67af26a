use super::header::DashboardHeader;
use super::stats::PipelineStatsRow;
use crate::domain::a001_rfp::ui::calendar::CalendarWidget;
use crate::domain::a001_rfp::ui::deadlines::DeadlinesTable;
use crate::domain::a001_rfp::ui::live_status::LiveStatus;
use crate::domain::a001_rfp::ui::review_panel::ReviewPanel;
use crate::domain::a002_inventory::ui::list::InventoryPanel;
use contracts::domain::a001_rfp::Rfp;
use leptos::prelude::*;

/// The single console page. Widgets fetch independently; the only shared
/// state is the RFP picked in the deadlines table.
#[component]
pub fn RfpConsoleDashboard() -> impl IntoView {
    let selected = RwSignal::new(None::<Rfp>);

    view! {
        <div class="console">
            <DashboardHeader />
            <PipelineStatsRow />
            <div class="console__grid">
                <LiveStatus />
                <CalendarWidget />
            </div>
            <DeadlinesTable on_select=Callback::new(move |rfp: Rfp| selected.set(Some(rfp))) />
            <ReviewPanel selected=selected />
            <InventoryPanel />
        </div>
    }
}
