use crate::shared::date_utils::format_last_updated;
use crate::shared::icons::icon;
use chrono::Utc;
use leptos::prelude::*;

#[component]
pub fn DashboardHeader() -> impl IntoView {
    let loaded_at = format_last_updated(Utc::now());

    view! {
        <header class="console-header">
            <div>
                <h1 class="console-header__title">"Agentic AI RFP Console"</h1>
                <p class="console-header__subtitle">
                    "Live status of RFP responses powered by Sales, Technical & Pricing Agents"
                </p>
                <p class="console-header__updated">
                    <span class="console-header__dot"></span>
                    {format!("Last updated: {loaded_at}")}
                </p>
            </div>
            <div class="console-header__actions">{icon("bell")}</div>
        </header>
    }
}
