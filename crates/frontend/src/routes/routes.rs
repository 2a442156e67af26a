use crate::dashboards::RfpConsoleDashboard;
use leptos::prelude::*;

/// The console is a single page; there is no router.
#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <main class="app-main">
            <RfpConsoleDashboard />
        </main>
    }
}
