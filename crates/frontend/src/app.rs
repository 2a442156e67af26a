use crate::domain::a001_rfp::ui::review_panel::ReviewSinkHandle;
use crate::routes::routes::AppRoutes;
use crate::shared::config::load_config;
use crate::shared::store_client::{PostgrestStore, StoreHandle};
use contracts::domain::a001_rfp::PendingReviewSink;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = load_config();

    // Row-store client shared by every widget.
    provide_context(StoreHandle::new(PostgrestStore::new(&config.store)));
    provide_context(ReviewSinkHandle::new(PendingReviewSink));
    provide_context(config);

    view! {
        <AppRoutes />
    }
}
