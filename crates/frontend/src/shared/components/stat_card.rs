use crate::shared::icons::icon;
use leptos::prelude::*;

/// Pipeline counter card. `value == None` renders a dash (loading or failed).
#[component]
pub fn StatCard(
    /// Label displayed under the value
    label: &'static str,
    /// Icon name from the icon() helper
    icon_name: &'static str,
    #[prop(into)]
    value: Signal<Option<String>>,
    #[prop(into, optional)]
    subtitle: Signal<Option<String>>,
    /// Footer line with the average confidence, when known
    #[prop(into, optional)]
    confidence: Signal<Option<String>>,
    /// Extra modifier class for the icon colour
    #[prop(optional)]
    tone: &'static str,
) -> impl IntoView {
    let icon_class = if tone.is_empty() {
        "stat-card__icon".to_string()
    } else {
        format!("stat-card__icon stat-card__icon--{tone}")
    };

    view! {
        <div class="stat-card">
            <div class=icon_class>{icon(icon_name)}</div>
            <div class="stat-card__content">
                <div class="stat-card__value">
                    {move || value.get().unwrap_or_else(|| "—".to_string())}
                </div>
                <div class="stat-card__label">{label}</div>
                {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
            </div>
            {move || {
                confidence.get().map(|c| view! {
                    <div class="stat-card__footer">
                        <span class="stat-card__footer-label">"Avg Confidence"</span>
                        <span class="stat-card__footer-value">{c}</span>
                    </div>
                })
            }}
        </div>
    }
}
