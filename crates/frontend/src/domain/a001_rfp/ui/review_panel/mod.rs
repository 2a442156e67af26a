use super::{confidence_class, stage_badge_color};
use crate::shared::date_utils::format_due_date;
use crate::shared::icons::icon;
use contracts::domain::a001_rfp::{Rfp, ReviewDecision, ReviewSink, ReviewSubmission, Stage};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::Arc;
use thaw::*;

/// Where reviewer decisions go, provided through context.
#[derive(Clone)]
pub struct ReviewSinkHandle(Arc<dyn ReviewSink + Send + Sync>);

impl ReviewSinkHandle {
    pub fn new(sink: impl ReviewSink + Send + Sync + 'static) -> Self {
        Self(Arc::new(sink))
    }

    pub fn sink(&self) -> &dyn ReviewSink {
        self.0.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Active,
    Pending,
}

impl StepStatus {
    fn label(&self) -> &'static str {
        match self {
            StepStatus::Completed => "completed",
            StepStatus::Active => "active",
            StepStatus::Pending => "pending",
        }
    }

    fn color(&self) -> BadgeColor {
        match self {
            StepStatus::Completed => BadgeColor::Success,
            StepStatus::Active => BadgeColor::Informative,
            StepStatus::Pending => BadgeColor::Subtle,
        }
    }
}

/// Position of `step` relative to the RFP's current stage.
pub fn step_status(current: Stage, step: Stage) -> StepStatus {
    let reached = current.progress_percent();
    let at = step.progress_percent();
    if current == Stage::Submitted || at < reached {
        StepStatus::Completed
    } else if at == reached {
        StepStatus::Active
    } else {
        StepStatus::Pending
    }
}

fn decision_icon(decision: ReviewDecision) -> &'static str {
    match decision {
        ReviewDecision::Approve => "check-circle",
        ReviewDecision::RequestRevision => "rotate-ccw",
        ReviewDecision::Comment => "message",
        ReviewDecision::Reject => "x-circle",
    }
}

fn details_view(rfp: Rfp) -> impl IntoView {
    let bar_style = format!("width: {}%;", rfp.confidence);
    view! {
        <div class="review__details">
            <div class="review__heading">
                <div>
                    <div class="review__title">"RFP Review & Analysis"</div>
                    <div class="card__subtitle">{format!("{} — {}", rfp.id, rfp.client)}</div>
                </div>
                <Badge appearance=BadgeAppearance::Tint color=stage_badge_color(rfp.stage)>
                    {rfp.stage.label()}
                </Badge>
            </div>

            <div class="review__section">
                <div class="review__section-title">"Workflow"</div>
                {Stage::workflow()
                    .into_iter()
                    .map(|step| {
                        let status = step_status(rfp.stage, step);
                        view! {
                            <div class="review__step">
                                <span>{step.label()}</span>
                                <Badge appearance=BadgeAppearance::Tint color=status.color()>
                                    {status.label()}
                                </Badge>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="review__section">
                <div class="review__section-title">"Confidence"</div>
                <div class="review__step">
                    <span>{rfp.assigned_agent.label()}</span>
                    <span class=confidence_class(rfp.confidence)>{format!("{}%", rfp.confidence)}</span>
                </div>
                <div class="progress">
                    <div class="progress__bar progress__bar--info" style=bar_style></div>
                </div>
            </div>

            <div class="review__section">
                <div class="review__section-title">"Stock Availability"</div>
                <p><b>"Requirement: "</b>{rfp.stock_requirement_display().to_string()}</p>
                <p><b>"Due: "</b>{format_due_date(rfp.due_date)}</p>
            </div>
        </div>
    }
}

/// Details of the selected RFP plus the reviewer actions.
#[component]
pub fn ReviewPanel(
    #[prop(into)]
    selected: Signal<Option<Rfp>>,
) -> impl IntoView {
    let sink = expect_context::<ReviewSinkHandle>();
    let comment = RwSignal::new(String::new());
    let (pending, set_pending) = signal(false);
    let (message, set_message) = signal::<Option<(bool, String)>>(None);

    // A new selection starts with a clean form.
    Effect::new(move |_| {
        selected.track();
        comment.set(String::new());
        set_message.set(None);
    });

    let submit = Callback::new(move |decision: ReviewDecision| {
        let Some(rfp) = selected.get_untracked() else {
            return;
        };
        let submission = match ReviewSubmission::new(rfp.id, decision, &comment.get_untracked()) {
            Ok(submission) => submission,
            Err(e) => {
                set_message.set(Some((false, e.to_string())));
                return;
            }
        };

        let sink = sink.clone();
        set_pending.set(true);
        spawn_local(async move {
            match sink.sink().submit_review(&submission).await {
                Ok(()) => {
                    comment.set(String::new());
                    set_message.set(Some((true, format!("{} recorded", submission.decision.label()))));
                }
                Err(e) => {
                    log::warn!("review submission failed: {e}");
                    set_message.set(Some((false, e.to_string())));
                }
            }
            set_pending.set(false);
        });
    });

    view! {
        <div class="card review">
            {move || match selected.get() {
                Some(rfp) => details_view(rfp).into_any(),
                None => view! {
                    <div class="card__empty">"Select an RFP in the deadlines table to review it"</div>
                }
                .into_any(),
            }}

            <Show when=move || selected.with(Option::is_some)>
                <div class="review__section">
                    <div class="review__section-title">"Reviewer Actions"</div>
                    <Textarea value=comment placeholder="Add comment to agent..." attr:rows=3 />
                    {move || message.get().map(|(ok, text)| {
                        let class = if ok { "alert alert--success" } else { "alert alert--error" };
                        view! { <div class=class>{text}</div> }
                    })}
                    <div class="review__actions">
                        {ReviewDecision::all()
                            .into_iter()
                            .map(|decision| view! {
                                <Button
                                    appearance=if decision == ReviewDecision::Approve {
                                        ButtonAppearance::Primary
                                    } else {
                                        ButtonAppearance::Secondary
                                    }
                                    disabled=pending
                                    on_click=move |_| submit.run(decision)
                                >
                                    {icon(decision_icon(decision))}
                                    {decision.label()}
                                </Button>
                            })
                            .collect_view()}
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_status_follows_workflow() {
        assert_eq!(step_status(Stage::Priced, Stage::Qualified), StepStatus::Completed);
        assert_eq!(step_status(Stage::Priced, Stage::Priced), StepStatus::Active);
        assert_eq!(step_status(Stage::Priced, Stage::Submitted), StepStatus::Pending);
        assert_eq!(step_status(Stage::Submitted, Stage::Submitted), StepStatus::Completed);
        assert_eq!(step_status(Stage::Unknown, Stage::Qualified), StepStatus::Pending);
    }
}
