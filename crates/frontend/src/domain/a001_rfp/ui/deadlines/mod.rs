pub mod state;

use self::state::{create_state, stage_from_select, stage_select_value, ALL};
use super::{confidence_class, stage_badge_color};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::ConsoleConfig;
use crate::shared::date_utils::{days_left_label, format_due_date, today};
use crate::shared::list_utils::{get_sort_class, get_sort_indicator, SearchInput};
use crate::shared::store_client::StoreHandle;
use contracts::domain::a001_rfp::{
    ConfidenceBand, DeadlineSortKey, DeadlineTotals, DeadlineWindow, Rfp, Stage,
};
use contracts::shared::fetch_sequence::FetchSequence;
use contracts::shared::list_query::{run_pipeline, PageRequest, PipelineOutput};
use contracts::shared::load_state::LoadState;
use contracts::store::ops::fetch_deadlines;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Deadlines table: search and stage go to the store, the window and
/// confidence filters, sorting and paging run over the returned rows.
#[component]
pub fn DeadlinesTable(
    /// Called with the clicked row
    on_select: Callback<Rfp>,
) -> impl IntoView {
    let store = expect_context::<StoreHandle>();
    let config = expect_context::<ConsoleConfig>();
    let page_size = config.dashboard.page_size;
    let urgent_days = config.dashboard.urgent_days;
    let debounce_ms = config.dashboard.debounce_ms;

    let state = create_state();
    let rows = RwSignal::new(LoadState::<Vec<Rfp>>::Loading);
    let sequence = StoredValue::new(FetchSequence::new());

    let store_query = Memo::new(move |_| state.with(|s| (s.search.clone(), s.stage)));

    Effect::new(move |_| {
        let (search, stage) = store_query.get();
        let ticket = sequence.with_value(|s| s.issue());
        let store = store.clone();
        rows.set(LoadState::Loading);

        spawn_local(async move {
            let result = fetch_deadlines(store.store(), &search, stage).await;
            if !sequence.with_value(|s| s.is_current(ticket)) {
                log::debug!("dropping stale deadlines response");
                return;
            }
            if let Err(e) = &result {
                log::error!("deadlines fetch failed: {e}");
            }
            rows.set(LoadState::from_rows(result));
        });
    });

    let stage_select = RwSignal::new(stage_select_value(state.with_untracked(|s| s.stage)));
    Effect::new(move || {
        let code = stage_select.get();
        untrack(move || {
            state.update(|s| {
                s.stage = stage_from_select(&code);
                s.page = 1;
            })
        });
    });

    let window_select = RwSignal::new(DeadlineWindow::All.code().to_string());
    Effect::new(move || {
        let code = window_select.get();
        untrack(move || {
            state.update(|s| {
                s.window = DeadlineWindow::from_code(&code);
                s.page = 1;
            })
        });
    });

    let confidence_select = RwSignal::new(ALL.to_string());
    Effect::new(move || {
        let code = confidence_select.get();
        untrack(move || {
            state.update(|s| {
                s.confidence = ConfidenceBand::from_code(&code);
                s.page = 1;
            })
        });
    });

    let output = Signal::derive(move || -> Option<PipelineOutput<Rfp>> {
        let today = today();
        let (filter, sort, page) = state.with(|s| (s.filter(today), s.sort, s.page));
        rows.with(|r| {
            r.loaded()
                .map(|rows| run_pipeline(rows, &filter, &sort, PageRequest::new(page, page_size)))
        })
    });

    let totals = Signal::derive(move || {
        output.with(|o| {
            o.as_ref()
                .map(|o| DeadlineTotals::over(&o.matched, today(), urgent_days))
                .unwrap_or_default()
        })
    });

    let toggle_sort = move |key: DeadlineSortKey| {
        state.update(|s| {
            s.sort = s.sort.clicked(key);
            s.page = 1;
        });
    };

    let go_to_page = move |page: usize| state.update(|s| s.page = page);

    let sort_header = move |key: DeadlineSortKey, label: &'static str| {
        view! {
            <div class="table__sortable-header" style="cursor: pointer;" on:click=move |_| toggle_sort(key)>
                {label}
                <span class=move || state.with(|s| get_sort_class(&s.sort, key))>
                    {move || state.with(|s| get_sort_indicator(&s.sort, key))}
                </span>
            </div>
        }
    };

    let table_body = move || {
        let current = rows.get();
        match current {
            LoadState::Loading => view! {
                <div class="table__placeholder"><Spinner /></div>
            }
            .into_any(),
            LoadState::Failed(err) => view! {
                <div class="alert alert--error">{err}</div>
            }
            .into_any(),
            LoadState::Empty => view! {
                <div class="table__placeholder">"No RFPs found"</div>
            }
            .into_any(),
            LoadState::Loaded(_) => {
                let visible = output.with(|o| o.as_ref().map(|o| o.page.rows.clone()).unwrap_or_default());
                if visible.is_empty() {
                    return view! {
                        <div class="table__placeholder">"No RFPs match the current filters"</div>
                    }
                    .into_any();
                }
                let today = today();
                view! {
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>{sort_header(DeadlineSortKey::Id, "RFP ID")}</TableHeaderCell>
                                <TableHeaderCell>{sort_header(DeadlineSortKey::Client, "Client")}</TableHeaderCell>
                                <TableHeaderCell>{sort_header(DeadlineSortKey::DueDate, "Due Date")}</TableHeaderCell>
                                <TableHeaderCell>"Stage"</TableHeaderCell>
                                <TableHeaderCell>{sort_header(DeadlineSortKey::Confidence, "Confidence")}</TableHeaderCell>
                                <TableHeaderCell>"Assigned Agent"</TableHeaderCell>
                                <TableHeaderCell>"Stock Requirement"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {visible
                                .into_iter()
                                .map(|rfp| {
                                    let urgent = rfp.is_urgent(today, urgent_days);
                                    let row_id = rfp.id.clone();
                                    let is_selected = move || {
                                        state.with(|s| s.selected_id.as_deref() == Some(row_id.as_str()))
                                    };
                                    let clicked = rfp.clone();
                                    let id = rfp.id.clone();
                                    let client = rfp.client.clone();
                                    let due_date = format_due_date(rfp.due_date);
                                    let days_left = days_left_label(rfp.days_left(today));
                                    let stage = rfp.stage;
                                    let confidence = rfp.confidence;
                                    let agent_label = rfp.assigned_agent.label();
                                    let stock = rfp.stock_requirement_display().to_string();
                                    view! {
                                        <TableRow
                                            class:table__row--selected=is_selected
                                            class:table__row--urgent=urgent
                                            on:click=move |_| {
                                                state.update(|s| s.selected_id = Some(clicked.id.clone()));
                                                on_select.run(clicked.clone());
                                            }
                                        >
                                            <TableCell><TableCellLayout>{id.clone()}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{client.clone()}</TableCellLayout></TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <div class="deadline">
                                                        <span>{due_date.clone()}</span>
                                                        <span class=if urgent { "deadline__left deadline__left--urgent" } else { "deadline__left" }>
                                                            {days_left.clone()}
                                                        </span>
                                                    </div>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <Badge appearance=BadgeAppearance::Tint color=stage_badge_color(stage)>
                                                        {stage.label()}
                                                    </Badge>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    <span class=confidence_class(confidence)>{format!("{}%", confidence)}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell><TableCellLayout>{agent_label}</TableCellLayout></TableCell>
                                            <TableCell><TableCellLayout truncate=true>{stock.clone()}</TableCellLayout></TableCell>
                                        </TableRow>
                                    }
                                })
                                .collect_view()}
                        </TableBody>
                    </Table>
                }
                .into_any()
            }
        }
    };

    view! {
        <div class="card deadlines">
            <div class="card__header">
                <div class="card__title">
                    <span>"Upcoming RFP Deadlines"</span>
                    {move || {
                        let count = state.with(|s| s.active_filters_count());
                        (count > 0).then(|| view! { <span class="filter-panel__badge">{count}</span> })
                    }}
                </div>
            </div>

            <div class="filter-panel-content">
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <SearchInput
                        value=Signal::derive(move || state.with(|s| s.search.clone()))
                        on_change=Callback::new(move |term: String| {
                            state.update(|s| {
                                s.search = term;
                                s.page = 1;
                            })
                        })
                        placeholder="Search RFP ID or client..."
                        debounce_ms=debounce_ms
                    />
                    <Select value=stage_select>
                        <option value=ALL>"All Stages"</option>
                        {Stage::workflow()
                            .into_iter()
                            .map(|stage| view! { <option value=stage.code()>{stage.label()}</option> })
                            .collect_view()}
                    </Select>
                    <Select value=window_select>
                        {DeadlineWindow::all()
                            .into_iter()
                            .map(|w| view! { <option value=w.code()>{w.label()}</option> })
                            .collect_view()}
                    </Select>
                    <Select value=confidence_select>
                        <option value=ALL>"All Confidence"</option>
                        {ConfidenceBand::all()
                            .into_iter()
                            .map(|band| view! { <option value=band.code()>{band.label()}</option> })
                            .collect_view()}
                    </Select>
                </Flex>
            </div>

            <div class="table-wrapper">{table_body}</div>

            <div class="card__footer">
                <span class="deadlines__totals">
                    {move || {
                        let t = totals.get();
                        format!("Total: {} | Urgent (≤{} days): {}", t.total, urgent_days, t.urgent)
                    }}
                </span>
                <PaginationControls
                    current_page=Signal::derive(move || output.with(|o| o.as_ref().map_or(1, |o| o.page.page)))
                    total_pages=Signal::derive(move || output.with(|o| o.as_ref().map_or(1, |o| o.page.page_count)))
                    total_count=Signal::derive(move || output.with(|o| o.as_ref().map_or(0, |o| o.page.total_matches)))
                    shown_range=Signal::derive(move || {
                        output.with(|o| o.as_ref().map_or((0, 0), |o| (o.page.first_row, o.page.last_row)))
                    })
                    on_page_change=Callback::new(go_to_page)
                />
            </div>
        </div>
    }
}
