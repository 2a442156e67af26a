pub mod state;

use self::state::{create_state, margin_from_select, unit_from_select, ALL};
use crate::domain::a002_inventory::ui::add_dialog::AddInventoryDialog;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::ConsoleConfig;
use crate::shared::date_utils::format_timestamp;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::store_client::StoreHandle;
use contracts::domain::a002_inventory::{
    InventoryItem, InventorySortKey, InventoryTotals, MarginBand, StockFilter, Unit,
};
use contracts::shared::fetch_sequence::FetchSequence;
use contracts::shared::list_query::{run_pipeline, PageRequest, PipelineOutput};
use contracts::shared::load_state::LoadState;
use contracts::store::ops::fetch_inventory;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn margin_color(band: MarginBand) -> BadgeColor {
    match band {
        MarginBand::High => BadgeColor::Success,
        MarginBand::Mid => BadgeColor::Warning,
        MarginBand::Low => BadgeColor::Danger,
        MarginBand::Unknown => BadgeColor::Subtle,
    }
}

/// Trims float noise from quantities: `800.0` shows as `800`.
fn format_quantity(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn item_row(item: InventoryItem) -> impl IntoView {
    let out_of_stock = item.is_out_of_stock();
    view! {
        <TableRow>
            <TableCell><TableCellLayout>{item.sku_id.clone()}</TableCellLayout></TableCell>
            <TableCell>
                <TableCellLayout>
                    <span class:inventory__qty--out=out_of_stock>{format_quantity(item.current_stock_qty)}</span>
                </TableCellLayout>
            </TableCell>
            <TableCell><TableCellLayout>{item.unit.code().to_string()}</TableCellLayout></TableCell>
            <TableCell><TableCellLayout>{format!("{} days", item.lead_time_days)}</TableCellLayout></TableCell>
            <TableCell><TableCellLayout>{format_quantity(item.avg_cost)}</TableCellLayout></TableCell>
            <TableCell><TableCellLayout>{format_quantity(item.base_price)}</TableCellLayout></TableCell>
            <TableCell>
                <TableCellLayout>
                    <Badge appearance=BadgeAppearance::Tint color=margin_color(item.margin_band)>
                        {item.margin_band.code()}
                    </Badge>
                </TableCellLayout>
            </TableCell>
            <TableCell><TableCellLayout>{format_timestamp(item.created_at)}</TableCellLayout></TableCell>
            <TableCell><TableCellLayout>{format_timestamp(item.updated_at)}</TableCellLayout></TableCell>
        </TableRow>
    }
}

#[component]
pub fn InventoryPanel() -> impl IntoView {
    let store = expect_context::<StoreHandle>();
    let config = expect_context::<ConsoleConfig>();
    let page_size = config.dashboard.page_size;
    let debounce_ms = config.dashboard.debounce_ms;

    let state = create_state();
    let rows = RwSignal::new(LoadState::<Vec<InventoryItem>>::Loading);
    let sequence = StoredValue::new(FetchSequence::new());
    let reload = RwSignal::new(0u32);
    let dialog_open = RwSignal::new(false);

    Effect::new(move |_| {
        reload.track();
        let ticket = sequence.with_value(|s| s.issue());
        let store = store.clone();

        spawn_local(async move {
            let result = fetch_inventory(store.store()).await;
            if !sequence.with_value(|s| s.is_current(ticket)) {
                return;
            }
            if let Err(e) = &result {
                log::error!("inventory fetch failed: {e}");
            }
            rows.set(LoadState::from_rows(result));
        });
    });

    let unit_select = RwSignal::new(ALL.to_string());
    Effect::new(move || {
        let code = unit_select.get();
        untrack(move || {
            state.update(|s| {
                s.unit = unit_from_select(&code);
                s.page = 1;
            })
        });
    });

    let margin_select = RwSignal::new(ALL.to_string());
    Effect::new(move || {
        let code = margin_select.get();
        untrack(move || {
            state.update(|s| {
                s.margin = margin_from_select(&code);
                s.page = 1;
            })
        });
    });

    let stock_select = RwSignal::new(StockFilter::All.code().to_string());
    Effect::new(move || {
        let code = stock_select.get();
        untrack(move || {
            state.update(|s| {
                s.stock = StockFilter::from_code(&code);
                s.page = 1;
            })
        });
    });

    let sort_select = RwSignal::new(state.with_untracked(|s| s.sort.key.code().to_string()));
    Effect::new(move || {
        let code = sort_select.get();
        untrack(move || {
            state.update(|s| {
                s.sort.key = InventorySortKey::from_code(&code);
                s.page = 1;
            })
        });
    });

    let output = Signal::derive(move || -> Option<PipelineOutput<InventoryItem>> {
        let (filter, sort, page) = state.with(|s| (s.filter(), s.sort, s.page));
        rows.with(|r| {
            r.loaded()
                .map(|rows| run_pipeline(rows, &filter, &sort, PageRequest::new(page, page_size)))
        })
    });

    let totals = Signal::derive(move || {
        output.with(|o| o.as_ref().map(|o| InventoryTotals::over(&o.matched)).unwrap_or_default())
    });

    let toggle_direction = move |_| {
        state.update(|s| {
            s.sort.direction = s.sort.direction.toggled();
            s.page = 1;
        })
    };

    let table_body = move || match rows.get() {
        LoadState::Loading => view! { <div class="table__placeholder"><Spinner /></div> }.into_any(),
        LoadState::Failed(err) => view! { <div class="alert alert--error">{err}</div> }.into_any(),
        LoadState::Empty | LoadState::Loaded(_) => {
            let visible = output.with(|o| o.as_ref().map(|o| o.page.rows.clone()).unwrap_or_default());
            view! {
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"SKU"</TableHeaderCell>
                            <TableHeaderCell>"Stock"</TableHeaderCell>
                            <TableHeaderCell>"Unit"</TableHeaderCell>
                            <TableHeaderCell>"Lead Time"</TableHeaderCell>
                            <TableHeaderCell>"Avg Cost"</TableHeaderCell>
                            <TableHeaderCell>"Base Price"</TableHeaderCell>
                            <TableHeaderCell>"Margin"</TableHeaderCell>
                            <TableHeaderCell>"Created"</TableHeaderCell>
                            <TableHeaderCell>"Updated"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {if visible.is_empty() {
                            view! {
                                <TableRow>
                                    <TableCell attr:colspan="9">
                                        <div class="table__placeholder">"No results found."</div>
                                    </TableCell>
                                </TableRow>
                            }
                            .into_any()
                        } else {
                            visible.into_iter().map(item_row).collect_view().into_any()
                        }}
                    </TableBody>
                </Table>
            }
            .into_any()
        }
    };

    view! {
        <div class="card inventory">
            <div class="card__header">
                <div>
                    <div class="card__title">"Manage your Inventory"</div>
                    <div class="card__subtitle">
                        {move || {
                            let t = totals.get();
                            format!("{} SKUs • {} out of stock", t.total_skus, t.out_of_stock)
                        }}
                    </div>
                </div>
                <Flex gap=FlexGap::Small align=FlexAlign::End>
                    <SearchInput
                        value=Signal::derive(move || state.with(|s| s.search.clone()))
                        on_change=Callback::new(move |term: String| {
                            state.update(|s| {
                                s.search = term;
                                s.page = 1;
                            })
                        })
                        placeholder="Search SKU..."
                        debounce_ms=debounce_ms
                    />
                    <Select value=unit_select>
                        <option value=ALL>"All Units"</option>
                        {Unit::offered()
                            .into_iter()
                            .map(|unit| {
                                let code = unit.code().to_string();
                                view! { <option value=code.clone()>{code.clone()}</option> }
                            })
                            .collect_view()}
                    </Select>
                    <Select value=margin_select>
                        <option value=ALL>"All Margin"</option>
                        {MarginBand::selectable()
                            .into_iter()
                            .map(|band| view! { <option value=band.code()>{band.label()}</option> })
                            .collect_view()}
                    </Select>
                    <Select value=stock_select>
                        {StockFilter::all()
                            .into_iter()
                            .map(|f| view! { <option value=f.code()>{f.label()}</option> })
                            .collect_view()}
                    </Select>
                    <Select value=sort_select>
                        {InventorySortKey::all()
                            .into_iter()
                            .map(|key| view! { <option value=key.code()>{key.label()}</option> })
                            .collect_view()}
                    </Select>
                    <Button appearance=ButtonAppearance::Secondary on_click=toggle_direction>
                        {move || state.with(|s| s.sort.direction.label())}
                    </Button>
                    <Button appearance=ButtonAppearance::Primary on_click=move |_| dialog_open.set(true)>
                        {icon("plus")}
                        "Add to Inventory"
                    </Button>
                </Flex>
            </div>

            <div class="table-wrapper">{table_body}</div>

            <div class="card__footer">
                <PaginationControls
                    current_page=Signal::derive(move || output.with(|o| o.as_ref().map_or(1, |o| o.page.page)))
                    total_pages=Signal::derive(move || output.with(|o| o.as_ref().map_or(1, |o| o.page.page_count)))
                    total_count=Signal::derive(move || output.with(|o| o.as_ref().map_or(0, |o| o.page.total_matches)))
                    shown_range=Signal::derive(move || {
                        output.with(|o| o.as_ref().map_or((0, 0), |o| (o.page.first_row, o.page.last_row)))
                    })
                    on_page_change=Callback::new(move |page: usize| state.update(|s| s.page = page))
                />
            </div>

            <AddInventoryDialog
                open=dialog_open
                on_saved=Callback::new(move |_| reload.update(|n| *n += 1))
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(800.0), "800");
        assert_eq!(format_quantity(12.5), "12.50");
        assert_eq!(format_quantity(0.0), "0");
    }
}
