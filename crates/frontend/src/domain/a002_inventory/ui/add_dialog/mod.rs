use crate::shared::store_client::StoreHandle;
use contracts::domain::a002_inventory::{
    Conductor, Cores, Csa, Insulation, InventoryDraft, MarginBand, SkuSelection, Special, Unit,
};
use contracts::domain::common::DraftField;
use contracts::store::ops::{save_inventory_item, SaveError};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Raw contents of the dialog controls.
#[derive(Debug, Clone, PartialEq)]
pub struct DialogInputs {
    pub conductor: String,
    pub insulation: String,
    pub cores: String,
    pub csa: String,
    pub special: String,
    pub stock: String,
    pub unit: String,
    pub lead_time: String,
    pub avg_cost: String,
    pub base_price: String,
    pub margin: String,
}

/// Blank numeric fields count as zero; anything unparseable becomes NaN and
/// is rejected by validation.
pub fn parse_number(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        0.0
    } else {
        raw.parse().unwrap_or(f64::NAN)
    }
}

impl DialogInputs {
    /// Select values are always codes of the offered options; an unexpected
    /// one falls back to the default selection.
    pub fn selection(&self) -> SkuSelection {
        let default = SkuSelection::default();
        SkuSelection {
            conductor: Conductor::from_code(&self.conductor).unwrap_or(default.conductor),
            insulation: Insulation::from_code(&self.insulation).unwrap_or(default.insulation),
            cores: Cores::from_code(&self.cores).unwrap_or(default.cores),
            csa: Csa::from_code(&self.csa).unwrap_or(default.csa),
            special: Special::from_code(&self.special).unwrap_or(default.special),
        }
    }

    pub fn to_draft(&self) -> InventoryDraft {
        InventoryDraft {
            selection: self.selection(),
            current_stock_qty: parse_number(&self.stock),
            unit: Unit::from(self.unit.clone()),
            lead_time_days: parse_number(&self.lead_time),
            avg_cost: parse_number(&self.avg_cost),
            base_price: parse_number(&self.base_price),
            margin_band: MarginBand::from_code(&self.margin),
        }
    }
}

#[derive(Clone, Copy)]
struct DialogFields {
    conductor: RwSignal<String>,
    insulation: RwSignal<String>,
    cores: RwSignal<String>,
    csa: RwSignal<String>,
    special: RwSignal<String>,
    stock: RwSignal<String>,
    unit: RwSignal<String>,
    lead_time: RwSignal<String>,
    avg_cost: RwSignal<String>,
    base_price: RwSignal<String>,
    margin: RwSignal<String>,
}

impl DialogFields {
    fn new(draft: &InventoryDraft) -> Self {
        let s = draft.selection;
        Self {
            conductor: RwSignal::new(s.conductor.code().to_string()),
            insulation: RwSignal::new(s.insulation.code().to_string()),
            cores: RwSignal::new(s.cores.code().to_string()),
            csa: RwSignal::new(s.csa.to_string()),
            special: RwSignal::new(s.special.code().to_string()),
            stock: RwSignal::new(draft.current_stock_qty.to_string()),
            unit: RwSignal::new(draft.unit.code().to_string()),
            lead_time: RwSignal::new(draft.lead_time_days.to_string()),
            avg_cost: RwSignal::new(draft.avg_cost.to_string()),
            base_price: RwSignal::new(draft.base_price.to_string()),
            margin: RwSignal::new(draft.margin_band.code().to_string()),
        }
    }

    fn inputs(&self) -> DialogInputs {
        DialogInputs {
            conductor: self.conductor.get(),
            insulation: self.insulation.get(),
            cores: self.cores.get(),
            csa: self.csa.get(),
            special: self.special.get(),
            stock: self.stock.get(),
            unit: self.unit.get(),
            lead_time: self.lead_time.get(),
            avg_cost: self.avg_cost.get(),
            base_price: self.base_price.get(),
            margin: self.margin.get(),
        }
    }

    fn reset_quantities(&self) {
        for field in [self.stock, self.lead_time, self.avg_cost, self.base_price] {
            field.set("0".to_string());
        }
    }
}

/// Error message plus the input it belongs to; `None` shows it under the form.
type DialogError = (Option<DraftField>, String);

fn dialog_error(err: &SaveError) -> DialogError {
    match err {
        SaveError::Invalid(invalid) => (invalid.field(), invalid.to_string()),
        SaveError::Store(store) => (None, store.to_string()),
    }
}

fn number_field(
    field: DraftField,
    label: &'static str,
    value: RwSignal<String>,
    error: ReadSignal<Option<DialogError>>,
) -> impl IntoView {
    let message = move || {
        error
            .get()
            .filter(|(at, _)| *at == Some(field))
            .map(|(_, text)| view! { <div class="form__error">{text}</div> })
    };
    view! {
        <Flex vertical=true gap=FlexGap::Small>
            <Label>{label}</Label>
            <input
                type="number"
                min="0"
                class="form__input"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            {message}
        </Flex>
    }
}

fn code_select(label: &'static str, value: RwSignal<String>, codes: Vec<String>) -> impl IntoView {
    view! {
        <Flex vertical=true gap=FlexGap::Small>
            <Label>{label}</Label>
            <Select value=value>
                {codes
                    .into_iter()
                    .map(|code| view! { <option value=code.clone()>{code.clone()}</option> })
                    .collect_view()}
            </Select>
        </Flex>
    }
}

fn codes<T: ToString>(items: impl IntoIterator<Item = T>) -> Vec<String> {
    items.into_iter().map(|item| item.to_string()).collect()
}

/// Dialog that builds a SKU from its attributes and upserts the item.
#[component]
pub fn AddInventoryDialog(
    open: RwSignal<bool>,
    /// Called after a successful save
    on_saved: Callback<()>,
) -> impl IntoView {
    let store = expect_context::<StoreHandle>();
    let fields = DialogFields::new(&InventoryDraft::default());
    let (saving, set_saving) = signal(false);
    let (error, set_error) = signal::<Option<DialogError>>(None);

    Effect::new(move |_| {
        if open.get() {
            set_error.set(None);
        }
    });

    let sku_preview = move || fields.inputs().selection().build().into_string();

    let submit = move |_| {
        if saving.get_untracked() {
            return;
        }
        let draft = untrack(|| fields.inputs()).to_draft();
        let store = store.clone();
        set_error.set(None);
        set_saving.set(true);

        spawn_local(async move {
            match save_inventory_item(store.store(), &draft).await {
                Ok(saved) => {
                    log::info!("saved inventory item {}", saved.sku_id);
                    fields.reset_quantities();
                    open.set(false);
                    on_saved.run(());
                }
                Err(e) => set_error.set(Some(dialog_error(&e))),
            }
            set_saving.set(false);
        });
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Add Inventory Item"</DialogTitle>
                    <DialogContent>
                        <div class="sku-preview">
                            <div class="sku-preview__label">"SKU Preview"</div>
                            <div class="sku-preview__value">{sku_preview}</div>
                        </div>
                        <div class="form__grid">
                            {code_select("Conductor", fields.conductor, codes(Conductor::all()))}
                            {code_select("Insulation / Construction", fields.insulation, codes(Insulation::all()))}
                            {code_select("Cores", fields.cores, codes(Cores::all()))}
                            {code_select("CSA (mm²)", fields.csa, codes(Csa::all()))}
                            {code_select("Special", fields.special, codes(Special::all()))}
                            {code_select("Margin", fields.margin, codes(MarginBand::selectable().iter().map(|b| b.code())))}
                            {number_field(DraftField::Stock, "Stock", fields.stock, error)}
                            {code_select("Unit", fields.unit, codes(Unit::offered().iter().map(|u| u.code().to_string())))}
                            {number_field(DraftField::LeadTime, "Lead Time (days)", fields.lead_time, error)}
                            {number_field(DraftField::AvgCost, "Avg Cost", fields.avg_cost, error)}
                            {number_field(DraftField::BasePrice, "Base Price", fields.base_price, error)}
                        </div>
                        {move || error.get().filter(|(at, _)| at.is_none()).map(|(_, err)| view! {
                            <div class="alert alert--error">{err}</div>
                        })}
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| open.set(false)
                            disabled=saving
                        >
                            "Cancel"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=submit
                            disabled=saving
                        >
                            {move || if saving.get() { "Adding..." } else { "Add Item" }}
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::ValidationError;
    use contracts::store::StoreError;

    fn inputs() -> DialogInputs {
        DialogInputs {
            conductor: "AL".into(),
            insulation: "FR-XLPE".into(),
            cores: "3.5C".into(),
            csa: "185".into(),
            special: "FRLS".into(),
            stock: "120".into(),
            unit: "m".into(),
            lead_time: "".into(),
            avg_cost: "80.5".into(),
            base_price: "99".into(),
            margin: "high".into(),
        }
    }

    #[test]
    fn test_inputs_build_the_sku() {
        let draft = inputs().to_draft();
        assert_eq!(draft.sku_preview().as_str(), "AL_FR-XLPE_3.5C_185_FRLS");
        assert_eq!(draft.lead_time_days, 0.0);
        assert_eq!(draft.margin_band, MarginBand::High);
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_unparseable_number_is_rejected() {
        let bad = DialogInputs {
            avg_cost: "12,5".into(),
            ..inputs()
        };
        assert_eq!(
            bad.to_draft().validate().unwrap_err(),
            ValidationError::NotFinite(DraftField::AvgCost)
        );

        let negative = DialogInputs {
            stock: "-1".into(),
            ..inputs()
        };
        assert_eq!(
            negative.to_draft().validate().unwrap_err().to_string(),
            "Stock cannot be negative"
        );
    }

    #[test]
    fn test_unknown_select_value_falls_back() {
        let odd = DialogInputs {
            csa: "999".into(),
            ..inputs()
        };
        assert_eq!(odd.selection().csa, SkuSelection::default().csa);
    }

    #[test]
    fn test_validation_errors_sit_under_their_input() {
        let fractional = DialogInputs {
            lead_time: "2.7".into(),
            ..inputs()
        };
        let err = SaveError::from(fractional.to_draft().validate().unwrap_err());
        assert_eq!(
            dialog_error(&err),
            (Some(DraftField::LeadTime), "Lead time must be a whole number".to_string())
        );

        let offline = SaveError::from(StoreError::Network("offline".into()));
        assert_eq!(dialog_error(&offline), (None, "network error: offline".to_string()));
    }
}
