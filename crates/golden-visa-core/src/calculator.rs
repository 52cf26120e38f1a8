use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Instant;

use crate::chart::{build_chart_series, ChartSlice};
use crate::error::VisaCalcError;
use crate::i18n::Locale;
use crate::schedule::{DependentCardPolicy, FeeSchedule};
use crate::tiers::{find_tier, resolve_tier_or_default, TierId};
use crate::types::*;
use crate::VisaCalcResult;

/// Largest accepted property price. Keeps every derived amount far from the
/// 96-bit decimal ceiling.
pub const MAX_CUSTOM_PRICE: Money = rust_decimal_macros::dec!(1_000_000_000_000_000);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One snapshot of the calculator form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostInput {
    pub tier_id: String,
    /// Property price override; blank, non-numeric or non-positive means "use the tier minimum"
    #[serde(
        deserialize_with = "lenient_price",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_price: Option<Money>,
    /// Includes the main applicant
    pub adults: u32,
    pub children_15_plus: u32,
    /// Also accepted as `minors` when no age split is recorded
    #[serde(alias = "minors")]
    pub children_under_15: u32,
    pub express_processing: bool,
    pub power_of_attorney: bool,
    pub use_max_health_insurance: bool,
    /// Language for chart labels
    pub locale: Locale,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VatLine {
    pub base: Money,
    pub vat: Money,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyCosts {
    pub transfer_tax: Money,
    pub consultancy: VatLine,
    pub notary: VatLine,
    pub lawyer: VatLine,
    pub government_registration: Money,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermitCosts {
    pub application_prep: Money,
    pub main_card: Money,
    pub dependent_cards: Money,
    pub health_insurance: Money,
    pub translation: Money,
    pub express_fee: Money,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionalCosts {
    pub bank_account_tax_number: Money,
    pub power_of_attorney_fee: Money,
    pub total: Money,
}

/// Full itemised result of one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub tier: TierId,
    pub purchase_price: Money,
    /// True when a custom price below the tier minimum was raised to it
    pub price_floor_applied: bool,
    pub total_family_members: u32,
    pub property: PropertyCosts,
    pub permit: PermitCosts,
    pub additional: AdditionalCosts,
    pub grand_total: Money,
    pub chart_series: Vec<ChartSlice>,
    /// True when the tier id was unknown and the first tier was used
    pub tier_fallback: bool,
}

// ---------------------------------------------------------------------------
// Input construction
// ---------------------------------------------------------------------------

impl Default for CostInput {
    fn default() -> Self {
        Self {
            tier_id: TierId::Tier250.as_str().to_string(),
            custom_price: None,
            adults: 1,
            children_15_plus: 0,
            children_under_15: 0,
            express_processing: false,
            power_of_attorney: false,
            use_max_health_insurance: false,
            locale: Locale::En,
        }
    }
}

impl CostInput {
    pub fn builder() -> CostInputBuilder {
        CostInputBuilder {
            input: CostInput::default(),
        }
    }

    /// Everyone on the application, main applicant included.
    pub fn total_family_members(&self) -> u32 {
        self.adults
            .saturating_add(self.children_15_plus)
            .saturating_add(self.children_under_15)
    }

    /// Reject structurally invalid input. Deserialized input must pass
    /// through here before reaching [`compute`].
    pub fn validate(&self) -> VisaCalcResult<()> {
        if find_tier(&self.tier_id).is_none() {
            return Err(VisaCalcError::InvalidInput {
                field: "tier_id".into(),
                reason: format!(
                    "Unknown tier '{}' (expected tier-250, tier-400 or tier-800)",
                    self.tier_id
                ),
            });
        }
        if self.adults == 0 {
            return Err(VisaCalcError::InvalidInput {
                field: "adults".into(),
                reason: "At least the main applicant is required".into(),
            });
        }
        if let Some(price) = self.custom_price {
            if price < Decimal::ZERO {
                return Err(VisaCalcError::InvalidInput {
                    field: "custom_price".into(),
                    reason: "Custom price must be non-negative".into(),
                });
            }
            if price > MAX_CUSTOM_PRICE {
                return Err(VisaCalcError::InvalidInput {
                    field: "custom_price".into(),
                    reason: format!("Custom price must not exceed {MAX_CUSTOM_PRICE}"),
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CostInputBuilder {
    input: CostInput,
}

impl CostInputBuilder {
    pub fn tier(mut self, id: impl Into<String>) -> Self {
        self.input.tier_id = id.into();
        self
    }

    pub fn tier_id(self, id: TierId) -> Self {
        self.tier(id.as_str())
    }

    pub fn custom_price(mut self, price: Money) -> Self {
        self.input.custom_price = Some(price);
        self
    }

    /// Take the price straight from a free-text field.
    pub fn custom_price_text(mut self, raw: &str) -> Self {
        self.input.custom_price = parse_custom_price(raw);
        self
    }

    pub fn adults(mut self, n: u32) -> Self {
        self.input.adults = n;
        self
    }

    pub fn children_15_plus(mut self, n: u32) -> Self {
        self.input.children_15_plus = n;
        self
    }

    pub fn children_under_15(mut self, n: u32) -> Self {
        self.input.children_under_15 = n;
        self
    }

    /// Children without an age split. Counted in the under-15 band.
    pub fn minors(self, n: u32) -> Self {
        self.children_15_plus(0).children_under_15(n)
    }

    pub fn express_processing(mut self, on: bool) -> Self {
        self.input.express_processing = on;
        self
    }

    pub fn power_of_attorney(mut self, on: bool) -> Self {
        self.input.power_of_attorney = on;
        self
    }

    pub fn premium_health_insurance(mut self, on: bool) -> Self {
        self.input.use_max_health_insurance = on;
        self
    }

    pub fn locale(mut self, locale: Locale) -> Self {
        self.input.locale = locale;
        self
    }

    pub fn build(self) -> VisaCalcResult<CostInput> {
        self.input.validate()?;
        Ok(self.input)
    }
}

/// Interpret the free-text price field. Blank, non-numeric and
/// non-positive text all mean "no override".
pub fn parse_custom_price(raw: &str) -> Option<Money> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<Decimal>()
        .ok()
        .filter(|v| *v > Decimal::ZERO)
}

/// Accept a number, a numeric string, blank text or null.
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Amount(Decimal),
        Text(String),
    }

    Ok(match Option::<RawPrice>::deserialize(deserializer)? {
        Some(RawPrice::Amount(v)) => Some(v),
        Some(RawPrice::Text(s)) => parse_custom_price(&s),
        None => None,
    })
}

// ---------------------------------------------------------------------------
// Main calculation
// ---------------------------------------------------------------------------

/// Compute the cost breakdown with the standard fee schedule.
pub fn compute(input: &CostInput) -> Breakdown {
    compute_with(input, &FeeSchedule::standard())
}

/// Compute the cost breakdown against an explicit fee schedule.
///
/// Total over its input: an unknown tier falls back to the first tier, a
/// price below the tier minimum is raised to it, and a price above
/// [`MAX_CUSTOM_PRICE`] is capped. Sums saturate rather than overflow.
pub fn compute_with(input: &CostInput, schedule: &FeeSchedule) -> Breakdown {
    let (tier, tier_fallback) = resolve_tier_or_default(&input.tier_id);

    let override_price = input
        .custom_price
        .filter(|p| *p > Decimal::ZERO)
        .map(|p| p.min(MAX_CUSTOM_PRICE));
    let purchase_price = override_price.map_or(tier.min_investment, |p| p.max(tier.min_investment));
    let price_floor_applied = override_price.is_some_and(|p| p < tier.min_investment);

    let property = property_costs(purchase_price, schedule);
    let permit = permit_costs(input, schedule);
    let additional = additional_costs(input, schedule);

    let grand_total = saturating_sum([
        purchase_price,
        property.total,
        permit.total,
        additional.total,
    ]);

    let chart_series = build_chart_series(
        purchase_price,
        &property,
        &permit,
        &additional,
        grand_total,
        input.locale,
    );

    tracing::debug!(
        tier = %tier.id,
        %purchase_price,
        %grand_total,
        "computed cost breakdown"
    );

    Breakdown {
        tier: tier.id,
        purchase_price,
        price_floor_applied,
        total_family_members: input.total_family_members(),
        property,
        permit,
        additional,
        grand_total,
        chart_series,
        tier_fallback,
    }
}

/// Validate, compute, and wrap the breakdown in the standard output envelope.
pub fn calculate_costs(
    input: &CostInput,
    schedule: &FeeSchedule,
) -> VisaCalcResult<ComputationOutput<Breakdown>> {
    let start = Instant::now();
    input.validate()?;

    let breakdown = compute_with(input, schedule);

    let mut warnings: Vec<String> = Vec::new();
    if breakdown.tier_fallback {
        warnings.push(format!(
            "Unknown tier '{}'; using {}",
            input.tier_id, breakdown.tier
        ));
    }
    if breakdown.price_floor_applied {
        warnings.push(format!(
            "Custom price {} is below the {} minimum; using {}",
            input.custom_price.unwrap_or_default(),
            breakdown.tier,
            breakdown.purchase_price
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Greece Golden Visa: property acquisition, residence permit and additional costs",
        &serde_json::json!({
            "tier_id": input.tier_id,
            "purchase_price": breakdown.purchase_price.to_string(),
            "family_members": breakdown.total_family_members,
            "vat_rate": schedule.vat_rate.to_string(),
            "consultancy_vat": schedule.consultancy_vat,
            "dependent_card_policy": schedule.dependent_card_policy,
        }),
        warnings,
        elapsed,
        breakdown,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn vat_line(base: Money, vat_applies: bool, schedule: &FeeSchedule) -> VatLine {
    let vat = if vat_applies {
        base.saturating_mul(schedule.vat_rate)
    } else {
        Decimal::ZERO
    };
    VatLine {
        base,
        vat,
        total: base.saturating_add(vat),
    }
}

fn property_costs(price: Money, schedule: &FeeSchedule) -> PropertyCosts {
    let transfer_tax = price.saturating_mul(schedule.transfer_tax);
    let consultancy = vat_line(
        price.saturating_mul(schedule.real_estate_consultancy),
        schedule.consultancy_vat,
        schedule,
    );
    let notary = vat_line(price.saturating_mul(schedule.notary_fee), true, schedule);
    let lawyer = vat_line(price.saturating_mul(schedule.lawyer_fee), true, schedule);
    let government_registration = price.saturating_mul(schedule.government_registration);

    let total = saturating_sum([
        transfer_tax,
        consultancy.total,
        notary.total,
        lawyer.total,
        government_registration,
    ]);

    PropertyCosts {
        transfer_tax,
        consultancy,
        notary,
        lawyer,
        government_registration,
        total,
    }
}

fn dependent_card_fees(input: &CostInput, schedule: &FeeSchedule) -> Money {
    match &schedule.dependent_card_policy {
        DependentCardPolicy::AgeBanded {
            fifteen_plus,
            under_fifteen,
        } => {
            saturating_sum([
                Decimal::from(input.children_15_plus).saturating_mul(*fifteen_plus),
                Decimal::from(input.children_under_15).saturating_mul(*under_fifteen),
            ])
        }
        DependentCardPolicy::Flat { per_dependent } => {
            let dependents = input.total_family_members().saturating_sub(1);
            Decimal::from(dependents).saturating_mul(*per_dependent)
        }
    }
}

fn permit_costs(input: &CostInput, schedule: &FeeSchedule) -> PermitCosts {
    let application_prep = schedule.permit_application_prep;
    let main_card = schedule.permit_card_main;
    let dependent_cards = dependent_card_fees(input, schedule);
    let health_insurance = schedule
        .health_insurance_rate(input.use_max_health_insurance)
        .saturating_mul(Decimal::from(input.total_family_members()));
    let translation = schedule.translation_costs;
    let express_fee = if input.express_processing {
        schedule.express_processing
    } else {
        Decimal::ZERO
    };

    let total = saturating_sum([
        application_prep,
        main_card,
        dependent_cards,
        health_insurance,
        translation,
        express_fee,
    ]);

    PermitCosts {
        application_prep,
        main_card,
        dependent_cards,
        health_insurance,
        translation,
        express_fee,
        total,
    }
}

fn additional_costs(input: &CostInput, schedule: &FeeSchedule) -> AdditionalCosts {
    let bank_account_tax_number = schedule.bank_account_tax_number;
    let power_of_attorney_fee = if input.power_of_attorney {
        schedule.with_vat(schedule.power_of_attorney)
    } else {
        Decimal::ZERO
    };

    AdditionalCosts {
        bank_account_tax_number,
        power_of_attorney_fee,
        total: bank_account_tax_number.saturating_add(power_of_attorney_fee),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartCategory;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    /// Tier 400, no override, single adult, no extras.
    fn scenario_a() -> CostInput {
        CostInput::builder().tier("tier-400").build().unwrap()
    }

    /// Tier 250 at 500k, family of four, every surcharge on.
    fn scenario_c() -> CostInput {
        CostInput::builder()
            .tier("tier-250")
            .custom_price(dec!(500000))
            .adults(2)
            .children_15_plus(1)
            .children_under_15(1)
            .express_processing(true)
            .power_of_attorney(true)
            .premium_health_insurance(true)
            .build()
            .unwrap()
    }

    fn assert_total_identity(b: &Breakdown) {
        assert_eq!(
            b.grand_total,
            b.purchase_price + b.property.total + b.permit.total + b.additional.total
        );
    }

    // ------------------------------------------------------------------
    // Scenario A: baseline
    // ------------------------------------------------------------------
    #[test]
    fn test_scenario_a_baseline() {
        let b = compute(&scenario_a());

        assert_eq!(b.tier, TierId::Tier400);
        assert_eq!(b.purchase_price, dec!(400000));
        assert_eq!(b.property.transfer_tax, dec!(12360));
        assert_eq!(b.property.government_registration, dec!(3200));
        assert_eq!(
            b.property.consultancy,
            VatLine {
                base: dec!(8000),
                vat: dec!(1920),
                total: dec!(9920),
            }
        );
        assert_eq!(b.property.notary.total, dec!(4960));
        assert_eq!(b.property.lawyer.total, dec!(4960));
        assert_eq!(b.property.total, dec!(35400));

        assert_eq!(b.permit.dependent_cards, Decimal::ZERO);
        assert_eq!(b.permit.health_insurance, dec!(80));
        assert_eq!(b.permit.total, dec!(4396));
        assert_eq!(b.additional.total, dec!(300));
        assert_eq!(b.grand_total, dec!(440096));
        assert!(!b.price_floor_applied);
        assert!(!b.tier_fallback);
        assert_total_identity(&b);
    }

    // ------------------------------------------------------------------
    // Scenario B: custom price below the floor
    // ------------------------------------------------------------------
    #[test]
    fn test_scenario_b_floor_enforced() {
        let mut input = scenario_a();
        input.custom_price = Some(dec!(300000));
        let b = compute(&input);

        assert_eq!(b.purchase_price, dec!(400000));
        assert!(b.price_floor_applied);
        assert_eq!(b.grand_total, compute(&scenario_a()).grand_total);
    }

    // ------------------------------------------------------------------
    // Scenario C: all surcharges
    // ------------------------------------------------------------------
    #[test]
    fn test_scenario_c_all_surcharges() {
        let b = compute(&scenario_c());

        assert_eq!(b.purchase_price, dec!(500000));
        assert_eq!(b.total_family_members, 4);

        assert_eq!(b.property.transfer_tax, dec!(15450));
        assert_eq!(b.property.consultancy.total, dec!(12400));
        assert_eq!(b.property.notary.total, dec!(6200));
        assert_eq!(b.property.lawyer.total, dec!(6200));
        assert_eq!(b.property.government_registration, dec!(4000));
        assert_eq!(b.property.total, dec!(44250));

        assert_eq!(b.permit.dependent_cards, dec!(166));
        assert_eq!(b.permit.health_insurance, dec!(440));
        assert_eq!(b.permit.express_fee, dec!(3000));
        assert_eq!(
            b.permit.total,
            b.permit.application_prep
                + b.permit.main_card
                + b.permit.dependent_cards
                + b.permit.health_insurance
                + b.permit.translation
                + b.permit.express_fee
        );
        assert_eq!(b.permit.total, dec!(7922));

        assert_eq!(b.additional.power_of_attorney_fee, dec!(248));
        assert_eq!(b.additional.total, dec!(548));
        assert_eq!(b.grand_total, dec!(552720));
        assert_total_identity(&b);
    }

    #[test]
    fn test_scenario_c_flat_dependent_profile() {
        let b = compute_with(&scenario_c(), &FeeSchedule::flat_dependent());

        assert_eq!(b.property.consultancy.vat, Decimal::ZERO);
        assert_eq!(b.property.consultancy.total, dec!(10000));
        assert_eq!(b.property.total, dec!(41850));
        // Second adult and both children, 166 each
        assert_eq!(b.permit.dependent_cards, dec!(498));
        assert_eq!(b.permit.total, dec!(8254));
        assert_eq!(b.grand_total, dec!(550652));
        assert_total_identity(&b);
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------
    #[test]
    fn test_price_never_below_tier_minimum() {
        let prices = [
            None,
            Some(Decimal::ZERO),
            Some(dec!(1)),
            Some(dec!(249999.99)),
            Some(dec!(250000)),
            Some(dec!(799999)),
            Some(dec!(1500000)),
        ];
        for tier in crate::tiers::all_tiers() {
            for price in prices {
                let input = CostInput {
                    tier_id: tier.id.to_string(),
                    custom_price: price,
                    ..CostInput::default()
                };
                let b = compute(&input);
                assert!(
                    b.purchase_price >= tier.min_investment,
                    "{} priced at {} for custom {:?}",
                    tier.id,
                    b.purchase_price,
                    price
                );
                assert_total_identity(&b);
            }
        }
    }

    #[test]
    fn test_express_adds_exactly_3000() {
        let off = compute(&scenario_a());
        let mut input = scenario_a();
        input.express_processing = true;
        let on = compute(&input);

        assert_eq!(on.grand_total - off.grand_total, dec!(3000));
        assert_eq!(on.permit.total - off.permit.total, dec!(3000));
        assert_eq!(on.property, off.property);
        assert_eq!(on.additional, off.additional);
    }

    #[test]
    fn test_power_of_attorney_adds_248() {
        let off = compute(&scenario_a());
        let mut input = scenario_a();
        input.power_of_attorney = true;
        let on = compute(&input);

        assert_eq!(on.additional.total - off.additional.total, dec!(248));
        assert_eq!(on.permit, off.permit);
    }

    #[test]
    fn test_premium_health_adds_30_per_member() {
        let mut input = scenario_c();
        input.use_max_health_insurance = false;
        let standard = compute(&input);
        input.use_max_health_insurance = true;
        let premium = compute(&input);

        let members = Decimal::from(premium.total_family_members);
        assert_eq!(
            premium.permit.health_insurance - standard.permit.health_insurance,
            dec!(30) * members
        );
    }

    #[test]
    fn test_no_dependents_no_card_fee_under_either_profile() {
        for schedule in [FeeSchedule::standard(), FeeSchedule::flat_dependent()] {
            let b = compute_with(&scenario_a(), &schedule);
            assert_eq!(b.permit.dependent_cards, Decimal::ZERO);
        }
    }

    #[test]
    fn test_age_banded_ignores_extra_adults() {
        let input = CostInput::builder().adults(2).build().unwrap();
        let b = compute(&input);
        assert_eq!(b.permit.dependent_cards, Decimal::ZERO);
        assert_eq!(b.permit.health_insurance, dec!(160));
    }

    #[test]
    fn test_minors_count_in_under_fifteen_band() {
        let input = CostInput::builder().minors(3).build().unwrap();
        let b = compute(&input);
        assert_eq!(b.permit.dependent_cards, dec!(48));
        assert_eq!(b.total_family_members, 4);
    }

    // ------------------------------------------------------------------
    // Chart series
    // ------------------------------------------------------------------
    #[test]
    fn test_chart_series_sums_to_grand_total() {
        for input in [scenario_a(), scenario_c()] {
            let b = compute(&input);
            let sum: Decimal = b.chart_series.iter().map(|s| s.value).sum();
            assert_eq!(sum, b.grand_total);
            assert!(b.chart_series.iter().all(|s| s.value > Decimal::ZERO));

            let share_sum: Decimal = b.chart_series.iter().map(|s| s.share).sum();
            assert!((share_sum - Decimal::ONE).abs() < dec!(0.0000001));
        }
    }

    #[test]
    fn test_chart_series_order_and_values() {
        let b = compute(&scenario_a());
        let categories: Vec<ChartCategory> = b.chart_series.iter().map(|s| s.category).collect();
        assert_eq!(categories, ChartCategory::ORDER.to_vec());

        let values: Vec<Decimal> = b.chart_series.iter().map(|s| s.value).collect();
        assert_eq!(
            values,
            vec![
                dec!(400000),
                dec!(12360),
                dec!(19840),
                dec!(3200),
                dec!(4016),
                dec!(380),
                dec!(300),
            ]
        );
        assert_eq!(b.chart_series[0].label, "Property Purchase");
    }

    #[test]
    fn test_chart_series_drops_zero_slices() {
        let schedule = FeeSchedule {
            transfer_tax: Decimal::ZERO,
            government_registration: Decimal::ZERO,
            ..FeeSchedule::standard()
        };
        let b = compute_with(&scenario_a(), &schedule);

        assert_eq!(b.chart_series.len(), 5);
        assert!(b
            .chart_series
            .iter()
            .all(|s| s.category != ChartCategory::TransferTax
                && s.category != ChartCategory::GovernmentRegistration));
        let sum: Decimal = b.chart_series.iter().map(|s| s.value).sum();
        assert_eq!(sum, b.grand_total);

        // Colours stay with their category after the gaps.
        let professional = &b.chart_series[1];
        assert_eq!(professional.category, ChartCategory::ProfessionalFees);
        assert_eq!(professional.colour, "#7C3AED");
    }

    #[test]
    fn test_chart_labels_follow_locale() {
        let mut input = scenario_a();
        input.locale = Locale::El;
        let b = compute(&input);
        assert_eq!(b.chart_series[0].label, "Αγορά Ακινήτου");
    }

    // ------------------------------------------------------------------
    // Input handling
    // ------------------------------------------------------------------
    #[test]
    fn test_unknown_tier_falls_back_in_compute() {
        let input = CostInput {
            tier_id: "tier-9000".into(),
            ..CostInput::default()
        };
        let b = compute(&input);
        assert!(b.tier_fallback);
        assert_eq!(b.tier, TierId::Tier250);
        assert_eq!(b.purchase_price, dec!(250000));
    }

    #[test]
    fn test_builder_rejects_unknown_tier() {
        match CostInput::builder().tier("tier-9000").build() {
            Err(VisaCalcError::InvalidInput { field, .. }) => assert_eq!(field, "tier_id"),
            other => panic!("Expected InvalidInput for tier_id, got: {other:?}"),
        }
    }

    #[test]
    fn test_builder_rejects_zero_adults() {
        match CostInput::builder().adults(0).build() {
            Err(VisaCalcError::InvalidInput { field, .. }) => assert_eq!(field, "adults"),
            other => panic!("Expected InvalidInput for adults, got: {other:?}"),
        }
    }

    #[test]
    fn test_builder_rejects_negative_price() {
        let result = CostInput::builder().custom_price(dec!(-5)).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_price_above_ceiling() {
        let result = CostInput::builder()
            .tier("tier-400")
            .custom_price_text("79228162514264337593543950335")
            .build();
        match result {
            Err(VisaCalcError::InvalidInput { field, .. }) => assert_eq!(field, "custom_price"),
            other => panic!("Expected InvalidInput for custom_price, got: {other:?}"),
        }

        let at_ceiling = CostInput::builder()
            .custom_price(MAX_CUSTOM_PRICE)
            .build()
            .unwrap();
        assert_total_identity(&compute(&at_ceiling));
    }

    #[test]
    fn test_unvalidated_huge_price_is_capped() {
        let input = CostInput {
            custom_price: Some(Decimal::MAX),
            express_processing: true,
            power_of_attorney: true,
            ..CostInput::default()
        };
        let b = compute(&input);

        assert_eq!(b.purchase_price, MAX_CUSTOM_PRICE);
        assert_total_identity(&b);
        assert!(calculate_costs(&input, &FeeSchedule::standard()).is_err());
    }

    #[test]
    fn test_unvalidated_schedule_saturates_instead_of_panicking() {
        let schedule = FeeSchedule {
            permit_card_main: Decimal::MAX,
            bank_account_tax_number: Decimal::MAX,
            ..FeeSchedule::standard()
        };
        let b = compute_with(&scenario_c(), &schedule);
        assert_eq!(b.permit.total, Decimal::MAX);
        assert_eq!(b.grand_total, Decimal::MAX);
    }

    #[test]
    fn test_parse_custom_price() {
        assert_eq!(parse_custom_price(""), None);
        assert_eq!(parse_custom_price("   "), None);
        assert_eq!(parse_custom_price("abc"), None);
        assert_eq!(parse_custom_price("0"), None);
        assert_eq!(parse_custom_price("-100"), None);
        assert_eq!(parse_custom_price("650000"), Some(dec!(650000)));
        assert_eq!(parse_custom_price(" 425000.50 "), Some(dec!(425000.50)));
    }

    #[test]
    fn test_deserialize_with_defaults_and_blank_price() {
        let input: CostInput =
            serde_json::from_str(r#"{"tier_id": "tier-800", "custom_price": ""}"#).unwrap();
        assert_eq!(input.custom_price, None);
        assert_eq!(input.adults, 1);
        assert_eq!(input.locale, Locale::En);
        assert_eq!(compute(&input).purchase_price, dec!(800000));
    }

    #[test]
    fn test_deserialize_minors_alias_and_numeric_price() {
        let input: CostInput = serde_json::from_str(
            r#"{"tier_id": "tier-400", "custom_price": "450000", "minors": 2, "locale": "tr"}"#,
        )
        .unwrap();
        assert_eq!(input.children_under_15, 2);
        assert_eq!(input.custom_price, Some(dec!(450000)));
        assert_eq!(input.locale, Locale::Tr);
    }

    #[test]
    fn test_calculate_costs_envelope_and_warnings() {
        let mut input = scenario_a();
        input.custom_price = Some(dec!(300000));
        let out = calculate_costs(&input, &FeeSchedule::standard()).unwrap();

        assert_eq!(out.result.purchase_price, dec!(400000));
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("below"));
        assert_eq!(out.metadata.currency, "EUR");
    }

    #[test]
    fn test_calculate_costs_rejects_invalid_input() {
        let input = CostInput {
            adults: 0,
            ..CostInput::default()
        };
        assert!(calculate_costs(&input, &FeeSchedule::standard()).is_err());
    }
}
