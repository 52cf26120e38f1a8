//! Proportional chart projection of a cost breakdown.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculator::{AdditionalCosts, PermitCosts, PropertyCosts};
use crate::i18n::{text, Locale, StringKey};
use crate::types::{saturating_sum, share_of, Money, Rate};

const PALETTE: [&str; 7] = [
    "#1E3A8A", "#2563EB", "#7C3AED", "#10B981", "#F59E0B", "#EF4444", "#0EA5E9",
];

/// Slice colours in display order.
pub fn palette() -> &'static [&'static str; 7] {
    &PALETTE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartCategory {
    PropertyPurchase,
    TransferTax,
    /// Consultancy, notary and lawyer, VAT included
    ProfessionalFees,
    GovernmentRegistration,
    /// Application prep, all cards, express surcharge
    PermitAndCards,
    HealthAndTranslation,
    Additional,
}

impl ChartCategory {
    /// Fixed display order.
    pub const ORDER: [ChartCategory; 7] = [
        ChartCategory::PropertyPurchase,
        ChartCategory::TransferTax,
        ChartCategory::ProfessionalFees,
        ChartCategory::GovernmentRegistration,
        ChartCategory::PermitAndCards,
        ChartCategory::HealthAndTranslation,
        ChartCategory::Additional,
    ];

    pub fn string_key(self) -> StringKey {
        match self {
            ChartCategory::PropertyPurchase => StringKey::PropertyPurchase,
            ChartCategory::TransferTax => StringKey::TransferTax,
            ChartCategory::ProfessionalFees => StringKey::ProfessionalFees,
            ChartCategory::GovernmentRegistration => StringKey::GovRegistration,
            ChartCategory::PermitAndCards => StringKey::PermitAndCards,
            ChartCategory::HealthAndTranslation => StringKey::HealthAndTranslation,
            ChartCategory::Additional => StringKey::TotalAdditional,
        }
    }

    pub fn label(self, locale: Locale) -> &'static str {
        text(locale, self.string_key())
    }

    /// Colour is tied to the category, so it stays stable when zero slices drop out.
    pub fn colour(self) -> &'static str {
        let idx = Self::ORDER.iter().position(|c| *c == self).unwrap_or(0);
        PALETTE[idx % PALETTE.len()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub category: ChartCategory,
    pub label: String,
    pub value: Money,
    /// Proportion of the grand total, 0..=1
    pub share: Rate,
    /// Hex colour of the category
    pub colour: String,
}

/// Aggregate the breakdown into display slices. Zero-value slices are
/// omitted; the remaining values sum to `grand_total`.
pub fn build_chart_series(
    purchase_price: Money,
    property: &PropertyCosts,
    permit: &PermitCosts,
    additional: &AdditionalCosts,
    grand_total: Money,
    locale: Locale,
) -> Vec<ChartSlice> {
    let values = [
        purchase_price,
        property.transfer_tax,
        saturating_sum([
            property.consultancy.total,
            property.notary.total,
            property.lawyer.total,
        ]),
        property.government_registration,
        saturating_sum([
            permit.application_prep,
            permit.main_card,
            permit.dependent_cards,
            permit.express_fee,
        ]),
        permit.health_insurance.saturating_add(permit.translation),
        additional.total,
    ];

    ChartCategory::ORDER
        .iter()
        .zip(values)
        .filter(|(_, value)| *value > Decimal::ZERO)
        .map(|(category, value)| ChartSlice {
            category: *category,
            label: category.label(locale).to_string(),
            value,
            share: share_of(value, grand_total),
            colour: category.colour().to_string(),
        })
        .collect()
}
