//! Fee rate tables.
//!
//! Two profiles exist because two divergent rate policies were in use:
//! age-banded child cards with VAT on consultancy (`standard`), and a flat
//! card fee for every dependent with consultancy quoted net (`flat-dependent`).

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::VisaCalcError;
use crate::types::{Money, Rate};
use crate::VisaCalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How residence cards for family members beyond the main applicant are charged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DependentCardPolicy {
    /// Per child, by age band. Additional adults carry no card fee.
    AgeBanded {
        fifteen_plus: Money,
        under_fifteen: Money,
    },
    /// Same fee for every family member beyond the main applicant.
    Flat { per_dependent: Money },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub vat_rate: Rate,

    // Property acquisition, as a share of the purchase price
    pub transfer_tax: Rate,
    pub real_estate_consultancy: Rate,
    /// Whether VAT is added on top of the consultancy fee
    pub consultancy_vat: bool,
    pub notary_fee: Rate,
    pub lawyer_fee: Rate,
    pub government_registration: Rate,

    // Residence permit
    pub permit_application_prep: Money,
    pub permit_card_main: Money,
    pub dependent_card_policy: DependentCardPolicy,
    /// Per family member, standard cover
    pub health_insurance_standard: Money,
    /// Per family member, premium cover
    pub health_insurance_premium: Money,
    pub translation_costs: Money,
    pub express_processing: Money,

    // Additional
    pub bank_account_tax_number: Money,
    /// Charged (plus VAT) when a power of attorney is requested
    pub power_of_attorney: Money,
    /// Lower end of the quoted range; informational only
    pub power_of_attorney_min: Money,
    /// Only due if the property fails the legal check; never summed
    pub legal_check_fee: Money,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScheduleProfile {
    #[default]
    Standard,
    FlatDependent,
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

impl FeeSchedule {
    pub fn standard() -> Self {
        Self {
            vat_rate: dec!(0.24),
            transfer_tax: dec!(0.0309),
            real_estate_consultancy: dec!(0.02),
            consultancy_vat: true,
            notary_fee: dec!(0.01),
            lawyer_fee: dec!(0.01),
            government_registration: dec!(0.008),
            permit_application_prep: dec!(2000),
            permit_card_main: dec!(2016),
            dependent_card_policy: DependentCardPolicy::AgeBanded {
                fifteen_plus: dec!(150),
                under_fifteen: dec!(16),
            },
            health_insurance_standard: dec!(80),
            health_insurance_premium: dec!(110),
            translation_costs: dec!(300),
            express_processing: dec!(3000),
            bank_account_tax_number: dec!(300),
            power_of_attorney: dec!(200),
            power_of_attorney_min: dec!(150),
            legal_check_fee: dec!(150),
        }
    }

    pub fn flat_dependent() -> Self {
        Self {
            consultancy_vat: false,
            dependent_card_policy: DependentCardPolicy::Flat {
                per_dependent: dec!(166),
            },
            ..Self::standard()
        }
    }

    pub fn from_json_str(s: &str) -> VisaCalcResult<Self> {
        let schedule: FeeSchedule = serde_json::from_str(s)?;
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn from_yaml_str(s: &str) -> VisaCalcResult<Self> {
        let schedule: FeeSchedule = serde_yaml::from_str(s)?;
        schedule.validate()?;
        Ok(schedule)
    }

    /// Load a schedule file; `.yaml`/`.yml` are parsed as YAML, anything else as JSON.
    pub fn from_path(path: impl AsRef<Path>) -> VisaCalcResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&contents),
            _ => Self::from_json_str(&contents),
        }
    }

    /// Gross amount of a VAT-able base.
    pub fn with_vat(&self, base: Money) -> Money {
        base.saturating_add(base.saturating_mul(self.vat_rate))
    }

    pub fn health_insurance_rate(&self, premium: bool) -> Money {
        if premium {
            self.health_insurance_premium
        } else {
            self.health_insurance_standard
        }
    }

    pub fn validate(&self) -> VisaCalcResult<()> {
        let rates = [
            ("vat_rate", self.vat_rate),
            ("transfer_tax", self.transfer_tax),
            ("real_estate_consultancy", self.real_estate_consultancy),
            ("notary_fee", self.notary_fee),
            ("lawyer_fee", self.lawyer_fee),
            ("government_registration", self.government_registration),
        ];
        for (field, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(VisaCalcError::InvalidSchedule {
                    field: field.into(),
                    reason: "Rate must be between 0 and 1".into(),
                });
            }
        }

        let mut amounts = vec![
            ("permit_application_prep", self.permit_application_prep),
            ("permit_card_main", self.permit_card_main),
            ("health_insurance_standard", self.health_insurance_standard),
            ("health_insurance_premium", self.health_insurance_premium),
            ("translation_costs", self.translation_costs),
            ("express_processing", self.express_processing),
            ("bank_account_tax_number", self.bank_account_tax_number),
            ("power_of_attorney", self.power_of_attorney),
            ("power_of_attorney_min", self.power_of_attorney_min),
            ("legal_check_fee", self.legal_check_fee),
        ];
        match &self.dependent_card_policy {
            DependentCardPolicy::AgeBanded {
                fifteen_plus,
                under_fifteen,
            } => {
                amounts.push(("dependent_card_policy.fifteen_plus", *fifteen_plus));
                amounts.push(("dependent_card_policy.under_fifteen", *under_fifteen));
            }
            DependentCardPolicy::Flat { per_dependent } => {
                amounts.push(("dependent_card_policy.per_dependent", *per_dependent));
            }
        }
        for (field, amount) in amounts {
            if amount < Decimal::ZERO {
                return Err(VisaCalcError::InvalidSchedule {
                    field: field.into(),
                    reason: "Fixed amount must be non-negative".into(),
                });
            }
        }

        if self.health_insurance_premium < self.health_insurance_standard {
            return Err(VisaCalcError::InvalidSchedule {
                field: "health_insurance_premium".into(),
                reason: "Premium cover must cost at least the standard cover".into(),
            });
        }
        if self.power_of_attorney_min > self.power_of_attorney {
            return Err(VisaCalcError::InvalidSchedule {
                field: "power_of_attorney_min".into(),
                reason: "Lower bound exceeds the charged amount".into(),
            });
        }
        Ok(())
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self::standard()
    }
}

impl ScheduleProfile {
    pub const ALL: [ScheduleProfile; 2] = [ScheduleProfile::Standard, ScheduleProfile::FlatDependent];

    pub fn schedule(self) -> FeeSchedule {
        match self {
            ScheduleProfile::Standard => FeeSchedule::standard(),
            ScheduleProfile::FlatDependent => FeeSchedule::flat_dependent(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScheduleProfile::Standard => "standard",
            ScheduleProfile::FlatDependent => "flat-dependent",
        }
    }
}

impl fmt::Display for ScheduleProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScheduleProfile {
    type Err = VisaCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScheduleProfile::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| VisaCalcError::InvalidSchedule {
                field: "profile".into(),
                reason: format!("Unknown profile '{s}' (expected standard or flat-dependent)"),
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
