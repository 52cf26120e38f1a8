use std::fmt;
use std::str::FromStr;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::VisaCalcError;
use crate::i18n::{strings, Locale};
use crate::types::Money;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Investment zone identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TierId {
    #[serde(rename = "tier-250")]
    Tier250,
    #[serde(rename = "tier-400")]
    Tier400,
    #[serde(rename = "tier-800")]
    Tier800,
}

impl TierId {
    pub fn as_str(self) -> &'static str {
        match self {
            TierId::Tier250 => "tier-250",
            TierId::Tier400 => "tier-400",
            TierId::Tier800 => "tier-800",
        }
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TierId {
    type Err = VisaCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        find_tier(s)
            .map(|t| t.id)
            .ok_or_else(|| VisaCalcError::UnknownTier(s.to_string()))
    }
}

/// Investment tier reference data. Immutable.
#[derive(Debug, Clone, Serialize)]
pub struct Tier {
    pub id: TierId,
    pub label: &'static str,
    pub subtitle: &'static str,
    /// Minimum qualifying property price
    pub min_investment: Money,
    pub description: &'static str,
}

/// A tier with its display text resolved for one locale.
#[derive(Debug, Clone, Serialize)]
pub struct LocalizedTier {
    pub id: TierId,
    pub label: String,
    pub subtitle: String,
    pub min_investment: Money,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

static TIERS: [Tier; 3] = [
    Tier {
        id: TierId::Tier250,
        label: "Conversion/Restoration",
        subtitle: "Nationwide",
        min_investment: dec!(250000),
        description: "Commercial-to-residential conversion or listed building restoration.",
    },
    Tier {
        id: TierId::Tier400,
        label: "Standard Zone",
        subtitle: "Rest of Greece",
        min_investment: dec!(400000),
        description: "Regional mainland and small islands. Single property ≥ 120sqm.",
    },
    Tier {
        id: TierId::Tier800,
        label: "Prime Zone",
        subtitle: "Athens, Thessaloniki, Mykonos, Santorini",
        min_investment: dec!(800000),
        description: "Includes islands > 3,100 residents. Single property ≥ 120sqm.",
    },
];

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// All tiers in display order. The first entry is the default selection.
pub fn all_tiers() -> &'static [Tier] {
    &TIERS
}

/// Infallible lookup by typed id.
pub fn tier(id: TierId) -> &'static Tier {
    match id {
        TierId::Tier250 => &TIERS[0],
        TierId::Tier400 => &TIERS[1],
        TierId::Tier800 => &TIERS[2],
    }
}

pub fn find_tier(id: &str) -> Option<&'static Tier> {
    TIERS.iter().find(|t| t.id.as_str() == id)
}

/// Resolve a tier id, falling back to the first tier when it is unknown.
/// The flag is `true` when the fallback was taken.
pub fn resolve_tier_or_default(id: &str) -> (&'static Tier, bool) {
    match find_tier(id) {
        Some(t) => (t, false),
        None => {
            let fallback = tier(TierId::Tier250);
            tracing::warn!(tier_id = id, fallback = %fallback.id, "unknown tier id, using first tier");
            (fallback, true)
        }
    }
}

/// Tiers with label, subtitle and description translated.
pub fn localized_tiers(locale: Locale) -> Vec<LocalizedTier> {
    let table = strings(locale);
    TIERS
        .iter()
        .map(|t| {
            let text = table.tier(t.id);
            LocalizedTier {
                id: t.id,
                label: text.map_or(t.label, |x| x.label).to_string(),
                subtitle: text.map_or(t.subtitle, |x| x.subtitle).to_string(),
                min_investment: t.min_investment,
                description: text.map_or(t.description, |x| x.description).to_string(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
