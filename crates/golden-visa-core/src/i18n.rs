//! Locale-keyed display strings.
//!
//! The tables are configuration data. Every locale must carry every
//! [`StringKey`]; [`validate_tables`] enforces that at load time.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::VisaCalcError;
use crate::tiers::{all_tiers, TierId};
use crate::types::{round_cents, Money};
use crate::VisaCalcResult;

// ---------------------------------------------------------------------------
// Locale
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Tr,
    El,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Tr, Locale::El];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Tr => "tr",
            Locale::El => "el",
        }
    }

    /// BCP 47 tag used for number formatting.
    pub fn intl_tag(self) -> &'static str {
        match self {
            Locale::En => "en-US",
            Locale::Tr => "tr-TR",
            Locale::El => "el-GR",
        }
    }

    /// Open Graph locale tag.
    pub fn open_graph_tag(self) -> &'static str {
        match self {
            Locale::En => "en_US",
            Locale::Tr => "tr_TR",
            Locale::El => "el_GR",
        }
    }

    fn separators(self) -> (char, char) {
        match self {
            Locale::En => (',', '.'),
            Locale::Tr | Locale::El => ('.', ','),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = VisaCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .into_iter()
            .find(|l| l.code() == s)
            .ok_or_else(|| VisaCalcError::UnknownLocale(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// String tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringKey {
    Title,
    Description,
    PropertyPurchase,
    TransferTax,
    ProfessionalFees,
    GovRegistration,
    PermitAndCards,
    HealthAndTranslation,
    TotalAdditional,
    Consultancy,
    NotaryFee,
    LawyerFee,
    PermitApplicationPrep,
    PermitCardMain,
    PermitCardDependents,
    HealthInsurance,
    TranslationCosts,
    ExpressProcessingFee,
    BankAccount,
    PowerOfAttorney,
    TotalProperty,
    TotalPermit,
    GrandTotal,
}

impl StringKey {
    pub const ALL: [StringKey; 23] = [
        StringKey::Title,
        StringKey::Description,
        StringKey::PropertyPurchase,
        StringKey::TransferTax,
        StringKey::ProfessionalFees,
        StringKey::GovRegistration,
        StringKey::PermitAndCards,
        StringKey::HealthAndTranslation,
        StringKey::TotalAdditional,
        StringKey::Consultancy,
        StringKey::NotaryFee,
        StringKey::LawyerFee,
        StringKey::PermitApplicationPrep,
        StringKey::PermitCardMain,
        StringKey::PermitCardDependents,
        StringKey::HealthInsurance,
        StringKey::TranslationCosts,
        StringKey::ExpressProcessingFee,
        StringKey::BankAccount,
        StringKey::PowerOfAttorney,
        StringKey::TotalProperty,
        StringKey::TotalPermit,
        StringKey::GrandTotal,
    ];
}

/// Translated strings for one locale.
#[derive(Debug)]
pub struct StringTable {
    pub locale: Locale,
    entries: &'static [(StringKey, &'static str)],
    tiers: &'static [(TierId, TierText)],
}

/// Localized display text for a tier.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TierText {
    pub label: &'static str,
    pub subtitle: &'static str,
    pub description: &'static str,
}

impl StringTable {
    /// Look up a string; empty when the key is missing (caught by
    /// [`validate_tables`]).
    pub fn get(&self, key: StringKey) -> &'static str {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or("")
    }

    pub fn tier(&self, id: TierId) -> Option<TierText> {
        self.tiers.iter().find(|(t, _)| *t == id).map(|(_, text)| *text)
    }

    fn missing_keys(&self) -> Vec<String> {
        let mut missing: Vec<String> = StringKey::ALL
            .iter()
            .filter(|k| self.get(**k).trim().is_empty())
            .map(|k| format!("{k:?}"))
            .collect();
        for tier in all_tiers() {
            match self.tier(tier.id) {
                Some(t) if !t.label.is_empty() && !t.subtitle.is_empty() => {}
                _ => missing.push(format!("tier:{}", tier.id)),
            }
        }
        missing
    }
}

pub fn strings(locale: Locale) -> &'static StringTable {
    match locale {
        Locale::En => &EN,
        Locale::Tr => &TR,
        Locale::El => &EL,
    }
}

/// Shorthand for `strings(locale).get(key)`.
pub fn text(locale: Locale, key: StringKey) -> &'static str {
    strings(locale).get(key)
}

/// Check that every locale carries every key and every tier text.
pub fn validate_tables() -> VisaCalcResult<()> {
    for locale in Locale::ALL {
        let missing = strings(locale).missing_keys();
        if !missing.is_empty() {
            return Err(VisaCalcError::IncompleteTranslations {
                locale: locale.to_string(),
                missing,
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Format a euro amount with the locale's digit grouping. Whole amounts carry
/// no decimals; anything else is shown to the cent.
pub fn format_money(value: Money, locale: Locale) -> String {
    let (group_sep, decimal_sep) = locale.separators();
    let rounded = round_cents(value.abs());
    let whole = rounded.trunc();
    let cents = ((rounded - whole) * Decimal::ONE_HUNDRED)
        .to_u64()
        .unwrap_or(0);

    let digits = whole.normalize().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(group_sep);
        }
        grouped.push(ch);
    }

    let sign = if value < Decimal::ZERO && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    if cents == 0 {
        format!("{sign}€{grouped}")
    } else {
        format!("{sign}€{grouped}{decimal_sep}{cents:02}")
    }
}

// ---------------------------------------------------------------------------
// Data
// ---------------------------------------------------------------------------

static EN: StringTable = StringTable {
    locale: Locale::En,
    entries: &[
        (StringKey::Title, "Greece Golden Visa Cost Calculator"),
        (StringKey::Description, "Estimate total costs for the Greece Golden Visa."),
        (StringKey::PropertyPurchase, "Property Purchase"),
        (StringKey::TransferTax, "Transfer Tax"),
        (StringKey::ProfessionalFees, "Professional Fees"),
        (StringKey::GovRegistration, "Government Registration"),
        (StringKey::PermitAndCards, "Permit & Cards"),
        (StringKey::HealthAndTranslation, "Health & Translation"),
        (StringKey::TotalAdditional, "Additional Costs"),
        (StringKey::Consultancy, "Real Estate Consultancy"),
        (StringKey::NotaryFee, "Notary Fee"),
        (StringKey::LawyerFee, "Lawyer Fee"),
        (StringKey::PermitApplicationPrep, "Application Preparation"),
        (StringKey::PermitCardMain, "Main Applicant Card"),
        (StringKey::PermitCardDependents, "Dependent Cards"),
        (StringKey::HealthInsurance, "Health Insurance"),
        (StringKey::TranslationCosts, "Translation Costs"),
        (StringKey::ExpressProcessingFee, "Express Processing"),
        (StringKey::BankAccount, "Bank Account & Tax Number"),
        (StringKey::PowerOfAttorney, "Power of Attorney"),
        (StringKey::TotalProperty, "Total Property Costs"),
        (StringKey::TotalPermit, "Total Permit Costs"),
        (StringKey::GrandTotal, "Grand Total"),
    ],
    tiers: &[
        (
            TierId::Tier250,
            TierText {
                label: "Conversion/Restoration",
                subtitle: "Nationwide",
                description: "Commercial-to-residential conversion or listed building restoration.",
            },
        ),
        (
            TierId::Tier400,
            TierText {
                label: "Standard Zone",
                subtitle: "Rest of Greece",
                description: "Regional mainland and small islands. Single property ≥ 120sqm.",
            },
        ),
        (
            TierId::Tier800,
            TierText {
                label: "Prime Zone",
                subtitle: "Athens, Thessaloniki, Mykonos, Santorini",
                description: "Includes islands > 3,100 residents. Single property ≥ 120sqm.",
            },
        ),
    ],
};

static TR: StringTable = StringTable {
    locale: Locale::Tr,
    entries: &[
        (StringKey::Title, "Yunanistan Altın Vize Maliyet Hesaplayıcı"),
        (StringKey::Description, "Yunanistan Altın Vize için toplam maliyeti hesaplayın."),
        (StringKey::PropertyPurchase, "Mülk Alımı"),
        (StringKey::TransferTax, "Tapu Devir Vergisi"),
        (StringKey::ProfessionalFees, "Profesyonel Ücretler"),
        (StringKey::GovRegistration, "Tapu Tescil Harcı"),
        (StringKey::PermitAndCards, "İzin ve Kartlar"),
        (StringKey::HealthAndTranslation, "Sağlık ve Tercüme"),
        (StringKey::TotalAdditional, "Ek Maliyetler"),
        (StringKey::Consultancy, "Emlak Danışmanlığı"),
        (StringKey::NotaryFee, "Noter Ücreti"),
        (StringKey::LawyerFee, "Avukatlık Ücreti"),
        (StringKey::PermitApplicationPrep, "Başvuru Hazırlığı"),
        (StringKey::PermitCardMain, "Ana Başvuru Sahibi Kartı"),
        (StringKey::PermitCardDependents, "Aile Üyesi Kartları"),
        (StringKey::HealthInsurance, "Sağlık Sigortası"),
        (StringKey::TranslationCosts, "Tercüme Masrafları"),
        (StringKey::ExpressProcessingFee, "Hızlı İşlem"),
        (StringKey::BankAccount, "Banka Hesabı ve Vergi Numarası"),
        (StringKey::PowerOfAttorney, "Vekaletname"),
        (StringKey::TotalProperty, "Toplam Mülk Maliyetleri"),
        (StringKey::TotalPermit, "Toplam İzin Maliyetleri"),
        (StringKey::GrandTotal, "Genel Toplam"),
    ],
    tiers: &[
        (
            TierId::Tier250,
            TierText {
                label: "Dönüşüm/Restorasyon",
                subtitle: "Tüm Ülke",
                description: "Ticari mülkün konuta dönüştürülmesi veya tescilli yapı restorasyonu.",
            },
        ),
        (
            TierId::Tier400,
            TierText {
                label: "Standart Bölge",
                subtitle: "Yunanistan'ın Geri Kalanı",
                description: "Bölgesel anakara ve küçük adalar. Tek mülk ≥ 120 m².",
            },
        ),
        (
            TierId::Tier800,
            TierText {
                label: "Premium Bölge",
                subtitle: "Atina, Selanik, Mikonos, Santorini",
                description: "3.100'den fazla nüfuslu adalar dahil. Tek mülk ≥ 120 m².",
            },
        ),
    ],
};

static EL: StringTable = StringTable {
    locale: Locale::El,
    entries: &[
        (StringKey::Title, "Υπολογιστής Κόστους Χρυσής Βίζας Ελλάδας"),
        (StringKey::Description, "Υπολογίστε το συνολικό κόστος για τη Χρυσή Βίζα Ελλάδας."),
        (StringKey::PropertyPurchase, "Αγορά Ακινήτου"),
        (StringKey::TransferTax, "Φόρος Μεταβίβασης"),
        (StringKey::ProfessionalFees, "Επαγγελματικές Αμοιβές"),
        (StringKey::GovRegistration, "Κρατική Εγγραφή"),
        (StringKey::PermitAndCards, "Άδεια και Κάρτες"),
        (StringKey::HealthAndTranslation, "Υγεία και Μετάφραση"),
        (StringKey::TotalAdditional, "Επιπλέον Έξοδα"),
        (StringKey::Consultancy, "Μεσιτική Αμοιβή"),
        (StringKey::NotaryFee, "Συμβολαιογραφική Αμοιβή"),
        (StringKey::LawyerFee, "Δικηγορική Αμοιβή"),
        (StringKey::PermitApplicationPrep, "Προετοιμασία Αίτησης"),
        (StringKey::PermitCardMain, "Κάρτα Κύριου Αιτούντα"),
        (StringKey::PermitCardDependents, "Κάρτες Εξαρτώμενων Μελών"),
        (StringKey::HealthInsurance, "Ασφάλιση Υγείας"),
        (StringKey::TranslationCosts, "Κόστος Μεταφράσεων"),
        (StringKey::ExpressProcessingFee, "Ταχεία Διεκπεραίωση"),
        (StringKey::BankAccount, "Τραπεζικός Λογαριασμός και ΑΦΜ"),
        (StringKey::PowerOfAttorney, "Πληρεξούσιο"),
        (StringKey::TotalProperty, "Συνολικό Κόστος Ακινήτου"),
        (StringKey::TotalPermit, "Συνολικό Κόστος Άδειας"),
        (StringKey::GrandTotal, "Γενικό Σύνολο"),
    ],
    tiers: &[
        (
            TierId::Tier250,
            TierText {
                label: "Μετατροπή/Αποκατάσταση",
                subtitle: "Πανελλαδικά",
                description: "Μετατροπή επαγγελματικού ακινήτου σε κατοικία ή αποκατάσταση διατηρητέου.",
            },
        ),
        (
            TierId::Tier400,
            TierText {
                label: "Τυπική Ζώνη",
                subtitle: "Υπόλοιπη Ελλάδα",
                description: "Ηπειρωτική χώρα και μικρά νησιά. Ενιαίο ακίνητο ≥ 120 τ.μ.",
            },
        ),
        (
            TierId::Tier800,
            TierText {
                label: "Ζώνη Υψηλής Ζήτησης",
                subtitle: "Αθήνα, Θεσσαλονίκη, Μύκονος, Σαντορίνη",
                description: "Περιλαμβάνει νησιά άνω των 3.100 κατοίκων. Ενιαίο ακίνητο ≥ 120 τ.μ.",
            },
        ),
    ],
};

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_all_tables_complete() {
        validate_tables().unwrap();
    }

    #[test]
    fn test_locale_parse_and_display() {
        assert_eq!("tr".parse::<Locale>().unwrap(), Locale::Tr);
        assert_eq!(Locale::El.to_string(), "el");
        assert!(matches!(
            "de".parse::<Locale>(),
            Err(VisaCalcError::UnknownLocale(code)) if code == "de"
        ));
    }

    #[test]
    fn test_locale_serde_lowercase() {
        let json = serde_json::to_string(&Locale::El).unwrap();
        assert_eq!(json, "\"el\"");
        let back: Locale = serde_json::from_str("\"tr\"").unwrap();
        assert_eq!(back, Locale::Tr);
    }

    #[test]
    fn test_text_lookup_per_locale() {
        assert_eq!(text(Locale::En, StringKey::GrandTotal), "Grand Total");
        assert_eq!(text(Locale::Tr, StringKey::GrandTotal), "Genel Toplam");
        assert_eq!(text(Locale::El, StringKey::GrandTotal), "Γενικό Σύνολο");
    }

    #[test]
    fn test_tier_text_matches_reference_data() {
        for tier in all_tiers() {
            let en = strings(Locale::En).tier(tier.id).unwrap();
            assert_eq!(en.label, tier.label);
            assert_eq!(en.subtitle, tier.subtitle);
        }
    }

    #[test]
    fn test_format_money_grouping() {
        assert_eq!(format_money(dec!(400000), Locale::En), "€400,000");
        assert_eq!(format_money(dec!(400000), Locale::Tr), "€400.000");
        assert_eq!(format_money(dec!(1234567.5), Locale::El), "€1.234.567,50");
        assert_eq!(format_money(dec!(248.00), Locale::En), "€248");
        assert_eq!(format_money(dec!(999), Locale::En), "€999");
        assert_eq!(format_money(dec!(-1500.255), Locale::En), "-€1,500.26");
    }
}
