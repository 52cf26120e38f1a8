use napi::Result as NapiResult;
use napi_derive::napi;

use golden_visa_core::calculator::{self, CostInput};
use golden_visa_core::i18n::format_money;
use golden_visa_core::routing;
use golden_visa_core::schedule::{FeeSchedule, ScheduleProfile};
use golden_visa_core::{tiers, Locale, Money};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_locale(locale: Option<String>) -> NapiResult<Locale> {
    match locale {
        Some(code) => code.parse().map_err(to_napi_error),
        None => Ok(Locale::default()),
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Full breakdown for one form snapshot, standard fee schedule.
#[napi]
pub fn calculate_costs(input_json: String) -> NapiResult<String> {
    calculate_with_schedule(&input_json, &FeeSchedule::standard())
}

#[napi]
pub fn calculate_costs_with_profile(input_json: String, profile: String) -> NapiResult<String> {
    let profile: ScheduleProfile = profile.parse().map_err(to_napi_error)?;
    calculate_with_schedule(&input_json, &profile.schedule())
}

/// Calculate against a caller-supplied fee schedule (JSON).
#[napi]
pub fn calculate_costs_with_schedule(input_json: String, schedule_json: String) -> NapiResult<String> {
    let schedule = FeeSchedule::from_json_str(&schedule_json).map_err(to_napi_error)?;
    calculate_with_schedule(&input_json, &schedule)
}

fn calculate_with_schedule(input_json: &str, schedule: &FeeSchedule) -> NapiResult<String> {
    let input: CostInput = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let output = calculator::calculate_costs(&input, schedule).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn fee_schedule(profile: String) -> NapiResult<String> {
    let profile: ScheduleProfile = profile.parse().map_err(to_napi_error)?;
    serde_json::to_string(&profile.schedule()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Reference data and routing
// ---------------------------------------------------------------------------

#[napi]
pub fn list_tiers(locale: Option<String>) -> NapiResult<String> {
    let locale = parse_locale(locale)?;
    serde_json::to_string(&tiers::localized_tiers(locale)).map_err(to_napi_error)
}

/// Route decision, resolved locale and the cookie to set for a request.
/// With a site URL the page head metadata is included as well.
#[napi]
pub fn resolve_route(path: String, cookie: Option<String>, site_url: Option<String>) -> NapiResult<String> {
    let decision = routing::route(&path);
    let locale = routing::resolve_locale(Some(&path), cookie.as_deref());
    let set_cookie = routing::locale_cookie(&path);
    let metadata = site_url.map(|site| routing::page_metadata(locale, &site));
    serde_json::to_string(&serde_json::json!({
        "decision": decision,
        "locale": locale,
        "cookie": set_cookie,
        "metadata": metadata,
    }))
    .map_err(to_napi_error)
}

/// Euro amount (decimal string) formatted for display in a locale.
#[napi]
pub fn format_amount(value: String, locale: Option<String>) -> NapiResult<String> {
    let locale = parse_locale(locale)?;
    let amount: Money = value.trim().parse().map_err(to_napi_error)?;
    Ok(format_money(amount, locale))
}
