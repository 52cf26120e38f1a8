pub mod calculator;
pub mod chart;
pub mod error;
pub mod i18n;
pub mod schedule;
pub mod tiers;
pub mod types;

#[cfg(feature = "routing")]
pub mod routing;

pub use calculator::{calculate_costs, compute, compute_with, Breakdown, CostInput};
pub use error::VisaCalcError;
pub use i18n::Locale;
pub use schedule::{FeeSchedule, ScheduleProfile};
pub use types::*;

/// Standard result type for all golden-visa operations
pub type VisaCalcResult<T> = Result<T, VisaCalcError>;
