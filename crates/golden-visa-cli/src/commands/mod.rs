pub mod calculate;
pub mod route;
pub mod schedule;
pub mod tiers;
