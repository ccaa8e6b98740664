//! # fi-cashflows
//!
//! Cash flows, fixed- and floating-rate leg generation over backward
//! schedules, leg analytics and accrued interest.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Accrued interest between coupon dates.
pub mod accrued;

/// The `CashFlow` record and `Leg` alias.
pub mod cashflow;

/// Leg analytics: discounting and date queries.
pub mod cashflows;

/// Fixed-rate leg builder.
pub mod fixed_leg;

/// Floating-rate leg builder.
pub mod floating_leg;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use accrued::accrued_interest;
pub use cashflow::{CashFlow, Leg};
pub use fixed_leg::FixedLegBuilder;
pub use floating_leg::FloatingLegBuilder;
