//! A single dated payment.

use fi_core::Real;
use fi_time::Date;
use serde::{Deserialize, Serialize};

/// An amount paid on a date, with the accrual data that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// Payment date.
    pub date: Date,
    /// Amount paid, principal included on the final flow of a leg.
    pub amount: Real,
    /// Notional the coupon accrued on.
    pub notional: Real,
    /// Accrual year fraction of the period.
    pub day_count_fraction: Real,
}

impl CashFlow {
    /// Create a cash flow.
    pub fn new(date: Date, amount: Real, notional: Real, day_count_fraction: Real) -> Self {
        Self {
            date,
            amount,
            notional,
            day_count_fraction,
        }
    }

    /// A bare payment with no accrual (e.g. a zero-coupon redemption).
    pub fn simple(date: Date, amount: Real) -> Self {
        Self::new(date, amount, amount, 0.0)
    }

    /// Whether the flow has already been paid relative to `ref_date`.
    /// A flow on `ref_date` counts as paid.
    pub fn has_occurred(&self, ref_date: Date) -> bool {
        self.date <= ref_date
    }
}

/// A sequence of cash flows in payment order.
pub type Leg = Vec<CashFlow>;
