//! `Schedule`: an ordered sequence of payment dates.
//!
//! Dates are generated backward from the end (maturity) date in steps of
//! the coupon period while they are strictly after the start date, so a
//! broken period, if any, is always the first one. Every date is adjusted
//! with the calendar's business-day convention.

use crate::business_day_convention::BusinessDayConvention;
use crate::calendar::Calendar;
use crate::date::{Date, DateExt};
use crate::frequency::CouponFrequency;
use fi_core::{ensure, errors::Result};

/// An ordered sequence of payment dates (the start date is not included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    dates: Vec<Date>,
}

impl Schedule {
    /// Generate the payment dates of a leg running from `start` to `end`.
    ///
    /// A [`CouponFrequency::Zero`] schedule holds the adjusted end date only.
    pub fn backward(
        start: Date,
        end: Date,
        frequency: CouponFrequency,
        calendar: &dyn Calendar,
        convention: BusinessDayConvention,
    ) -> Result<Self> {
        ensure!(start <= end, "schedule start {start} is after end {end}");

        let Some(months) = frequency.months() else {
            return Ok(Self {
                dates: vec![calendar.adjust(end, convention)],
            });
        };

        let mut dates = Vec::new();
        let mut periods = 0;
        let mut current = end;
        while current > start {
            dates.push(calendar.adjust(current, convention));
            periods += 1;
            current = end.add_months(-months * periods);
        }
        dates.reverse();
        Ok(Self { dates })
    }

    /// Return all dates in the schedule.
    pub fn dates(&self) -> &[Date] {
        &self.dates
    }

    /// Number of dates.
    pub fn size(&self) -> usize {
        self.dates.len()
    }

    /// Return `true` if the schedule is empty.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Return the `i`-th date.
    pub fn date(&self, i: usize) -> Option<Date> {
        self.dates.get(i).copied()
    }

    /// Return the last (maturity) date.
    pub fn end_date(&self) -> Option<Date> {
        self.dates.last().copied()
    }

    /// Iterate over the dates.
    pub fn iter(&self) -> impl Iterator<Item = &Date> {
        self.dates.iter()
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Date;
    type IntoIter = std::slice::Iter<'a, Date>;

    fn into_iter(self) -> Self::IntoIter {
        self.dates.iter()
    }
}
