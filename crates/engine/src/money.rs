use std::{
    fmt,
    iter::Sum,
    ops::{Add, Sub},
};

/// Number of minor units in one major unit.
///
/// The remote API transmits every amount with two implied decimal places,
/// regardless of currency.
const MINOR_PER_MAJOR: i64 = 100;

/// Signed money amount represented as **integer minor units** (pence, cents).
///
/// Use this type for **all** monetary values (feed amounts, roundups, transfer
/// totals) to avoid floating-point drift: addition and remainder are exact
/// integer operations, and the value sent over the wire is the stored integer.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::from_minor_units(4_35);
/// assert_eq!(amount.minor_units(), 435);
/// assert_eq!(amount.to_string(), "4.35");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    /// One major unit (`1.00`).
    pub const ONE: Money = Money(MINOR_PER_MAJOR);

    /// Creates a new amount from integer minor units.
    #[must_use]
    pub const fn from_minor_units(minor_units: i64) -> Self {
        Self(minor_units)
    }

    /// Returns the raw value in minor units.
    #[must_use]
    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// The part of the magnitude below one major unit, always in `[0, 1)`.
    ///
    /// `4.35` has a fractional part of `0.35`, `5.00` has none.
    #[must_use]
    pub const fn fractional(self) -> Money {
        Money((self.0.unsigned_abs() % MINOR_PER_MAJOR as u64) as i64)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let major = abs / MINOR_PER_MAJOR as u64;
        let minor = abs % MINOR_PER_MAJOR as u64;
        write!(f, "{sign}{major}.{minor:02}")
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}
