use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{TradingDate, ValidationError};

/// Calendar unit of a trailing history window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookbackUnit {
    Days,
    Weeks,
    Months,
    Years,
}

impl LookbackUnit {
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Days => "d",
            Self::Weeks => "wk",
            Self::Months => "mo",
            Self::Years => "y",
        }
    }
}

/// Trailing window of daily history to fit on, e.g. `6mo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Lookback {
    amount: u32,
    unit: LookbackUnit,
}

impl Default for Lookback {
    fn default() -> Self {
        Self::months(6)
    }
}

impl Lookback {
    pub const fn new(amount: u32, unit: LookbackUnit) -> Self {
        Self { amount, unit }
    }

    pub const fn days(amount: u32) -> Self {
        Self::new(amount, LookbackUnit::Days)
    }

    pub const fn months(amount: u32) -> Self {
        Self::new(amount, LookbackUnit::Months)
    }

    pub const fn amount(self) -> u32 {
        self.amount
    }

    pub const fn unit(self) -> LookbackUnit {
        self.unit
    }

    /// First date inside the window that ends on `anchor`.
    ///
    /// Month and year windows clamp to the last day of a shorter month, so
    /// `1mo` before 2024-03-31 starts on 2024-02-29.
    pub fn window_start(self, anchor: TradingDate) -> TradingDate {
        let amount = i64::from(self.amount);
        let start = match self.unit {
            LookbackUnit::Days => anchor.add_days(-amount),
            LookbackUnit::Weeks => anchor.add_days(-amount * 7),
            LookbackUnit::Months => months_before(anchor.into_inner(), amount).map(TradingDate::from),
            LookbackUnit::Years => {
                months_before(anchor.into_inner(), amount * 12).map(TradingDate::from)
            }
        };
        start.unwrap_or_else(|| TradingDate::from_date(Date::MIN))
    }
}

fn months_before(date: Date, months: i64) -> Option<Date> {
    let index = i64::from(date.year()) * 12 + i64::from(u8::from(date.month())) - 1 - months;
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = Month::try_from(u8::try_from(index.rem_euclid(12) + 1).ok()?).ok()?;
    let day = date.day().min(time::util::days_in_year_month(year, month));
    Date::from_calendar_date(year, month, day).ok()
}

impl Display for Lookback {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

impl FromStr for Lookback {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        let invalid = || ValidationError::InvalidLookback {
            value: value.to_owned(),
        };

        let split = normalized
            .find(|ch: char| !ch.is_ascii_digit())
            .ok_or_else(invalid)?;
        let (digits, suffix) = normalized.split_at(split);
        let amount = digits.parse::<u32>().map_err(|_| invalid())?;
        if amount == 0 {
            return Err(invalid());
        }

        let unit = match suffix {
            "d" => LookbackUnit::Days,
            "wk" | "w" => LookbackUnit::Weeks,
            "mo" | "m" => LookbackUnit::Months,
            "y" => LookbackUnit::Years,
            _ => return Err(invalid()),
        };

        Ok(Self::new(amount, unit))
    }
}

impl TryFrom<String> for Lookback {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Lookback> for String {
    fn from(value: Lookback) -> Self {
        value.to_string()
    }
}
