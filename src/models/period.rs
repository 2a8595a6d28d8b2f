use chrono::Datelike;

const MIN_YEAR: i32 = 2020;
const MAX_YEAR: i32 = 2080;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A (month, year) pair identifying one budget period.
///
/// Fields are declared year first so the derived ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Self {
        Self { month, year }
    }

    /// The period containing today's date on the local clock.
    pub fn current() -> Self {
        let today = chrono::Local::now().date_naive();
        Self::new(today.month(), today.year())
    }

    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }

    /// `None` when stepping back would leave the `i32` year range.
    pub fn previous(&self) -> Option<Self> {
        if self.month <= 1 {
            Some(Self::new(12, self.year.checked_sub(1)?))
        } else {
            Some(Self::new(self.month - 1, self.year))
        }
    }

    /// `None` when stepping forward would leave the `i32` year range.
    pub fn next(&self) -> Option<Self> {
        if self.month >= 12 {
            Some(Self::new(1, self.year.checked_add(1)?))
        } else {
            Some(Self::new(self.month + 1, self.year))
        }
    }

    /// Years offered for selection.
    pub fn available_years() -> std::ops::RangeInclusive<i32> {
        MIN_YEAR..=MAX_YEAR
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

/// "Unknown" for anything outside 1-12.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("Unknown")
}

/// Month number for an English month name (case-insensitive), defaulting to 1.
pub fn month_number(name: &str) -> u32 {
    MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name.trim()))
        .map_or(1, |i| i as u32 + 1)
}
