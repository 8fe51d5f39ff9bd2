//! The calendar month enumeration.
//!
//! Months serve two purposes: a validation domain for incoming month names,
//! and a cyclic ring for the recommendation rotation (December wraps back to
//! January).  The derived `Ord` follows calendar order, which is what the
//! grouped views sort by.

use serde::{Deserialize, Serialize};

/// One of the 12 canonical calendar months.
///
/// Serializes as its canonical English name (`"January"` .. `"December"`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// All months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Zero-based calendar index (0 = January .. 11 = December).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Month at the given index, taken modulo 12.
    pub fn from_index(index: usize) -> Month {
        Self::ALL[index % 12]
    }

    /// The following month, wrapping December -> January.
    pub fn next(self) -> Month {
        Self::from_index(self.index() + 1)
    }

    /// Canonical English name.
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Parse a month name, normalizing case first (first letter upper, rest
    /// lower, matching how callers type month names in URLs).
    ///
    /// Returns `None` for anything outside the 12 canonical names.
    pub fn parse(input: &str) -> Option<Month> {
        let normalized = normalize(input);
        Self::ALL.iter().copied().find(|m| m.name() == normalized)
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// First letter uppercased, remainder lowercased.
fn normalize(input: &str) -> String {
    let mut chars = input.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_any_casing() {
        assert_eq!(Month::parse("january"), Some(Month::January));
        assert_eq!(Month::parse("FEBRUARY"), Some(Month::February));
        assert_eq!(Month::parse("mArCh"), Some(Month::March));
        assert_eq!(Month::parse("December"), Some(Month::December));
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!(Month::parse("Smarch"), None);
        assert_eq!(Month::parse(""), None);
        assert_eq!(Month::parse("Januar"), None);
        assert_eq!(Month::parse("Januaryy"), None);
    }

    #[test]
    fn next_wraps_december_to_january() {
        assert_eq!(Month::November.next(), Month::December);
        assert_eq!(Month::December.next(), Month::January);
    }

    #[test]
    fn index_round_trip() {
        for (i, month) in Month::ALL.iter().enumerate() {
            assert_eq!(month.index(), i);
            assert_eq!(Month::from_index(i), *month);
        }
        // Ring arithmetic wraps.
        assert_eq!(Month::from_index(12), Month::January);
        assert_eq!(Month::from_index(25), Month::February);
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&Month::September).unwrap();
        assert_eq!(json, "\"September\"");

        let parsed: Month = serde_json::from_str("\"April\"").unwrap();
        assert_eq!(parsed, Month::April);
    }

    #[test]
    fn ord_follows_calendar_order() {
        assert!(Month::January < Month::February);
        assert!(Month::November < Month::December);
    }
}
