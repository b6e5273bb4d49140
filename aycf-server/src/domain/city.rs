//! Normalised city names.

use std::fmt;

/// UI-facing labels mapped to the names the historical corpus uses.
///
/// The corpus records London-area departures as plain "London", while the
/// search form offers the more precise "London Luton".
const CITY_ALIASES: &[(&str, &str)] = &[
    ("London Luton", "London"),
    ("London (Luton)", "London"),
];

/// A normalised city name.
///
/// Construction trims surrounding whitespace and applies the alias table,
/// so two `City` values compare equal iff the historical corpus treats them
/// as the same city. All comparisons and joins in the planner operate on
/// `City`, never on raw strings.
///
/// # Examples
///
/// ```
/// use aycf_server::domain::City;
///
/// assert_eq!(City::normalise("  Liverpool "), City::normalise("Liverpool"));
/// assert_eq!(City::normalise("London Luton").as_str(), "London");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct City(String);

impl City {
    /// Normalise a raw city name from the corpus or from user input.
    pub fn normalise(raw: &str) -> Self {
        let trimmed = raw.trim();
        let canonical = CITY_ALIASES
            .iter()
            .find(|(alias, _)| *alias == trimmed)
            .map(|(_, canonical)| *canonical)
            .unwrap_or(trimmed);
        City(canonical.to_string())
    }

    /// Returns the canonical name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether normalisation left nothing behind (blank input).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "City({})", self.0)
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        assert_eq!(City::normalise("  Liverpool ").as_str(), "Liverpool");
        assert_eq!(City::normalise("\tBudapest\n").as_str(), "Budapest");
    }

    #[test]
    fn applies_alias_table() {
        assert_eq!(City::normalise("London Luton").as_str(), "London");
        assert_eq!(City::normalise("London (Luton)").as_str(), "London");
        assert_eq!(City::normalise(" London Luton ").as_str(), "London");
    }

    #[test]
    fn non_alias_passes_through() {
        assert_eq!(City::normalise("Kutaisi").as_str(), "Kutaisi");
        assert_eq!(City::normalise("London").as_str(), "London");
    }

    #[test]
    fn blank_input_is_empty() {
        assert!(City::normalise("").is_empty());
        assert!(City::normalise("   ").is_empty());
        assert!(!City::normalise("Warsaw").is_empty());
    }

    #[test]
    fn equality_after_normalisation() {
        assert_eq!(City::normalise("London Luton"), City::normalise("London"));
        assert_ne!(City::normalise("London"), City::normalise("Luton"));
    }

    #[test]
    fn ordering_is_lexical() {
        let mut cities = vec![
            City::normalise("Warsaw"),
            City::normalise("Bucharest"),
            City::normalise("Krakow"),
        ];
        cities.sort();
        assert_eq!(cities[0].as_str(), "Bucharest");
        assert_eq!(cities[2].as_str(), "Warsaw");
    }
}
