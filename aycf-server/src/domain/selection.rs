//! User-selected city sets.

use std::collections::HashSet;

use super::City;

/// The base, hub and target city sets a suggestion request runs against.
///
/// Every name is normalised on construction and blank entries are dropped,
/// so membership tests line up with the normalised corpus. Empty sets are
/// valid: they simply produce no suggestions.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    bases: HashSet<City>,
    hubs: HashSet<City>,
    targets: HashSet<City>,
}

impl Selection {
    /// Build a selection from raw city names.
    pub fn new<B, H, T>(bases: B, hubs: H, targets: T) -> Self
    where
        B: IntoIterator,
        B::Item: AsRef<str>,
        H: IntoIterator,
        H::Item: AsRef<str>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        Self {
            bases: normalise_set(bases),
            hubs: normalise_set(hubs),
            targets: normalise_set(targets),
        }
    }

    pub fn is_base(&self, city: &City) -> bool {
        self.bases.contains(city)
    }

    pub fn is_hub(&self, city: &City) -> bool {
        self.hubs.contains(city)
    }

    pub fn is_target(&self, city: &City) -> bool {
        self.targets.contains(city)
    }

    /// True when any of the three sets is empty, meaning no itinerary can
    /// be formed.
    pub fn is_degenerate(&self) -> bool {
        self.bases.is_empty() || self.hubs.is_empty() || self.targets.is_empty()
    }
}

fn normalise_set<I>(raw: I) -> HashSet<City>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    raw.into_iter()
        .map(|name| City::normalise(name.as_ref()))
        .filter(|city| !city.is_empty())
        .collect()
}
