//! City option lists for the search form.
//!
//! Curated starting points; users can add arbitrary targets through the
//! custom-targets field.

use super::templates::{CityOption, CityOptions};

/// Cities offered as bases, with the commonly used ones pre-selected.
const BASE_OPTIONS: &[(&str, bool)] = &[
    ("Liverpool", true),
    ("London Luton", true),
    ("Birmingham", false),
    ("Leeds/Bradford", false),
];

/// Cities offered as hubs, all pre-selected: the hub layer works best wide.
const HUB_OPTIONS: &[(&str, bool)] = &[
    ("Bucharest", true),
    ("Budapest", true),
    ("Warsaw", true),
    ("Gdansk", true),
    ("Krakow", true),
    ("Katowice", true),
    ("Liverpool", true),
    ("London Luton", true),
];

/// Cities offered as targets.
const TARGET_OPTIONS: &[(&str, bool)] = &[
    ("Kutaisi", true),
    ("Yerevan", true),
    ("Amman", true),
    ("Dubai", true),
    ("Abu Dhabi", true),
    ("Hurghada", true),
    ("Sharm el-Sheikh", true),
    ("Tel Aviv", false),
    ("Marrakech", false),
];

/// The default option lists rendered into the search form.
pub fn default_options() -> CityOptions {
    CityOptions {
        bases: build(BASE_OPTIONS),
        hubs: build(HUB_OPTIONS),
        targets: build(TARGET_OPTIONS),
    }
}

fn build(options: &[(&str, bool)]) -> Vec<CityOption> {
    options
        .iter()
        .map(|(name, selected)| CityOption {
            name: (*name).to_string(),
            selected: *selected,
        })
        .collect()
}
