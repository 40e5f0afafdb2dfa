//! Panel name table.
//!
//! Maps the worksheet titles shown on the dashboard to the short keys
//! downstream consumers use. Any worksheet not listed here is ignored.

use std::collections::BTreeMap;

/// Resolved panels: short key to absolute image URL, ordered by key.
pub type PanelMap = BTreeMap<&'static str, String>;

/// `(display name, short key)` pairs. Titles must match exactly.
pub const PANEL_NAMES: &[(&str, &str)] = &[
    ("Past Seven Days Rolling Averages", "sevenDayRA"),
    ("Testing Count since August 2020", "testingSinceAug"),
    ("Student Test Count", "studentTestCount"),
    ("Employee/Affiliate Test Count", "facultyTestCount"),
    ("Isolation/Quarantine In Use Bed Count", "isolationInUse"),
    ("Total Beds", "totalBeds"),
    ("OverTime Chart", "otChart"),
    ("Number of Tests Per Day", "numTestsDaily"),
    ("Chart Title", "chartTitle"),
    ("Count of Positive Cases since March 2020", "positiveSinceMar"),
    ("Student Count of Positive Cases", "studentPositiveCount"),
    ("Employee/Affiliate Count of Positive Cases", "facultyPositiveCount"),
    ("OverTime Table", "otTable"),
];

/// Short key for a worksheet title, if it is a tracked panel.
pub fn short_key(display_name: &str) -> Option<&'static str> {
    PANEL_NAMES
        .iter()
        .find(|(name, _)| *name == display_name)
        .map(|(_, key)| *key)
}
