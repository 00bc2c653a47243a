use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maps a player category to the named tee profile their rounds are rated against.
///
/// Categories without an explicit assignment use `fallback_tee`; players with no
/// category at all are treated as `default_category`. New categories are added
/// through `assignments` alone, the aggregation never looks at categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeeSettings {
    pub assignments: BTreeMap<String, String>,
    pub fallback_tee: String,
    pub default_category: String,
}

impl Default for TeeSettings {
    fn default() -> Self {
        Self {
            assignments: BTreeMap::from([("M".to_string(), "regular".to_string())]),
            fallback_tee: "red".to_string(),
            default_category: "M".to_string(),
        }
    }
}

impl TeeSettings {
    pub fn tee_for(&self, category: Option<&str>) -> &str {
        let category = category.unwrap_or(&self.default_category);
        self.assignments
            .get(category)
            .map(String::as_str)
            .unwrap_or(&self.fallback_tee)
    }
}
