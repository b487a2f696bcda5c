//! KPI document uploaded to the `kpi` endpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Version string the server expects in the KPI document.
pub const KPI_VERSION: &str = "0.2.2";

/// Key of the fallback weight in every priority table.
pub const DEFAULT_PRIORITY_KEY: &str = "default";

/// Entity id to weight.
pub type PriorityTable = BTreeMap<String, f64>;

/// Weighted priority tables for every character subtype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiConfig {
    pub version: String,

    /// Global entity priorities
    pub priority_table: PriorityTable,

    /// Game id (e.g. `DRILLER`) to subtype id to subtype settings
    pub character: BTreeMap<String, BTreeMap<u32, CharacterKpi>>,
}

impl Default for KpiConfig {
    fn default() -> Self {
        Self {
            version: KPI_VERSION.to_string(),
            priority_table: PriorityTable::new(),
            character: BTreeMap::new(),
        }
    }
}

impl KpiConfig {
    /// Look up a character subtype for modification.
    pub fn subtype_mut(&mut self, game_id: &str, subtype_id: u32) -> Option<&mut CharacterKpi> {
        self.character.get_mut(game_id)?.get_mut(&subtype_id)
    }
}

/// Settings of a single character subtype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterKpi {
    pub subtype_name: String,
    pub weight_list: Vec<f64>,
    pub priority_table: PriorityTable,
}

impl CharacterKpi {
    pub fn new(subtype_name: impl Into<String>, weight_list: Vec<f64>) -> Self {
        Self {
            subtype_name: subtype_name.into(),
            weight_list,
            priority_table: PriorityTable::from([(DEFAULT_PRIORITY_KEY.to_string(), 1.0)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_with_string_subtype_keys() {
        let mut kpi = KpiConfig::default();
        kpi.character
            .entry("DRILLER".to_string())
            .or_default()
            .insert(1, CharacterKpi::new("Classic", vec![1.0, 0.5]));

        let value = serde_json::to_value(&kpi).unwrap();
        assert_eq!(value["version"], "0.2.2");
        assert_eq!(value["character"]["DRILLER"]["1"]["subtypeName"], "Classic");
        assert_eq!(
            value["character"]["DRILLER"]["1"]["priorityTable"]["default"],
            1.0
        );
        assert!(value["priorityTable"].as_object().unwrap().is_empty());
    }
}
