use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::apis::Condition;

/// The status fields every Knative resource is expected to carry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    /// The `metadata.generation` last processed by the controller.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub observed_generation: i64,

    /// The latest available observations of the resource's current state.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<Condition>,

    /// Additional status information set by the controller.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub annotations: BTreeMap<String, String>,
}

impl Status {
    pub fn get_condition(&self, type_: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.type_.as_str() == type_)
    }
}

fn is_zero(n: &i64) -> bool {
    *n == 0
}
