use std::fmt;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use serde::{Deserialize, Serialize};

/// The kind of a [`Condition`], e.g. `Ready`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionType(pub String);

impl ConditionType {
    /// The overall readiness of a long-running resource.
    pub const READY: &'static str = "Ready";
    /// The terminal success of a run-to-completion resource.
    pub const SUCCEEDED: &'static str = "Succeeded";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is one of the "happy" conditions summarizing a resource.
    pub fn is_happy(&self) -> bool {
        self.0 == Self::READY || self.0 == Self::SUCCEEDED
    }
}

impl fmt::Display for ConditionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    #[default]
    Unknown,
}

/// How much a non-happy condition should worry a reader.
/// The empty severity is implied for happy conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConditionSeverity {
    #[default]
    #[serde(rename = "")]
    Error,
    Warning,
    Info,
}

impl ConditionSeverity {
    fn is_error(&self) -> bool {
        matches!(self, ConditionSeverity::Error)
    }
}

/// A timestamp that never takes part in equality.
///
/// Transition times change on every reconcile and would otherwise make
/// two semantically identical statuses compare unequal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VolatileTime(pub Option<Time>);

impl PartialEq for VolatileTime {
    fn eq(&self, _: &Self) -> bool {
        true
    }
}

impl Eq for VolatileTime {}

impl VolatileTime {
    fn is_none(&self) -> bool {
        self.0.is_none()
    }
}

/// An observation of one aspect of a resource's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub type_: ConditionType,
    #[serde(default)]
    pub status: ConditionStatus,
    #[serde(default, skip_serializing_if = "ConditionSeverity::is_error")]
    pub severity: ConditionSeverity,
    #[serde(default, skip_serializing_if = "VolatileTime::is_none")]
    pub last_transition_time: VolatileTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Condition {
    pub fn new(type_: impl Into<String>, status: ConditionStatus) -> Self {
        Self {
            type_: ConditionType::new(type_),
            status,
            severity: ConditionSeverity::default(),
            last_transition_time: VolatileTime::default(),
            reason: None,
            message: None,
        }
    }

    pub fn is_true(&self) -> bool {
        self.status == ConditionStatus::True
    }

    pub fn is_false(&self) -> bool {
        self.status == ConditionStatus::False
    }

    pub fn is_unknown(&self) -> bool {
        self.status == ConditionStatus::Unknown
    }
}
