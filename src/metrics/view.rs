//! The parts of a recorded metric the exporter needs to see.

use std::fmt;

/// A quantity being recorded, e.g. `request_count`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Measure {
    pub name: String,
    pub description: String,
    pub unit: String,
}

impl Measure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            unit: "1".to_owned(),
        }
    }
}

/// An aggregated view over a [`Measure`], broken down by tag keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct View {
    pub name: String,
    pub description: String,
    pub measure: Measure,
    pub tag_keys: Vec<String>,
}

impl View {
    /// A view named after its measure.
    pub fn of(measure: Measure) -> Self {
        Self {
            name: measure.name.clone(),
            description: measure.description.clone(),
            measure,
            tag_keys: Vec::new(),
        }
    }
}

/// A key/value label attached to a recorded metric.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// One aggregated data point of a view.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub tags: Vec<Tag>,
    pub value: f64,
}
