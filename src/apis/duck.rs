//! Duck typing for Kubernetes resources.
//!
//! A duck type is a partial schema: any resource whose JSON carries the fields
//! of the duck type can be read (and patched) through it, regardless of the
//! resource's own group, version and kind.

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};

pub mod v1;
pub mod v1beta1;

/// The API group of duck types.
pub const GROUP_NAME: &str = "duck.knative.dev";

/// Label carried by CRDs whose resources conform to the `Source` duck type.
pub const SOURCE_DUCK_LABEL: &str = "duck.knative.dev/source";

/// A type that can fill every one of its fields with a non-zero value.
pub trait Populatable: Default {
    fn populate(&mut self);
}

/// A duck type, identified by the full resource type it is read through.
pub trait Implementable {
    type Full: Populatable + Serialize + DeserializeOwned;

    /// A fully populated instance of the duck's full type.
    fn full_type() -> Self::Full {
        let mut full = Self::Full::default();
        full.populate();
        full
    }
}

/// A resource type that has a list type.
pub trait Listable {
    type List;
}

/// An API group and version, e.g. `duck.knative.dev/v1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupVersion {
    pub group: &'static str,
    pub version: &'static str,
}

impl GroupVersion {
    /// A kind qualified by this group.
    pub fn kind(&self, kind: &str) -> GroupKind {
        GroupKind {
            group: self.group.to_owned(),
            kind: kind.to_owned(),
        }
    }

    /// A resource qualified by this group.
    pub fn resource(&self, resource: &str) -> GroupResource {
        GroupResource {
            group: self.group.to_owned(),
            resource: resource.to_owned(),
        }
    }
}

impl fmt::Display for GroupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            f.write_str(self.version)
        } else {
            write!(f, "{}/{}", self.group, self.version)
        }
    }
}

/// A kind qualified by its group, rendered as `Kind.group`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKind {
    pub group: String,
    pub kind: String,
}

impl fmt::Display for GroupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_qualified(f, &self.kind, &self.group)
    }
}

pub use crate::subscriber::GroupResource;

impl fmt::Display for GroupResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_qualified(f, &self.resource, &self.group)
    }
}

fn fmt_qualified(f: &mut fmt::Formatter<'_>, name: &str, group: &str) -> fmt::Result {
    if group.is_empty() {
        f.write_str(name)
    } else {
        write!(f, "{name}.{group}")
    }
}

/// The error type returned by [`verify_type`].
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("failed to convert to JSON: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to read {type_name} from JSON: {source}")]
    Deserialize {
        type_name: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("{instance} does not implement the duck type {duck}, the following fields were lost: {lost}")]
    Mismatch {
        instance: &'static str,
        duck: &'static str,
        lost: String,
    },
}

/// Verifies that `Instance` can hold every field of the duck type `Duck`.
///
/// The duck's fully populated type is converted to `Instance` and back through
/// JSON; any field that does not survive the round-trip is reported.
pub fn verify_type<Instance, Duck>() -> Result<(), VerifyError>
where
    Instance: Serialize + DeserializeOwned,
    Duck: Implementable,
{
    let expected = serde_json::to_value(Duck::full_type()).map_err(VerifyError::Serialize)?;

    let instance: Instance = from_value(expected.clone())?;
    let through_instance = serde_json::to_value(instance).map_err(VerifyError::Serialize)?;
    let roundtrip: Duck::Full = from_value(through_instance)?;
    let actual = serde_json::to_value(roundtrip).map_err(VerifyError::Serialize)?;

    if expected == actual {
        return Ok(());
    }

    let mut lost = Vec::new();
    diff_paths(&expected, &actual, String::new(), &mut lost);
    Err(VerifyError::Mismatch {
        instance: std::any::type_name::<Instance>(),
        duck: std::any::type_name::<Duck>(),
        lost: lost.join(", "),
    })
}

fn from_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, VerifyError> {
    serde_json::from_value(value).map_err(|source| VerifyError::Deserialize {
        type_name: std::any::type_name::<T>(),
        source,
    })
}

/// Collects the JSON paths under which `expected` and `actual` differ.
fn diff_paths(
    expected: &serde_json::Value,
    actual: &serde_json::Value,
    path: String,
    out: &mut Vec<String>,
) {
    use serde_json::Value;

    match (expected, actual) {
        (Value::Object(want), Value::Object(got)) => {
            for (key, value) in want {
                let child = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                match got.get(key) {
                    Some(other) => diff_paths(value, other, child, out),
                    None => out.push(child),
                }
            }
        }
        (want, got) if want != got => out.push(if path.is_empty() {
            ".".to_owned()
        } else {
            path
        }),
        _ => {}
    }
}
