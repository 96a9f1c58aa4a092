use std::collections::BTreeSet;
use std::fmt;

/// Path segment meaning "the field currently being validated".
/// Prefixing with it leaves paths untouched.
pub const CURRENT_FIELD: &str = "";

/// A structured validation error, addressed by field paths.
///
/// A `FieldError` is either a single leaf (message, paths, details)
/// or an accumulation of leaves built with [`FieldError::also`].
/// The default value is empty and means "no error".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldError {
    pub message: String,
    pub paths: Vec<String>,
    /// Additional context rendered on its own line.
    pub details: String,
    errors: Vec<FieldError>,
}

impl FieldError {
    pub fn new(message: impl Into<String>, paths: &[&str]) -> Self {
        Self {
            message: message.into(),
            paths: paths.iter().map(|p| (*p).to_owned()).collect(),
            details: String::new(),
            errors: Vec::new(),
        }
    }

    /// The error with no content.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_empty() && self.errors.is_empty()
    }

    /// `Ok(())` if nothing was accumulated.
    pub fn into_result(self) -> Result<(), FieldError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Accumulates `other` into this error, flattening nested errors.
    pub fn also(self, other: impl Into<FieldError>) -> Self {
        let mut leaves = self.into_leaves();
        leaves.extend(other.into().into_leaves());
        Self::from_leaves(leaves)
    }

    /// Accumulates the error of a validation result, if any.
    pub fn also_result(self, other: Result<(), FieldError>) -> Self {
        match other {
            Ok(()) => self,
            Err(err) => self.also(err),
        }
    }

    /// Nests every path under the field `name`.
    pub fn via_field(self, name: &str) -> Self {
        if name == CURRENT_FIELD {
            return self;
        }
        self.map_leaves(|leaf| prefix_paths(leaf, name))
    }

    /// Nests every path under the list index `index`.
    pub fn via_index(self, index: usize) -> Self {
        let segment = format!("[{index}]");
        self.map_leaves(|leaf| prefix_paths(leaf, &segment))
    }

    /// Nests every path under the map key `key`.
    pub fn via_key(self, key: &str) -> Self {
        let segment = format!("[{key}]");
        self.map_leaves(|leaf| prefix_paths(leaf, &segment))
    }

    /// All leaf errors, in insertion order.
    pub fn leaves(&self) -> Vec<&FieldError> {
        let mut out = Vec::new();
        if !self.message.is_empty() {
            out.push(self);
        }
        for err in &self.errors {
            out.extend(err.leaves());
        }
        out
    }

    fn into_leaves(self) -> Vec<FieldError> {
        let mut out = Vec::new();
        let Self {
            message,
            paths,
            details,
            errors,
        } = self;
        if !message.is_empty() {
            out.push(Self {
                message,
                paths,
                details,
                errors: Vec::new(),
            });
        }
        for err in errors {
            out.extend(err.into_leaves());
        }
        out
    }

    fn from_leaves(mut leaves: Vec<FieldError>) -> Self {
        match leaves.len() {
            0 => Self::empty(),
            1 => leaves.remove(0),
            _ => Self {
                errors: leaves,
                ..Self::default()
            },
        }
    }

    fn map_leaves(self, f: impl Fn(FieldError) -> FieldError) -> Self {
        Self::from_leaves(self.into_leaves().into_iter().map(f).collect())
    }

    /// Leaves sorted by message, with paths merged for identical message and details.
    fn merged(&self) -> Vec<(String, BTreeSet<String>, String)> {
        let mut merged: Vec<(String, BTreeSet<String>, String)> = Vec::new();
        for leaf in self.leaves() {
            match merged
                .iter_mut()
                .find(|(message, _, details)| *message == leaf.message && *details == leaf.details)
            {
                Some((_, paths, _)) => paths.extend(leaf.paths.iter().cloned()),
                None => merged.push((
                    leaf.message.clone(),
                    leaf.paths.iter().cloned().collect(),
                    leaf.details.clone(),
                )),
            }
        }
        merged.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        merged
    }
}

fn prefix_paths(mut leaf: FieldError, prefix: &str) -> FieldError {
    leaf.paths = leaf
        .paths
        .into_iter()
        .map(|path| {
            if path.is_empty() {
                prefix.to_owned()
            } else if path.starts_with('[') {
                format!("{prefix}{path}")
            } else {
                format!("{prefix}.{path}")
            }
        })
        .collect();
    leaf
}

impl From<Option<FieldError>> for FieldError {
    fn from(err: Option<FieldError>) -> Self {
        err.unwrap_or_default()
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (message, paths, details)) in self.merged().iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(message)?;
            if !paths.is_empty() {
                let paths: Vec<&str> = paths.iter().map(String::as_str).collect();
                write!(f, ": {}", paths.join(", "))?;
            }
            if !details.is_empty() {
                write!(f, "\n{details}")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldError {}

pub fn missing_field(paths: &[&str]) -> FieldError {
    FieldError::new("missing field(s)", paths)
}

pub fn disallowed_fields(paths: &[&str]) -> FieldError {
    FieldError::new("must not set the field(s)", paths)
}

pub fn invalid_value(value: impl fmt::Display, path: &str) -> FieldError {
    FieldError::new(format!("invalid value: {value}"), &[path])
}

pub fn generic(message: impl Into<String>, paths: &[&str]) -> FieldError {
    FieldError::new(message, paths)
}

pub fn out_of_bounds_value(
    value: impl fmt::Display,
    lower: impl fmt::Display,
    upper: impl fmt::Display,
    path: &str,
) -> FieldError {
    FieldError::new(
        format!("expected {lower} <= {value} <= {upper}"),
        &[path],
    )
}
