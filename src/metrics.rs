//! Stackdriver glue for Knative metrics.
//!
//! Metric views recorded by Knative components are reported against one of a
//! few fixed monitored-resource types (`knative_revision`, `knative_broker`,
//! `knative_trigger`, `knative_importer`). Each type has its own resource
//! labels, which are lifted out of the metric's tags. Everything else is
//! reported against the `global` resource under a custom metric type.

pub mod config;
pub use config::{BackendDestination, ConfigError, ExporterOptions, MetricsConfig};
pub mod metricskey;
pub mod monitored_resources;
pub use monitored_resources::{GcpMetadata, MonitoredResource};
pub mod stackdriver;
pub mod view;
pub use view::{Measure, Row, Tag, View};

/// Metric domain of Knative Serving components.
pub const SERVING_DOMAIN: &str = "knative.dev/serving";

/// Metric domain of Knative Eventing components.
pub const EVENTING_DOMAIN: &str = "knative.dev/eventing";

/// Joins slash-separated path elements, skipping empty ones and
/// normalizing `.`, `..` and repeated slashes.
pub(crate) fn join_path(elems: &[&str]) -> String {
    let rooted = elems
        .iter()
        .find(|elem| !elem.is_empty())
        .is_some_and(|elem| elem.starts_with('/'));

    let mut segments: Vec<&str> = Vec::new();
    for segment in elems.iter().flat_map(|elem| elem.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) if elems.iter().all(|elem| elem.is_empty()) => String::new(),
        (false, true) => ".".to_owned(),
        (false, false) => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::join_path;

    #[test]
    fn joins_like_slash_paths() {
        assert_eq!(
            join_path(&["knative.dev/serving", "activator", "request_count"]),
            "knative.dev/serving/activator/request_count"
        );
        assert_eq!(join_path(&["knative.dev/serving/", "", "/x"]), "knative.dev/serving/x");
        assert_eq!(join_path(&["a/b", "../c"]), "a/c");
        assert_eq!(join_path(&["/a", "b"]), "/a/b");
        assert_eq!(join_path(&["", ""]), "");
        assert_eq!(join_path(&["a", ".."]), ".");
    }
}
