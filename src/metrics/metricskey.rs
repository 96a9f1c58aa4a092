//! Metric label keys and the metric types each monitored resource accepts.

pub mod eventing;
pub mod serving;

/// GCP project the metric is reported from.
pub const LABEL_PROJECT: &str = "project_id";

/// Location of the cluster the metric is reported from.
pub const LABEL_LOCATION: &str = "location";

pub const LABEL_CLUSTER_NAME: &str = "cluster_name";

pub const LABEL_NAMESPACE_NAME: &str = "namespace_name";

/// Value of a resource label that could not be determined.
pub const VALUE_UNKNOWN: &str = "unknown";
