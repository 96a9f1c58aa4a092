use super::{LABEL_CLUSTER_NAME, LABEL_LOCATION, LABEL_NAMESPACE_NAME, LABEL_PROJECT};

/// Stackdriver resource type of Knative revisions.
pub const RESOURCE_TYPE_KNATIVE_REVISION: &str = "knative_revision";

pub const LABEL_SERVICE_NAME: &str = "service_name";

pub const LABEL_CONFIGURATION_NAME: &str = "configuration_name";

pub const LABEL_REVISION_NAME: &str = "revision_name";

/// Not a resource label; reported as a plain metric label.
pub const LABEL_ROUTE_NAME: &str = "route_name";

/// Resource labels of `knative_revision`.
pub const KNATIVE_REVISION_LABELS: &[&str] = &[
    LABEL_PROJECT,
    LABEL_LOCATION,
    LABEL_CLUSTER_NAME,
    LABEL_NAMESPACE_NAME,
    LABEL_SERVICE_NAME,
    LABEL_CONFIGURATION_NAME,
    LABEL_REVISION_NAME,
];

/// Metric types reported against `knative_revision`.
pub const KNATIVE_REVISION_METRICS: &[&str] = &[
    "knative.dev/serving/activator/request_count",
    "knative.dev/serving/activator/request_latencies",
    "knative.dev/serving/autoscaler/desired_pods",
    "knative.dev/serving/autoscaler/requested_pods",
    "knative.dev/serving/autoscaler/actual_pods",
    "knative.dev/serving/autoscaler/stable_request_concurrency",
    "knative.dev/serving/autoscaler/panic_request_concurrency",
    "knative.dev/serving/autoscaler/target_concurrency_per_pod",
    "knative.dev/serving/autoscaler/excess_burst_capacity",
    "knative.dev/serving/autoscaler/panic_mode",
    "knative.dev/serving/revision/request_count",
    "knative.dev/serving/revision/request_latencies",
];
