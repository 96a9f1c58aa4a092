use super::{LABEL_CLUSTER_NAME, LABEL_LOCATION, LABEL_NAMESPACE_NAME, LABEL_PROJECT};

pub const RESOURCE_TYPE_KNATIVE_TRIGGER: &str = "knative_trigger";

pub const RESOURCE_TYPE_KNATIVE_BROKER: &str = "knative_broker";

pub const RESOURCE_TYPE_KNATIVE_IMPORTER: &str = "knative_importer";

pub const LABEL_TRIGGER_NAME: &str = "trigger_name";

pub const LABEL_BROKER_NAME: &str = "broker_name";

/// The `type` attribute a trigger filters on.
pub const LABEL_TRIGGER_TYPE_FILTER_ATTRIBUTE: &str = "filter_type";

/// The `source` attribute a trigger filters on.
pub const LABEL_TRIGGER_SOURCE_FILTER_ATTRIBUTE: &str = "filter_source";

pub const LABEL_IMPORTER_NAME: &str = "importer_name";

/// The full kind of the importer.
pub const LABEL_IMPORTER_KIND: &str = "importer_kind";

/// Resource labels of `knative_trigger`.
pub const KNATIVE_TRIGGER_LABELS: &[&str] = &[
    LABEL_PROJECT,
    LABEL_LOCATION,
    LABEL_CLUSTER_NAME,
    LABEL_NAMESPACE_NAME,
    LABEL_TRIGGER_NAME,
    LABEL_BROKER_NAME,
    LABEL_TRIGGER_TYPE_FILTER_ATTRIBUTE,
    LABEL_TRIGGER_SOURCE_FILTER_ATTRIBUTE,
];

/// Metric types reported against `knative_trigger`.
pub const KNATIVE_TRIGGER_METRICS: &[&str] = &[
    "knative.dev/eventing/trigger/event_count",
    "knative.dev/eventing/trigger/event_process_latencies",
    "knative.dev/eventing/trigger/event_dispatch_latencies",
];

/// Resource labels of `knative_broker`.
pub const KNATIVE_BROKER_LABELS: &[&str] = &[
    LABEL_PROJECT,
    LABEL_LOCATION,
    LABEL_CLUSTER_NAME,
    LABEL_NAMESPACE_NAME,
    LABEL_BROKER_NAME,
];

/// Metric types reported against `knative_broker`.
pub const KNATIVE_BROKER_METRICS: &[&str] = &["knative.dev/eventing/broker/event_count"];

/// Resource labels of `knative_importer`.
pub const KNATIVE_IMPORTER_LABELS: &[&str] = &[
    LABEL_PROJECT,
    LABEL_LOCATION,
    LABEL_CLUSTER_NAME,
    LABEL_NAMESPACE_NAME,
    LABEL_IMPORTER_NAME,
    LABEL_IMPORTER_KIND,
];

/// Metric types reported against `knative_importer`.
pub const KNATIVE_IMPORTER_METRICS: &[&str] = &["knative.dev/eventing/importer/event_count"];
