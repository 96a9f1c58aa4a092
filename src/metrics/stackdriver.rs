//! Wiring of views to Stackdriver metric types and monitored resources.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::config::MetricsConfig;
use super::join_path;
use super::metricskey::{eventing, serving};
use super::monitored_resources::{
    eventing as eventing_resources, serving as serving_resources, GcpMetadata, Global,
    MonitoredResource,
};
use super::view::{Row, Tag, View};

/// Prefix of metric types that no Knative monitored resource accepts.
pub const CUSTOM_METRIC_TYPE_PREFIX: &str = "custom.googleapis.com/knative.dev";

/// The Knative monitored-resource types a metric can be reported against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnativeResource {
    Revision,
    Broker,
    Trigger,
    Importer,
}

impl KnativeResource {
    /// The resource type that accepts `metric_type`, if any.
    pub fn for_metric_type(metric_type: &str) -> Option<Self> {
        [
            (KnativeResource::Revision, serving::KNATIVE_REVISION_METRICS),
            (KnativeResource::Broker, eventing::KNATIVE_BROKER_METRICS),
            (KnativeResource::Trigger, eventing::KNATIVE_TRIGGER_METRICS),
            (KnativeResource::Importer, eventing::KNATIVE_IMPORTER_METRICS),
        ]
        .into_iter()
        .find(|(_, metrics)| metrics.contains(&metric_type))
        .map(|(resource, _)| resource)
    }

    pub fn resource_type(&self) -> &'static str {
        match self {
            KnativeResource::Revision => serving::RESOURCE_TYPE_KNATIVE_REVISION,
            KnativeResource::Broker => eventing::RESOURCE_TYPE_KNATIVE_BROKER,
            KnativeResource::Trigger => eventing::RESOURCE_TYPE_KNATIVE_TRIGGER,
            KnativeResource::Importer => eventing::RESOURCE_TYPE_KNATIVE_IMPORTER,
        }
    }

    /// Lifts this resource type's labels out of `tags`.
    pub fn monitored_resource(
        &self,
        tags: Vec<Tag>,
        gm: &GcpMetadata,
    ) -> (Vec<Tag>, Box<dyn MonitoredResource>) {
        match self {
            KnativeResource::Revision => boxed(serving_resources::knative_revision(tags, gm)),
            KnativeResource::Broker => boxed(eventing_resources::knative_broker(tags, gm)),
            KnativeResource::Trigger => boxed(eventing_resources::knative_trigger(tags, gm)),
            KnativeResource::Importer => boxed(eventing_resources::knative_importer(tags, gm)),
        }
    }
}

fn boxed<R: MonitoredResource + 'static>(
    (tags, resource): (Vec<Tag>, R),
) -> (Vec<Tag>, Box<dyn MonitoredResource>) {
    (tags, Box::new(resource))
}

/// Maps a view and its tags to the remaining tags and the monitored resource.
pub type MonitoredResourceFn =
    Arc<dyn Fn(&View, Vec<Tag>) -> (Vec<Tag>, Box<dyn MonitoredResource>) + Send + Sync>;

/// Maps a view to its metric type.
pub type MetricTypeFn = Arc<dyn Fn(&View) -> String + Send + Sync>;

/// Picks the monitored resource of each view by its metric type,
/// falling back to [`Global`] with the tags untouched.
pub fn monitored_resource_fn(metric_type_prefix: &str, gm: GcpMetadata) -> MonitoredResourceFn {
    let prefix = metric_type_prefix.to_owned();
    Arc::new(move |view: &View, tags: Vec<Tag>| {
        let metric_type = join_path(&[&prefix, &view.measure.name]);
        match KnativeResource::for_metric_type(&metric_type) {
            Some(resource) => resource.monitored_resource(tags, &gm),
            None => (tags, Box::new(Global) as Box<dyn MonitoredResource>),
        }
    })
}

/// Names built-in metrics by their Knative metric type and everything
/// else under `custom_metric_type_prefix`.
pub fn metric_type_fn(metric_type_prefix: &str, custom_metric_type_prefix: &str) -> MetricTypeFn {
    let prefix = metric_type_prefix.to_owned();
    let custom_prefix = custom_metric_type_prefix.to_owned();
    Arc::new(move |view: &View| {
        let metric_type = join_path(&[&prefix, &view.measure.name]);
        if KnativeResource::for_metric_type(&metric_type).is_some() {
            metric_type
        } else {
            join_path(&[&custom_prefix, &view.measure.name])
        }
    })
}

/// Everything a Stackdriver exporter needs to be told about Knative metrics.
#[derive(Clone)]
pub struct StackdriverOptions {
    pub project_id: String,
    pub metric_type: MetricTypeFn,
    /// Same as `metric_type`; only affects custom metrics.
    pub metric_display_name: MetricTypeFn,
    pub monitored_resource: MonitoredResourceFn,
    pub default_monitoring_labels: BTreeMap<String, String>,
    metric_type_prefix: String,
    allow_custom_metrics: bool,
}

impl StackdriverOptions {
    pub fn new(config: &MetricsConfig, gm: GcpMetadata) -> Self {
        let metric_type = metric_type_fn(
            &config.stackdriver_metric_type_prefix,
            &config.stackdriver_custom_metric_type_prefix,
        );
        Self {
            project_id: config.stackdriver_project_id.clone(),
            metric_display_name: Arc::clone(&metric_type),
            metric_type,
            monitored_resource: monitored_resource_fn(&config.stackdriver_metric_type_prefix, gm),
            default_monitoring_labels: BTreeMap::new(),
            metric_type_prefix: config.stackdriver_metric_type_prefix.clone(),
            allow_custom_metrics: config.allow_stackdriver_custom_metrics,
        }
    }

    /// Whether `view` should be sent at all. Custom metrics are only sent when allowed.
    pub fn is_exported(&self, view: &View) -> bool {
        self.allow_custom_metrics
            || KnativeResource::for_metric_type(&join_path(&[
                &self.metric_type_prefix,
                &view.measure.name,
            ]))
            .is_some()
    }
}

impl fmt::Debug for StackdriverOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StackdriverOptions")
            .field("project_id", &self.project_id)
            .field("default_monitoring_labels", &self.default_monitoring_labels)
            .field("metric_type_prefix", &self.metric_type_prefix)
            .field("allow_custom_metrics", &self.allow_custom_metrics)
            .finish_non_exhaustive()
    }
}

/// Receives aggregated view data.
pub trait Exporter: Send + Sync {
    fn export_view(&self, view: &View, rows: &[Row]);

    fn flush(&self);
}

/// Creates exporters backed by a Stackdriver client.
pub trait ExporterFactory {
    type Error: std::error::Error;

    fn new_exporter(&self, options: StackdriverOptions) -> Result<Box<dyn Exporter>, Self::Error>;
}

/// Creates a Stackdriver exporter for `config`, labeling resources with `gm`.
pub fn new_stackdriver_exporter<F: ExporterFactory>(
    config: &MetricsConfig,
    gm: GcpMetadata,
    factory: &F,
) -> Result<Box<dyn Exporter>, F::Error> {
    let options = StackdriverOptions::new(config, gm);
    match factory.new_exporter(options) {
        Ok(exporter) => {
            log::info!("Created Stackdriver exporter with config {config:?}");
            Ok(exporter)
        }
        Err(err) => {
            log::error!("Failed to create the Stackdriver exporter: {err}");
            Err(err)
        }
    }
}
