use std::collections::BTreeMap;

use super::{tags_map, value_or_unknown, without_labels, GcpMetadata, MonitoredResource};
use crate::metrics::metricskey::eventing::*;
use crate::metrics::metricskey::{
    LABEL_CLUSTER_NAME, LABEL_LOCATION, LABEL_NAMESPACE_NAME, LABEL_PROJECT,
};
use crate::metrics::view::Tag;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnativeTrigger {
    pub project: String,
    pub location: String,
    pub cluster_name: String,
    pub namespace_name: String,
    pub trigger_name: String,
    pub broker_name: String,
    pub type_filter_attribute: String,
    pub source_filter_attribute: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnativeBroker {
    pub project: String,
    pub location: String,
    pub cluster_name: String,
    pub namespace_name: String,
    pub broker_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnativeImporter {
    pub project: String,
    pub location: String,
    pub cluster_name: String,
    pub namespace_name: String,
    pub importer_name: String,
    pub importer_kind: String,
}

impl MonitoredResource for KnativeTrigger {
    fn monitored_resource(&self) -> (&'static str, BTreeMap<&'static str, String>) {
        let labels = BTreeMap::from([
            (LABEL_PROJECT, self.project.clone()),
            (LABEL_LOCATION, self.location.clone()),
            (LABEL_CLUSTER_NAME, self.cluster_name.clone()),
            (LABEL_NAMESPACE_NAME, self.namespace_name.clone()),
            (LABEL_TRIGGER_NAME, self.trigger_name.clone()),
            (LABEL_BROKER_NAME, self.broker_name.clone()),
            (LABEL_TRIGGER_TYPE_FILTER_ATTRIBUTE, self.type_filter_attribute.clone()),
            (LABEL_TRIGGER_SOURCE_FILTER_ATTRIBUTE, self.source_filter_attribute.clone()),
        ]);
        (RESOURCE_TYPE_KNATIVE_TRIGGER, labels)
    }
}

impl MonitoredResource for KnativeBroker {
    fn monitored_resource(&self) -> (&'static str, BTreeMap<&'static str, String>) {
        let labels = BTreeMap::from([
            (LABEL_PROJECT, self.project.clone()),
            (LABEL_LOCATION, self.location.clone()),
            (LABEL_CLUSTER_NAME, self.cluster_name.clone()),
            (LABEL_NAMESPACE_NAME, self.namespace_name.clone()),
            (LABEL_BROKER_NAME, self.broker_name.clone()),
        ]);
        (RESOURCE_TYPE_KNATIVE_BROKER, labels)
    }
}

impl MonitoredResource for KnativeImporter {
    fn monitored_resource(&self) -> (&'static str, BTreeMap<&'static str, String>) {
        let labels = BTreeMap::from([
            (LABEL_PROJECT, self.project.clone()),
            (LABEL_LOCATION, self.location.clone()),
            (LABEL_CLUSTER_NAME, self.cluster_name.clone()),
            (LABEL_NAMESPACE_NAME, self.namespace_name.clone()),
            (LABEL_IMPORTER_NAME, self.importer_name.clone()),
            (LABEL_IMPORTER_KIND, self.importer_kind.clone()),
        ]);
        (RESOURCE_TYPE_KNATIVE_IMPORTER, labels)
    }
}

pub fn knative_broker(tags: Vec<Tag>, gm: &GcpMetadata) -> (Vec<Tag>, KnativeBroker) {
    let map = tags_map(&tags);
    let broker = KnativeBroker {
        project: gm.project.clone(),
        location: gm.location.clone(),
        cluster_name: gm.cluster.clone(),
        namespace_name: value_or_unknown(LABEL_NAMESPACE_NAME, &map),
        broker_name: value_or_unknown(LABEL_BROKER_NAME, &map),
    };
    (without_labels(tags, KNATIVE_BROKER_LABELS), broker)
}

pub fn knative_trigger(tags: Vec<Tag>, gm: &GcpMetadata) -> (Vec<Tag>, KnativeTrigger) {
    let map = tags_map(&tags);
    let trigger = KnativeTrigger {
        project: gm.project.clone(),
        location: gm.location.clone(),
        cluster_name: gm.cluster.clone(),
        namespace_name: value_or_unknown(LABEL_NAMESPACE_NAME, &map),
        trigger_name: value_or_unknown(LABEL_TRIGGER_NAME, &map),
        broker_name: value_or_unknown(LABEL_BROKER_NAME, &map),
        type_filter_attribute: value_or_unknown(LABEL_TRIGGER_TYPE_FILTER_ATTRIBUTE, &map),
        source_filter_attribute: value_or_unknown(LABEL_TRIGGER_SOURCE_FILTER_ATTRIBUTE, &map),
    };
    (without_labels(tags, KNATIVE_TRIGGER_LABELS), trigger)
}

pub fn knative_importer(tags: Vec<Tag>, gm: &GcpMetadata) -> (Vec<Tag>, KnativeImporter) {
    let map = tags_map(&tags);
    let importer = KnativeImporter {
        project: gm.project.clone(),
        location: gm.location.clone(),
        cluster_name: gm.cluster.clone(),
        namespace_name: value_or_unknown(LABEL_NAMESPACE_NAME, &map),
        importer_name: value_or_unknown(LABEL_IMPORTER_NAME, &map),
        importer_kind: value_or_unknown(LABEL_IMPORTER_KIND, &map),
    };
    (without_labels(tags, KNATIVE_IMPORTER_LABELS), importer)
}
