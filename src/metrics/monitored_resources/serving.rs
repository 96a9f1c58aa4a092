use std::collections::BTreeMap;

use super::{tags_map, value_or_unknown, without_labels, GcpMetadata, MonitoredResource};
use crate::metrics::metricskey::serving::{
    KNATIVE_REVISION_LABELS, LABEL_CONFIGURATION_NAME, LABEL_REVISION_NAME, LABEL_SERVICE_NAME,
    RESOURCE_TYPE_KNATIVE_REVISION,
};
use crate::metrics::metricskey::{
    LABEL_CLUSTER_NAME, LABEL_LOCATION, LABEL_NAMESPACE_NAME, LABEL_PROJECT,
};
use crate::metrics::view::Tag;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnativeRevision {
    pub project: String,
    pub location: String,
    pub cluster_name: String,
    pub namespace_name: String,
    pub service_name: String,
    pub configuration_name: String,
    pub revision_name: String,
}

impl MonitoredResource for KnativeRevision {
    fn monitored_resource(&self) -> (&'static str, BTreeMap<&'static str, String>) {
        let labels = BTreeMap::from([
            (LABEL_PROJECT, self.project.clone()),
            (LABEL_LOCATION, self.location.clone()),
            (LABEL_CLUSTER_NAME, self.cluster_name.clone()),
            (LABEL_NAMESPACE_NAME, self.namespace_name.clone()),
            (LABEL_SERVICE_NAME, self.service_name.clone()),
            (LABEL_CONFIGURATION_NAME, self.configuration_name.clone()),
            (LABEL_REVISION_NAME, self.revision_name.clone()),
        ]);
        (RESOURCE_TYPE_KNATIVE_REVISION, labels)
    }
}

/// Lifts the revision labels out of `tags`.
pub fn knative_revision(tags: Vec<Tag>, gm: &GcpMetadata) -> (Vec<Tag>, KnativeRevision) {
    let map = tags_map(&tags);
    let revision = KnativeRevision {
        project: gm.project.clone(),
        location: gm.location.clone(),
        cluster_name: gm.cluster.clone(),
        namespace_name: value_or_unknown(LABEL_NAMESPACE_NAME, &map),
        service_name: value_or_unknown(LABEL_SERVICE_NAME, &map),
        configuration_name: value_or_unknown(LABEL_CONFIGURATION_NAME, &map),
        revision_name: value_or_unknown(LABEL_REVISION_NAME, &map),
    };
    (without_labels(tags, KNATIVE_REVISION_LABELS), revision)
}
