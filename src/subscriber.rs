//! Streams of duck-typed objects from the apiserver.

use kube_client::{Api, Client};
use kube_core::{ApiResource, Resource};
use kube_runtime::watcher;

use crate::apis::duck::v1::Source;

/// Uniquely identifies an object of a known type by namespace and name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifiedName {
    /// The object namespace, if any
    pub namespace: Option<String>,
    /// The object name
    pub name: String,
}

impl QualifiedName {
    pub fn from_resource<K: Resource>(resource: &K) -> Self {
        Self {
            namespace: resource.meta().namespace.clone(),
            name: resource.meta().name.clone().unwrap_or_default(),
        }
    }
}

/// An observed change of an object.
#[derive(Debug, Clone)]
pub struct Event<Key, Entry> {
    pub key: Key,
    pub entry: Entry,
    /// Whether the object is still present, i.e. this is not a deletion.
    pub exists: bool,
}

pub mod objects;
pub use objects::duck_objects;

/// Uniquely identifies a type of resources in a cluster.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupResource {
    /// The group of the resource type, or empty string for the core group.
    pub group: String,
    /// The plural name of the resource type.
    pub resource: String,
}

impl GroupResource {
    pub fn from_api_resource(resource: &ApiResource) -> Self {
        Self {
            group: resource.group.clone(),
            resource: resource.plural.clone(),
        }
    }
}

pub mod types;
pub use types::source_types;

/// Watches every object of `resource` through the [`Source`] duck type.
pub fn sources(
    client: Client,
    resource: ApiResource,
    watcher_config: watcher::Config,
) -> impl futures::Stream<Item = Result<Event<QualifiedName, Source>, watcher::Error>> {
    let api = Api::<Source>::all_with(client, &resource);
    duck_objects(api, watcher_config, resource)
}

#[cfg(test)]
mod tests {
    use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
    use kube_core::GroupVersionKind;

    use super::*;

    #[test]
    fn names_duck_objects() {
        let source = Source {
            metadata: ObjectMeta {
                namespace: Some("default".to_owned()),
                name: Some("ping".to_owned()),
                ..ObjectMeta::default()
            },
            ..Source::default()
        };
        assert_eq!(
            QualifiedName::from_resource(&source),
            QualifiedName {
                namespace: Some("default".to_owned()),
                name: "ping".to_owned(),
            }
        );

        let gvk = GroupVersionKind::gvk("sources.knative.dev", "v1", "PingSource");
        let resource = ApiResource::from_gvk_with_plural(&gvk, "pingsources");
        assert_eq!(
            GroupResource::from_api_resource(&resource).to_string(),
            "pingsources.sources.knative.dev"
        );
    }
}
