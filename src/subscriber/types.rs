use futures::{stream, Stream, TryStreamExt};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube_client::{Api, Client};
use kube_core::{ApiResource, GroupVersionKind};
use kube_runtime::{watcher, WatchStreamExt};

use super::GroupResource;
use crate::apis::duck::SOURCE_DUCK_LABEL;

/// Subscriber yielding each served version of every CRD that declares itself
/// a Source, i.e. carries the label `duck.knative.dev/source=true`.
///
/// A CRD is yielded again whenever it changes.
pub fn source_types(
    client: Client,
) -> impl Stream<Item = Result<(GroupResource, ApiResource), Error>> {
    let crd_client = Api::<CustomResourceDefinition>::all(client);
    let selector = format!("{SOURCE_DUCK_LABEL}=true");

    watcher(crd_client, watcher::Config::default().labels(&selector))
        .applied_objects()
        .map_err(Error::Watch)
        .map_ok(|crd| stream::iter(served_resources(&crd).into_iter().map(Ok)))
        .try_flatten()
}

/// The resource of every served version of `crd`.
pub fn served_resources(crd: &CustomResourceDefinition) -> Vec<(GroupResource, ApiResource)> {
    let spec = &crd.spec;
    let resources: Vec<_> = spec
        .versions
        .iter()
        .filter(|version| version.served)
        .map(|version| {
            let gvk = GroupVersionKind::gvk(&spec.group, &version.name, &spec.names.kind);
            let resource = ApiResource::from_gvk_with_plural(&gvk, &spec.names.plural);
            (GroupResource::from_api_resource(&resource), resource)
        })
        .collect();

    if resources.is_empty() {
        log::debug!(
            "source CRD {}.{} serves no versions",
            spec.names.plural,
            spec.group
        );
    }
    resources
}

/// The error type returned by [`source_types`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to watch source CRDs: {0}")]
    Watch(#[source] watcher::Error),
}

#[cfg(test)]
mod tests {
    use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::{
        CustomResourceDefinitionNames, CustomResourceDefinitionSpec,
        CustomResourceDefinitionVersion,
    };

    use super::*;

    fn version(name: &str, served: bool) -> CustomResourceDefinitionVersion {
        CustomResourceDefinitionVersion {
            name: name.to_owned(),
            served,
            storage: served,
            ..CustomResourceDefinitionVersion::default()
        }
    }

    #[test]
    fn only_served_versions_are_yielded() {
        let crd = CustomResourceDefinition {
            spec: CustomResourceDefinitionSpec {
                group: "sources.knative.dev".to_owned(),
                names: CustomResourceDefinitionNames {
                    kind: "PingSource".to_owned(),
                    plural: "pingsources".to_owned(),
                    ..CustomResourceDefinitionNames::default()
                },
                scope: "Namespaced".to_owned(),
                versions: vec![version("v1beta2", false), version("v1", true)],
                ..CustomResourceDefinitionSpec::default()
            },
            ..CustomResourceDefinition::default()
        };

        let resources = served_resources(&crd);
        assert_eq!(resources.len(), 1);
        let (group_resource, resource) = &resources[0];
        assert_eq!(group_resource.to_string(), "pingsources.sources.knative.dev");
        assert_eq!(resource.api_version, "sources.knative.dev/v1");
        assert_eq!(resource.kind, "PingSource");
    }
}
