//! Duck types of `duck.knative.dev/v1`.

use std::borrow::Cow;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube_core::{ApiResource, DynamicResourceScope, Resource};
use serde::{Deserialize, Serialize};

use super::{GroupVersion, GROUP_NAME};
use crate::apis::{self, FieldError};

mod addressable;
pub use addressable::*;
mod destination;
pub use destination::*;
mod source;
pub use source::*;
mod status;
pub use status::*;

pub const SCHEME_GROUP_VERSION: GroupVersion = GroupVersion {
    group: GROUP_NAME,
    version: "v1",
};

/// A reference to an object by kind, name and API version,
/// optionally within a namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KReference {
    #[serde(default)]
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub api_version: String,
}

impl KReference {
    pub fn validate(&self) -> Result<(), FieldError> {
        let mut errs = FieldError::empty();
        for (value, field) in [
            (&self.name, "name"),
            (&self.api_version, "apiVersion"),
            (&self.kind, "kind"),
        ] {
            if value.is_empty() {
                errs = errs.also(apis::missing_field(&[field]));
            }
        }
        errs.into_result()
    }
}

/// Implements [`Resource`] for a duck type, the way `DynamicObject` does:
/// the group, version and kind come from the [`ApiResource`] it is read through.
macro_rules! impl_duck_resource {
    ($ty:ty) => {
        impl Resource for $ty {
            type DynamicType = ApiResource;
            type Scope = DynamicResourceScope;

            fn kind(dt: &ApiResource) -> Cow<'_, str> {
                dt.kind.as_str().into()
            }

            fn group(dt: &ApiResource) -> Cow<'_, str> {
                dt.group.as_str().into()
            }

            fn version(dt: &ApiResource) -> Cow<'_, str> {
                dt.version.as_str().into()
            }

            fn api_version(dt: &ApiResource) -> Cow<'_, str> {
                dt.api_version.as_str().into()
            }

            fn plural(dt: &ApiResource) -> Cow<'_, str> {
                dt.plural.as_str().into()
            }

            fn meta(&self) -> &ObjectMeta {
                &self.metadata
            }

            fn meta_mut(&mut self) -> &mut ObjectMeta {
                &mut self.metadata
            }
        }
    };
}

impl_duck_resource!(Source);
impl_duck_resource!(AddressableType);

#[cfg(test)]
mod tests {
    use kube_core::{GroupVersionKind, Resource};

    use super::*;

    #[test]
    fn kreference_requires_name_version_kind() {
        let err = KReference::default().validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing field(s): apiVersion, kind, name"
        );

        let reference = KReference {
            kind: "Broker".to_owned(),
            namespace: "default".to_owned(),
            name: "default".to_owned(),
            api_version: "eventing.knative.dev/v1".to_owned(),
        };
        assert_eq!(reference.validate(), Ok(()));
    }

    #[test]
    fn duck_resource_reads_through_api_resource() {
        let ar = ApiResource::from_gvk_with_plural(
            &GroupVersionKind::gvk("sources.knative.dev", "v1", "PingSource"),
            "pingsources",
        );
        assert_eq!(Source::kind(&ar), "PingSource");
        assert_eq!(Source::api_version(&ar), "sources.knative.dev/v1");
        assert_eq!(
            Source::url_path(&ar, Some("default")),
            "/apis/sources.knative.dev/v1/namespaces/default/pingsources"
        );
    }

    #[test]
    fn group_version() {
        assert_eq!(SCHEME_GROUP_VERSION.to_string(), "duck.knative.dev/v1");
    }
}
