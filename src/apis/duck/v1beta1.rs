//! Registration helpers for `duck.knative.dev/v1beta1`.

use super::{GroupKind, GroupResource, GroupVersion, GROUP_NAME};

pub const SCHEME_GROUP_VERSION: GroupVersion = GroupVersion {
    group: GROUP_NAME,
    version: "v1beta1",
};

/// Takes an unqualified kind and returns a group-qualified `GroupKind`.
pub fn kind(kind: &str) -> GroupKind {
    SCHEME_GROUP_VERSION.kind(kind)
}

/// Takes an unqualified resource and returns a group-qualified `GroupResource`.
pub fn resource(resource: &str) -> GroupResource {
    SCHEME_GROUP_VERSION.resource(resource)
}

/// Kinds served under this group version.
pub fn known_types() -> &'static [&'static str] {
    &[
        "KResource",
        "KResourceList",
        "AddressableType",
        "AddressableTypeList",
        "Target",
        "TargetList",
    ]
}
