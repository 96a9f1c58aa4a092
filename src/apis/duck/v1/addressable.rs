use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ListMeta, ObjectMeta};
use kube_core::TypeMeta;
use serde::{Deserialize, Serialize};

use super::Status;
use crate::apis::duck::{Implementable, Listable, Populatable};
use crate::apis::{Condition, ConditionStatus, ConditionType, Url};

/// Where a resource can be reached over HTTP.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addressable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Url>,
}

/// How an Addressable is expected to be embedded in a status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Addressable>,
}

/// The minimum resource shape of anything events can be delivered to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressableType {
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub status: AddressableStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressableStatus {
    #[serde(flatten)]
    pub status: Status,
    #[serde(flatten)]
    pub address_status: AddressStatus,
}

impl AddressableType {
    /// The URL the object is currently reachable at, if it is ready.
    pub fn ready_url(&self) -> Option<&Url> {
        self.status
            .status
            .get_condition(ConditionType::READY)
            .filter(|c| c.is_true())?;
        self.status.address_status.address.as_ref()?.url.as_ref()
    }
}

/// A list of [`AddressableType`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressableTypeList {
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,
    #[serde(default)]
    pub metadata: ListMeta,
    pub items: Vec<AddressableType>,
}

impl Implementable for AddressableType {
    type Full = AddressableType;
}

impl Listable for AddressableType {
    type List = AddressableTypeList;
}

impl Populatable for AddressableType {
    fn populate(&mut self) {
        self.status.status.observed_generation = 42;
        self.status.status.conditions = vec![Condition::new(
            ConditionType::READY,
            ConditionStatus::True,
        )];
        self.status.address_status.address = Some(Addressable {
            url: Url::parse("http://foo.bar.svc.cluster.local/").ok(),
        });
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::apis::duck::verify_type;
    use crate::apis::duck::v1::Source;

    #[test]
    fn populated_json_shape() {
        assert_eq!(
            serde_json::to_value(AddressableType::full_type()).unwrap(),
            json!({
                "metadata": {},
                "status": {
                    "observedGeneration": 42,
                    "conditions": [{"type": "Ready", "status": "True"}],
                    "address": {"url": "http://foo.bar.svc.cluster.local/"},
                },
            })
        );
    }

    #[test]
    fn ready_url_requires_ready_condition() {
        let mut addressable = AddressableType::full_type();
        assert_eq!(
            addressable.ready_url().map(Url::as_str),
            Some("http://foo.bar.svc.cluster.local/")
        );

        addressable.status.status.conditions[0].status = ConditionStatus::False;
        assert_eq!(addressable.ready_url(), None);
    }

    #[test]
    fn a_source_is_not_addressable() {
        verify_type::<AddressableType, AddressableType>().unwrap();
        assert!(verify_type::<Source, AddressableType>().is_err());
    }
}
