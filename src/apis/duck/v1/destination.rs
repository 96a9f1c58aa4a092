use serde::{Deserialize, Serialize};

use super::KReference;
use crate::apis::{self, FieldError, Url};

/// A target of an invocation over HTTP: an Addressable reference,
/// an absolute URI, or a reference plus a URI relative to its address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Destination {
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_: Option<KReference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<Url>,
}

impl Destination {
    pub fn validate(&self) -> Result<(), FieldError> {
        match (&self.ref_, &self.uri) {
            (None, None) => Err(apis::generic(
                "expected at least one, got none",
                &["ref", "uri"],
            )),
            (Some(_), Some(uri)) if uri.is_abs() => Err(apis::generic(
                "Absolute URI is not allowed when Ref or [apiVersion, kind, name] is present",
                &["ref", "uri"],
            )),
            (None, Some(uri)) if !uri.is_abs() || uri.host().is_none() => {
                Err(apis::invalid_value(
                    "Relative URI is not allowed when Ref and [apiVersion, kind, name] is absent",
                    "uri",
                ))
            }
            (Some(reference), None) => reference.validate().map_err(|err| err.via_field("ref")),
            _ => Ok(()),
        }
    }

    /// The URI to deliver to, given the resolved address of `ref`.
    pub fn resolve(&self, ref_address: &Url) -> Result<Url, url::ParseError> {
        match &self.uri {
            Some(uri) => ref_address.resolve_reference(uri),
            None => Ok(ref_address.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn broker() -> KReference {
        KReference {
            kind: "Broker".to_owned(),
            namespace: "default".to_owned(),
            name: "default".to_owned(),
            api_version: "eventing.knative.dev/v1".to_owned(),
        }
    }

    #[test]
    fn validation_rules() {
        let err = Destination::default().validate().unwrap_err();
        assert_eq!(err.to_string(), "expected at least one, got none: ref, uri");

        let dest = Destination {
            ref_: Some(broker()),
            uri: Some(Url::parse("http://example.com").unwrap()),
        };
        assert_eq!(dest.validate().unwrap_err().paths, vec!["ref", "uri"]);

        let dest = Destination {
            ref_: None,
            uri: Some(Url::parse("/relative").unwrap()),
        };
        assert_eq!(dest.validate().unwrap_err().paths, vec!["uri"]);

        let dest = Destination {
            ref_: Some(KReference::default()),
            uri: None,
        };
        assert_eq!(
            dest.validate().unwrap_err().to_string(),
            "missing field(s): ref.apiVersion, ref.kind, ref.name"
        );

        let dest = Destination {
            ref_: Some(broker()),
            uri: Some(Url::parse("/relative").unwrap()),
        };
        assert_eq!(dest.validate(), Ok(()));
    }

    #[test]
    fn incomplete_ref_is_reported_by_validation() {
        let dest: Destination =
            serde_json::from_value(json!({"ref": {"kind": "Service", "name": "display"}})).unwrap();
        assert_eq!(
            dest.validate().unwrap_err().to_string(),
            "missing field(s): ref.apiVersion"
        );
    }

    #[test]
    fn hostless_uri_is_reported_by_validation() {
        let dest: Destination = serde_json::from_value(json!({"uri": "http://"})).unwrap();
        let err = dest.validate().unwrap_err();
        assert_eq!(err.paths, vec!["uri"]);
        assert!(err.message.starts_with("invalid value: Relative URI is not allowed"));
    }

    #[test]
    fn resolves_against_ref_address() {
        let address =
            Url::parse("http://broker-ingress.knative-eventing.svc.cluster.local/default/default")
                .unwrap();

        let dest = Destination {
            ref_: Some(broker()),
            uri: None,
        };
        assert_eq!(dest.resolve(&address).unwrap(), address);

        let dest = Destination {
            ref_: Some(broker()),
            uri: Some(Url::parse("extra").unwrap()),
        };
        assert_eq!(
            dest.resolve(&address).unwrap().to_string(),
            "http://broker-ingress.knative-eventing.svc.cluster.local/default/extra"
        );
    }
}
