use k8s_openapi::api::core::v1::ObjectReference;
use serde::{Deserialize, Serialize};

use crate::apis::{self, FieldError, Url, CURRENT_FIELD};

const DEPRECATED_REF_PATH: &str = "[apiVersion, kind, name]";

/// A target of an invocation over HTTP.
///
/// The target is either an Addressable object reference, an absolute URI,
/// or a reference plus a relative URI that is resolved against the
/// reference's address. The scalar `apiVersion`/`kind`/`name` fields are the
/// deprecated inline spelling of `ref`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    /// Points to an Addressable.
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub ref_: Option<ObjectReference>,

    #[serde(
        default,
        rename = "apiVersion",
        skip_serializing_if = "String::is_empty"
    )]
    pub deprecated_api_version: String,

    #[serde(default, rename = "kind", skip_serializing_if = "String::is_empty")]
    pub deprecated_kind: String,

    #[serde(default, rename = "name", skip_serializing_if = "String::is_empty")]
    pub deprecated_name: String,

    /// An absolute URL (non-empty scheme and host) pointing at the target,
    /// or a URI relative to the address of `ref`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<Url>,
}

impl Destination {
    /// Validates the destination, tolerating the deprecated scalar fields.
    pub fn validate(&self) -> Result<(), FieldError> {
        validate_destination(self, true).map_err(|err| err.via_field(CURRENT_FIELD))
    }

    /// Validates the destination, rejecting the deprecated scalar fields.
    pub fn validate_disallow_deprecated(&self) -> Result<(), FieldError> {
        validate_destination(self, false).map_err(|err| err.via_field(CURRENT_FIELD))
    }

    /// The object reference of this destination, whether given as `ref`
    /// or through the deprecated scalar fields.
    pub fn get_ref(&self) -> Option<ObjectReference> {
        self.ref_
            .clone()
            .or_else(|| self.deprecated_object_reference())
    }

    fn deprecated_object_reference(&self) -> Option<ObjectReference> {
        if self.deprecated_api_version.is_empty()
            && self.deprecated_kind.is_empty()
            && self.deprecated_name.is_empty()
        {
            return None;
        }
        Some(ObjectReference {
            api_version: Some(self.deprecated_api_version.clone()),
            kind: Some(self.deprecated_kind.clone()),
            name: Some(self.deprecated_name.clone()),
            ..ObjectReference::default()
        })
    }
}

/// Validates `dest`, either allowing or rejecting the deprecated scalar fields.
///
/// Checks stop at the first failing rule, except the deprecated-field check
/// which reports every offending field at once.
pub fn validate_destination(dest: &Destination, allow_deprecated: bool) -> Result<(), FieldError> {
    if !allow_deprecated {
        let mut errs = FieldError::empty();
        for (value, field) in [
            (&dest.deprecated_api_version, "apiVersion"),
            (&dest.deprecated_kind, "kind"),
            (&dest.deprecated_name, "name"),
        ] {
            if !value.is_empty() {
                errs = errs.also(apis::invalid_value(
                    format!("{field} is not allowed here, it's a deprecated value"),
                    field,
                ));
            }
        }
        errs.into_result()?;
    }

    let deprecated_ref = dest.deprecated_object_reference();
    if dest.ref_.is_some() && deprecated_ref.is_some() {
        return Err(apis::generic(
            "ref and [apiVersion, kind, name] can't be both present",
            &[DEPRECATED_REF_PATH, "ref"],
        ));
    }

    let object_ref = dest.ref_.as_ref().or(deprecated_ref.as_ref());
    match (object_ref, &dest.uri) {
        (None, None) => Err(apis::generic(
            "expected at least one, got none",
            &[DEPRECATED_REF_PATH, "ref", "uri"],
        )),
        (Some(_), Some(uri)) if uri.is_abs() => Err(apis::generic(
            "absolute URI is not allowed when Ref or [apiVersion, kind, name] is present",
            &[DEPRECATED_REF_PATH, "ref", "uri"],
        )),
        (None, Some(uri)) if !uri.is_abs() || uri.host().is_none() => Err(apis::invalid_value(
            "relative URI is not allowed when Ref and [apiVersion, kind, name] is absent",
            "uri",
        )),
        (Some(object_ref), None) => {
            let result = is_valid_object_reference(object_ref);
            if dest.ref_.is_some() {
                result.map_err(|err| err.via_field("ref"))
            } else {
                result
            }
        }
        _ => Ok(()),
    }
}

/// Checks that `object_ref` names an object by `name`, `apiVersion` and
/// `kind` only.
pub fn is_valid_object_reference(object_ref: &ObjectReference) -> Result<(), FieldError> {
    check_required_object_reference_fields(object_ref)
        .also(check_disallowed_object_reference_fields(object_ref))
        .into_result()
}

fn check_required_object_reference_fields(object_ref: &ObjectReference) -> FieldError {
    let mut errs = FieldError::empty();
    for (value, field) in [
        (&object_ref.name, "name"),
        (&object_ref.api_version, "apiVersion"),
        (&object_ref.kind, "kind"),
    ] {
        if value.as_deref().unwrap_or_default().is_empty() {
            errs = errs.also(apis::missing_field(&[field]));
        }
    }
    errs
}

fn check_disallowed_object_reference_fields(object_ref: &ObjectReference) -> FieldError {
    let disallowed: Vec<&str> = [
        (&object_ref.field_path, "fieldPath"),
        (&object_ref.namespace, "namespace"),
        (&object_ref.resource_version, "resourceVersion"),
        (&object_ref.uid, "uid"),
    ]
    .into_iter()
    .filter(|(value, _)| !value.as_deref().unwrap_or_default().is_empty())
    .map(|(_, field)| field)
    .collect();

    if disallowed.is_empty() {
        return FieldError::empty();
    }
    apis::disallowed_fields(&disallowed)
        .with_details("only name, apiVersion and kind are supported fields")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn valid_ref() -> ObjectReference {
        ObjectReference {
            api_version: Some("serving.knative.dev/v1".to_owned()),
            kind: Some("Service".to_owned()),
            name: Some("event-display".to_owned()),
            ..ObjectReference::default()
        }
    }

    fn deprecated() -> Destination {
        Destination {
            deprecated_api_version: "serving.knative.dev/v1".to_owned(),
            deprecated_kind: "Service".to_owned(),
            deprecated_name: "event-display".to_owned(),
            ..Destination::default()
        }
    }

    fn uri(raw: &str) -> Option<Url> {
        Some(Url::parse(raw).unwrap())
    }

    #[test]
    fn ref_only_is_valid() {
        let dest = Destination {
            ref_: Some(valid_ref()),
            ..Destination::default()
        };
        assert_eq!(dest.validate(), Ok(()));
        assert_eq!(dest.validate_disallow_deprecated(), Ok(()));
    }

    #[test]
    fn absolute_uri_only_is_valid() {
        let dest = Destination {
            uri: uri("https://example.com/path"),
            ..Destination::default()
        };
        assert_eq!(dest.validate(), Ok(()));
    }

    #[test]
    fn ref_with_relative_uri_is_valid() {
        let dest = Destination {
            ref_: Some(valid_ref()),
            uri: uri("/extra"),
            ..Destination::default()
        };
        assert_eq!(dest.validate(), Ok(()));
    }

    #[test]
    fn deprecated_fields_allowed_or_rejected() {
        assert_eq!(deprecated().validate(), Ok(()));

        let err = deprecated().validate_disallow_deprecated().unwrap_err();
        assert_eq!(err.leaves().len(), 3);
        assert_eq!(
            err.to_string(),
            "invalid value: apiVersion is not allowed here, it's a deprecated value: apiVersion\n\
             invalid value: kind is not allowed here, it's a deprecated value: kind\n\
             invalid value: name is not allowed here, it's a deprecated value: name"
        );
    }

    #[test]
    fn ref_and_deprecated_are_exclusive() {
        let dest = Destination {
            ref_: Some(valid_ref()),
            ..deprecated()
        };
        let err = dest.validate().unwrap_err();
        assert_eq!(err.message, "ref and [apiVersion, kind, name] can't be both present");
        assert_eq!(err.paths, vec!["[apiVersion, kind, name]", "ref"]);
    }

    #[test]
    fn empty_destination_is_invalid() {
        let err = Destination::default().validate().unwrap_err();
        assert_eq!(err.message, "expected at least one, got none");
        assert_eq!(err.paths, vec!["[apiVersion, kind, name]", "ref", "uri"]);
    }

    #[test]
    fn ref_with_absolute_uri_is_invalid() {
        let dest = Destination {
            ref_: Some(valid_ref()),
            uri: uri("http://example.com"),
            ..Destination::default()
        };
        let err = dest.validate().unwrap_err();
        assert_eq!(
            err.message,
            "absolute URI is not allowed when Ref or [apiVersion, kind, name] is present"
        );

        let dest = Destination {
            uri: uri("http://example.com"),
            ..deprecated()
        };
        assert!(dest.validate().is_err());
    }

    #[test]
    fn relative_uri_without_ref_is_invalid() {
        for raw in ["/path", "mailto:someone@example.com"] {
            let dest = Destination {
                uri: uri(raw),
                ..Destination::default()
            };
            let err = dest.validate().unwrap_err();
            assert_eq!(
                err.message,
                "invalid value: relative URI is not allowed when Ref and [apiVersion, kind, name] is absent"
            );
            assert_eq!(err.paths, vec!["uri"]);
        }
    }

    #[test]
    fn incomplete_ref_is_nested_under_ref() {
        let dest = Destination {
            ref_: Some(ObjectReference {
                kind: Some("Service".to_owned()),
                namespace: Some("default".to_owned()),
                ..ObjectReference::default()
            }),
            ..Destination::default()
        };
        let err = dest.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing field(s): ref.apiVersion, ref.name\n\
             must not set the field(s): ref.namespace\n\
             only name, apiVersion and kind are supported fields"
        );
    }

    #[test]
    fn incomplete_deprecated_ref_is_not_nested() {
        let dest = Destination {
            deprecated_kind: "Service".to_owned(),
            ..Destination::default()
        };
        let err = dest.validate().unwrap_err();
        assert_eq!(err.to_string(), "missing field(s): apiVersion, name");
    }

    #[test]
    fn get_ref_prefers_ref_then_deprecated() {
        assert_eq!(Destination::default().get_ref(), None);

        let dest = Destination {
            ref_: Some(valid_ref()),
            ..Destination::default()
        };
        assert_eq!(dest.get_ref(), Some(valid_ref()));
        assert_eq!(deprecated().get_ref(), Some(valid_ref()));
    }

    #[test]
    fn json_field_names() {
        let dest: Destination = serde_json::from_value(json!({
            "apiVersion": "v1",
            "kind": "Service",
            "name": "svc",
            "uri": "/path",
        }))
        .unwrap();
        assert_eq!(dest.deprecated_name, "svc");
        assert_eq!(dest.uri, uri("/path"));

        let dest = Destination {
            ref_: Some(valid_ref()),
            ..Destination::default()
        };
        assert_eq!(
            serde_json::to_value(&dest).unwrap(),
            json!({
                "ref": {
                    "apiVersion": "serving.knative.dev/v1",
                    "kind": "Service",
                    "name": "event-display",
                }
            })
        );
    }
}
