use std::collections::BTreeMap;
use std::fmt;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::{ListMeta, ObjectMeta, Time};
use kube_core::TypeMeta;
use serde::{Deserialize, Serialize};

use super::{Destination, Status};
use crate::apis::duck::{Implementable, Listable, Populatable};
use crate::apis::{self, Condition, ConditionStatus, FieldError, Url, VolatileTime};

/// Status is True when the Source has been configured with a resolvable sink.
pub const SOURCE_CONDITION_SINK_PROVIDED: &str = "SinkProvided";

/// Status is True when the Source has been configured with a scaler.
pub const SOURCE_CONDITION_SCALER_PROVIDED: &str = "ScalerProvided";

const DEFAULT_MIN_SCALE: i32 = 0;
const DEFAULT_MAX_SCALE: i32 = 1;

/// The minimum resource shape of a Source.
///
/// Implementors of sources and importers read their own resources through
/// this type to check they meet the expected shape. It is not a real resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Source {
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: SourceSpec,
    #[serde(default)]
    pub status: SourceStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSpec {
    /// Resolves to a domain name or a URI to deliver events to.
    #[serde(default)]
    pub sink: Destination,

    /// Overrides applied to outbound CloudEvents.
    #[serde(
        default,
        rename = "ceOverrides",
        skip_serializing_if = "Option::is_none"
    )]
    pub cloud_event_overrides: Option<CloudEventOverrides>,

    /// How the source scales. The source is not scalable when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaler: Option<ScalerSpec>,
}

impl SourceSpec {
    pub fn is_scalable(&self) -> bool {
        self.scaler.is_some()
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        let mut errs = FieldError::empty()
            .also_result(self.sink.validate().map_err(|err| err.via_field("sink")));
        if let Some(scaler) = &self.scaler {
            errs = errs.also_result(scaler.validate().map_err(|err| err.via_field("scaler")));
        }
        errs.into_result()
    }
}

/// The scaler implementation a source opted into.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScalerClass(pub String);

impl ScalerClass {
    pub const KEDA: &'static str = "keda";
    pub const KSVC: &'static str = "ksvc";

    pub fn new(class: impl Into<String>) -> Self {
        Self(class.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ScalerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalerSpec {
    #[serde(default, skip_serializing_if = "ScalerClass::is_empty")]
    pub class: ScalerClass,

    /// Defaults to zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_scale: Option<i32>,

    /// Defaults to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_scale: Option<i32>,

    /// Knobs specific to the scaling backend.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, String>,
}

impl ScalerSpec {
    pub fn validate(&self) -> Result<(), FieldError> {
        let mut errs = FieldError::empty();
        if self.class.is_empty() {
            errs = errs.also(apis::missing_field(&["class"]));
        }

        match self.min_scale {
            None => errs = errs.also(apis::missing_field(&["minScale"])),
            Some(min) if min < 0 => {
                errs = errs.also(apis::out_of_bounds_value(min, 0, i32::MAX, "minScale"))
            }
            Some(_) => {}
        }

        match self.max_scale {
            None => errs = errs.also(apis::missing_field(&["maxScale"])),
            Some(max) if max < 1 => {
                errs = errs.also(apis::out_of_bounds_value(max, 1, i32::MAX, "maxScale"))
            }
            Some(_) => {}
        }

        if let (Some(min), Some(max)) = (self.min_scale, self.max_scale) {
            if max < min {
                errs = errs.also(FieldError::new(
                    format!("maxScale={max} is less than minScale={min}"),
                    &["maxScale", "minScale"],
                ));
            }
        }

        errs.into_result()
    }

    pub fn set_default(&mut self) {
        if self.class.is_empty() {
            self.class = ScalerClass::new(ScalerClass::KEDA);
        }
        self.min_scale.get_or_insert(DEFAULT_MIN_SCALE);
        self.max_scale.get_or_insert(DEFAULT_MAX_SCALE);
    }
}

/// Controls the output format of the CloudEvents produced by a source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudEventOverrides {
    /// Attributes added to or overridden on every outbound event.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceStatus {
    #[serde(flatten)]
    pub status: Status,

    /// The sink URI currently configured for the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sink_uri: Option<Url>,
}

impl SourceStatus {
    /// Whether the resource is ready overall, judged by its first
    /// `Ready` or `Succeeded` condition.
    pub fn is_ready(&self) -> bool {
        self.status
            .conditions
            .iter()
            .find(|c| c.type_.is_happy())
            .is_some_and(Condition::is_true)
    }
}

/// A list of [`Source`]s.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceList {
    #[serde(flatten, default)]
    pub types: Option<TypeMeta>,
    #[serde(default)]
    pub metadata: ListMeta,
    pub items: Vec<Source>,
}

impl Implementable for Source {
    type Full = Source;
}

impl Listable for Source {
    type List = SourceList;
}

impl Populatable for Source {
    fn populate(&mut self) {
        let sink_uri = Url::parse("https://tableflip.dev/?flip=mattmoor").ok();
        // 1984-02-28T18:52:00Z
        let transition = VolatileTime(Some(Time(
            chrono::DateTime::from_timestamp(446_842_320, 0).unwrap_or_default(),
        )));

        self.spec.sink = Destination {
            ref_: None,
            uri: sink_uri.clone(),
        };
        self.spec.cloud_event_overrides = Some(CloudEventOverrides {
            extensions: [("boosh".to_owned(), "kakow".to_owned())].into(),
        });
        self.spec.scaler = Some(ScalerSpec {
            class: ScalerClass::new(ScalerClass::KSVC),
            min_scale: Some(0),
            max_scale: Some(1),
            options: [("myoption".to_owned(), "myoptionvalue".to_owned())].into(),
        });
        self.status.status.observed_generation = 42;
        self.status.status.conditions = [
            SOURCE_CONDITION_SINK_PROVIDED,
            SOURCE_CONDITION_SCALER_PROVIDED,
        ]
        .into_iter()
        .map(|type_| Condition {
            last_transition_time: transition.clone(),
            ..Condition::new(type_, ConditionStatus::True)
        })
        .collect();
        self.status.sink_uri = sink_uri;
    }
}
