//! knative-duck reads Knative resources through their duck types
//! and maps Knative metrics onto Stackdriver monitored resources.
//!
//! [`apis`] holds the duck types (`Source`, `Addressable`) and the `Destination`
//! shapes resources use to point at each other, together with their validation.
//! [`subscriber`] discovers the CRDs that conform to the `Source` duck type
//! and watches their resources.
//! [`metrics`] decides which monitored resource and metric type a recorded view
//! is reported under, lifting resource labels out of the view's tags.

pub mod apis;
pub mod metrics;
pub mod subscriber;
