//! `v1alpha1` API shapes shared across Knative projects.

mod destination;
pub use destination::*;
