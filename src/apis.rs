//! Shared API building blocks: structured field errors, URIs and conditions.

mod condition;
pub use condition::*;
mod field_error;
pub use field_error::*;
mod url;
pub use self::url::*;

pub mod duck;
pub mod v1alpha1;
