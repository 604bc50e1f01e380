//! Validation for request payloads.
//!
//! Field rules live in [`rules`] and are wired into payloads through
//! `#[validate(custom(...))]`, so the same checks run for every endpoint that
//! accepts the field.

pub mod rules;

pub use validator::Validate;
