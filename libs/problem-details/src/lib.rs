//! RFC 7807 Problem Details
//!
//! This crate provides an immutable, always-valid `Problem` value with no
//! dependency on an HTTP framework. It includes:
//! - the `Problem` type and its JSON mapping (`problem`)
//! - a validating `ProblemBuilder` (`builder`)
//! - registered status codes with reason phrases (`status`)
//! - static problem definitions (`catalog`)
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod builder;
pub mod catalog;
pub mod context;
pub mod error;
pub mod problem;
pub mod status;

// Re-export commonly used types
pub use builder::{Extension, ProblemBuilder};
pub use catalog::ProblemDef;
pub use context::ProblemContext;
pub use error::{ParseError, ProblemError, ValidationError};
pub use problem::{APPLICATION_PROBLEM_JSON, BLANK_TYPE, Problem};
pub use status::ProblemStatus;

/// Helper to attach the occurrence `instance` to a Problem
///
/// Framework layers call this once the request path is known, right before
/// the Problem is written out.
pub fn finalize(problem: Problem, instance: &str) -> Problem {
    problem.with_instance(instance)
}
