//! Errors raised while building, parsing or propagating a [`Problem`].

use std::error::Error as StdError;

use crate::problem::Problem;

/// A builder input that violates the Problem invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// `type` was set to an empty string. Leave it unset to get `about:blank`.
    #[error("problem type must not be empty")]
    EmptyType,

    /// An extension uses one of the five RFC 7807 member names.
    #[error("extension member `{name}` collides with a reserved problem member")]
    ReservedExtension { name: String },

    /// `status` is not within 100..=599.
    #[error("status {status} is outside the HTTP status range 100..=599")]
    StatusOutOfRange { status: i64 },
}

/// A JSON document that cannot be read as a Problem.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The input is not well-formed JSON. Carries line and column.
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    /// A known member holds a value of the wrong JSON type.
    #[error("member `{member}` must be {expected}, found {found}")]
    InvalidMember {
        member: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// The document is well-typed but its values fail validation.
    #[error("invalid problem: {0}")]
    Invalid(#[from] ValidationError),
}

/// An error that carries a [`Problem`] to whoever turns it into a response.
///
/// The message defaults to `"<title>: <detail> (code: <status>)"`, built from
/// whichever of those members are present.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ProblemError {
    message: String,
    problem: Problem,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl ProblemError {
    #[must_use]
    pub fn new(problem: Problem) -> Self {
        Self {
            message: describe(&problem),
            problem,
            source: None,
        }
    }

    /// Replace the derived message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the error that caused this problem.
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    #[must_use]
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    #[must_use]
    pub fn into_problem(self) -> Problem {
        self.problem
    }
}

impl From<Problem> for ProblemError {
    fn from(problem: Problem) -> Self {
        Self::new(problem)
    }
}

fn describe(problem: &Problem) -> String {
    let mut message = String::new();
    if let Some(title) = problem.title() {
        message.push_str(title);
    }
    if let Some(detail) = problem.detail() {
        if !message.is_empty() {
            message.push_str(": ");
        }
        message.push_str(detail);
    }
    if let Some(status) = problem.status() {
        if !message.is_empty() {
            message.push(' ');
        }
        message.push_str("(code: ");
        message.push_str(&status.to_string());
        message.push(')');
    }
    if message.is_empty() {
        message.push_str(problem.type_url());
    }
    message
}
