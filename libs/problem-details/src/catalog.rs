//! Static problem definitions (`ProblemDef`) for commonly returned problems

use crate::builder::ProblemBuilder;
use crate::error::ValidationError;
use crate::problem::{BLANK_TYPE, Problem};
use crate::status::ProblemStatus;

/// Static problem definition from a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemDef {
    pub status: ProblemStatus,
    pub title: &'static str,
    pub type_url: &'static str,
}

impl ProblemDef {
    /// Definition titled with the status reason phrase and typed `about:blank`.
    #[must_use]
    pub const fn from_status(status: ProblemStatus) -> Self {
        Self {
            status,
            title: status.title(),
            type_url: BLANK_TYPE,
        }
    }

    #[must_use]
    pub const fn with_type(mut self, type_url: &'static str) -> Self {
        self.type_url = type_url;
        self
    }

    #[must_use]
    pub const fn with_title(mut self, title: &'static str) -> Self {
        self.title = title;
        self
    }

    /// A builder preloaded with this definition.
    pub fn builder(&self) -> ProblemBuilder {
        ProblemBuilder::new()
            .type_url(self.type_url)
            .title(self.title)
            .status(self.status.code())
    }

    /// The definition as a problem with no occurrence detail.
    ///
    /// # Errors
    /// Returns [`ValidationError`] if the definition has an empty `type_url`.
    pub fn problem(&self) -> Result<Problem, ValidationError> {
        self.builder().build()
    }

    /// Convert this definition into a Problem with the given detail
    ///
    /// # Errors
    /// Returns [`ValidationError`] if the definition has an empty `type_url`.
    pub fn as_problem(&self, detail: impl Into<String>) -> Result<Problem, ValidationError> {
        self.builder().detail(detail).build()
    }
}

pub const BAD_REQUEST: ProblemDef = ProblemDef::from_status(ProblemStatus::BadRequest);
pub const NOT_FOUND: ProblemDef = ProblemDef::from_status(ProblemStatus::NotFound);
pub const CONFLICT: ProblemDef = ProblemDef::from_status(ProblemStatus::Conflict);
pub const INTERNAL_SERVER_ERROR: ProblemDef =
    ProblemDef::from_status(ProblemStatus::InternalServerError);

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::sync::{Arc, LazyLock};
    use std::thread;

    #[test]
    fn def_to_problem_works() {
        const OUT_OF_CREDIT: ProblemDef = ProblemDef::from_status(ProblemStatus::Forbidden)
            .with_title("You do not have enough credit.")
            .with_type("https://example.com/probs/out-of-credit");

        let problem = OUT_OF_CREDIT.as_problem("Your balance is 30").unwrap();
        assert_eq!(problem.status(), Some(403));
        assert_eq!(problem.title(), Some("You do not have enough credit."));
        assert_eq!(problem.detail(), Some("Your balance is 30"));
        assert_eq!(problem.type_url(), "https://example.com/probs/out-of-credit");
    }

    #[test]
    fn predefined_defs() {
        let cases = [
            (BAD_REQUEST, 400, "Bad Request"),
            (NOT_FOUND, 404, "Not Found"),
            (CONFLICT, 409, "Conflict"),
            (INTERNAL_SERVER_ERROR, 500, "Internal Server Error"),
        ];

        for (def, status, title) in cases {
            let problem = def.problem().unwrap();
            assert_eq!(problem.status(), Some(status));
            assert_eq!(problem.title(), Some(title));
            assert_eq!(problem.type_url(), "about:blank");
            assert_eq!(problem.detail(), None);
        }
    }

    #[test]
    fn empty_type_fails_validation() {
        let def = NOT_FOUND.with_type("");
        assert_eq!(def.problem(), Err(ValidationError::EmptyType));
    }

    #[test]
    fn cached_problem_is_shared_across_threads() {
        static CACHED: LazyLock<Problem> = LazyLock::new(|| NOT_FOUND.problem().unwrap());

        let expected = Arc::new(NOT_FOUND.problem().unwrap());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let expected = Arc::clone(&expected);
                thread::spawn(move || {
                    let derived = CACHED.clone().with_instance(format!("/items/{i}"));
                    assert_eq!(derived.status(), expected.status());
                    Problem::from_json(&CACHED.to_json()).unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), *CACHED);
        }
    }
}
