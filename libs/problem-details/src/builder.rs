//! Validating builder for [`Problem`].

use http::StatusCode;
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::problem::{BLANK_TYPE, Problem, RESERVED_MEMBERS};
use crate::status::ProblemStatus;

/// Accepted status code range, inclusive.
pub const STATUS_RANGE: std::ops::RangeInclusive<u16> = 100..=599;

/// A single extension member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    pub name: String,
    pub value: Value,
}

impl Extension {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl<K, V> From<(K, V)> for Extension
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from((name, value): (K, V)) -> Self {
        Self::new(name, value)
    }
}

/// Accumulates Problem members and validates them in [`build`](Self::build).
///
/// Setters never fail. Every invariant is checked once, at the end, so the
/// order of calls does not matter.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ProblemBuilder {
    type_url: Option<String>,
    title: Option<String>,
    fallback_title: Option<&'static str>,
    status: Option<i64>,
    detail: Option<String>,
    instance: Option<String>,
    extensions: Map<String, Value>,
    // First reserved name given a `null` value; rejected on build like any other.
    reserved_null: Option<String>,
}

impl ProblemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_problem(problem: &Problem) -> Self {
        Self {
            type_url: Some(problem.type_url.clone()),
            title: problem.title.clone(),
            fallback_title: None,
            status: problem.status.map(i64::from),
            detail: problem.detail.clone(),
            instance: problem.instance.clone(),
            extensions: problem.extensions.clone(),
            reserved_null: None,
        }
    }

    /// Problem type URI. Left unset, the problem gets `about:blank`.
    pub fn type_url(mut self, type_url: impl Into<String>) -> Self {
        self.type_url = Some(type_url.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Raw status code. Checked against 100..=599 on build.
    pub fn status(mut self, status: impl Into<i64>) -> Self {
        self.status = Some(status.into());
        self.fallback_title = None;
        self
    }

    /// Status code plus its reason phrase as title, unless a title is set.
    pub fn status_of(mut self, status: ProblemStatus) -> Self {
        self.status = Some(i64::from(status.code()));
        self.fallback_title = Some(status.title());
        self
    }

    /// Same as [`status_of`](Self::status_of) for an `http::StatusCode`.
    pub fn http_status(mut self, status: StatusCode) -> Self {
        self.status = Some(i64::from(status.as_u16()));
        self.fallback_title = ProblemStatus::try_from(status)
            .ok()
            .map(ProblemStatus::title)
            .or_else(|| status.canonical_reason());
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Add or replace an extension member. `null` values are ignored, except
    /// under a reserved name, which still fails the build.
    pub fn extension(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let name = name.into();
        let value = value.into();
        if value.is_null() {
            if self.reserved_null.is_none() && RESERVED_MEMBERS.contains(&name.as_str()) {
                self.reserved_null = Some(name);
            }
        } else {
            self.extensions.insert(name, value);
        }
        self
    }

    pub fn extensions<I>(self, extensions: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Extension>,
    {
        extensions.into_iter().fold(self, |builder, extension| {
            let Extension { name, value } = extension.into();
            builder.extension(name, value)
        })
    }

    /// Validate the accumulated members and produce the problem.
    ///
    /// # Errors
    /// Returns [`ValidationError`] if `type` is empty, `status` is outside
    /// 100..=599, or an extension uses a reserved member name.
    pub fn build(self) -> Result<Problem, ValidationError> {
        self.validate().inspect_err(|err| {
            tracing::debug!(error = %err, "rejected problem");
        })
    }

    pub(crate) fn validate(self) -> Result<Problem, ValidationError> {
        let type_url = match self.type_url {
            Some(type_url) if type_url.is_empty() => return Err(ValidationError::EmptyType),
            Some(type_url) => type_url,
            None => BLANK_TYPE.to_owned(),
        };

        let status = self
            .status
            .map(|status| {
                u16::try_from(status)
                    .ok()
                    .filter(|code| STATUS_RANGE.contains(code))
                    .ok_or(ValidationError::StatusOutOfRange { status })
            })
            .transpose()?;

        if let Some(name) = self
            .extensions
            .keys()
            .find(|name| RESERVED_MEMBERS.contains(&name.as_str()))
        {
            return Err(ValidationError::ReservedExtension { name: name.clone() });
        }
        if let Some(name) = self.reserved_null {
            return Err(ValidationError::ReservedExtension { name });
        }

        let title = self
            .title
            .or_else(|| self.fallback_title.map(str::to_owned));

        Ok(Problem {
            type_url,
            title,
            status,
            detail: self.detail,
            instance: self.instance,
            extensions: self.extensions,
        })
    }
}
