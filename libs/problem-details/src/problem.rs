//! RFC 7807 Problem Details value type and its JSON mapping

use std::fmt;
use std::hash::{Hash, Hasher};

use http::StatusCode;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::builder::ProblemBuilder;
use crate::error::ParseError;

/// Content type for Problem Details as per RFC 7807.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Problem type used when none is given.
pub const BLANK_TYPE: &str = "about:blank";

pub(crate) const TYPE: &str = "type";
pub(crate) const TITLE: &str = "title";
pub(crate) const STATUS: &str = "status";
pub(crate) const DETAIL: &str = "detail";
pub(crate) const INSTANCE: &str = "instance";

/// Member names that cannot be used for extensions.
pub const RESERVED_MEMBERS: [&str; 5] = [TYPE, TITLE, STATUS, DETAIL, INSTANCE];

/// RFC 7807 Problem Details for HTTP APIs.
///
/// Values are immutable and always valid: they come out of a
/// [`ProblemBuilder`] or out of [`Problem::from_value`], which goes through
/// the same builder. Equality ignores the order of extension members.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Problem {
    pub(crate) type_url: String,
    pub(crate) title: Option<String>,
    pub(crate) status: Option<u16>,
    pub(crate) detail: Option<String>,
    pub(crate) instance: Option<String>,
    pub(crate) extensions: Map<String, Value>,
}

impl Problem {
    pub fn builder() -> ProblemBuilder {
        ProblemBuilder::new()
    }

    /// A builder seeded with every member of this problem.
    pub fn to_builder(&self) -> ProblemBuilder {
        ProblemBuilder::from_problem(self)
    }

    /// A URI reference that identifies the problem type.
    #[must_use]
    pub fn type_url(&self) -> &str {
        &self.type_url
    }

    /// A short, human-readable summary of the problem type.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The HTTP status code for this occurrence, always within 100..=599.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    #[must_use]
    pub fn http_status(&self) -> Option<StatusCode> {
        self.status.and_then(|code| StatusCode::from_u16(code).ok())
    }

    /// A human-readable explanation specific to this occurrence.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// A URI reference that identifies this specific occurrence.
    #[must_use]
    pub fn instance(&self) -> Option<&str> {
        self.instance.as_deref()
    }

    /// Extension members in insertion order.
    #[must_use]
    pub fn extensions(&self) -> &Map<String, Value> {
        &self.extensions
    }

    pub fn extension_names(&self) -> impl Iterator<Item = &str> {
        self.extensions.keys().map(String::as_str)
    }

    #[must_use]
    pub fn extension_value(&self, name: &str) -> Option<&Value> {
        self.extensions.get(name)
    }

    #[must_use]
    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains_key(name)
    }

    /// Copy of this problem pointing at a specific occurrence.
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// The problem as a JSON object, members in wire order.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut members = Map::with_capacity(self.member_count());
        members.insert(TYPE.to_owned(), Value::String(self.type_url.clone()));
        if let Some(title) = &self.title {
            members.insert(TITLE.to_owned(), Value::String(title.clone()));
        }
        if let Some(status) = self.status {
            members.insert(STATUS.to_owned(), Value::from(status));
        }
        if let Some(detail) = &self.detail {
            members.insert(DETAIL.to_owned(), Value::String(detail.clone()));
        }
        if let Some(instance) = &self.instance {
            members.insert(INSTANCE.to_owned(), Value::String(instance.clone()));
        }
        for (name, value) in &self.extensions {
            members.insert(name.clone(), value.clone());
        }
        Value::Object(members)
    }

    /// Compact JSON document.
    #[must_use]
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }

    /// Parse a problem details document.
    ///
    /// # Errors
    /// Returns [`ParseError`] if the text is not JSON or is not a valid problem.
    pub fn from_json(text: &str) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// # Errors
    /// Returns [`ParseError`] if the bytes are not JSON or are not a valid problem.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    /// Read a problem out of an already parsed JSON value.
    ///
    /// Known members fill the named fields, everything else becomes an
    /// extension. Missing `type` defaults to `about:blank`.
    ///
    /// # Errors
    /// Returns [`ParseError`] if `value` is not an object, a known member has
    /// the wrong JSON type, or the result fails validation.
    pub fn from_value(value: Value) -> Result<Self, ParseError> {
        read_document(value).inspect_err(|err| {
            tracing::debug!(error = %err, "rejected problem document");
        })
    }

    fn member_count(&self) -> usize {
        1 + usize::from(self.title.is_some())
            + usize::from(self.status.is_some())
            + usize::from(self.detail.is_some())
            + usize::from(self.instance.is_some())
            + self.extensions.len()
    }
}

fn read_document(value: Value) -> Result<Problem, ParseError> {
    let members = match value {
        Value::Object(members) => members,
        other => {
            return Err(ParseError::NotAnObject {
                found: json_kind(&other),
            });
        }
    };

    let mut builder = ProblemBuilder::new();
    for (name, value) in members {
        builder = match name.as_str() {
            TYPE => builder.type_url(string_member(TYPE, value)?),
            TITLE => builder.title(string_member(TITLE, value)?),
            STATUS => builder.status(status_member(&value)?),
            DETAIL => builder.detail(string_member(DETAIL, value)?),
            INSTANCE => builder.instance(string_member(INSTANCE, value)?),
            _ => builder.extension(name, value),
        };
    }
    // `from_value` logs rejections itself.
    Ok(builder.validate()?)
}

fn string_member(member: &'static str, value: Value) -> Result<String, ParseError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(ParseError::InvalidMember {
            member,
            expected: "a string",
            found: json_kind(&other),
        }),
    }
}

fn status_member(value: &Value) -> Result<i64, ParseError> {
    let invalid = || ParseError::InvalidMember {
        member: STATUS,
        expected: "an integer",
        found: json_kind(value),
    };
    let Value::Number(number) = value else {
        return Err(invalid());
    };
    if let Some(code) = number.as_i64() {
        return Ok(code);
    }
    // Integers above i64::MAX are still integers; let validation reject them.
    number
        .as_u64()
        .map(|code| i64::try_from(code).unwrap_or(i64::MAX))
        .ok_or_else(invalid)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Hash for Problem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_url.hash(state);
        self.title.hash(state);
        self.status.hash(state);
        self.detail.hash(state);
        self.instance.hash(state);
        hash_members(&self.extensions, state);
    }
}

// Object members are hashed in key order so that the hash agrees with the
// order-insensitive map equality.
fn hash_members<H: Hasher>(members: &Map<String, Value>, state: &mut H) {
    let mut entries: Vec<(&String, &Value)> = members.iter().collect();
    entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
    state.write_usize(entries.len());
    for (name, value) in entries {
        name.hash(state);
        hash_value(value, state);
    }
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    std::mem::discriminant(value).hash(state);
    match value {
        Value::Null => {}
        Value::Bool(b) => b.hash(state),
        Value::Number(n) => n.hash(state),
        Value::String(s) => s.hash(state),
        Value::Array(items) => {
            state.write_usize(items.len());
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Object(members) => hash_members(members, state),
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_value(), f)
    }
}

impl Serialize for Problem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.member_count()))?;
        map.serialize_entry(TYPE, &self.type_url)?;
        if let Some(title) = &self.title {
            map.serialize_entry(TITLE, title)?;
        }
        if let Some(status) = self.status {
            map.serialize_entry(STATUS, &status)?;
        }
        if let Some(detail) = &self.detail {
            map.serialize_entry(DETAIL, detail)?;
        }
        if let Some(instance) = &self.instance {
            map.serialize_entry(INSTANCE, instance)?;
        }
        for (name, value) in &self.extensions {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Problem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(serde::de::Error::custom)
    }
}

impl From<Problem> for Value {
    fn from(problem: Problem) -> Self {
        problem.to_value()
    }
}

impl TryFrom<Value> for Problem {
    type Error = ParseError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(problem: &Problem) -> u64 {
        let mut hasher = DefaultHasher::new();
        problem.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn empty_problem_serializes_to_blank_type() {
        let p = Problem::builder().build().unwrap();
        assert_eq!(p.to_json(), r#"{"type":"about:blank"}"#);
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"{"type":"about:blank"}"#);
    }

    #[test]
    fn members_are_emitted_in_wire_order() {
        let p = Problem::builder()
            .extension("balance", 30)
            .instance("/account/12345/msgs/abc")
            .detail("Your current balance is 30, but that costs 50.")
            .status(403)
            .title("You do not have enough credit.")
            .type_url("https://example.com/probs/out-of-credit")
            .extension("accounts", json!(["/account/12345", "/account/67890"]))
            .build()
            .unwrap();

        let expected = concat!(
            r#"{"type":"https://example.com/probs/out-of-credit","#,
            r#""title":"You do not have enough credit.","status":403,"#,
            r#""detail":"Your current balance is 30, but that costs 50.","#,
            r#""instance":"/account/12345/msgs/abc","balance":30,"#,
            r#""accounts":["/account/12345","/account/67890"]}"#
        );
        assert_eq!(serde_json::to_string(&p).unwrap(), expected);
        assert_eq!(p.to_json(), expected);
        assert_eq!(p.to_string(), expected);
    }

    #[test]
    fn status_is_a_json_number() {
        let p = Problem::builder().status(404).build().unwrap();
        assert_eq!(p.to_value()["status"], json!(404));
        assert_eq!(p.http_status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn absent_members_are_omitted_not_null() {
        let p = Problem::builder().title("Gone").build().unwrap();
        let value = p.to_value();
        let members = value.as_object().unwrap();
        assert_eq!(members.len(), 2);
        assert!(!members.contains_key("detail"));
        assert!(!members.contains_key("status"));
    }

    #[test]
    fn strings_are_escaped() {
        let p = Problem::builder()
            .detail("line one\nline \"two\"\t\\")
            .build()
            .unwrap();
        assert_eq!(
            p.to_json(),
            r#"{"type":"about:blank","detail":"line one\nline \"two\"\t\\"}"#
        );
    }

    #[test]
    fn equality_and_hash_ignore_extension_order() {
        let a = Problem::builder()
            .extension("a", 1)
            .extension("b", json!({"x": 1, "y": 2}))
            .build()
            .unwrap();
        let b = Problem::builder()
            .extension("b", json!({"y": 2, "x": 1}))
            .extension("a", 1)
            .build()
            .unwrap();

        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn problems_work_as_set_members() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Problem::builder().status(404).build().unwrap());
        set.insert(Problem::builder().status(404).build().unwrap());
        set.insert(Problem::builder().status(410).build().unwrap());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn different_extension_values_are_not_equal() {
        let a = Problem::builder().extension("n", 1).build().unwrap();
        let b = Problem::builder().extension("n", 2).build().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn with_instance_keeps_other_members() {
        let p = Problem::builder()
            .status(404)
            .extension("resource", "user")
            .build()
            .unwrap();

        let q = p.clone().with_instance("/users/7");
        assert_eq!(q.instance(), Some("/users/7"));
        assert_eq!(q.status(), Some(404));
        assert_eq!(q.extension_value("resource"), Some(&json!("user")));
        assert_eq!(p.instance(), None);
    }

    #[test]
    fn extension_accessors() {
        let p = Problem::builder()
            .extension("first", true)
            .extension("second", "two")
            .build()
            .unwrap();

        assert!(p.has_extension("first"));
        assert!(!p.has_extension("third"));
        assert_eq!(p.extension_names().collect::<Vec<_>>(), ["first", "second"]);
        assert_eq!(p.extension_value("second"), Some(&json!("two")));
        assert_eq!(p.extension_value("third"), None);
    }

    #[test]
    #[tracing_test::traced_test]
    fn rejected_document_is_logged() {
        assert!(Problem::from_value(json!([1, 2])).is_err());
        assert!(logs_contain("rejected problem document"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn invalid_document_is_logged_once() {
        assert!(Problem::from_value(json!({"status": 999})).is_err());
        logs_assert(|lines: &[&str]| {
            match lines.iter().filter(|line| line.contains("rejected problem")).count() {
                1 => Ok(()),
                n => Err(format!("expected one rejection event, found {n}")),
            }
        });
    }

    #[test]
    fn value_conversions() {
        let p = Problem::builder().title("Conflict").status(409).build().unwrap();
        let value = Value::from(p.clone());
        assert_eq!(value, json!({"type": "about:blank", "title": "Conflict", "status": 409}));
        assert_eq!(Problem::try_from(value).unwrap(), p);
    }
}
