//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs carry these wrappers instead of raw primitives so that
//! identifiers, titles, tags and links are checked once at the boundary and
//! trusted everywhere else.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::ValidateUrl;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }
    };
}

/// Shared accessors and conversions for string-backed newtypes whose
/// constructor is `fn new(impl Into<String>) -> Result<Self, TypeConstraintError>`.
macro_rules! string_newtype_impls {
    ($name:ident) => {
        impl $name {
            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }
        }

        string_newtype_impls!($name);
    };
}

id_newtype!(
    QuestionId,
    "Unique identifier for a question.",
    "question_id"
);
id_newtype!(
    CategoryId,
    "Unique identifier for a category.",
    "category_id"
);

non_empty_string_newtype!(
    QuestionTitle,
    "Question title enforcing non-empty values.",
    "question title"
);
non_empty_string_newtype!(
    CategoryTitle,
    "Category title enforcing non-empty values.",
    "category title"
);
non_empty_string_newtype!(Tag, "Question tag enforcing non-empty values.", "tag");

non_empty_string_newtype!(
    ResourceLink,
    "External resource attached to a question. Stored as given.",
    "link"
);

impl ResourceLink {
    /// Returns whether the link parses as an absolute URL.
    pub fn is_web_url(&self) -> bool {
        self.as_str().validate_url()
    }
}

/// Maximum accepted length of a search term, in characters.
pub const MAX_SEARCH_TERM_CHARS: usize = 200;

/// Substring looked up in question titles.
///
/// Matching is plain containment after Unicode lower-casing of both sides,
/// the same rule the store applies through `unicode_lower`. The term is never
/// interpreted as a pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Parses raw user input. Missing, empty and whitespace-only input yields
    /// `Ok(None)`, which callers treat as "match every question".
    pub fn parse(raw: Option<&str>) -> Result<Option<Self>, TypeConstraintError> {
        let Some(trimmed) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(None);
        };
        if trimmed.chars().count() > MAX_SEARCH_TERM_CHARS {
            return Err(TypeConstraintError::InvalidValue(format!(
                "search term must be at most {MAX_SEARCH_TERM_CHARS} characters"
            )));
        }
        Ok(Some(Self(trimmed.to_string())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The term lower-cased for comparison.
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }

    /// Returns whether `title` contains this term, ignoring case.
    pub fn matches(&self, title: &str) -> bool {
        title.to_lowercase().contains(&self.folded())
    }
}

/// Splits a comma-separated tag list, trimming entries and dropping empty ones.
pub fn parse_tag_list(raw: &str) -> Vec<Tag> {
    raw.split(',').filter_map(|t| Tag::new(t).ok()).collect()
}
