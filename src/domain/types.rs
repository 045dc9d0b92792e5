//! Strongly-typed value objects used by the browse domain.
//!
//! These wrappers enforce basic invariants (positive identifiers and page
//! numbers, sanitized text, whitespace-free slugs) so that once a value
//! reaches the domain layer it can be treated as trusted.
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Sentinel category value meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "all";

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided number must be at least one.
    #[error("value must be at least 1")]
    NonPositiveNumber,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided slug contained whitespace or reserved values.
    #[error("invalid slug: {0}")]
    InvalidSlug(String),
}

/// Strips markup tags and control characters, collapses whitespace runs into
/// single spaces and trims the result.
pub fn sanitize_text_field(value: &str) -> String {
    let mut stripped = String::with_capacity(value.len());
    let mut in_tag = false;
    for ch in value.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            c if c.is_control() => stripped.push(' '),
            c => stripped.push(c),
        }
    }
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
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
    };
}

id_newtype!(CategoryId, "Unique identifier for a product category.");

/// Macro to generate newtypes for counts that must be at least one.
macro_rules! positive_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
        )]
        #[serde(try_from = "u32", into = "u32")]
        pub struct $name(u32);

        impl $name {
            /// Creates the value ensuring it is at least one.
            pub fn new(value: u32) -> Result<Self, TypeConstraintError> {
                if value >= 1 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveNumber)
                }
            }

            /// Returns the raw number.
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<u32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

positive_newtype!(PageNumber, "One-based page number.");
positive_newtype!(PageSize, "Number of products shown per page.");
positive_newtype!(CategoryLimit, "Maximum number of category tabs rendered.");

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(1);

    /// Coerces arbitrary client input into a valid page; anything below one
    /// becomes the first page.
    pub fn coerce(value: i64) -> Self {
        u32::try_from(value)
            .ok()
            .and_then(|v| Self::new(v).ok())
            .unwrap_or(Self::FIRST)
    }

    /// Number of rows skipped before this page for the given page size.
    pub fn offset(self, page_size: PageSize) -> u64 {
        u64::from(self.0 - 1) * u64::from(page_size.get())
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl PageSize {
    pub const DEFAULT: PageSize = PageSize(12);
    pub const MAX: PageSize = PageSize(100);

    /// Number of pages needed to show `total` items; zero when there are none.
    pub fn pages_for(self, total: usize) -> usize {
        total.div_ceil(self.0 as usize)
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl CategoryLimit {
    pub const DEFAULT: CategoryLimit = CategoryLimit(10);
}

impl Default for CategoryLimit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Lower-cased category identifier without whitespace.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct CategorySlug(String);

impl CategorySlug {
    /// Sanitizes and validates a slug. The `all` sentinel is reserved.
    pub fn new<S: AsRef<str>>(value: S) -> Result<Self, TypeConstraintError> {
        let sanitized = sanitize_text_field(value.as_ref()).to_lowercase();
        if sanitized.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        if sanitized == ALL_CATEGORIES || sanitized.contains(char::is_whitespace) {
            return Err(TypeConstraintError::InvalidSlug(sanitized));
        }
        Ok(Self(sanitized))
    }

    /// Borrow the slug as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for CategorySlug {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for CategorySlug {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CategorySlug {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CategorySlug {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CategorySlug> for String {
    fn from(value: CategorySlug) -> Self {
        value.0
    }
}

/// Category part of a browse filter: either every category or a single one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CategoryKey {
    #[default]
    All,
    Slug(CategorySlug),
}

impl CategoryKey {
    /// Parses client input; blank input and the sentinel map to [`CategoryKey::All`].
    pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
        let sanitized = sanitize_text_field(value);
        if sanitized.is_empty() || sanitized.eq_ignore_ascii_case(ALL_CATEGORIES) {
            return Ok(Self::All);
        }
        CategorySlug::new(sanitized).map(Self::Slug)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Slug(slug) => slug.as_str(),
        }
    }

    pub fn slug(&self) -> Option<&CategorySlug> {
        match self {
            Self::All => None,
            Self::Slug(slug) => Some(slug),
        }
    }
}

impl Display for CategoryKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CategorySlug> for CategoryKey {
    fn from(value: CategorySlug) -> Self {
        Self::Slug(value)
    }
}

impl Serialize for CategoryKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CategoryKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Sanitized free-text search. Empty means "no text filter".
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub struct SearchText(String);

impl SearchText {
    pub fn new<S: AsRef<str>>(value: S) -> Self {
        Self(sanitize_text_field(value.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the text when a filter should be applied.
    pub fn term(&self) -> Option<&str> {
        (!self.0.is_empty()).then_some(self.0.as_str())
    }
}

impl Display for SearchText {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SearchText {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SearchText {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<SearchText> for String {
    fn from(value: SearchText) -> Self {
        value.0
    }
}
