// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! High-level data types.
//!
//! Every entity comes in several shapes.  `*Data` is the full write representation that clients
//! send on create and full update, with references to other entities given as bare ids.  `*Patch`
//! holds the subset of fields given in a partial update.  `*Row` is what the database stores.
//! `*View` is the read representation returned to clients, with referenced entities embedded.
//! `*Filter` holds the query parameters accepted when listing entities.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use skills_core::model::{validate_text, ModelError, ModelResult};
use std::fmt;
use std::str::FromStr;

mod article;
pub(crate) use article::*;
mod assessment;
pub(crate) use assessment::*;
mod category;
pub(crate) use category::*;
mod department;
pub(crate) use department::*;
mod employee;
pub(crate) use employee::*;
mod result;
pub(crate) use result::*;
mod skill;
pub(crate) use skill::*;

/// Maximum number of characters in titles and names.
const MAX_TEXT_LENGTH: usize = 255;

/// Accepts an identifier given either as an integer or as a string holding an integer.
struct IdVisitor;

impl de::Visitor<'_> for IdVisitor {
    type Value = i64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer identifier")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
        i64::try_from(v).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<i64, E> {
        v.trim().parse().map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

/// Generates a newtype for the database identifier of an entity.
macro_rules! id_type [
    ( $name:ident, $what:literal ) => {
        #[doc = concat!("Identifier of ", $what, ".")]
        #[derive(
            Clone, Copy, Debug, derive_more::Display, Eq, Hash, Ord, PartialEq, PartialOrd,
            Serialize,
        )]
        #[serde(transparent)]
        pub(crate) struct $name(i64);

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
                de.deserialize_any(IdVisitor).map(Self)
            }
        }

        impl $name {
            /// Creates an identifier from its raw database value.
            pub(crate) fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw database value of the identifier.
            pub(crate) fn as_i64(self) -> i64 {
                self.0
            }
        }
    }
];

id_type!(ArticleId, "an article");
id_type!(AssessmentId, "an assessment");
id_type!(CategoryId, "a category");
id_type!(DepartmentId, "a department");
id_type!(EmployeeId, "an employee");
id_type!(ResultId, "an assessment result");
id_type!(SkillId, "a skill");

/// Generates a newtype for a short, non-empty line of text.
macro_rules! text_type [
    ( $name:ident, $what:literal ) => {
        #[doc = concat!("A non-empty ", $what, " of at most 255 characters.")]
        #[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
        #[serde(try_from = "String", into = "String")]
        pub(crate) struct $name(String);

        impl $name {
            /// Creates a new value after validating that it is well-formed.
            pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
                let s = s.into();
                validate_text(stringify!($name), &s, MAX_TEXT_LENGTH)?;
                Ok(Self(s))
            }

            /// Returns a string view of the value.
            pub(crate) fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ModelError;

            fn try_from(s: String) -> ModelResult<Self> {
                Self::new(s)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    }
];

text_type!(Name, "name");
text_type!(Title, "title");

/// Generates a newtype for an integer restricted to an inclusive range.
macro_rules! bounded_type [
    ( $name:ident, $what:literal, $min:literal, $max:literal ) => {
        #[doc = concat!("A ", $what, " between ", $min, " and ", $max, ".")]
        #[derive(Clone, Copy, Debug, Deserialize, Eq, Ord, PartialEq, PartialOrd, Serialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub(crate) struct $name(u8);

        impl $name {
            /// Creates a new value after validating that it is in range.
            pub(crate) fn new(value: i64) -> ModelResult<Self> {
                match u8::try_from(value) {
                    Ok(value) if value <= $max => Ok(Self(value)),
                    _ => Err(ModelError(format!(
                        "{} must be between {} and {} but got {}",
                        stringify!($name),
                        $min,
                        $max,
                        value
                    ))),
                }
            }

            /// Returns the value as an `i64` for storage.
            pub(crate) fn as_i64(self) -> i64 {
                i64::from(self.0)
            }
        }

        impl TryFrom<i64> for $name {
            type Error = ModelError;

            fn try_from(value: i64) -> ModelResult<Self> {
                Self::new(value)
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.as_i64()
            }
        }
    }
];

bounded_type!(Age, "person's age in years", 0, 150);
bounded_type!(Score, "skill score", 0, 100);

/// Sex of an employee.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) enum Sex {
    /// Male.
    #[serde(rename = "M")]
    Male,

    /// Female.
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    /// Returns the code used to represent this value on the wire and in the database.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

impl FromStr for Sex {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match s {
            "M" => Ok(Sex::Male),
            "F" => Ok(Sex::Female),
            s => Err(ModelError(format!("Sex must be one of M or F but got '{}'", s))),
        }
    }
}

/// Deserializes an optional query parameter of type `T`, treating an empty value as absent.
fn deserialize_param<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(de)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}

/// Deserializes an optional boolean query parameter, treating an empty value as absent.
///
/// Accepts `true`/`false` in any case as well as `1`/`0`.
fn deserialize_flag<'de, D>(de: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(de)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) if s == "1" || s.eq_ignore_ascii_case("true") => Ok(Some(true)),
        Some(s) if s == "0" || s.eq_ignore_ascii_case("false") => Ok(Some(false)),
        Some(s) => Err(de::Error::custom(format!("Invalid boolean value '{}'", s))),
    }
}

/// Deserializes a field of a partial update that may be omitted but cannot be `null`.
fn deserialize_present<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(de).map(Some)
}

/// Splits a free-form `search` query into the terms that must all match.
///
/// Terms are separated by whitespace or commas.
pub(crate) fn search_terms(search: &str) -> impl Iterator<Item = &str> {
    search.split(|c: char| c.is_whitespace() || c == ',').filter(|term| !term.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_de_tokens, assert_de_tokens_error, assert_tokens, Token};

    #[test]
    fn test_ids() {
        let id = EmployeeId::new(42);
        assert_eq!(42, id.as_i64());
        assert_eq!("42", id.to_string());
        assert_eq!("42", serde_json::to_string(&id).unwrap());
    }

    #[test]
    fn test_ids_accept_numeric_strings() {
        assert_de_tokens(&DepartmentId::new(3), &[Token::I64(3)]);
        assert_de_tokens(&DepartmentId::new(3), &[Token::U64(3)]);
        assert_de_tokens(&DepartmentId::new(3), &[Token::Str("3")]);
        assert_de_tokens_error::<DepartmentId>(
            &[Token::Str("three")],
            "invalid value: string \"three\", expected an integer identifier",
        );
        assert_de_tokens_error::<DepartmentId>(
            &[Token::Bool(true)],
            "invalid type: boolean `true`, expected an integer identifier",
        );
    }

    #[test]
    fn test_title_ok() {
        assert_eq!("Engineering", Title::new("Engineering").unwrap().as_str());
        assert_tokens(&Title::new("Ops").unwrap(), &[Token::Str("Ops")]);
    }

    #[test]
    fn test_title_errors() {
        assert_eq!(
            ModelError("Title cannot be empty".to_owned()),
            Title::new("  ").unwrap_err()
        );
        assert_eq!(
            ModelError("Title is too long (max 255 characters)".to_owned()),
            Title::new("x".repeat(256)).unwrap_err()
        );
        assert_de_tokens_error::<Title>(&[Token::Str("")], "Title cannot be empty");
    }

    #[test]
    fn test_name_errors() {
        assert_eq!(ModelError("Name cannot be empty".to_owned()), Name::new("").unwrap_err());
        Name::new("x".repeat(255)).unwrap();
    }

    #[test]
    fn test_age() {
        assert_eq!(0, Age::new(0).unwrap().as_i64());
        assert_eq!(150, Age::new(150).unwrap().as_i64());
        assert_eq!(
            ModelError("Age must be between 0 and 150 but got 151".to_owned()),
            Age::new(151).unwrap_err()
        );
        assert_eq!(
            ModelError("Age must be between 0 and 150 but got -1".to_owned()),
            Age::new(-1).unwrap_err()
        );
        assert_tokens(&Age::new(30).unwrap(), &[Token::I64(30)]);
        assert_de_tokens_error::<Age>(
            &[Token::I64(200)],
            "Age must be between 0 and 150 but got 200",
        );
    }

    #[test]
    fn test_score() {
        assert_eq!(100, Score::new(100).unwrap().as_i64());
        assert_eq!(
            ModelError("Score must be between 0 and 100 but got 101".to_owned()),
            Score::new(101).unwrap_err()
        );
    }

    #[test]
    fn test_sex() {
        assert_tokens(&Sex::Male, &[Token::UnitVariant { name: "Sex", variant: "M" }]);
        assert_tokens(&Sex::Female, &[Token::UnitVariant { name: "Sex", variant: "F" }]);
        assert_eq!(Sex::Female, "F".parse::<Sex>().unwrap());
        assert_eq!(
            ModelError("Sex must be one of M or F but got 'X'".to_owned()),
            "X".parse::<Sex>().unwrap_err()
        );
        assert_eq!(Sex::Male, serde_json::from_str::<Sex>("\"M\"").unwrap());
        assert!(serde_json::from_str::<Sex>("\"m\"").is_err());
    }

    #[test]
    fn test_search_terms() {
        assert_eq!(Vec::<&str>::new(), search_terms("").collect::<Vec<_>>());
        assert_eq!(vec!["ali"], search_terms("  ali ").collect::<Vec<_>>());
        assert_eq!(vec!["a", "b", "c"], search_terms("a b,,c").collect::<Vec<_>>());
    }
}
