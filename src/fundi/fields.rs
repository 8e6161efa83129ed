//! Validated field types shared by the Fundi payloads.
//!
//! Each type checks its constraints when it is created, including when it is
//! deserialized, so the create and update payloads enforce identical rules.

use std::fmt::Display;

use email_address::EmailAddress;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::Error;

/// Implements the conversions serde needs for a validated string newtype.
macro_rules! impl_string_field {
    ($name:ident) => {
        impl TryFrom<String> for $name {
            type Error = Error;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

/// A fundi's display name: non-empty and at most [FundiName::MAX_LENGTH] characters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FundiName(String);

impl FundiName {
    /// The maximum number of characters in a name.
    pub const MAX_LENGTH: usize = 100;

    /// Create a name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidField] if the trimmed name is empty or too long.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            return Err(invalid("name", "cannot be empty"));
        }

        if name.chars().count() > Self::MAX_LENGTH {
            return Err(invalid(
                "name",
                format!("cannot be longer than {} characters", Self::MAX_LENGTH),
            ));
        }

        Ok(Self(name.to_owned()))
    }
}

impl_string_field!(FundiName);

/// A phone number in international format, e.g. "+254712345678".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    const MIN_DIGITS: usize = 9;
    const MAX_DIGITS: usize = 15;

    /// Create a phone number.
    ///
    /// Spaces and dashes are dropped, a single leading '+' is kept, and the rest
    /// must be 9 to 15 digits.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidField] if the number does not have that shape.
    pub fn new(raw: &str) -> Result<Self, Error> {
        let compact: String = raw
            .trim()
            .chars()
            .filter(|c| *c != ' ' && *c != '-')
            .collect();

        let digits = compact.strip_prefix('+').unwrap_or(&compact);

        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid(
                "phoneNumber",
                format!("\"{raw}\" may only contain digits, spaces, dashes and a leading '+'"),
            ));
        }

        if !(Self::MIN_DIGITS..=Self::MAX_DIGITS).contains(&digits.len()) {
            return Err(invalid(
                "phoneNumber",
                format!(
                    "\"{raw}\" must have between {} and {} digits",
                    Self::MIN_DIGITS,
                    Self::MAX_DIGITS
                ),
            ));
        }

        Ok(Self(compact))
    }
}

impl_string_field!(PhoneNumber);

/// A syntactically valid email address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Create and validate an email address.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidField] if `raw_email` is not a valid email address.
    pub fn new(raw_email: &str) -> Result<Self, Error> {
        let raw_email = raw_email.trim();

        if EmailAddress::is_valid(raw_email) {
            Ok(Self(raw_email.to_owned()))
        } else {
            Err(invalid(
                "email",
                format!("\"{raw_email}\" is not a valid email address"),
            ))
        }
    }
}

impl_string_field!(Email);

/// The name of the location a fundi works in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationName(String);

impl LocationName {
    /// Create a location name, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidField] if the trimmed name is empty.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(invalid("location", "cannot be empty"))
        } else {
            Ok(Self(name.to_owned()))
        }
    }
}

impl_string_field!(LocationName);

/// A link to a profile image, normally hosted by Cloudinary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Create an image URL.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidField] if `raw_url` is not an http or https URL.
    pub fn new(raw_url: &str) -> Result<Self, Error> {
        let raw_url = raw_url.trim();
        let url = Url::parse(raw_url).map_err(|error| {
            invalid("profileImageUrl", format!("\"{raw_url}\" is not a URL: {error}"))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(Self(raw_url.to_owned())),
            scheme => Err(invalid(
                "profileImageUrl",
                format!("unsupported scheme \"{scheme}\", expected http or https"),
            )),
        }
    }
}

impl_string_field!(ImageUrl);

/// The trades a fundi offers, e.g. "plumbing". Never empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Skills(Vec<String>);

impl Skills {
    /// Create a skill list, trimming each skill.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidField] if the list or any skill is empty.
    pub fn new(skills: Vec<String>) -> Result<Self, Error> {
        if skills.is_empty() {
            return Err(invalid("skills", "at least one skill is required"));
        }

        skills
            .into_iter()
            .map(|skill| {
                let skill = skill.trim();

                if skill.is_empty() {
                    Err(invalid("skills", "skills cannot be empty"))
                } else {
                    Ok(skill.to_owned())
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// The skills in the order they were given.
    #[cfg(test)]
    pub(crate) fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl TryFrom<Vec<String>> for Skills {
    type Error = Error;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Skills> for Vec<String> {
    fn from(value: Skills) -> Self {
        value.0
    }
}

/// Whole years a fundi has worked in their trade, at most [YearsOfExperience::MAX].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct YearsOfExperience(u8);

impl YearsOfExperience {
    /// The largest accepted number of years.
    pub const MAX: u8 = 80;

    /// Create a number of years.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidField] if `years` is negative or above [YearsOfExperience::MAX].
    pub fn new(years: i64) -> Result<Self, Error> {
        match u8::try_from(years) {
            Ok(years) if years <= Self::MAX => Ok(Self(years)),
            _ => Err(invalid(
                "yearsOfExperience",
                format!("{years} must be between 0 and {}", Self::MAX),
            )),
        }
    }

    /// The number of years.
    #[cfg(test)]
    pub(crate) fn as_u8(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for YearsOfExperience {
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<YearsOfExperience> for i64 {
    fn from(value: YearsOfExperience) -> Self {
        i64::from(value.0)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> Error {
    Error::InvalidField {
        field,
        reason: reason.into(),
    }
}
