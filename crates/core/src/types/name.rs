//! POS name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PosName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PosNameError {
    /// The input is empty or consists only of whitespace.
    #[error("POS name cannot be blank")]
    Blank,
    /// The input string is too long.
    #[error("POS name must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// The name of a point of sale.
///
/// Names identify a POS for humans and are unique across all stored entries.
/// The value is kept exactly as given; callers that accept user input for
/// lookups are expected to trim it themselves.
///
/// ## Constraints
///
/// - Must contain at least one non-whitespace character
/// - At most 255 characters
///
/// ## Examples
///
/// ```
/// use campus_coffee_core::PosName;
///
/// assert!(PosName::parse("Schmelzpunkt").is_ok());
/// assert!(PosName::parse("").is_err());
/// assert!(PosName::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PosName(String);

impl PosName {
    /// Maximum length of a POS name in characters.
    pub const MAX_LENGTH: usize = 255;

    /// Parse a `PosName` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank or longer than
    /// [`PosName::MAX_LENGTH`] characters.
    pub fn parse(s: &str) -> Result<Self, PosNameError> {
        if s.trim().is_empty() {
            return Err(PosNameError::Blank);
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(PosNameError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PosName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PosName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PosName {
    type Err = PosNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PosName {
    type Error = PosNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PosName> for String {
    fn from(name: PosName) -> Self {
        name.0
    }
}

impl AsRef<str> for PosName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for PosName {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for PosName {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(Self::parse(&s)?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for PosName {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}
