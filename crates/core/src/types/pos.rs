//! Point-of-sale classification enums and the wire representation of a POS.
//!
//! Both enums are stored as `TEXT` columns (guarded by `CHECK` constraints in
//! the migrations) and travel over HTTP in `SCREAMING_SNAKE_CASE`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PosId;

/// Error returned when a string does not name a known enum variant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    kind: &'static str,
    value: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }

    /// The rejected input.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// The kind of a point of sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PosType {
    Cafe,
    VendingMachine,
    Bakery,
    Cafeteria,
}

impl PosType {
    /// All variants, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Cafe,
        Self::VendingMachine,
        Self::Bakery,
        Self::Cafeteria,
    ];

    /// The canonical (wire and database) spelling of the variant.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cafe => "CAFE",
            Self::VendingMachine => "VENDING_MACHINE",
            Self::Bakery => "BAKERY",
            Self::Cafeteria => "CAFETERIA",
        }
    }
}

impl std::fmt::Display for PosType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PosType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("POS type", s))
    }
}

/// The campus a point of sale belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CampusType {
    Altstadt,
    Bergheim,
    Inf,
}

impl CampusType {
    /// All variants, in declaration order.
    pub const ALL: [Self; 3] = [Self::Altstadt, Self::Bergheim, Self::Inf];

    /// The canonical (wire and database) spelling of the variant.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Altstadt => "ALTSTADT",
            Self::Bergheim => "BERGHEIM",
            Self::Inf => "INF",
        }
    }
}

impl std::fmt::Display for CampusType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CampusType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("campus", s))
    }
}

/// Implements `sqlx` TEXT encoding for a string-backed enum.
#[cfg(feature = "postgres")]
macro_rules! text_enum_sqlx {
    ($name:ident) => {
        impl sqlx::Type<sqlx::Postgres> for $name {
            fn type_info() -> sqlx::postgres::PgTypeInfo {
                <String as sqlx::Type<sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
                <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
            }
        }

        impl<'r> sqlx::Decode<'r, sqlx::Postgres> for $name {
            fn decode(
                value: sqlx::postgres::PgValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
                Ok(s.parse()?)
            }
        }

        impl sqlx::Encode<'_, sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut sqlx::postgres::PgArgumentBuffer,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }
    };
}

#[cfg(feature = "postgres")]
text_enum_sqlx!(PosType);
#[cfg(feature = "postgres")]
text_enum_sqlx!(CampusType);

/// A point of sale as it travels over HTTP.
///
/// `id`, `created_at` and `updated_at` are assigned by the server. Clients
/// leave them out when creating a POS; on update only `id` is meaningful.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PosId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub pos_type: PosType,
    pub campus: CampusType,
    pub street: String,
    pub house_number: String,
    pub postal_code: i32,
    pub city: String,
}

impl PosDto {
    /// Returns a copy with the server-assigned fields cleared.
    ///
    /// Two records describe the same POS when their client-supplied fields
    /// match; compare the results of this method to ignore `id` and the
    /// timestamps.
    #[must_use]
    pub fn without_server_fields(&self) -> Self {
        Self {
            id: None,
            created_at: None,
            updated_at: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> PosDto {
        PosDto {
            id: None,
            created_at: None,
            updated_at: None,
            name: "Schmelzpunkt".to_string(),
            description: "Great waffles".to_string(),
            pos_type: PosType::Cafe,
            campus: CampusType::Altstadt,
            street: "Hauptstraße".to_string(),
            house_number: "90".to_string(),
            postal_code: 69117,
            city: "Heidelberg".to_string(),
        }
    }

    #[test]
    fn test_pos_type_round_trips_through_str() {
        for variant in PosType::ALL {
            assert_eq!(variant.as_str().parse::<PosType>().unwrap(), variant);
        }
        assert!("COFFEE_SHOP".parse::<PosType>().is_err());
    }

    #[test]
    fn test_campus_rejects_lowercase() {
        let err = "altstadt".parse::<CampusType>().unwrap_err();
        assert_eq!(err.value(), "altstadt");
        assert_eq!(err.to_string(), "invalid campus: altstadt");
    }

    #[test]
    fn test_dto_uses_camel_case_and_type_key() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["type"], "CAFE");
        assert_eq!(json["houseNumber"], "90");
        assert_eq!(json["postalCode"], 69117);
        assert!(json.get("id").is_none());
        assert!(json.get("createdAt").is_none());
    }

    #[test]
    fn test_dto_deserializes_server_response() {
        let json = r#"{
            "id": 12,
            "createdAt": "2026-01-15T10:00:00Z",
            "updatedAt": "2026-01-15T10:00:00Z",
            "name": "Mensa",
            "description": "Lunch",
            "type": "CAFETERIA",
            "campus": "INF",
            "street": "Im Neuenheimer Feld",
            "houseNumber": "304",
            "postalCode": 69120,
            "city": "Heidelberg"
        }"#;
        let dto: PosDto = serde_json::from_str(json).unwrap();
        assert_eq!(dto.id, Some(PosId::new(12)));
        assert_eq!(dto.pos_type, PosType::Cafeteria);
        assert!(dto.created_at.is_some());
    }

    #[test]
    fn test_without_server_fields_ignores_generated_values() {
        let mut stored = sample();
        stored.id = Some(PosId::new(99));
        stored.created_at = Some(Utc::now());
        stored.updated_at = stored.created_at;

        assert_ne!(stored, sample());
        assert_eq!(stored.without_server_fields(), sample());
    }
}
