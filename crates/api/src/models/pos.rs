//! Point-of-sale domain types.

use chrono::{DateTime, Utc};

use campus_coffee_core::{CampusType, PosDto, PosId, PosName, PosNameError, PosType};

/// A stored point of sale.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Pos {
    /// Database-assigned identifier.
    pub id: PosId,
    /// Unique display name.
    pub name: PosName,
    /// Free-form description.
    pub description: String,
    /// Kind of point of sale.
    pub pos_type: PosType,
    /// Campus the POS is located on.
    pub campus: CampusType,
    pub street: String,
    pub house_number: String,
    pub postal_code: i32,
    pub city: String,
    /// When the POS was created.
    pub created_at: DateTime<Utc>,
    /// When the POS was last updated.
    pub updated_at: DateTime<Utc>,
}

/// The client-supplied fields of a POS, validated.
///
/// Used for both creation and full replacement on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PosDraft {
    pub name: PosName,
    pub description: String,
    pub pos_type: PosType,
    pub campus: CampusType,
    pub street: String,
    pub house_number: String,
    pub postal_code: i32,
    pub city: String,
}

impl TryFrom<PosDto> for PosDraft {
    type Error = PosNameError;

    fn try_from(dto: PosDto) -> Result<Self, Self::Error> {
        Ok(Self {
            name: PosName::parse(&dto.name)?,
            description: dto.description,
            pos_type: dto.pos_type,
            campus: dto.campus,
            street: dto.street,
            house_number: dto.house_number,
            postal_code: dto.postal_code,
            city: dto.city,
        })
    }
}

impl From<Pos> for PosDto {
    fn from(pos: Pos) -> Self {
        Self {
            id: Some(pos.id),
            created_at: Some(pos.created_at),
            updated_at: Some(pos.updated_at),
            name: pos.name.into_inner(),
            description: pos.description,
            pos_type: pos.pos_type,
            campus: pos.campus,
            street: pos.street,
            house_number: pos.house_number,
            postal_code: pos.postal_code,
            city: pos.city,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn dto(name: &str) -> PosDto {
        PosDto {
            id: Some(PosId::new(3)),
            created_at: None,
            updated_at: None,
            name: name.to_string(),
            description: "Walking distance to lecture hall".to_string(),
            pos_type: PosType::Bakery,
            campus: CampusType::Inf,
            street: "Berliner Str.".to_string(),
            house_number: "43".to_string(),
            postal_code: 69120,
            city: "Heidelberg".to_string(),
        }
    }

    #[test]
    fn test_draft_from_dto_drops_server_fields() {
        let draft = PosDraft::try_from(dto("Bäcker Görtz")).unwrap();
        assert_eq!(draft.name.as_str(), "Bäcker Görtz");
        assert_eq!(draft.pos_type, PosType::Bakery);
        assert_eq!(draft.postal_code, 69120);
    }

    #[test]
    fn test_draft_rejects_blank_name() {
        assert_eq!(PosDraft::try_from(dto("  ")), Err(PosNameError::Blank));
    }

    #[test]
    fn test_pos_into_dto_carries_server_fields() {
        let now = Utc::now();
        let pos = Pos {
            id: PosId::new(5),
            name: PosName::parse("Mensa").unwrap(),
            description: String::new(),
            pos_type: PosType::Cafeteria,
            campus: CampusType::Inf,
            street: "Im Neuenheimer Feld".to_string(),
            house_number: "304".to_string(),
            postal_code: 69120,
            city: "Heidelberg".to_string(),
            created_at: now,
            updated_at: now,
        };

        let dto = PosDto::from(pos);
        assert_eq!(dto.id, Some(PosId::new(5)));
        assert_eq!(dto.created_at, Some(now));
        assert_eq!(dto.name, "Mensa");
    }
}
