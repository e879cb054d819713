//! Field-by-field comparison of POS collections.
//!
//! Identifiers and timestamps are server-assigned, so every comparison here
//! works on [`PosDto::without_server_fields`] copies. Collections carry no
//! order guarantee and are compared as multisets.

use std::collections::HashMap;
use std::fmt;

use campus_coffee_core::{PosDto, PosId};

/// Difference between an actual and an expected POS collection.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Mismatch {
    /// Expected records absent from the actual collection.
    pub missing: Vec<PosDto>,
    /// Actual records not matched by any expected record.
    pub unexpected: Vec<PosDto>,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "POS collections differ")?;
        for pos in &self.missing {
            writeln!(f, "  missing:    {pos:?}")?;
        }
        for pos in &self.unexpected {
            writeln!(f, "  unexpected: {pos:?}")?;
        }
        Ok(())
    }
}

impl std::error::Error for Mismatch {}

/// Check that `actual` holds exactly the records of `expected`, in any
/// order, ignoring identifiers and timestamps.
///
/// Duplicates are honoured: each expected record consumes one actual record.
///
/// # Errors
///
/// Returns the unmatched records on both sides.
pub fn contains_exactly_in_any_order(actual: &[PosDto], expected: &[PosDto]) -> Result<(), Mismatch> {
    let mut unmatched: Vec<PosDto> = actual.iter().map(PosDto::without_server_fields).collect();
    let mut missing = Vec::new();

    for pos in expected.iter().map(PosDto::without_server_fields) {
        match unmatched.iter().position(|candidate| *candidate == pos) {
            Some(index) => {
                unmatched.swap_remove(index);
            }
            None => missing.push(pos),
        }
    }

    if missing.is_empty() && unmatched.is_empty() {
        Ok(())
    } else {
        Err(Mismatch {
            missing,
            unexpected: unmatched,
        })
    }
}

/// Index records by identifier. Records without an identifier are skipped.
#[must_use]
pub fn index_by_id(list: &[PosDto]) -> HashMap<PosId, PosDto> {
    list.iter()
        .filter_map(|pos| pos.id.map(|id| (id, pos.clone())))
        .collect()
}

/// Reasons an update did not leave the collection in the expected state.
#[derive(Debug, PartialEq, Eq)]
pub enum UpdateMismatch {
    /// The set of identifiers changed.
    IdsChanged {
        before: Vec<PosId>,
        after: Vec<PosId>,
    },
    /// The updated record does not carry the update payload.
    NotApplied { id: PosId, actual: PosDto },
    /// The updated record is identical to its previous state.
    Unchanged { id: PosId },
    /// A record other than the updated one changed.
    Collateral {
        id: PosId,
        before: PosDto,
        after: PosDto,
    },
}

impl fmt::Display for UpdateMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IdsChanged { before, after } => {
                write!(f, "POS ids changed from {before:?} to {after:?}")
            }
            Self::NotApplied { id, actual } => {
                write!(f, "POS {id} does not match the update: {actual:?}")
            }
            Self::Unchanged { id } => write!(f, "POS {id} was not changed by the update"),
            Self::Collateral { id, before, after } => {
                write!(f, "POS {id} changed unexpectedly: {before:?} -> {after:?}")
            }
        }
    }
}

impl std::error::Error for UpdateMismatch {}

/// Check the outcome of a single-record update.
///
/// `before` maps every identifier to its pre-update state. The record with
/// `updated_id` must equal `payload` and differ from its previous state;
/// every other record must equal its previous state.
///
/// # Errors
///
/// Returns the first violation found.
pub fn verify_single_update(
    actual: &[PosDto],
    before: &HashMap<PosId, PosDto>,
    updated_id: PosId,
    payload: &PosDto,
) -> Result<(), UpdateMismatch> {
    let after = index_by_id(actual);

    let mut before_ids: Vec<PosId> = before.keys().copied().collect();
    let mut after_ids: Vec<PosId> = after.keys().copied().collect();
    before_ids.sort_unstable();
    after_ids.sort_unstable();
    if before_ids != after_ids || after.len() != actual.len() {
        return Err(UpdateMismatch::IdsChanged {
            before: before_ids,
            after: after_ids,
        });
    }

    for (id, previous) in before {
        let previous = previous.without_server_fields();
        let Some(current) = after.get(id).map(PosDto::without_server_fields) else {
            continue;
        };

        if *id == updated_id {
            if current != payload.without_server_fields() {
                return Err(UpdateMismatch::NotApplied {
                    id: *id,
                    actual: current,
                });
            }
            if current == previous {
                return Err(UpdateMismatch::Unchanged { id: *id });
            }
        } else if current != previous {
            return Err(UpdateMismatch::Collateral {
                id: *id,
                before: previous,
                after: current,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::Utc;

    use campus_coffee_core::{CampusType, PosType};

    use super::*;

    fn pos(id: i64, name: &str) -> PosDto {
        PosDto {
            id: Some(PosId::new(id)),
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
            name: name.to_string(),
            description: format!("{name} description"),
            pos_type: PosType::Cafe,
            campus: CampusType::Altstadt,
            street: "Hauptstraße".to_string(),
            house_number: "1".to_string(),
            postal_code: 69117,
            city: "Heidelberg".to_string(),
        }
    }

    #[test]
    fn test_any_order_ignoring_server_fields() {
        let expected = vec![pos(1, "A"), pos(2, "B"), pos(3, "C")];
        let actual = vec![
            PosDto {
                id: Some(PosId::new(30)),
                ..pos(3, "C")
            },
            pos(1, "A").without_server_fields(),
            pos(2, "B"),
        ];

        assert!(contains_exactly_in_any_order(&actual, &expected).is_ok());
    }

    #[test]
    fn test_reports_missing_and_unexpected() {
        let expected = vec![pos(1, "A"), pos(2, "B")];
        let actual = vec![pos(1, "A"), pos(2, "X")];

        let mismatch = contains_exactly_in_any_order(&actual, &expected).unwrap_err();
        assert_eq!(mismatch.missing.len(), 1);
        assert_eq!(mismatch.missing[0].name, "B");
        assert_eq!(mismatch.unexpected.len(), 1);
        assert_eq!(mismatch.unexpected[0].name, "X");
        assert!(mismatch.to_string().contains("missing"));
    }

    #[test]
    fn test_duplicates_must_balance() {
        let expected = vec![pos(1, "A"), pos(2, "A")];
        let actual = vec![pos(1, "A")];

        let mismatch = contains_exactly_in_any_order(&actual, &expected).unwrap_err();
        assert_eq!(mismatch.missing.len(), 1);
        assert!(mismatch.unexpected.is_empty());
    }

    #[test]
    fn test_index_by_id() {
        let list = vec![pos(5, "A"), pos(9, "B"), pos(1, "C").without_server_fields()];
        let index = index_by_id(&list);
        assert_eq!(index.len(), 2);
        assert_eq!(index[&PosId::new(9)].name, "B");
    }

    #[test]
    fn test_verify_single_update() {
        let before_list = vec![pos(1, "A"), pos(2, "B"), pos(3, "C")];
        let before = index_by_id(&before_list);
        let payload = pos(2, "B renamed").without_server_fields();

        let after = vec![pos(3, "C"), pos(1, "A"), pos(2, "B renamed")];
        assert!(verify_single_update(&after, &before, PosId::new(2), &payload).is_ok());

        let not_applied = vec![pos(1, "A"), pos(2, "B"), pos(3, "C")];
        assert!(matches!(
            verify_single_update(&not_applied, &before, PosId::new(2), &payload),
            Err(UpdateMismatch::NotApplied { .. })
        ));

        let unchanged_payload = pos(2, "B").without_server_fields();
        assert_eq!(
            verify_single_update(&not_applied, &before, PosId::new(2), &unchanged_payload),
            Err(UpdateMismatch::Unchanged { id: PosId::new(2) })
        );

        let collateral = vec![pos(1, "A changed"), pos(2, "B renamed"), pos(3, "C")];
        assert!(matches!(
            verify_single_update(&collateral, &before, PosId::new(2), &payload),
            Err(UpdateMismatch::Collateral { .. })
        ));

        let shrunk = vec![pos(1, "A"), pos(2, "B renamed")];
        assert!(matches!(
            verify_single_update(&shrunk, &before, PosId::new(2), &payload),
            Err(UpdateMismatch::IdsChanged { .. })
        ));
    }
}
