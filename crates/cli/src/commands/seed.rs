//! Seed the database with demo points of sale.
//!
//! Entries are read from a YAML file with a top-level `pos` list whose items
//! use the same camelCase keys as the HTTP API. Without `--file` the demo
//! data bundled with the CLI is used.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use campus_coffee_api::models::PosDraft;
use campus_coffee_api::services::{PosError, PosService};
use campus_coffee_core::PosDto;

use super::{CommandError, connect};

const DEMO_POS: &str = include_str!("../../data/demo_pos.yaml");

/// Top-level layout of a seed file.
#[derive(Debug, Deserialize)]
struct SeedFile {
    pos: Vec<PosDto>,
}

/// Outcome of a seeding run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub cleared: u64,
    pub inserted: usize,
    pub skipped: usize,
}

/// Parse and validate seed entries before touching the database.
fn parse_seed(content: &str) -> Result<Vec<PosDraft>, CommandError> {
    let file: SeedFile = serde_yaml::from_str(content)?;

    file.pos
        .into_iter()
        .enumerate()
        .map(|(index, dto)| {
            PosDraft::try_from(dto).map_err(|source| CommandError::InvalidSeedEntry { index, source })
        })
        .collect()
}

/// Seed POS entries from a YAML file, or the bundled demo data.
///
/// # Arguments
///
/// * `file_path` - Optional path to a seed file
/// * `clear_existing` - If true, delete every POS first
///
/// # Errors
///
/// Returns an error if the file cannot be read or validated, or if a
/// database operation fails.
pub async fn run(file_path: Option<&str>, clear_existing: bool) -> Result<SeedSummary, CommandError> {
    let content = match file_path {
        Some(path) => {
            info!(path = %path, "Loading POS entries from file");
            tokio::fs::read_to_string(Path::new(path))
                .await
                .map_err(|source| CommandError::Io {
                    path: path.to_owned(),
                    source,
                })?
        }
        None => {
            info!("Loading bundled demo POS entries");
            DEMO_POS.to_owned()
        }
    };

    // Validate before connecting to the database
    let drafts = parse_seed(&content)?;
    info!(entries = drafts.len(), "Seed file validated");

    let pool = connect().await?;
    let service = PosService::new(pool.clone());
    let summary = seed(&service, &drafts, clear_existing).await?;
    pool.close().await;

    info!("Seeding complete!");
    info!("  Cleared: {}", summary.cleared);
    info!("  Inserted: {}", summary.inserted);
    info!("  Skipped (already exist): {}", summary.skipped);

    Ok(summary)
}

async fn seed(
    service: &PosService,
    drafts: &[PosDraft],
    clear_existing: bool,
) -> Result<SeedSummary, CommandError> {
    let mut summary = SeedSummary::default();

    if clear_existing {
        summary.cleared = service.clear().await?;
    }

    for draft in drafts {
        match service.create(draft).await {
            Ok(_) => summary.inserted += 1,
            Err(PosError::DuplicateName(name)) => {
                info!(name = %name, "POS already exists, skipping");
                summary.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use campus_coffee_core::{CampusType, PosNameError, PosType};

    use super::*;

    #[test]
    fn test_bundled_demo_data_is_valid() {
        let drafts = parse_seed(DEMO_POS).unwrap();
        assert_eq!(drafts.len(), 5);
        assert_eq!(drafts[0].name.as_str(), "Schmelzpunkt");
        assert_eq!(drafts[0].pos_type, PosType::Cafe);
        assert_eq!(drafts[4].campus, CampusType::Bergheim);
        assert_eq!(drafts[4].house_number, "58a");
    }

    #[test]
    fn test_blank_name_is_rejected_with_index() {
        let yaml = r#"
pos:
  - name: "  "
    description: ""
    type: CAFE
    campus: INF
    street: Im Neuenheimer Feld
    houseNumber: "1"
    postalCode: 69120
    city: Heidelberg
"#;
        let err = parse_seed(yaml).unwrap_err();
        assert!(matches!(
            err,
            CommandError::InvalidSeedEntry {
                index: 0,
                source: PosNameError::Blank
            }
        ));
    }

    #[test]
    fn test_unknown_campus_is_rejected() {
        let yaml = r#"
pos:
  - name: Mensa
    description: ""
    type: CAFETERIA
    campus: MARS
    street: Somewhere
    houseNumber: "1"
    postalCode: 69120
    city: Heidelberg
"#;
        assert!(matches!(parse_seed(yaml), Err(CommandError::Yaml(_))));
    }
}
