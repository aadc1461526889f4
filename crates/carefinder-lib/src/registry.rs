//! Facility registry loading and lookup.
//!
//! The registry is an ordered list of facility records. Order matters: the
//! ranker keeps registry order for equal scores.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Rating that carries no quality penalty.
pub const MAX_RATING: f64 = 5.0;
/// Lowest rating a facility may carry.
pub const MIN_RATING: f64 = 1.0;

/// A facility known to the recommender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub name: String,
    /// Graph node the facility is reached through.
    pub node: String,
    /// Human-readable address.
    pub location: String,
    pub rating: f64,
}

impl FacilityRecord {
    pub fn new(
        name: impl Into<String>,
        node: impl Into<String>,
        location: impl Into<String>,
        rating: f64,
    ) -> Self {
        Self {
            name: name.into(),
            node: node.into(),
            location: location.into(),
            rating,
        }
    }

    /// Composite score for this facility at `distance`; lower is better.
    pub fn score(&self, distance: f64) -> f64 {
        distance + (MAX_RATING - self.rating)
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::RegistryValidation {
                message: "facility name must not be empty".to_string(),
            });
        }
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(Error::InvalidRating {
                name: self.name.clone(),
                rating: self.rating,
            });
        }
        Ok(())
    }
}

/// Ordered collection of facility records.
#[derive(Debug, Clone, Default)]
pub struct FacilityRegistry {
    records: Vec<FacilityRecord>,
    source: Option<PathBuf>,
}

impl FacilityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from records, validating each in order.
    pub fn from_records(records: impl IntoIterator<Item = FacilityRecord>) -> Result<Self> {
        let mut registry = Self::new();
        for record in records {
            registry.push(record)?;
        }
        Ok(registry)
    }

    /// Append a record. Ratings must lie within 1.0..=5.0 and names must be unique.
    pub fn push(&mut self, record: FacilityRecord) -> Result<()> {
        record.validate()?;
        if self.get(&record.name).is_some() {
            return Err(Error::DuplicateFacility {
                name: record.name.clone(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    /// Load a registry from a CSV file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        let mut registry = Self::from_reader(file)?;
        registry.source = Some(path.to_path_buf());
        Ok(registry)
    }

    /// Load a registry from CSV data with `name`, `node`, `location` and `rating` columns.
    ///
    /// Surrounding whitespace is trimmed from every column except `node`,
    /// which must match a graph node name byte for byte.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::Headers).from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|err| Error::RegistryValidation {
                message: format!("failed to read registry headers: {err}"),
            })?
            .clone();

        let normalize = |s: &str| {
            s.to_ascii_lowercase()
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
                .collect::<String>()
        };
        let normalized_headers: Vec<String> = headers.iter().map(&normalize).collect();

        let synonyms: &[(&str, &[&str])] = &[
            ("name", &["name", "facility", "facility_name", "hospital"]),
            ("node", &["node", "area", "graph_node", "location_node"]),
            ("location", &["location", "address", "full_location"]),
            ("rating", &["rating", "quality", "stars"]),
        ];

        let mut columns = [None; 4];
        for (slot, (_, alts)) in columns.iter_mut().zip(synonyms) {
            *slot = alts.iter().find_map(|alt| {
                let alt_n = normalize(*alt);
                normalized_headers.iter().position(|h| *h == alt_n)
            });
        }

        let missing: Vec<&str> = synonyms
            .iter()
            .zip(columns.iter())
            .filter(|(_, column)| column.is_none())
            .map(|((canon, _), _)| *canon)
            .collect();
        if !missing.is_empty() {
            return Err(Error::RegistryValidation {
                message: format!(
                    "registry missing required columns: {}. Available: {}",
                    missing.join(", "),
                    headers.iter().collect::<Vec<_>>().join(", ")
                ),
            });
        }
        let [Some(name_col), Some(node_col), Some(location_col), Some(rating_col)] = columns
        else {
            unreachable!("missing columns rejected above");
        };

        let mut registry = Self::new();
        for (offset, result) in csv_reader.records().enumerate() {
            let record = result?;
            // Header occupies line 1.
            let row = offset + 2;
            let field = |index: usize| record.get(index).unwrap_or("");

            let name = field(name_col).trim().to_string();
            let rating_raw = field(rating_col).trim();
            let rating = rating_raw
                .parse::<f64>()
                .map_err(|e| Error::RegistryValidation {
                    message: format!(
                        "invalid rating '{}' for facility '{}' at row {}: {}",
                        rating_raw, name, row, e
                    ),
                })?;

            registry.push(FacilityRecord {
                name,
                node: field(node_col).to_string(),
                location: field(location_col).trim().to_string(),
                rating,
            })?;
        }

        Ok(registry)
    }

    /// Look up a record by exact facility name.
    pub fn get(&self, name: &str) -> Option<&FacilityRecord> {
        self.records.iter().find(|record| record.name == name)
    }

    /// Records in registry order.
    pub fn records(&self) -> &[FacilityRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &FacilityRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get the source path if the registry was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
