//! Read-only reference catalog of schools the matching engine ranks against.
//!
//! The catalog is owned by the surrounding marketplace; this module only
//! loads it (from a CSV export or the built-in sample) and hands out shared
//! read access.

mod parser;

use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// One school as published in the marketplace catalog. Never mutated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolRecord {
    pub id: String,
    pub name: String,
    pub board: String,
    pub distance_km: f32,
    pub annual_fee: u32,
    pub is_popular: bool,
    pub rating: f32,
    pub total_seats: u32,
    pub seats_available: u32,
}

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: u64, reason: &'static str },
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read catalog export: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid catalog CSV data: {}", err),
            CatalogImportError::InvalidRow { line, reason } => {
                write!(f, "catalog row {} rejected: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// In-memory, read-only sequence of schools addressable by id. Iteration
/// order is the catalog's publication order, which also breaks score ties.
#[derive(Debug, Clone)]
pub struct SchoolCatalog {
    schools: Vec<SchoolRecord>,
}

impl SchoolCatalog {
    pub fn new(schools: Vec<SchoolRecord>) -> Self {
        Self { schools }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogImportError> {
        let mut schools = Vec::new();

        for row in parser::parse_records(reader)? {
            if let Some(reason) = row.problem {
                return Err(CatalogImportError::InvalidRow {
                    line: row.line,
                    reason,
                });
            }
            schools.push(row.record);
        }

        Ok(Self { schools })
    }

    /// The built-in catalog used by demos and tests when no CSV is wired in.
    pub fn sample() -> Self {
        Self::new(vec![
            SchoolRecord {
                id: "sch-001".to_string(),
                name: "Greenfield International School".to_string(),
                board: "CBSE".to_string(),
                distance_km: 2.1,
                annual_fee: 180_000,
                is_popular: true,
                rating: 4.6,
                total_seats: 120,
                seats_available: 18,
            },
            SchoolRecord {
                id: "sch-002".to_string(),
                name: "St. Mary's Convent School".to_string(),
                board: "ICSE".to_string(),
                distance_km: 4.8,
                annual_fee: 145_000,
                is_popular: false,
                rating: 4.2,
                total_seats: 90,
                seats_available: 25,
            },
            SchoolRecord {
                id: "sch-003".to_string(),
                name: "Lakshmi Public School".to_string(),
                board: "CBSE".to_string(),
                distance_km: 6.5,
                annual_fee: 95_000,
                is_popular: false,
                rating: 3.9,
                total_seats: 160,
                seats_available: 52,
            },
            SchoolRecord {
                id: "sch-004".to_string(),
                name: "Horizon World Academy".to_string(),
                board: "IB".to_string(),
                distance_km: 11.3,
                annual_fee: 420_000,
                is_popular: true,
                rating: 4.8,
                total_seats: 60,
                seats_available: 6,
            },
            SchoolRecord {
                id: "sch-005".to_string(),
                name: "Saraswati Vidya Mandir".to_string(),
                board: "State Board".to_string(),
                distance_km: 1.4,
                annual_fee: 48_000,
                is_popular: false,
                rating: 4.0,
                total_seats: 200,
                seats_available: 88,
            },
            SchoolRecord {
                id: "sch-006".to_string(),
                name: "Bluebell Montessori House".to_string(),
                board: "CBSE".to_string(),
                distance_km: 3.0,
                annual_fee: 210_000,
                is_popular: false,
                rating: 4.5,
                total_seats: 75,
                seats_available: 12,
            },
        ])
    }

    pub fn by_id(&self, id: &str) -> Option<&SchoolRecord> {
        self.schools.iter().find(|school| school.id == id)
    }

    pub fn schools(&self) -> &[SchoolRecord] {
        &self.schools
    }

    pub fn len(&self) -> usize {
        self.schools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schools.is_empty()
    }
}
