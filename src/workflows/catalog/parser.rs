use super::SchoolRecord;
use serde::{Deserialize, Deserializer};
use std::io::Read;

#[derive(Debug)]
pub(crate) struct ParsedRow {
    pub(crate) line: u64,
    pub(crate) record: SchoolRecord,
    pub(crate) problem: Option<&'static str>,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<ParsedRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rows = Vec::new();

    for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        let row = record?;
        // header occupies line 1
        let line = index as u64 + 2;
        let problem = row.problem();

        rows.push(ParsedRow {
            line,
            record: row.into_record(),
            problem,
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "School Id")]
    school_id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Board")]
    board: String,
    #[serde(rename = "Distance Km")]
    distance_km: f32,
    #[serde(rename = "Annual Fee")]
    annual_fee: u32,
    #[serde(rename = "Popular", default, deserialize_with = "flexible_bool")]
    popular: bool,
    #[serde(rename = "Rating")]
    rating: f32,
    #[serde(rename = "Total Seats", default)]
    total_seats: u32,
    #[serde(rename = "Seats Available", default)]
    seats_available: u32,
}

impl CatalogRow {
    fn problem(&self) -> Option<&'static str> {
        if self.school_id.is_empty() {
            return Some("school id is empty");
        }
        if self.board.is_empty() {
            return Some("board is empty");
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Some("rating outside 0-5");
        }
        if self.distance_km < 0.0 {
            return Some("distance is negative");
        }
        if self.seats_available > self.total_seats {
            return Some("available seats exceed total seats");
        }
        None
    }

    fn into_record(self) -> SchoolRecord {
        SchoolRecord {
            id: self.school_id,
            name: self.name,
            board: self.board,
            distance_km: self.distance_km,
            annual_fee: self.annual_fee,
            is_popular: self.popular,
            rating: self.rating,
            total_seats: self.total_seats,
            seats_available: self.seats_available,
        }
    }
}

fn flexible_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.as_deref().map(parse_bool).unwrap_or(false))
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

#[cfg(test)]
pub(crate) fn parse_bool_for_tests(value: &str) -> bool {
    parse_bool(value)
}
