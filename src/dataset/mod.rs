pub mod schema;

pub use schema::{ColumnRoles, StateKey};

use crate::error::Result;
use crate::model::{BallotRow, Party, CANONICAL_STATES};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashSet;
use std::path::Path;

/// Which source dataset a table of ballot rows came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    President,
    Senate,
}

impl DatasetKind {
    pub fn label(&self) -> &'static str {
        match self {
            DatasetKind::President => "president",
            DatasetKind::Senate => "senate",
        }
    }
}

/// A loaded, read-only table of ballot rows.
///
/// Loaded once at startup; every analysis pass recomputes from `rows`
/// without mutating it.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub kind: DatasetKind,
    pub rows: Vec<BallotRow>,
    pub state_key: StateKey,
    skipped_rows: usize,
}

impl Dataset {
    /// Load a dataset from a CSV file, decoding with the tiered encoding
    /// fallback and skipping rows the parser cannot recover.
    pub fn load(path: &Path, kind: DatasetKind) -> Result<Dataset> {
        let raw = std::fs::read(path)?;
        let (content, encoding) = decode_bytes(&raw);
        log::debug!(
            "{}: decoded {} as {}",
            kind.label(),
            path.display(),
            encoding
        );
        Dataset::from_csv(&content, kind)
    }

    /// Parse a dataset from CSV text.
    pub fn from_csv(content: &str, kind: DatasetKind) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers: StringRecord = reader.headers()?.iter().map(clean_field).collect();
        let roles = ColumnRoles::resolve(&headers, kind.label())?;

        let mut rows = Vec::new();
        let mut skipped = 0usize;

        for (idx, result) in reader.records().enumerate() {
            // Header is line 1, so data row N is line N + 1.
            let line = idx + 2;
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    log::warn!("{}: skipping malformed line {}: {}", kind.label(), line, e);
                    skipped += 1;
                    continue;
                }
            };

            match parse_row(&record, &roles) {
                Some(row) => rows.push(row),
                None => {
                    log::debug!(
                        "{}: skipping line {} (missing year, state, or party)",
                        kind.label(),
                        line
                    );
                    skipped += 1;
                }
            }
        }

        log::debug!(
            "{}: loaded {} rows ({} skipped)",
            kind.label(),
            rows.len(),
            skipped
        );

        Ok(Dataset {
            kind,
            rows,
            state_key: roles.state_key,
            skipped_rows: skipped,
        })
    }

    /// Number of source rows dropped during loading
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Sorted unique election years present in the data
    pub fn years(&self) -> Vec<u16> {
        let mut years: Vec<u16> = self
            .rows
            .iter()
            .map(|r| r.year)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        years.sort_unstable();
        years
    }

    /// The states shown on map-style output: the canonical 50 in list order,
    /// with DC appended only when it appears in this dataset.
    ///
    /// Stable across calls; a pure function of the loaded rows.
    pub fn display_states(&self) -> Vec<String> {
        let mut states: Vec<String> = CANONICAL_STATES.iter().map(|s| s.to_string()).collect();
        if self.rows.iter().any(|r| r.state == "DC") {
            states.push("DC".to_string());
        }
        states
    }
}

/// Extract one ballot row; `None` drops the record.
///
/// Rows without a parseable year, a state, or a party are useless to every
/// downstream aggregate. Vote counts, by contrast, stay as null so the row
/// still exists as a "candidate ran" record.
fn parse_row(record: &StringRecord, roles: &ColumnRoles) -> Option<BallotRow> {
    let year: u16 = clean_field(record.get(roles.year)?).parse().ok()?;

    let state_raw = clean_field(record.get(roles.state)?);
    if state_raw.is_empty() {
        return None;
    }
    let state = match roles.state_key {
        StateKey::Postal => state_raw.to_ascii_uppercase(),
        StateKey::FullName => state_raw,
    };

    let party_raw = clean_field(record.get(roles.party)?);
    if party_raw.is_empty() || party_raw.eq_ignore_ascii_case("na") {
        return None;
    }
    let party = Party::from_raw(&party_raw);

    let candidate = roles
        .candidate
        .and_then(|i| record.get(i))
        .map(clean_field)
        .filter(|c| !c.is_empty());

    Some(BallotRow {
        year,
        state,
        party,
        candidate,
        candidate_votes: record
            .get(roles.candidate_votes)
            .map(clean_field)
            .and_then(|v| parse_votes(&v)),
        total_votes: roles
            .total_votes
            .and_then(|i| record.get(i))
            .map(clean_field)
            .and_then(|v| parse_votes(&v)),
    })
}

/// Parse a vote count, treating empty and non-numeric values as null.
fn parse_votes(s: &str) -> Option<u64> {
    if s.is_empty() || s.eq_ignore_ascii_case("na") {
        return None;
    }
    s.parse().ok()
}

/// Strip surrounding whitespace and stray double quotes; the source files
/// carry both.
fn clean_field(s: &str) -> String {
    s.trim().trim_matches('"').trim().to_string()
}

/// Decode raw bytes with a tiered fallback: strict UTF-8 first (minus any
/// BOM), then Latin-1, which is total over bytes and also covers the
/// cp1252 text that shows up in these files. Returns the tier used.
fn decode_bytes(raw: &[u8]) -> (String, &'static str) {
    let raw = raw.strip_prefix(b"\xef\xbb\xbf").unwrap_or(raw);

    match std::str::from_utf8(raw) {
        Ok(text) => (text.to_string(), "utf-8"),
        Err(_) => (raw.iter().map(|&b| b as char).collect(), "latin-1"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
year,state,state_po,candidate,party_simplified,candidatevotes,totalvotes
1976,OHIO,OH,\"CARTER, JIMMY\",DEMOCRAT,2011621,4111873
1976,OHIO,OH,\"FORD, GERALD\",REPUBLICAN,2000505,4111873
1980,OHIO,OH,\"REAGAN, RONALD\",REPUBLICAN,2206545,4283603
";

    #[test]
    fn test_from_csv_parses_rows() {
        let dataset = Dataset::from_csv(SAMPLE, DatasetKind::President).unwrap();
        assert_eq!(dataset.rows.len(), 3);
        assert_eq!(dataset.skipped_rows(), 0);
        assert_eq!(dataset.state_key, StateKey::Postal);

        let first = &dataset.rows[0];
        assert_eq!(first.year, 1976);
        assert_eq!(first.state, "OH");
        assert_eq!(first.party, Party::Democrat);
        assert_eq!(first.candidate.as_deref(), Some("CARTER, JIMMY"));
        assert_eq!(first.candidate_votes, Some(2011621));
        assert_eq!(first.total_votes, Some(4111873));
    }

    #[test]
    fn test_years_sorted_unique() {
        let dataset = Dataset::from_csv(SAMPLE, DatasetKind::President).unwrap();
        assert_eq!(dataset.years(), vec![1976, 1980]);
    }

    #[test]
    fn test_missing_party_rows_are_skipped() {
        let csv = "\
year,state_po,party_simplified,candidatevotes
1976,OH,DEMOCRAT,100
1976,PA,,50
1976,NY,NA,60
";
        let dataset = Dataset::from_csv(csv, DatasetKind::President).unwrap();
        assert_eq!(dataset.rows.len(), 1);
        assert_eq!(dataset.skipped_rows(), 2);
    }

    #[test]
    fn test_non_numeric_votes_become_null() {
        let csv = "\
year,state_po,party_simplified,candidatevotes
1976,OH,DEMOCRAT,unopposed
1976,PA,REPUBLICAN,
";
        let dataset = Dataset::from_csv(csv, DatasetKind::President).unwrap();
        assert_eq!(dataset.rows.len(), 2);
        assert_eq!(dataset.rows[0].candidate_votes, None);
        assert_eq!(dataset.rows[1].candidate_votes, None);
    }

    #[test]
    fn test_quoted_and_padded_fields_are_cleaned() {
        let csv = "\
year,state_po,party_simplified,candidatevotes
1976, \"oh\" ,\"DEMOCRAT\", 100
";
        let dataset = Dataset::from_csv(csv, DatasetKind::President).unwrap();
        assert_eq!(dataset.rows[0].state, "OH");
        assert_eq!(dataset.rows[0].party, Party::Democrat);
        assert_eq!(dataset.rows[0].candidate_votes, Some(100));
    }

    #[test]
    fn test_display_states_without_dc() {
        let dataset = Dataset::from_csv(SAMPLE, DatasetKind::President).unwrap();
        let states = dataset.display_states();
        assert_eq!(states.len(), 50);
        assert!(!states.contains(&"DC".to_string()));
    }

    #[test]
    fn test_display_states_appends_dc_when_present() {
        let csv = "\
year,state_po,party_simplified,candidatevotes
2020,DC,DEMOCRAT,317323
";
        let dataset = Dataset::from_csv(csv, DatasetKind::President).unwrap();
        let states = dataset.display_states();
        assert_eq!(states.len(), 51);
        assert_eq!(states.last().map(String::as_str), Some("DC"));
        // Canonical order is preserved ahead of the appended code.
        assert_eq!(states[0], "AL");
        // Stable across repeated calls.
        assert_eq!(states, dataset.display_states());
    }

    #[test]
    fn test_decode_utf8() {
        let (text, tier) = decode_bytes("year,state\n".as_bytes());
        assert_eq!(tier, "utf-8");
        assert_eq!(text, "year,state\n");
    }

    #[test]
    fn test_decode_strips_bom() {
        let (text, tier) = decode_bytes(b"\xef\xbb\xbfyear");
        assert_eq!(tier, "utf-8");
        assert_eq!(text, "year");
    }

    #[test]
    fn test_decode_falls_back_to_latin1() {
        // 0xE9 is 'e' acute in Latin-1 and invalid standalone UTF-8.
        let (text, tier) = decode_bytes(b"Qu\xe9bec");
        assert_eq!(tier, "latin-1");
        assert_eq!(text, "Qu\u{e9}bec");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let dataset = Dataset::load(file.path(), DatasetKind::President).unwrap();
        assert_eq!(dataset.rows.len(), 3);
    }

    #[test]
    fn test_load_latin1_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"year,state_po,party_simplified,candidatevotes\n1976,OH,R\xe9publicain,10\n")
            .unwrap();

        let dataset = Dataset::load(file.path(), DatasetKind::President).unwrap();
        assert_eq!(dataset.rows.len(), 1);
        assert_eq!(
            dataset.rows[0].party,
            Party::Other("R\u{e9}publicain".to_string())
        );
    }

    #[test]
    fn test_missing_state_column_error_names_dataset() {
        let err = Dataset::from_csv("year,party_simplified,candidatevotes\n", DatasetKind::Senate)
            .unwrap_err();
        assert!(err.to_string().contains("senate"));
    }
}
