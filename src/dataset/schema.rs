use crate::error::{ElectionError, Result};
use csv::StringRecord;

/// Which column supplies the state identifier for a whole load pass.
///
/// Exactly one column is chosen per dataset so that winner keys never mix
/// the two naming conventions for the same state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKey {
    /// Two-letter postal code column (`state_po`)
    Postal,
    /// Full state name column (`state`)
    FullName,
}

impl StateKey {
    pub fn column_name(&self) -> &'static str {
        match self {
            StateKey::Postal => "state_po",
            StateKey::FullName => "state",
        }
    }
}

/// Column roles resolved once at load time.
///
/// The source files vary in header casing, so every role is located
/// case-insensitively here and then addressed by index for the rest of the
/// pass.
#[derive(Debug, Clone)]
pub struct ColumnRoles {
    pub year: usize,
    pub state: usize,
    pub state_key: StateKey,
    pub party: usize,
    pub candidate_votes: usize,
    pub candidate: Option<usize>,
    pub total_votes: Option<usize>,
}

impl ColumnRoles {
    /// Resolve all column roles from the header record.
    ///
    /// Missing year, state, party, or candidate-votes columns are a data
    /// integrity problem and fail fast with the dataset named in the error.
    pub fn resolve(headers: &StringRecord, dataset: &str) -> Result<ColumnRoles> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        let year = find("year").ok_or_else(|| missing(dataset, "year", headers))?;

        let (state, state_key) = if let Some(idx) = find("state_po") {
            (idx, StateKey::Postal)
        } else if let Some(idx) = find("state") {
            (idx, StateKey::FullName)
        } else {
            return Err(missing(dataset, "state", headers));
        };

        // Prefer the simplified party column; fall back to any header
        // mentioning "party".
        let party = find("party_simplified")
            .or_else(|| {
                headers
                    .iter()
                    .position(|h| h.trim().to_ascii_lowercase().contains("party"))
            })
            .ok_or_else(|| missing(dataset, "party", headers))?;

        let candidate_votes =
            find("candidatevotes").ok_or_else(|| missing(dataset, "candidatevotes", headers))?;

        Ok(ColumnRoles {
            year,
            state,
            state_key,
            party,
            candidate_votes,
            candidate: find("candidate"),
            total_votes: find("totalvotes"),
        })
    }
}

fn missing(dataset: &str, role: &'static str, headers: &StringRecord) -> ElectionError {
    ElectionError::MissingColumn {
        dataset: dataset.to_string(),
        role,
        headers: headers.iter().collect::<Vec<_>>().join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> StringRecord {
        StringRecord::from(names.to_vec())
    }

    #[test]
    fn test_resolve_prefers_postal_column() {
        let roles = ColumnRoles::resolve(
            &headers(&["year", "state", "state_po", "party_simplified", "candidatevotes"]),
            "president",
        )
        .unwrap();
        assert_eq!(roles.state, 2);
        assert_eq!(roles.state_key, StateKey::Postal);
    }

    #[test]
    fn test_resolve_falls_back_to_full_name() {
        let roles = ColumnRoles::resolve(
            &headers(&["year", "state", "party_simplified", "candidatevotes"]),
            "president",
        )
        .unwrap();
        assert_eq!(roles.state, 1);
        assert_eq!(roles.state_key, StateKey::FullName);
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let roles = ColumnRoles::resolve(
            &headers(&["Year", "STATE_PO", "Party_Simplified", "CandidateVotes"]),
            "senate",
        )
        .unwrap();
        assert_eq!(roles.year, 0);
        assert_eq!(roles.state, 1);
        assert_eq!(roles.party, 2);
        assert_eq!(roles.candidate_votes, 3);
    }

    #[test]
    fn test_party_fallback_to_any_party_header() {
        let roles = ColumnRoles::resolve(
            &headers(&["year", "state_po", "party_detailed", "candidatevotes"]),
            "president",
        )
        .unwrap();
        assert_eq!(roles.party, 2);
    }

    #[test]
    fn test_missing_state_column_fails_fast() {
        let err = ColumnRoles::resolve(
            &headers(&["year", "party_simplified", "candidatevotes"]),
            "senate",
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("senate"));
        assert!(message.contains("state"));
    }

    #[test]
    fn test_missing_party_column_fails_fast() {
        let err = ColumnRoles::resolve(&headers(&["year", "state_po", "candidatevotes"]), "president")
            .unwrap_err();
        assert!(err.to_string().contains("party"));
    }

    #[test]
    fn test_optional_columns() {
        let roles = ColumnRoles::resolve(
            &headers(&[
                "year",
                "state_po",
                "party_simplified",
                "candidatevotes",
                "candidate",
                "totalvotes",
            ]),
            "president",
        )
        .unwrap();
        assert_eq!(roles.candidate, Some(4));
        assert_eq!(roles.total_votes, Some(5));
    }
}
