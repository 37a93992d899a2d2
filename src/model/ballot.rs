use super::Party;

/// One candidate's recorded vote total in one state for one election year.
///
/// `state` holds whichever identifier the dataset's resolved state column
/// supplies (postal code when available, full name otherwise) and is used
/// consistently across a whole dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct BallotRow {
    pub year: u16,
    pub state: String,
    pub party: Party,
    pub candidate: Option<String>,
    /// Votes for this candidate; absent when the source field was empty or
    /// not numeric.
    pub candidate_votes: Option<u64>,
    /// Statewide total for the race, repeated on every candidate row of a
    /// (state, year) in the source data.
    pub total_votes: Option<u64>,
}
