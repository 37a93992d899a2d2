use crate::model::{BallotRow, Party};
use std::collections::BTreeMap;

/// The resolved winning party for one state in one year.
#[derive(Debug, Clone, PartialEq)]
pub struct WinnerRecord {
    pub party: Party,
    pub votes: u64,
    pub candidate: Option<String>,
}

/// Winner table keyed by `(state, year)`; at most one record per key.
///
/// A key with no entry is a genuine "no race" gap, distinct from a tie or a
/// zero-vote winner.
pub type WinnerTable = BTreeMap<(String, u16), WinnerRecord>;

/// Select the winning row per (state, year) by maximum candidate votes.
///
/// Rows with no recorded vote count never qualify. Ties on the maximum are
/// broken by the lexicographically smallest candidate name; unnamed rows
/// lose to named ones, and between two unnamed rows the first seen stands.
/// Output is reproducible for any fixed input ordering.
pub fn resolve_winners(rows: &[BallotRow]) -> WinnerTable {
    let mut winners = WinnerTable::new();

    for row in rows {
        let votes = match row.candidate_votes {
            Some(v) => v,
            None => continue,
        };

        let key = (row.state.clone(), row.year);
        match winners.get_mut(&key) {
            None => {
                winners.insert(
                    key,
                    WinnerRecord {
                        party: row.party.clone(),
                        votes,
                        candidate: row.candidate.clone(),
                    },
                );
            }
            Some(current) => {
                let wins = votes > current.votes
                    || (votes == current.votes
                        && tie_break(row.candidate.as_deref(), current.candidate.as_deref()));
                if wins {
                    *current = WinnerRecord {
                        party: row.party.clone(),
                        votes,
                        candidate: row.candidate.clone(),
                    };
                }
            }
        }
    }

    winners
}

/// Whether a challenger with equal votes displaces the current winner
fn tie_break(challenger: Option<&str>, current: Option<&str>) -> bool {
    match (challenger, current) {
        (Some(c), Some(w)) => c < w,
        (Some(_), None) => true,
        _ => false,
    }
}

/// The winners of a single year, keyed by state
pub fn winners_for_year(winners: &WinnerTable, year: u16) -> BTreeMap<&str, &WinnerRecord> {
    winners
        .iter()
        .filter(|((_, y), _)| *y == year)
        .map(|((state, _), record)| (state.as_str(), record))
        .collect()
}
