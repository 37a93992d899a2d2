use super::winners::WinnerTable;
use crate::model::Party;
use std::collections::BTreeMap;

/// Count winning-party changes per state across an inclusive year range.
///
/// Reversed endpoints are swapped rather than rejected, so a caller handing
/// over slider values in either order gets the same answer.
///
/// Per state, the walk runs over the years in range that actually have a
/// winner, ascending. The first observed winner is a baseline, not a flip;
/// each later change of party counts one. Years with no race are never
/// visited and do not reset the last-seen party: Democrat, a no-race gap,
/// then Republican is one flip.
///
/// The result carries an explicit entry for every display state plus any
/// state that appears in the winner table, zero-valued when no qualifying
/// years exist, so map renderers never see an absent key.
pub fn count_flips(
    winners: &WinnerTable,
    display_states: &[String],
    start_year: u16,
    end_year: u16,
) -> BTreeMap<String, u32> {
    let (start, end) = if start_year <= end_year {
        (start_year, end_year)
    } else {
        (end_year, start_year)
    };

    let mut counts: BTreeMap<String, u32> = display_states
        .iter()
        .map(|state| (state.clone(), 0))
        .collect();

    // The winner table iterates in (state, year) order, so each state's
    // sequence arrives already chronological.
    let mut current_state: Option<&str> = None;
    let mut last_party: Option<&Party> = None;

    for ((state, year), record) in winners {
        if current_state != Some(state.as_str()) {
            current_state = Some(state.as_str());
            last_party = None;
            counts.entry(state.clone()).or_insert(0);
        }

        if *year < start || *year > end {
            continue;
        }

        match last_party {
            None => last_party = Some(&record.party),
            Some(previous) if *previous != record.party => {
                *counts.entry(state.clone()).or_insert(0) += 1;
                last_party = Some(&record.party);
            }
            Some(_) => {}
        }
    }

    counts
}

/// Rank states by flip count, descending, ties broken by state code.
/// Truncated to `top_n` entries.
pub fn rank_flips(counts: &BTreeMap<String, u32>, top_n: usize) -> Vec<(String, u32)> {
    let mut ranked: Vec<(String, u32)> = counts
        .iter()
        .map(|(state, count)| (state.clone(), *count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(top_n);
    ranked
}
