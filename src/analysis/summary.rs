//! Aggregate builders feeding the dashboard charts.
//!
//! Each function is a pure pass over a loaded dataset and returns plain
//! collections for a renderer to consume; nothing here draws anything.

use super::winners::resolve_winners;
use crate::dataset::Dataset;
use crate::model::Party;
use std::collections::BTreeMap;

/// Total votes per party per year (bar chart data)
pub fn votes_by_party(dataset: &Dataset) -> BTreeMap<u16, BTreeMap<Party, u64>> {
    let mut totals: BTreeMap<u16, BTreeMap<Party, u64>> = BTreeMap::new();
    for row in &dataset.rows {
        if let Some(votes) = row.candidate_votes {
            *totals
                .entry(row.year)
                .or_default()
                .entry(row.party.clone())
                .or_insert(0) += votes;
        }
    }
    totals
}

/// National turnout per year (line chart data).
///
/// The source repeats the statewide total on every candidate row, so exactly
/// one `total_votes` value is taken per (state, year) before summing.
pub fn turnout_by_year(dataset: &Dataset) -> BTreeMap<u16, u64> {
    let mut per_race: BTreeMap<(u16, &str), u64> = BTreeMap::new();
    for row in &dataset.rows {
        if let Some(total) = row.total_votes {
            per_race.entry((row.year, row.state.as_str())).or_insert(total);
        }
    }

    let mut turnout: BTreeMap<u16, u64> = BTreeMap::new();
    for ((year, _), total) in per_race {
        *turnout.entry(year).or_insert(0) += total;
    }
    turnout
}

/// Per-state ascending (year, votes) series (turnout explorer data).
/// Sums candidate votes, which survive even when `totalvotes` is absent.
pub fn state_turnout_series(dataset: &Dataset) -> BTreeMap<String, Vec<(u16, u64)>> {
    let mut per_race: BTreeMap<(String, u16), u64> = BTreeMap::new();
    for row in &dataset.rows {
        if let Some(votes) = row.candidate_votes {
            *per_race
                .entry((row.state.clone(), row.year))
                .or_insert(0) += votes;
        }
    }

    let mut series: BTreeMap<String, Vec<(u16, u64)>> = BTreeMap::new();
    for ((state, year), votes) in per_race {
        series.entry(state).or_default().push((year, votes));
    }
    series
}

/// Per-party vote totals for one year (pie chart data).
/// Empty when the year has no data; the caller renders a placeholder.
pub fn vote_share(dataset: &Dataset, year: u16) -> BTreeMap<Party, u64> {
    let mut share: BTreeMap<Party, u64> = BTreeMap::new();
    for row in &dataset.rows {
        if row.year == year {
            if let Some(votes) = row.candidate_votes {
                *share.entry(row.party.clone()).or_insert(0) += votes;
            }
        }
    }
    share
}

/// Winning party per display state for one year; `None` marks "No Race"
/// (choropleth data).
pub fn winner_map(dataset: &Dataset, year: u16) -> BTreeMap<String, Option<Party>> {
    let winners = resolve_winners(&dataset.rows);

    let mut map: BTreeMap<String, Option<Party>> = dataset
        .display_states()
        .into_iter()
        .map(|state| (state, None))
        .collect();

    for ((state, y), record) in &winners {
        if *y == year {
            map.insert(state.clone(), Some(record.party.clone()));
        }
    }
    map
}

/// Race coverage for a dataset and year (controls panel text)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    pub year: u16,
    pub states_with_race: usize,
    pub no_race: usize,
}

pub fn coverage(dataset: &Dataset, year: u16) -> Coverage {
    let display = dataset.display_states();
    let with_race = display
        .iter()
        .filter(|state| {
            dataset
                .rows
                .iter()
                .any(|row| row.year == year && row.state == **state)
        })
        .count();

    Coverage {
        year,
        states_with_race: with_race,
        no_race: display.len() - with_race,
    }
}

/// Which side leads a state's two-party split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitLeader {
    Democrat,
    Republican,
    Even,
    NoRace,
}

/// One state's Democrat/Republican split for a year (diverging bar data)
#[derive(Debug, Clone, PartialEq)]
pub struct StateSplit {
    pub state: String,
    /// Democrat share of all votes, in percent
    pub dem_share: f64,
    /// Republican share of all votes, in percent
    pub rep_share: f64,
    /// Signed margin in percentage points; positive favors the Democrat
    pub margin: f64,
    pub total_votes: u64,
    pub leader: SplitLeader,
}

/// Democrat-vs-Republican split per display state for one year, sorted by
/// closeness to 50/50 so the most contested states list first.
pub fn state_split(dataset: &Dataset, year: u16) -> Vec<StateSplit> {
    let mut tallies: BTreeMap<&str, (u64, u64, u64)> = BTreeMap::new();
    for row in &dataset.rows {
        if row.year != year {
            continue;
        }
        let votes = match row.candidate_votes {
            Some(v) => v,
            None => continue,
        };
        let entry = tallies.entry(row.state.as_str()).or_insert((0, 0, 0));
        match row.party {
            Party::Democrat => entry.0 += votes,
            Party::Republican => entry.1 += votes,
            Party::Other(_) => entry.2 += votes,
        }
    }

    let mut splits: Vec<StateSplit> = dataset
        .display_states()
        .into_iter()
        .map(|state| {
            let (dem, rep, other) = tallies.get(state.as_str()).copied().unwrap_or((0, 0, 0));
            let total = dem + rep + other;
            if total == 0 {
                return StateSplit {
                    state,
                    dem_share: 0.0,
                    rep_share: 0.0,
                    margin: 0.0,
                    total_votes: 0,
                    leader: SplitLeader::NoRace,
                };
            }

            let dem_share = dem as f64 / total as f64;
            let rep_share = rep as f64 / total as f64;
            let margin = dem_share - rep_share;
            let leader = if margin > 0.0 {
                SplitLeader::Democrat
            } else if margin < 0.0 {
                SplitLeader::Republican
            } else {
                SplitLeader::Even
            };

            StateSplit {
                state,
                dem_share: dem_share * 100.0,
                rep_share: rep_share * 100.0,
                margin: margin * 100.0,
                total_votes: total,
                leader,
            }
        })
        .collect();

    splits.sort_by(|a, b| {
        a.margin
            .abs()
            .partial_cmp(&b.margin.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.state.cmp(&b.state))
    });
    splits
}

/// Summary statistics for a vote sample (boxplot data)
#[derive(Debug, Clone, PartialEq)]
pub struct VoteStats {
    pub min: u64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: u64,
    pub mean: f64,
    pub std_dev: f64,
}

/// State-level vote totals for one party bucket in one year
#[derive(Debug, Clone, PartialEq)]
pub struct PartyDistribution {
    /// "Democrat", "Republican", or "Other" (all third parties combined)
    pub party: &'static str,
    /// Per-state totals, ascending
    pub samples: Vec<u64>,
    pub stats: VoteStats,
}

/// Distribution of state-level vote totals by party for one year.
/// Buckets with no samples are omitted.
pub fn vote_distribution(dataset: &Dataset, year: u16) -> Vec<PartyDistribution> {
    let mut tallies: BTreeMap<(&str, &'static str), u64> = BTreeMap::new();
    for row in &dataset.rows {
        if row.year != year {
            continue;
        }
        let votes = match row.candidate_votes {
            Some(v) => v,
            None => continue,
        };
        let bucket = match row.party {
            Party::Democrat => "Democrat",
            Party::Republican => "Republican",
            Party::Other(_) => "Other",
        };
        *tallies.entry((row.state.as_str(), bucket)).or_insert(0) += votes;
    }

    ["Democrat", "Republican", "Other"]
        .iter()
        .filter_map(|&party| {
            let mut samples: Vec<u64> = tallies
                .iter()
                .filter(|((_, bucket), _)| *bucket == party)
                .map(|(_, votes)| *votes)
                .collect();
            if samples.is_empty() {
                return None;
            }
            samples.sort_unstable();
            let stats = vote_stats(&samples);
            Some(PartyDistribution {
                party,
                samples,
                stats,
            })
        })
        .collect()
}

/// Five-number summary plus mean and sample standard deviation.
/// `samples` must be sorted ascending and non-empty.
fn vote_stats(samples: &[u64]) -> VoteStats {
    let n = samples.len();
    let mean = samples.iter().sum::<u64>() as f64 / n as f64;
    let std_dev = if n < 2 {
        0.0
    } else {
        let variance = samples
            .iter()
            .map(|&v| {
                let d = v as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / (n - 1) as f64;
        variance.sqrt()
    };

    VoteStats {
        min: samples[0],
        q1: quantile(samples, 0.25),
        median: quantile(samples, 0.5),
        q3: quantile(samples, 0.75),
        max: samples[n - 1],
        mean,
        std_dev,
    }
}

/// Quantile by linear interpolation over a sorted, non-empty sample
fn quantile(samples: &[u64], q: f64) -> f64 {
    let position = (samples.len() - 1) as f64 * q;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        samples[lower] as f64
    } else {
        let weight = position - lower as f64;
        samples[lower] as f64 * (1.0 - weight) + samples[upper] as f64 * weight
    }
}
