pub mod flips;
pub mod summary;
pub mod winners;

pub use flips::{count_flips, rank_flips};
pub use summary::{
    coverage, state_split, state_turnout_series, turnout_by_year, vote_distribution, vote_share,
    votes_by_party, winner_map, Coverage, PartyDistribution, SplitLeader, StateSplit, VoteStats,
};
pub use winners::{resolve_winners, winners_for_year, WinnerRecord, WinnerTable};
