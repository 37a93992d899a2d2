pub mod ballot;
pub mod party;
pub mod states;

pub use ballot::BallotRow;
pub use party::Party;
pub use states::{is_canonical, CANONICAL_STATES};
