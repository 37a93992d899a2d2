use lazy_static::lazy_static;
use std::collections::HashSet;

/// The 50 US states by postal code, ordered by state name.
///
/// DC is deliberately absent; it is appended to display sets only when it
/// actually appears in a dataset.
pub const CANONICAL_STATES: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", //
    "HI", "ID", "IL", "IN", "IA", "KS", "KY", "LA", "ME", "MD", //
    "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", //
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", //
    "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV", "WI", "WY",
];

lazy_static! {
    static ref CANONICAL_SET: HashSet<&'static str> =
        CANONICAL_STATES.iter().copied().collect();
}

/// Whether a postal code belongs to the canonical 50-state list
pub fn is_canonical(code: &str) -> bool {
    CANONICAL_SET.contains(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_list_is_complete() {
        assert_eq!(CANONICAL_STATES.len(), 50);
        let unique: HashSet<_> = CANONICAL_STATES.iter().collect();
        assert_eq!(unique.len(), 50);
    }

    #[test]
    fn test_membership() {
        assert!(is_canonical("OH"));
        assert!(is_canonical("WY"));
        assert!(!is_canonical("DC"));
        assert!(!is_canonical("PR"));
        assert!(!is_canonical("oh"));
    }
}
