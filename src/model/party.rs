use std::fmt;

/// Winning-party category used throughout the analytics.
///
/// The source data carries free-form party strings. Normalization collapses
/// them to the two major parties plus a title-cased catch-all, so equality
/// comparisons between any two parties are exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Party {
    Democrat,
    Republican,
    Other(String),
}

impl Party {
    /// Normalize a raw party string from the source data
    pub fn from_raw(s: &str) -> Party {
        let s = s.trim();
        if s.eq_ignore_ascii_case("democrat") {
            Party::Democrat
        } else if s.eq_ignore_ascii_case("republican") {
            Party::Republican
        } else {
            Party::Other(title_case(s))
        }
    }

    /// Whether this is one of the two major parties
    pub fn is_major(&self) -> bool {
        matches!(self, Party::Democrat | Party::Republican)
    }

    pub fn label(&self) -> &str {
        match self {
            Party::Democrat => "Democrat",
            Party::Republican => "Republican",
            Party::Other(name) => name,
        }
    }
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Title-case a raw value: first letter of each alphabetic run uppercased,
/// the rest lowercased. Non-alphabetic characters separate runs.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_parties_normalize() {
        assert_eq!(Party::from_raw("DEMOCRAT"), Party::Democrat);
        assert_eq!(Party::from_raw("democrat"), Party::Democrat);
        assert_eq!(Party::from_raw(" Democrat "), Party::Democrat);
        assert_eq!(Party::from_raw("REPUBLICAN"), Party::Republican);
    }

    #[test]
    fn test_other_parties_title_cased() {
        assert_eq!(
            Party::from_raw("LIBERTARIAN"),
            Party::Other("Libertarian".to_string())
        );
        assert_eq!(
            Party::from_raw("DEMOCRATIC-FARMER-LABOR"),
            Party::Other("Democratic-Farmer-Labor".to_string())
        );
        assert_eq!(Party::from_raw("OTHER"), Party::Other("Other".to_string()));
    }

    #[test]
    fn test_distinct_third_parties_compare_unequal() {
        assert_ne!(Party::from_raw("LIBERTARIAN"), Party::from_raw("GREEN"));
        assert_eq!(Party::from_raw("Libertarian"), Party::from_raw("LIBERTARIAN"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Party::Democrat.label(), "Democrat");
        assert_eq!(Party::Republican.to_string(), "Republican");
        assert_eq!(Party::from_raw("green").label(), "Green");
    }
}
