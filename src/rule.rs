use derive_more::{Display, From};
use thiserror::Error;

/// A single value pulled out of a log line, kept verbatim as text.
#[derive(Debug, Display, From, Clone, PartialEq, Eq)]
pub struct Sample(String);

impl Sample {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Maps a line whose first token is `label` to the token at `token_index`,
/// with its first `strip_chars` characters removed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ExtractionRule {
    pub label: &'static str,
    pub token_index: usize,
    pub strip_chars: usize,
}

/// `transactions: 10000 (332.87 per sec.)`
pub const TRANSACTIONS: ExtractionRule = ExtractionRule::new("transactions:", 2, 1);
/// `queries: 160000 (5325.93 per sec.)`
pub const QUERIES: ExtractionRule = ExtractionRule::new("queries:", 2, 1);
/// `reconnects: 0 (0.00 per sec.)`
pub const RECONNECTS: ExtractionRule = ExtractionRule::new("reconnects:", 2, 1);
pub const LATENCY_MIN: ExtractionRule = ExtractionRule::new("min:", 1, 0);
pub const LATENCY_AVG: ExtractionRule = ExtractionRule::new("avg:", 1, 0);
pub const LATENCY_MAX: ExtractionRule = ExtractionRule::new("max:", 1, 0);
/// `ignored errors: 0 (0.00 per sec.)`
pub const IGNORED_ERRORS: ExtractionRule = ExtractionRule::new("ignored", 3, 1);
/// `95th percentile: 3.68`
pub const LATENCY_95TH: ExtractionRule = ExtractionRule::new("95th", 2, 0);

impl ExtractionRule {
    pub const fn new(label: &'static str, token_index: usize, strip_chars: usize) -> Self {
        ExtractionRule {
            label,
            token_index,
            strip_chars,
        }
    }

    pub fn matches(&self, tokens: &[&str]) -> bool {
        tokens.first() == Some(&self.label)
    }

    pub fn extract(&self, tokens: &[&str]) -> Result<Sample, RuleError> {
        let token = tokens
            .get(self.token_index)
            .copied()
            .ok_or_else(|| RuleError::MissingToken {
                label: self.label,
                index: self.token_index,
                found: tokens.len(),
            })?;
        let value = token
            .char_indices()
            .nth(self.strip_chars)
            .map_or("", |(offset, _)| &token[offset..]);
        Ok(Sample(value.to_owned()))
    }
}

/// Ordered rule table. The first rule whose label matches a line wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<ExtractionRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet {
            rules: vec![TRANSACTIONS],
        }
    }
}

impl RuleSet {
    pub fn empty() -> Self {
        RuleSet { rules: Vec::new() }
    }

    pub fn with_rule(mut self, rule: ExtractionRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[ExtractionRule] {
        &self.rules
    }

    pub fn find(&self, tokens: &[&str]) -> Option<&ExtractionRule> {
        self.rules.iter().find(|rule| rule.matches(tokens))
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RuleError {
    #[error("`{label}` line has {found} tokens, value expected at token {index}")]
    MissingToken {
        label: &'static str,
        index: usize,
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(line: &str) -> Vec<&str> {
        line.split_whitespace().collect()
    }

    #[test]
    fn transactions_strips_leading_parenthesis() {
        let row = tokens("    transactions:                        10000  (332.87 per sec.)");
        assert!(TRANSACTIONS.matches(&row));
        assert_eq!("332.87", TRANSACTIONS.extract(&row).unwrap().as_str());
    }

    #[test]
    fn strips_exactly_one_character() {
        let row = tokens("transactions: 10 (123.45)");
        assert_eq!("123.45)", TRANSACTIONS.extract(&row).unwrap().as_str());
    }

    #[test]
    fn strip_counts_characters_not_bytes() {
        let row = tokens("transactions: 10 «12.5");
        assert_eq!("12.5", TRANSACTIONS.extract(&row).unwrap().as_str());
    }

    #[test]
    fn stripping_past_the_end_gives_empty_sample() {
        let row = tokens("transactions: 10 (");
        assert_eq!("", TRANSACTIONS.extract(&row).unwrap().as_str());
    }

    #[test]
    fn label_must_be_first_token() {
        assert!(!TRANSACTIONS.matches(&tokens("total transactions: 10 (1.0")));
        assert!(!TRANSACTIONS.matches(&tokens("transactions 10 (1.0")));
        assert!(!TRANSACTIONS.matches(&[]));
    }

    #[test]
    fn short_line_is_an_error() {
        let row = tokens("transactions: 10");
        assert_eq!(
            Err(RuleError::MissingToken {
                label: "transactions:",
                index: 2,
                found: 2
            }),
            TRANSACTIONS.extract(&row)
        );
    }

    #[test]
    fn disabled_rules_extract_their_columns() {
        let cases = [
            (QUERIES, "queries: 160000 (5325.93 per sec.)", "5325.93"),
            (RECONNECTS, "reconnects: 0 (0.00 per sec.)", "0.00"),
            (LATENCY_MIN, "min: 1.02", "1.02"),
            (LATENCY_AVG, "avg: 2.40", "2.40"),
            (LATENCY_MAX, "max: 31.77", "31.77"),
            (IGNORED_ERRORS, "ignored errors: 3 (0.10 per sec.)", "0.10"),
            (LATENCY_95TH, "95th percentile: 3.68", "3.68"),
        ];
        for (rule, line, expected) in cases.iter() {
            let row = tokens(line);
            assert!(rule.matches(&row), "{} should match {}", rule.label, line);
            assert_eq!(*expected, rule.extract(&row).unwrap().as_str());
        }
    }

    #[test]
    fn default_set_only_has_transactions() {
        let rules = RuleSet::default();
        assert_eq!(&[TRANSACTIONS], rules.rules());
        assert!(rules.find(&tokens("queries: 160000 (5325.93 per sec.)")).is_none());
    }

    #[test]
    fn first_matching_rule_wins() {
        let shadow = ExtractionRule::new("transactions:", 1, 0);
        let rules = RuleSet::empty().with_rule(shadow).with_rule(TRANSACTIONS);
        assert_eq!(Some(&shadow), rules.find(&tokens("transactions: 10 (1.0")));
    }
}
