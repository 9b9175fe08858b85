//! Property-based tests for rule parsing.

use super::{parse_line, RuleSet};
use crate::landmark::{CheckRegistry, Wildcard};
use proptest::prelude::*;

fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_]{1,12}"
}

fn wildcard_strategy() -> impl Strategy<Value = (Wildcard, &'static str)> {
    prop_oneof![
        Just((Wildcard::Exact, "")),
        Just((Wildcard::One, "/*")),
        Just((Wildcard::Recursive, "/**")),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 1000,
        .. ProptestConfig::default()
    })]

    // Arbitrary lines are either rules, skipped, or blank; never a panic
    #[test]
    fn parse_never_panics(text in "\\PC{0,80}") {
        let rules = RuleSet::parse(&text);
        prop_assert!(rules.len() + rules.skipped().len() <= 1);
    }

    // The pattern, wildcard and context of a well-formed line survive parsing
    #[test]
    fn pattern_and_context_preserved(
        parts in prop::collection::vec(segment_strategy(), 1..6),
        (wildcard, suffix) in wildcard_strategy(),
        context in "[A-Z_]{1,8}=[a-z0-9/{}]{0,16}",
    ) {
        let line = format!("/{}{suffix} where -d .git := {context}", parts.join("/"));
        let rule = parse_line(&line, CheckRegistry::builtin()).unwrap().unwrap();

        prop_assert_eq!(rule.prefix(), &parts[..]);
        prop_assert_eq!(rule.wildcard(), wildcard);
        prop_assert_eq!(rule.context().as_str(), context.as_str());
        prop_assert_eq!(rule.source(), line.as_str());
    }
}
