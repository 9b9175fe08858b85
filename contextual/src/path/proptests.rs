//! Property-based tests for path segmentation.

use super::{join_segs, segs};
use proptest::prelude::*;
use std::path::PathBuf;

fn path_component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_ -]{1,20}"
}

fn absolute_path_strategy() -> impl Strategy<Value = PathBuf> {
    prop::collection::vec(path_component_strategy(), 0..8).prop_map(|parts| {
        let mut path = PathBuf::from("/");
        for part in parts {
            path.push(part);
        }
        path
    })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Segmenting then joining gives back the path
    #[test]
    fn segs_join_roundtrip(path in absolute_path_strategy()) {
        prop_assert_eq!(join_segs(&segs(&path)), path);
    }

    // Every proper ancestor is a prefix of the segments
    #[test]
    fn ancestors_are_prefixes(path in absolute_path_strategy()) {
        let segments = segs(&path);
        for ancestor in path.ancestors() {
            let ancestor_segs = segs(ancestor);
            prop_assert!(segments.starts_with(&ancestor_segs));
        }
    }

    // No segment is empty or contains a separator
    #[test]
    fn segments_are_single_components(path in absolute_path_strategy()) {
        for seg in segs(&path) {
            prop_assert!(!seg.is_empty());
            prop_assert!(!seg.contains('/'));
        }
    }
}
