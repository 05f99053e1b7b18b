//! Property tests comparing the optimised matchers with a naive glob.

use filters::{CompiledPattern, FilterOptions, match_basename};
use proptest::prelude::*;
use std::path::Path;

/// Reference matcher for patterns built only from literals and `*`.
fn naive_glob(pattern: &[u8], text: &[u8]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some((b'*', rest)) => (0..=text.len()).any(|skip| naive_glob(rest, &text[skip..])),
        Some((&byte, rest)) => text.first() == Some(&byte) && naive_glob(rest, &text[1..]),
    }
}

fn literal() -> impl Strategy<Value = String> {
    "[a-z.]{0,6}"
}

proptest! {
    #[test]
    fn suffix_fast_path_agrees_with_glob(suffix in literal(), name in "[a-z.]{0,10}") {
        let raw = format!("*{suffix}");
        let pattern = CompiledPattern::compile(&raw);
        prop_assert!(pattern.ends_with_literal());
        prop_assert_eq!(
            match_basename(name.as_bytes(), &pattern),
            naive_glob(raw.as_bytes(), name.as_bytes())
        );
    }

    #[test]
    fn star_patterns_agree_with_glob(raw in "[ab*]{0,6}", name in "[ab]{0,8}") {
        let pattern = CompiledPattern::compile(&raw);
        prop_assert_eq!(
            match_basename(name.as_bytes(), &pattern),
            naive_glob(raw.as_bytes(), name.as_bytes())
        );
    }

    #[test]
    fn basename_decision_is_depth_independent(
        name in "[a-z]{1,8}",
        depth in prop::collection::vec("[a-z]{1,4}", 0..4),
    ) {
        let options = FilterOptions::new()
            .with_except([name.as_str()])
            .with_base_path("/base");

        let mut path = String::from("/base");
        for component in &depth {
            path.push('/');
            path.push_str(component);
        }
        path.push('/');
        path.push_str(&name);

        prop_assert!(!options.should_include(Path::new(&path), false));
    }

    #[test]
    fn original_text_round_trips(
        negated in any::<bool>(),
        body in "/?[a-z*?]{1,6}(/[a-z*]{1,4})?",
        dir_only in any::<bool>(),
    ) {
        let mut raw = String::new();
        if negated {
            raw.push('!');
        }
        raw.push_str(&body);
        if dir_only {
            raw.push('/');
        }
        prop_assert_eq!(CompiledPattern::compile(&raw).original(), raw);
    }
}
