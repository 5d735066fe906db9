use lms_core::PatternMatcher;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_literal_iff_equal(p in "\\PC{0,12}", t in "\\PC{0,12}") {
        let m = PatternMatcher::literal(p.clone());
        prop_assert_eq!(m.matches(&t), t == p);
        prop_assert!(m.matches(&p));
    }

    #[test]
    fn test_contains_iff_substring(p in "[a-c]{0,3}", t in "[a-c]{0,8}") {
        let m = PatternMatcher::contains(p.clone());
        prop_assert_eq!(m.matches(&t), t.contains(p.as_str()));
    }

    #[test]
    fn test_contains_accepts_any_wrapping(p in "\\PC{0,8}", pre in "\\PC{0,4}", post in "\\PC{0,4}") {
        let m = PatternMatcher::contains(p.clone());
        let wrapped = format!("{pre}{p}{post}");
        prop_assert!(m.matches(&wrapped));
    }

    #[test]
    fn test_escaped_regex_behaves_like_contains(p in "\\PC{0,8}", t in "\\PC{0,16}") {
        let re = PatternMatcher::regex(regex::escape(&p)).unwrap();
        let contains = PatternMatcher::contains(p.clone());
        prop_assert_eq!(re.matches(&t), contains.matches(&t));
    }
}
