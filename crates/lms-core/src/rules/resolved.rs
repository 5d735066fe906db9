use std::path::{Path, PathBuf};

use crate::config::UpdateType;
use crate::matcher::PatternMatcher;

/// One compiled rule. Rules are tried in order and the first whose
/// matchers both accept wins; an absent matcher accepts anything.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedExtractionRule {
    pub category_matcher: Option<PatternMatcher>,
    pub entry_matcher: Option<PatternMatcher>,
    /// Matching archive items are skipped
    pub ignore: bool,
    pub directory: PathBuf,
    pub update_type: UpdateType,
}

impl ResolvedExtractionRule {
    /// A rule accepting every category and entry.
    pub fn new(directory: impl Into<PathBuf>, update_type: UpdateType) -> Self {
        Self {
            category_matcher: None,
            entry_matcher: None,
            ignore: false,
            directory: directory.into(),
            update_type,
        }
    }

    pub fn for_category(mut self, matcher: PatternMatcher) -> Self {
        self.category_matcher = Some(matcher);
        self
    }

    pub fn for_entry(mut self, matcher: PatternMatcher) -> Self {
        self.entry_matcher = Some(matcher);
        self
    }

    pub fn ignored(mut self) -> Self {
        self.ignore = true;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Whether both matchers accept the given names.
    pub fn accepts(&self, category: &str, entry: &str) -> bool {
        self.category_matcher
            .as_ref()
            .is_none_or(|m| m.matches(category))
            && self.entry_matcher.as_ref().is_none_or(|m| m.matches(entry))
    }

    /// First rule in `rules` accepting `(category, entry)`.
    pub fn first_match<'a>(rules: &'a [Self], category: &str, entry: &str) -> Option<&'a Self> {
        rules.iter().find(|rule| rule.accepts(category, entry))
    }
}
