//! One compiler over the four config types

use std::path::{Path, PathBuf};

use lms_fs::sanitize_filename;
use tracing::{debug, warn};

use super::filter::{RemoteFilter, SelectionBuilder};
use super::resolved::ResolvedExtractionRule;
use crate::catalog::{CatalogCategory, RemoteCatalog};
use crate::config::{CategoryRule, ConfigType, CourseConfig, EntryRule, UpdateType};
use crate::matcher::PatternMatcher;

/// The output of [`compile_rules`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledRules {
    /// Entries to request from the remote site
    pub filter: RemoteFilter,
    /// Extraction rules, first match wins
    pub rules: Vec<ResolvedExtractionRule>,
}

/// Compile a course config against its remote catalog.
///
/// `destination_base` is the course's resolved destination directory (see
/// [`CourseConfig::destination_for`]).
pub fn compile_rules(
    course: &CourseConfig,
    catalog: &RemoteCatalog,
    destination_base: &Path,
) -> CompiledRules {
    let compiled = match course.config_type() {
        ConfigType::CategoryAuto => compile_auto(course, catalog, destination_base, true),
        ConfigType::EntryAuto => compile_auto(course, catalog, destination_base, false),
        ConfigType::CategoryManual => compile_category_manual(course, catalog, destination_base),
        ConfigType::EntryManual => compile_entry_manual(course, catalog, destination_base),
    };
    debug!(
        course = %course.title_matcher(),
        config_type = %course.config_type(),
        rules = compiled.rules.len(),
        "Compiled extraction rules"
    );
    compiled
}

/// Accepts the entry title as a directory segment, or as a bare file
/// named after the entry with one extension.
fn entry_title_matcher(title: &str) -> PatternMatcher {
    PatternMatcher::regex(format!(r"^{}(\.[^./]+)?$", regex::escape(title)))
        .unwrap_or_else(|_| PatternMatcher::literal(title))
}

fn category_dir(base: &Path, category: &CatalogCategory) -> PathBuf {
    base.join(sanitize_filename(&category.title, false))
}

fn compile_auto(
    course: &CourseConfig,
    catalog: &RemoteCatalog,
    base: &Path,
    split_categories: bool,
) -> CompiledRules {
    let rules = catalog
        .categories
        .iter()
        .map(|category| {
            let directory = if split_categories {
                category_dir(base, category)
            } else {
                base.to_path_buf()
            };
            ResolvedExtractionRule::new(directory, course.update_type())
                .for_category(PatternMatcher::literal(category.title.as_str()))
        })
        .collect();

    CompiledRules {
        filter: RemoteFilter::all(),
        rules,
    }
}

fn compile_category_manual(
    course: &CourseConfig,
    catalog: &RemoteCatalog,
    base: &Path,
) -> CompiledRules {
    let mut selection = SelectionBuilder::new();
    let mut rules = Vec::new();

    for category in &catalog.categories {
        let Some(category_rule) = first_category_rule(course.categories(), &category.title) else {
            debug!(category = %category.title, "No category rule matched, dropping category");
            continue;
        };

        let directory = match &category_rule.destination {
            Some(destination) => base.join(destination),
            None => category_dir(base, category),
        };
        let category_update = category_rule.update_type.unwrap_or(course.update_type());
        let category_matcher = PatternMatcher::literal(category.title.as_str());

        for entry in &category.entries {
            let Some((_, entry_rule)) = first_entry_rule(course.entries(), &entry.title) else {
                selection.keep(category, entry);
                continue;
            };

            let rule = ResolvedExtractionRule::new(
                entry_rule
                    .directory
                    .as_ref()
                    .map_or_else(|| directory.clone(), |d| directory.join(d)),
                resolve_update(entry_rule.update_type, Some(category_update), course),
            )
            .for_category(category_matcher.clone())
            .for_entry(entry_title_matcher(&entry.title));

            if entry_rule.ignore {
                debug!(category = %category.title, entry = %entry.title, "Entry ignored by rule");
                rules.push(rule.ignored());
            } else {
                selection.keep(category, entry);
                rules.push(rule);
            }
        }

        rules.push(
            ResolvedExtractionRule::new(directory, category_update).for_category(category_matcher),
        );
    }

    CompiledRules {
        filter: selection.build(),
        rules,
    }
}

fn compile_entry_manual(
    course: &CourseConfig,
    catalog: &RemoteCatalog,
    base: &Path,
) -> CompiledRules {
    let mut selection = SelectionBuilder::new();
    for category in &catalog.categories {
        for entry in &category.entries {
            if let Some((_, rule)) = first_entry_rule(course.entries(), &entry.title) {
                if !rule.ignore {
                    selection.keep(category, entry);
                }
            }
        }
    }

    let rules = course
        .entries()
        .iter()
        .map(|entry_rule| {
            let directory = entry_rule
                .directory
                .as_ref()
                .map_or_else(|| base.to_path_buf(), |d| base.join(d));
            let rule = ResolvedExtractionRule::new(
                directory,
                resolve_update(entry_rule.update_type, None, course),
            )
            .for_entry(entry_rule.name_matcher.clone());
            if entry_rule.ignore { rule.ignored() } else { rule }
        })
        .collect();

    CompiledRules {
        filter: selection.build(),
        rules,
    }
}

fn resolve_update(
    entry: Option<UpdateType>,
    category: Option<UpdateType>,
    course: &CourseConfig,
) -> UpdateType {
    entry.or(category).unwrap_or(course.update_type())
}

fn first_category_rule<'a>(rules: &'a [CategoryRule], title: &str) -> Option<&'a CategoryRule> {
    rules.iter().find(|rule| rule.title_matcher.matches(title))
}

/// First entry rule accepting `title`, warning when later rules would
/// have accepted it too.
fn first_entry_rule<'a>(rules: &'a [EntryRule], title: &str) -> Option<(usize, &'a EntryRule)> {
    let mut matching = rules.iter().enumerate().filter(|(_, rule)| rule.matches(title));
    let first = matching.next()?;
    let shadowed: Vec<usize> = matching.map(|(index, _)| index).collect();
    if !shadowed.is_empty() {
        warn!(
            entry = %title,
            winner = first.0,
            shadowed = ?shadowed,
            "Entry matched by more than one entry rule, using the first"
        );
    }
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_title_matcher_accepts_bare_files() {
        let matcher = entry_title_matcher("Blatt (1)");
        assert!(matcher.matches("Blatt (1)"));
        assert!(matcher.matches("Blatt (1).pdf"));
        assert!(!matcher.matches("Blatt (1).tar.gz"));
        assert!(!matcher.matches("Blatt (10).pdf"));
        assert!(!matcher.matches("Blatt 1.pdf"));
    }
}
