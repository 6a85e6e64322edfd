//! File selection: glob plus a small predicate filter over file records.
//!
//! A filter is a space-separated list of predicates, implicitly ANDed, each
//! negatable with a leading `-`:
//!
//! ```text
//! tag:project              tag present (frontmatter or inline)
//! property:status          property resolvable
//! property:status=done     property equals a value
//! path:archive             path substring
//! links-to:"My Note"       file links to the named note
//! linked-from:"My Note"    the named note links to the file
//! anything-else            body substring
//! ```
//!
//! Quotes group spaces into one predicate value.

use crate::error::{Result, WrangleError};
use crate::record::FileRecord;
use crate::vault::Vault;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Predicate {
    Tag(String),
    PropertyExists(String),
    PropertyEquals(String, String),
    PathContains(String),
    Content(String),
    LinksTo(String),
    LinkedFrom(String),
    Not(Box<Predicate>),
}

/// A parsed filter expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    predicates: Vec<Predicate>,
}

/// Precomputed link sets for `links-to:` / `linked-from:` predicates, built
/// once per selection.
#[derive(Debug, Default)]
struct LinkSets {
    /// Note name (as written in the filter) → paths of files linking to it.
    links_to: HashMap<String, HashSet<PathBuf>>,
    /// Note name → paths the note links out to.
    linked_from: HashMap<String, HashSet<PathBuf>>,
}

impl Filter {
    pub fn parse(input: &str) -> Result<Self> {
        let mut predicates = Vec::new();
        for token in split_tokens(input) {
            predicates.push(parse_predicate(&token)?);
        }
        Ok(Self { predicates })
    }

    fn link_targets(&self) -> (Vec<&str>, Vec<&str>) {
        let mut to = Vec::new();
        let mut from = Vec::new();
        for pred in &self.predicates {
            collect_link_names(pred, &mut to, &mut from);
        }
        (to, from)
    }

    fn matches(&self, record: &FileRecord, links: &LinkSets) -> bool {
        self.predicates
            .iter()
            .all(|pred| eval(pred, record, links))
    }
}

fn collect_link_names<'p>(pred: &'p Predicate, to: &mut Vec<&'p str>, from: &mut Vec<&'p str>) {
    match pred {
        Predicate::LinksTo(name) => to.push(name),
        Predicate::LinkedFrom(name) => from.push(name),
        Predicate::Not(inner) => collect_link_names(inner, to, from),
        _ => {}
    }
}

fn eval(pred: &Predicate, record: &FileRecord, links: &LinkSets) -> bool {
    match pred {
        Predicate::Tag(name) => {
            let wanted = format!("#{}", name.trim_start_matches('#').to_lowercase());
            record.tags.iter().any(|t| t.to_lowercase() == wanted)
        }
        Predicate::PropertyExists(key) => record.properties.contains_key(key.as_str()),
        Predicate::PropertyEquals(key, value) => record
            .properties
            .get(key.as_str())
            .map(|v| crate::engine::stringify_value(v) == *value)
            .unwrap_or(false),
        Predicate::PathContains(s) => record
            .path
            .to_string_lossy()
            .to_lowercase()
            .contains(&s.to_lowercase()),
        Predicate::Content(s) => record
            .content
            .to_lowercase()
            .contains(&s.to_lowercase()),
        Predicate::LinksTo(name) => links
            .links_to
            .get(name)
            .map(|set| set.contains(&record.path))
            .unwrap_or(false),
        Predicate::LinkedFrom(name) => links
            .linked_from
            .get(name)
            .map(|set| set.contains(&record.path))
            .unwrap_or(false),
        Predicate::Not(inner) => !eval(inner, record, links),
    }
}

/// Split a filter string on whitespace, honoring double quotes.
fn split_tokens(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in input.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn parse_predicate(token: &str) -> Result<Predicate> {
    if let Some(rest) = token.strip_prefix('-') {
        if rest.is_empty() {
            return Err(WrangleError::BadFilter("dangling '-'".to_string()));
        }
        return Ok(Predicate::Not(Box::new(parse_predicate(rest)?)));
    }

    let Some((prefix, value)) = token.split_once(':') else {
        return Ok(Predicate::Content(token.to_string()));
    };

    if value.is_empty() {
        return Err(WrangleError::BadFilter(format!(
            "'{}:' needs a value",
            prefix
        )));
    }

    match prefix {
        "tag" => Ok(Predicate::Tag(value.to_string())),
        "property" => match value.split_once('=') {
            Some((key, expected)) => Ok(Predicate::PropertyEquals(
                key.to_string(),
                expected.to_string(),
            )),
            None => Ok(Predicate::PropertyExists(value.to_string())),
        },
        "path" => Ok(Predicate::PathContains(value.to_string())),
        "content" => Ok(Predicate::Content(value.to_string())),
        "links-to" => Ok(Predicate::LinksTo(value.to_string())),
        "linked-from" => Ok(Predicate::LinkedFrom(value.to_string())),
        other => Err(WrangleError::BadFilter(format!(
            "unknown predicate '{}:'",
            other
        ))),
    }
}

/// Load and filter the records an edit run will operate on.
///
/// Unreadable files are skipped with a warning rather than failing the whole
/// selection.
pub fn select_files(
    vault: &Vault,
    glob: Option<&str>,
    filter: Option<&str>,
) -> Result<Vec<FileRecord>> {
    let filter = filter.map(Filter::parse).transpose()?;

    let paths = match glob {
        Some(pattern) => vault.list_notes_matching(pattern)?,
        None => vault.list_notes()?,
    };

    let mut records = Vec::new();
    for path in paths {
        match vault
            .load_note(&path)
            .and_then(|note| FileRecord::scan(&note))
        {
            Ok(record) => records.push(record),
            Err(e) => eprintln!("Warning: skipping {}: {}", path.display(), e),
        }
    }

    let Some(filter) = filter else {
        return Ok(records);
    };

    let links = build_link_sets(vault, &filter, &records)?;
    Ok(records
        .into_iter()
        .filter(|record| filter.matches(record, &links))
        .collect())
}

fn build_link_sets(vault: &Vault, filter: &Filter, records: &[FileRecord]) -> Result<LinkSets> {
    let (to_names, from_names) = filter.link_targets();
    let mut sets = LinkSets::default();
    if to_names.is_empty() && from_names.is_empty() {
        return Ok(sets);
    }

    // Resolve each distinct link target once across the whole selection.
    let mut cache: HashMap<&str, Option<PathBuf>> = HashMap::new();

    for name in to_names {
        let Some(note_path) = vault.resolve_link_target(name)? else {
            continue;
        };
        let mut linkers = HashSet::new();
        for record in records {
            for target in &record.links {
                let resolved = match cache.get(target.as_str()) {
                    Some(hit) => hit.clone(),
                    None => {
                        let r = vault.resolve_link_target(target)?;
                        cache.insert(target.as_str(), r.clone());
                        r
                    }
                };
                if resolved.as_deref() == Some(note_path.as_path()) {
                    linkers.insert(record.path.clone());
                    break;
                }
            }
        }
        sets.links_to.insert(name.to_string(), linkers);
    }

    for name in from_names {
        let Some(note_path) = vault.resolve_link_target(name)? else {
            continue;
        };
        let note = vault.load_note(&note_path)?;
        let record = FileRecord::scan(&note)?;
        let mut targets = HashSet::new();
        for target in &record.links {
            if let Some(path) = vault.resolve_link_target(target)? {
                targets.insert(path);
            }
        }
        sets.linked_from.insert(name.to_string(), targets);
    }

    Ok(sets)
}
