//! Thesaurus rules and their CSV form.

use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;

use annot_core::entities::ThesaurusRule;

use crate::error::VocabError;

/// Validated set of thesaurus rules with lookup indexes.
///
/// Renames are looked up once per cell. A rename target that is itself
/// renamed is kept as written; the second rule only applies on a later pass.
/// Synonyms of a rule that also renames are attached to the rename target,
/// which is what the cell holds by the time synonyms are expanded.
#[derive(Debug, Clone, Default)]
pub struct Thesaurus {
    rules: Vec<ThesaurusRule>,
    renames: HashMap<String, String>,
    synonyms: HashMap<String, Vec<String>>,
}

impl Thesaurus {
    pub fn new(rules: Vec<ThesaurusRule>) -> Result<Self, VocabError> {
        let mut renames: HashMap<String, String> = HashMap::new();
        let mut synonyms: HashMap<String, Vec<String>> = HashMap::new();

        for rule in &rules {
            if let Some(target) = &rule.change_to {
                if renames
                    .insert(rule.original_term.clone(), target.clone())
                    .is_some()
                {
                    return Err(VocabError::DuplicateRename {
                        term: rule.original_term.clone(),
                    });
                }
            }
        }

        let chained = renames
            .iter()
            .filter(|(term, target)| term != target && renames.contains_key(*target))
            .count();
        if chained > 0 {
            tracing::debug!(chained, "thesaurus has rename targets that are renamed again");
        }

        for rule in &rules {
            let Some(list) = &rule.synonyms else {
                continue;
            };
            let key = rule
                .change_to
                .clone()
                .unwrap_or_else(|| rule.original_term.clone());
            let merged = synonyms.entry(key.clone()).or_default();
            for synonym in list {
                if synonym != &key && !merged.contains(synonym) {
                    merged.push(synonym.clone());
                }
            }
        }

        Ok(Self {
            rules,
            renames,
            synonyms,
        })
    }

    /// Read rules from CSV with `original`, `change_to` and `synonyms` columns.
    ///
    /// Empty cells mean "no rename" / "no synonyms". The synonyms cell is
    /// itself comma-separated.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, VocabError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let idx = |name: &str| -> Result<usize, VocabError> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| VocabError::MissingColumn(name.to_string()))
        };
        let original_idx = idx("original")?;
        let change_to_idx = idx("change_to")?;
        let synonyms_idx = idx("synonyms")?;

        let mut rules = Vec::new();
        for record in reader.records() {
            let record = record?;
            let original = record.get(original_idx).unwrap_or("");
            if original.is_empty() {
                continue;
            }
            let change_to = record
                .get(change_to_idx)
                .filter(|v| !v.is_empty())
                .map(ToString::to_string);
            let synonyms = record
                .get(synonyms_idx)
                .filter(|v| !v.is_empty())
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(ToString::to_string)
                        .collect()
                });
            rules.push(ThesaurusRule {
                original_term: original.to_string(),
                change_to,
                synonyms,
            });
        }

        tracing::debug!(rules = rules.len(), "loaded thesaurus");
        Self::new(rules)
    }

    pub fn from_path(path: &Path) -> Result<Self, VocabError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    #[must_use]
    pub fn rules(&self) -> &[ThesaurusRule] {
        &self.rules
    }

    /// Canonical replacement for `term`, if a rule renames it.
    #[must_use]
    pub fn rename_of(&self, term: &str) -> Option<&str> {
        self.renames.get(term).map(String::as_str)
    }

    /// Synonyms attached to `term`, in rule order.
    #[must_use]
    pub fn synonyms_of(&self, term: &str) -> Option<&[String]> {
        self.synonyms.get(term).map(Vec::as_slice)
    }

    /// Every term the thesaurus mentions: originals, rename targets, synonyms.
    #[must_use]
    pub fn known_terms(&self) -> HashSet<&str> {
        let mut terms = HashSet::new();
        for rule in &self.rules {
            terms.insert(rule.original_term.as_str());
            if let Some(target) = &rule.change_to {
                terms.insert(target.as_str());
            }
            if let Some(list) = &rule.synonyms {
                terms.extend(list.iter().map(String::as_str));
            }
        }
        terms
    }
}
