use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One thesaurus row: rename `original_term`, attach synonyms to it, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ThesaurusRule {
    pub original_term: String,
    pub change_to: Option<String>,
    pub synonyms: Option<Vec<String>>,
}

impl ThesaurusRule {
    #[must_use]
    pub fn rename(original_term: impl Into<String>, change_to: impl Into<String>) -> Self {
        Self {
            original_term: original_term.into(),
            change_to: Some(change_to.into()),
            synonyms: None,
        }
    }

    #[must_use]
    pub fn synonyms<I, S>(original_term: impl Into<String>, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            original_term: original_term.into(),
            change_to: None,
            synonyms: Some(synonyms.into_iter().map(Into::into).collect()),
        }
    }
}
