//! Prompt validation rules, visibility, and listing sort options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/* --------------------------------------------------------------------------
   Validation limits
   -------------------------------------------------------------------------- */

/// Maximum length of a prompt title, in characters.
pub const MAX_TITLE_LEN: usize = 128;

/// Maximum length of a prompt description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 512;

/// Maximum length of prompt content, in characters.
pub const MAX_CONTENT_LEN: usize = 50_000;

/* --------------------------------------------------------------------------
   Visibility
   -------------------------------------------------------------------------- */

/// Who may see a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

impl Visibility {
    /// The value stored in the `prompts.visibility` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            other => Err(CoreError::Validation(format!(
                "Invalid visibility '{other}'. Must be one of: public, private"
            ))),
        }
    }
}

/* --------------------------------------------------------------------------
   Sorting
   -------------------------------------------------------------------------- */

/// Column a prompt listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
    VoteCount,
}

impl PromptSortField {
    /// Fully-qualified column name, safe to interpolate into SQL.
    pub fn column(self) -> &'static str {
        match self {
            PromptSortField::CreatedAt => "p.created_at",
            PromptSortField::UpdatedAt => "p.updated_at",
            PromptSortField::Title => "p.title",
            PromptSortField::VoteCount => "p.vote_count",
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// SQL keyword for this direction.
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/* --------------------------------------------------------------------------
   Validation functions
   -------------------------------------------------------------------------- */

/// Validate a title and return it trimmed.
pub fn validate_title(title: &str) -> Result<String, CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("Title must not be empty".to_string()));
    }
    let len = trimmed.chars().count();
    if len > MAX_TITLE_LEN {
        return Err(CoreError::Validation(format!(
            "Title too long: {len} chars (max {MAX_TITLE_LEN})"
        )));
    }
    Ok(trimmed.to_string())
}

/// Normalize an optional description.
///
/// Whitespace-only input becomes `None`; anything else is trimmed and
/// length-checked.
pub fn normalize_description(description: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(trimmed) = description.map(str::trim).filter(|d| !d.is_empty()) else {
        return Ok(None);
    };
    let len = trimmed.chars().count();
    if len > MAX_DESCRIPTION_LEN {
        return Err(CoreError::Validation(format!(
            "Description too long: {len} chars (max {MAX_DESCRIPTION_LEN})"
        )));
    }
    Ok(Some(trimmed.to_string()))
}

/// Validate prompt content. Content is stored verbatim, so it is not trimmed.
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation(
            "Content must not be empty".to_string(),
        ));
    }
    let len = content.chars().count();
    if len > MAX_CONTENT_LEN {
        return Err(CoreError::Validation(format!(
            "Content too long: {len} chars (max {MAX_CONTENT_LEN})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn title_is_trimmed() {
        assert_eq!(validate_title("  Hello  ").unwrap(), "Hello");
    }

    #[test]
    fn blank_title_rejected() {
        assert_matches!(validate_title("   "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        let title = "é".repeat(MAX_TITLE_LEN);
        assert!(validate_title(&title).is_ok());
        let too_long = "a".repeat(MAX_TITLE_LEN + 1);
        assert_matches!(validate_title(&too_long), Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_description_becomes_none() {
        assert_eq!(normalize_description(None).unwrap(), None);
        assert_eq!(normalize_description(Some("")).unwrap(), None);
        assert_eq!(normalize_description(Some("  \n ")).unwrap(), None);
        assert_eq!(
            normalize_description(Some(" useful ")).unwrap(),
            Some("useful".to_string())
        );
    }

    #[test]
    fn long_description_rejected() {
        let desc = "d".repeat(MAX_DESCRIPTION_LEN + 1);
        assert_matches!(
            normalize_description(Some(&desc)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn content_rules() {
        assert!(validate_content("Write a haiku").is_ok());
        assert_matches!(validate_content(" "), Err(CoreError::Validation(_)));
        let huge = "x".repeat(MAX_CONTENT_LEN + 1);
        assert_matches!(validate_content(&huge), Err(CoreError::Validation(_)));
    }

    #[test]
    fn visibility_round_trips_through_column_value() {
        for v in [Visibility::Public, Visibility::Private] {
            assert_eq!(v.as_str().parse::<Visibility>().unwrap(), v);
        }
        assert!("PUBLIC".parse::<Visibility>().is_err());
    }

    #[test]
    fn sort_defaults_to_newest_first() {
        assert_eq!(PromptSortField::default().column(), "p.created_at");
        assert_eq!(SortOrder::default().keyword(), "DESC");
    }
}
