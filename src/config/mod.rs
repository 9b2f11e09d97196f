//! Link-budget configuration.
//!
//! Every link-producing call site gates on a maximum final URL length:
//! the check runs after encoding completes (compressed size is not
//! predictable up front) and reports a distinct "too large" condition
//! instead of truncating. Budgets are configurable per content category
//! from TOML files and environment variables.

use serde::{Deserialize, Serialize};

use crate::error::{Result, UrlPackError};
use crate::recovery::ContentType;

/// Environment variable overriding the default budget.
const ENV_DEFAULT_BUDGET: &str = "URLPACK_MAX_URL_LEN";

/// Content categories with independently configurable budgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkCategory {
    /// HTML documents.
    Html,
    /// Markdown documents.
    Markdown,
    /// CSV tables.
    Csv,
    /// Spreadsheets.
    Xlsx,
    /// Images.
    Image,
    /// PDFs.
    Pdf,
    /// Video clips.
    Video,
    /// Audio clips.
    Audio,
    /// Word/PowerPoint office documents.
    Office,
    /// Chat transcripts.
    Chat,
}

impl LinkCategory {
    /// Category for a recovered content type.
    pub fn for_content_type(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Html => LinkCategory::Html,
            ContentType::Md | ContentType::Txt => LinkCategory::Markdown,
            ContentType::Csv => LinkCategory::Csv,
            ContentType::Xlsx | ContentType::Xls => LinkCategory::Xlsx,
            ContentType::Image => LinkCategory::Image,
            ContentType::Pdf => LinkCategory::Pdf,
            ContentType::Video => LinkCategory::Video,
            ContentType::Audio => LinkCategory::Audio,
            ContentType::Docx | ContentType::Doc | ContentType::Pptx | ContentType::Ppt => {
                LinkCategory::Office
            }
            ContentType::Chat => LinkCategory::Chat,
        }
    }
}

/// Per-category maximum-URL-length budgets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkLimits {
    /// Budget used when no category override is set.
    pub default_max_len: usize,

    /// Category overrides; absent categories use the default.
    #[serde(default)]
    pub overrides: std::collections::HashMap<LinkCategory, usize>,
}

impl Default for LinkLimits {
    fn default() -> Self {
        Self {
            // Conservative cross-browser fragment budget
            default_max_len: 8192,
            overrides: std::collections::HashMap::new(),
        }
    }
}

impl LinkLimits {
    /// Load limits from a TOML file.
    pub fn from_file(path: impl Into<std::path::PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| UrlPackError::Config(format!("Failed to read config file: {e}")))?;
        Ok(toml::from_str(&content)?)
    }

    /// Load limits from environment variables.
    ///
    /// `URLPACK_MAX_URL_LEN` overrides the default budget;
    /// `URLPACK_MAX_URL_LEN_<CATEGORY>` (e.g. `..._IMAGE`) overrides a
    /// single category.
    pub fn from_env() -> Self {
        let mut limits = Self::default();

        if let Ok(val) = std::env::var(ENV_DEFAULT_BUDGET) {
            if let Ok(val) = val.parse() {
                limits.default_max_len = val;
            }
        }

        for (category, suffix) in [
            (LinkCategory::Html, "HTML"),
            (LinkCategory::Markdown, "MARKDOWN"),
            (LinkCategory::Csv, "CSV"),
            (LinkCategory::Xlsx, "XLSX"),
            (LinkCategory::Image, "IMAGE"),
            (LinkCategory::Pdf, "PDF"),
            (LinkCategory::Video, "VIDEO"),
            (LinkCategory::Audio, "AUDIO"),
            (LinkCategory::Office, "OFFICE"),
            (LinkCategory::Chat, "CHAT"),
        ] {
            if let Ok(val) = std::env::var(format!("{ENV_DEFAULT_BUDGET}_{suffix}")) {
                if let Ok(val) = val.parse() {
                    limits.overrides.insert(category, val);
                }
            }
        }

        limits
    }

    /// Merge with another set of limits (other takes precedence).
    pub fn merge(self, other: Self) -> Self {
        let mut overrides = self.overrides;
        overrides.extend(other.overrides);
        Self {
            default_max_len: if other.default_max_len != Self::default().default_max_len {
                other.default_max_len
            } else {
                self.default_max_len
            },
            overrides,
        }
    }

    /// Effective budget for a category.
    pub fn max_len_for(&self, category: LinkCategory) -> usize {
        self.overrides
            .get(&category)
            .copied()
            .unwrap_or(self.default_max_len)
    }

    /// Gate a finished URL against the category budget.
    ///
    /// A URL exactly at the budget passes; one character over fails with
    /// [`UrlPackError::TooLarge`].
    pub fn check(&self, category: LinkCategory, url: &str) -> Result<()> {
        let max = self.max_len_for(category);
        if url.len() > max {
            return Err(UrlPackError::TooLarge {
                size: url.len(),
                max,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_boundary_is_inclusive() {
        let limits = LinkLimits {
            default_max_len: 10,
            ..Default::default()
        };
        assert!(limits.check(LinkCategory::Html, &"x".repeat(10)).is_ok());
        let err = limits.check(LinkCategory::Html, &"x".repeat(11)).unwrap_err();
        assert!(matches!(err, UrlPackError::TooLarge { size: 11, max: 10 }));
    }

    #[test]
    fn test_category_override() {
        let mut limits = LinkLimits::default();
        limits.overrides.insert(LinkCategory::Image, 100);
        assert_eq!(limits.max_len_for(LinkCategory::Image), 100);
        assert_eq!(limits.max_len_for(LinkCategory::Html), 8192);
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "default_max_len = 4000\n\n[overrides]\nimage = 12000\npdf = 16000"
        )
        .unwrap();

        let limits = LinkLimits::from_file(file.path()).unwrap();
        assert_eq!(limits.default_max_len, 4000);
        assert_eq!(limits.max_len_for(LinkCategory::Image), 12000);
        assert_eq!(limits.max_len_for(LinkCategory::Pdf), 16000);
        assert_eq!(limits.max_len_for(LinkCategory::Csv), 4000);
    }

    #[test]
    fn test_merge_prefers_other() {
        let mut base = LinkLimits::default();
        base.overrides.insert(LinkCategory::Image, 100);
        let mut other = LinkLimits::default();
        other.default_max_len = 2000;
        other.overrides.insert(LinkCategory::Pdf, 300);

        let merged = base.merge(other);
        assert_eq!(merged.default_max_len, 2000);
        assert_eq!(merged.max_len_for(LinkCategory::Image), 100);
        assert_eq!(merged.max_len_for(LinkCategory::Pdf), 300);
    }

    #[test]
    fn test_category_mapping() {
        assert_eq!(
            LinkCategory::for_content_type(ContentType::Docx),
            LinkCategory::Office
        );
        assert_eq!(
            LinkCategory::for_content_type(ContentType::Chat),
            LinkCategory::Chat
        );
    }
}
