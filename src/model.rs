//! Data model for a loaded search index.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of documentable unit an entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Section,
    Page,
    Type,
    Method,
    Function,
    Macro,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Section,
        Category::Page,
        Category::Type,
        Category::Method,
        Category::Function,
        Category::Macro,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Section => "section",
            Category::Page => "page",
            Category::Type => "type",
            Category::Method => "method",
            Category::Function => "function",
            Category::Macro => "macro",
        }
    }

    /// Docstring entries, as opposed to prose pages and their section headers.
    pub fn is_symbol(self) -> bool {
        !matches!(self, Category::Section | Category::Page)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A category name outside the fixed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category \"{0}\" (expected one of: section, page, type, method, function, macro)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// One indexed documentation unit: a page paragraph, a section header or a
/// symbol's docstring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocEntry {
    /// Page path plus optional `#fragment`, e.g. `api.html#ChainRulesTestUtils.test_rrule-Tuple`.
    pub location: String,
    pub page: String,
    pub title: String,
    /// Rendered plain text; empty for bare section headers.
    pub text: String,
    pub category: Category,
}

impl DocEntry {
    /// Location without the fragment.
    pub fn path(&self) -> &str {
        match self.location.split_once('#') {
            Some((path, _)) => path,
            None => &self.location,
        }
    }

    pub fn anchor(&self) -> Option<&str> {
        self.location.split_once('#').map(|(_, anchor)| anchor)
    }

    /// Join the location onto a site base URL.
    pub fn url(&self, base: &str) -> String {
        if base.is_empty() {
            return self.location.clone();
        }
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            self.location.trim_start_matches('/')
        )
    }
}

/// Entries sharing one `page`, in index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageGroup<'a> {
    pub page: &'a str,
    pub entries: Vec<&'a DocEntry>,
}
