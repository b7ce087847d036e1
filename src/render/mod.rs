//! Renderer module — trait-based format dispatch for search results.

pub mod json;
pub mod markdown;
pub mod text;

use crate::index::{MatchKind, SearchHit};
use crate::snippet;
use anyhow::{anyhow, Result};

/// Trait for rendering ranked hits into a specific output format.
pub trait Renderer {
    fn render(&self, hits: &[SearchHit<'_>], query: &str) -> String;
}

/// Settings shared by every renderer.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Prepended to entry locations when building links.
    pub base_url: String,
    /// Snippet width in characters. 0 disables snippets.
    pub width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            base_url: String::new(),
            width: 80,
        }
    }
}

impl RenderOptions {
    /// Excerpt to show under a hit: around the match for body hits, the
    /// opening line otherwise.
    pub fn snippet(&self, hit: &SearchHit<'_>, query: &str) -> Option<String> {
        if self.width == 0 {
            return None;
        }
        match hit.kind {
            MatchKind::Text => snippet::excerpt(&hit.entry.text, query, self.width),
            _ => snippet::first_line(&hit.entry.text, self.width),
        }
    }
}

/// Create a renderer for the given format name.
pub fn create_renderer(format: &str, opts: RenderOptions) -> Result<Box<dyn Renderer>> {
    match format {
        "text" | "txt" => Ok(Box::new(text::TextRenderer { opts })),
        "markdown" | "md" => Ok(Box::new(markdown::MarkdownRenderer { opts })),
        "json" => Ok(Box::new(json::JsonRenderer { opts })),
        _ => Err(anyhow!(
            "unknown format: {}. Use text, markdown, or json",
            format
        )),
    }
}
