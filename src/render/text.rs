//! Plain-text renderer for terminals.

use crate::index::SearchHit;
use crate::render::{RenderOptions, Renderer};

pub struct TextRenderer {
    pub opts: RenderOptions,
}

impl Renderer for TextRenderer {
    fn render(&self, hits: &[SearchHit<'_>], query: &str) -> String {
        if hits.is_empty() {
            return format!("no results for \"{}\"\n", query.trim());
        }

        let mut out = String::new();
        for hit in hits {
            let entry = hit.entry;
            out.push_str(&format!("[{}] {}\n", entry.category, entry.title));
            out.push_str(&format!("  {}\n", entry.url(&self.opts.base_url)));
            if let Some(snippet) = self.opts.snippet(hit, query) {
                out.push_str(&format!("  {}\n", snippet));
            }
        }
        out
    }
}
