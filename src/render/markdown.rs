//! Markdown renderer — a linked result list that can be pasted into issues
//! or chat.

use crate::index::SearchHit;
use crate::render::{RenderOptions, Renderer};

pub struct MarkdownRenderer {
    pub opts: RenderOptions,
}

impl Renderer for MarkdownRenderer {
    fn render(&self, hits: &[SearchHit<'_>], query: &str) -> String {
        let mut out = format!("## Results for \"{}\"\n\n", query.trim());
        if hits.is_empty() {
            out.push_str("_No results._\n");
            return out;
        }

        for hit in hits {
            let entry = hit.entry;
            out.push_str(&format!(
                "* [{}]({}) _{}_\n",
                escape_link_text(&entry.title),
                entry.url(&self.opts.base_url).replace(' ', "%20"),
                entry.category
            ));
            if let Some(snippet) = self.opts.snippet(hit, query) {
                out.push_str(&format!("  > {}\n", snippet));
            }
        }
        out
    }
}

/// Escape characters that would end or nest the link text.
fn escape_link_text(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('[', "\\[")
        .replace(']', "\\]")
}
