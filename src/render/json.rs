//! JSON renderer — structured output for tooling integration.
//!
//! Each hit carries the full entry plus its rank tier and resolved URL.

use crate::index::SearchHit;
use crate::render::{RenderOptions, Renderer};
use serde_json::{json, Value};

pub struct JsonRenderer {
    pub opts: RenderOptions,
}

impl Renderer for JsonRenderer {
    fn render(&self, hits: &[SearchHit<'_>], _query: &str) -> String {
        let items: Vec<Value> = hits
            .iter()
            .map(|hit| {
                let e = hit.entry;
                json!({
                    "location": e.location,
                    "page": e.page,
                    "title": e.title,
                    "category": e.category,
                    "text": e.text,
                    "rank": hit.kind.as_str(),
                    "url": e.url(&self.opts.base_url),
                })
            })
            .collect();
        format!("{:#}\n", Value::Array(items))
    }
}
