//! The in-memory index and its keyword search.
//!
//! Ranking is tiered by where the query hit (see [`MatchKind`]). Within a
//! tier, entries keep their index order, so results are deterministic and the
//! generator's page ordering still shows through.

use crate::error::{IndexError, Result};
use crate::model::{Category, DocEntry, PageGroup};
use crate::snippet::fold_str;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Where a query matched an entry. Ordered best-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchKind {
    /// Title equals the query, or its last `.`-separated segment does.
    ExactTitle,
    /// Title contains the whole query.
    Title,
    /// Every query word appears in the title, not necessarily adjacent.
    TitleTokens,
    /// Matched only through the body text (possibly mixed with the title).
    Text,
}

impl MatchKind {
    /// Short label used in JSON output.
    pub fn as_str(self) -> &'static str {
        match self {
            MatchKind::ExactTitle => "exact",
            MatchKind::Title => "title",
            MatchKind::TitleTokens => "title-words",
            MatchKind::Text => "text",
        }
    }
}

/// One ranked result of [`DocIndex::search_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub entry: &'a DocEntry,
    pub kind: MatchKind,
    /// Position of the entry in the loaded index.
    pub position: usize,
}

/// Narrowing applied on top of ranking.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Only keep these categories. Empty keeps all.
    pub categories: Vec<Category>,
    /// Only keep entries of this page.
    pub page: Option<String>,
    pub limit: Option<usize>,
}

/// Case-folded copies of the searchable fields, built once at load.
#[derive(Debug, Clone)]
struct Folded {
    title: String,
    text: String,
}

impl Folded {
    fn new(entry: &DocEntry) -> Self {
        Folded {
            title: fold_str(&entry.title),
            text: fold_str(&entry.text),
        }
    }
}

/// Read-only snapshot of a documentation search index.
#[derive(Debug, Clone, Default)]
pub struct DocIndex {
    entries: Vec<DocEntry>,
    folded: Vec<Folded>,
}

impl DocIndex {
    /// Validate a JSON array of records into an index.
    ///
    /// Every record must be an object with string `location`, `page`, `title`,
    /// `text` and `category` fields; `location` must be non-empty and
    /// `category` one of the known names. The first offending record aborts
    /// the load and is reported by position.
    pub fn load(raw: &Value) -> Result<Self> {
        let records = raw.as_array().ok_or(IndexError::NotAnArray)?;
        let entries = records
            .iter()
            .enumerate()
            .map(|(i, record)| decode_entry(i, record))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_entries(entries))
    }

    /// Build an index from already-validated entries.
    pub fn from_entries(entries: Vec<DocEntry>) -> Self {
        let folded = entries.iter().map(Folded::new).collect();
        DocIndex { entries, folded }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DocEntry] {
        &self.entries
    }

    /// Entry at `position` in load order.
    pub fn get(&self, position: usize) -> Option<&DocEntry> {
        self.entries.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DocEntry> {
        self.entries.iter()
    }

    /// Case-insensitive keyword search, best matches first.
    ///
    /// An empty query returns nothing.
    pub fn search(&self, query: &str) -> Vec<&DocEntry> {
        self.search_with(query, &SearchOptions::default())
            .into_iter()
            .map(|hit| hit.entry)
            .collect()
    }

    /// Ranked search with match details.
    ///
    /// Hits are sorted by [`MatchKind`], then by index position. Category and
    /// page filters only drop entries, so they never change relative order;
    /// `limit` is applied last, to the ranked list.
    pub fn search_with(&self, query: &str, opts: &SearchOptions) -> Vec<SearchHit<'_>> {
        let query = fold_str(query.trim());
        if query.is_empty() {
            return Vec::new();
        }
        let tokens: Vec<&str> = query.split_whitespace().collect();

        let mut hits: Vec<SearchHit<'_>> = self
            .entries
            .iter()
            .zip(&self.folded)
            .enumerate()
            .filter(|(_, (entry, _))| {
                opts.categories.is_empty() || opts.categories.contains(&entry.category)
            })
            .filter(|(_, (entry, _))| opts.page.as_deref().is_none_or(|p| entry.page == p))
            .filter_map(|(position, (entry, folded))| {
                classify(folded, &query, &tokens).map(|kind| SearchHit {
                    entry,
                    kind,
                    position,
                })
            })
            .collect();

        // Stable: ties stay in index order.
        hits.sort_by_key(|hit| hit.kind);
        if let Some(limit) = opts.limit {
            hits.truncate(limit);
        }

        tracing::debug!(query = %query, hits = hits.len(), "search");
        hits
    }

    /// Group entries by page, pages in order of first appearance.
    pub fn pages(&self) -> Vec<PageGroup<'_>> {
        let mut groups: Vec<PageGroup<'_>> = Vec::new();
        let mut slot: HashMap<&str, usize> = HashMap::new();
        for entry in &self.entries {
            let i = *slot.entry(entry.page.as_str()).or_insert_with(|| {
                groups.push(PageGroup {
                    page: entry.page.as_str(),
                    entries: Vec::new(),
                });
                groups.len() - 1
            });
            groups[i].entries.push(entry);
        }
        groups
    }

    /// Entries of one category, in index order.
    pub fn by_category(&self, category: Category) -> Vec<&DocEntry> {
        self.entries
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    /// First entry whose location equals `location` exactly.
    pub fn find_location(&self, location: &str) -> Option<&DocEntry> {
        self.entries.iter().find(|e| e.location == location)
    }

    /// The entries as a JSON array, loadable again with [`DocIndex::load`].
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(&self.entries)?)
    }

    pub fn to_json_string(&self, pretty: bool) -> Result<String> {
        let out = if pretty {
            serde_json::to_string_pretty(&self.entries)?
        } else {
            serde_json::to_string(&self.entries)?
        };
        Ok(out)
    }

    /// Serialize in the layout of a generated `search_index.js`.
    pub fn to_documenter_js(&self) -> Result<String> {
        Ok(format!(
            "var documenterSearchIndex = {{\"docs\":\n{}\n}}\n",
            serde_json::to_string(&self.entries)?
        ))
    }
}

impl<'a> IntoIterator for &'a DocIndex {
    type Item = &'a DocEntry;
    type IntoIter = std::slice::Iter<'a, DocEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

fn classify(folded: &Folded, query: &str, tokens: &[&str]) -> Option<MatchKind> {
    let title = folded.title.as_str();
    let text = folded.text.as_str();

    if title == query || title.rsplit('.').next() == Some(query) {
        return Some(MatchKind::ExactTitle);
    }
    if title.contains(query) {
        return Some(MatchKind::Title);
    }
    let multi = tokens.len() > 1;
    if multi && tokens.iter().all(|t| title.contains(t)) {
        return Some(MatchKind::TitleTokens);
    }
    if text.contains(query) {
        return Some(MatchKind::Text);
    }
    if multi && tokens.iter().all(|t| title.contains(t) || text.contains(t)) {
        return Some(MatchKind::Text);
    }
    None
}

fn decode_entry(index: usize, record: &Value) -> Result<DocEntry> {
    let obj = record
        .as_object()
        .ok_or_else(|| IndexError::malformed(index, "record is not an object"))?;

    let location = string_field(index, obj, "location")?;
    if location.is_empty() {
        return Err(IndexError::malformed(index, "\"location\" is empty"));
    }
    let category = string_field(index, obj, "category")?
        .parse::<Category>()
        .map_err(|e| IndexError::malformed(index, e.to_string()))?;

    Ok(DocEntry {
        location,
        page: string_field(index, obj, "page")?,
        title: string_field(index, obj, "title")?,
        text: string_field(index, obj, "text")?,
        category,
    })
}

fn string_field(index: usize, obj: &Map<String, Value>, name: &str) -> Result<String> {
    match obj.get(name) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(IndexError::malformed(
            index,
            format!("\"{}\" is not a string", name),
        )),
        None => Err(IndexError::malformed(
            index,
            format!("missing \"{}\"", name),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!([
            {"location": "api.html#API-Documentation", "page": "API", "title": "API Documentation", "text": "", "category": "section"},
            {"location": "api.html#ChainRulesTestUtils.test_frule-Tuple", "page": "API", "title": "ChainRulesTestUtils.test_frule", "text": "test_frule([config::RuleConfig,] f, args..; kwargs...)", "category": "method"},
            {"location": "api.html#ChainRulesTestUtils.test_rrule-Tuple", "page": "API", "title": "ChainRulesTestUtils.test_rrule", "text": "test_rrule([config::RuleConfig,] f, args...; kwargs...)", "category": "method"},
            {"location": "index.html", "page": "ChainRulesTestUtils", "title": "ChainRulesTestUtils", "text": "Use test_rrule to check an rrule against finite differencing.", "category": "page"},
            {"location": "index.html#Testing-the-rrule", "page": "ChainRulesTestUtils", "title": "Testing the rrule", "text": "", "category": "section"},
            {"location": "api.html#ChainRulesTestUtils.@maybe_inferred-Tuple", "page": "API", "title": "ChainRulesTestUtils.@maybe_inferred", "text": "Like @inferred, but does not fail if inference tests are disabled.", "category": "macro"}
        ])
    }

    fn titles<'a>(entries: &[&'a DocEntry]) -> Vec<&'a str> {
        entries.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn load_decodes_fields() {
        let index = DocIndex::load(&sample()).unwrap();
        assert_eq!(index.len(), 6);
        let e = index.get(2).unwrap();
        assert_eq!(e.location, "api.html#ChainRulesTestUtils.test_rrule-Tuple");
        assert_eq!(e.page, "API");
        assert_eq!(e.title, "ChainRulesTestUtils.test_rrule");
        assert_eq!(e.category, Category::Method);
        assert_eq!(index.get(0).unwrap().text, "");
    }

    #[test]
    fn load_rejects_missing_location() {
        let raw = json!([
            {"location": "a.html", "page": "A", "title": "A", "text": "", "category": "page"},
            {"page": "B", "title": "B", "text": "", "category": "page"}
        ]);
        match DocIndex::load(&raw) {
            Err(IndexError::MalformedEntry { index, reason }) => {
                assert_eq!(index, 1);
                assert!(reason.contains("location"), "reason: {}", reason);
            }
            other => panic!("expected MalformedEntry, got {:?}", other),
        }
    }

    #[test]
    fn load_rejects_unknown_category() {
        let raw = json!([{"location": "a.html", "page": "A", "title": "A", "text": "", "category": "module"}]);
        let err = DocIndex::load(&raw).unwrap_err();
        assert!(matches!(err, IndexError::MalformedEntry { index: 0, .. }));
        assert!(err.to_string().contains("module"));
    }

    #[test]
    fn load_rejects_empty_location_and_non_objects() {
        let raw = json!([{"location": "", "page": "A", "title": "A", "text": "", "category": "page"}]);
        assert!(matches!(
            DocIndex::load(&raw),
            Err(IndexError::MalformedEntry { index: 0, .. })
        ));

        let raw = json!(["api.html"]);
        assert!(matches!(
            DocIndex::load(&raw),
            Err(IndexError::MalformedEntry { index: 0, .. })
        ));

        let raw = json!([{"location": "a.html", "page": "A", "title": 3, "text": "", "category": "page"}]);
        let err = DocIndex::load(&raw).unwrap_err();
        assert!(err.to_string().contains("\"title\" is not a string"));
    }

    #[test]
    fn load_requires_array() {
        assert!(matches!(
            DocIndex::load(&json!({"location": "a.html"})),
            Err(IndexError::NotAnArray)
        ));
    }

    #[test]
    fn empty_query_returns_nothing() {
        let index = DocIndex::load(&sample()).unwrap();
        assert!(index.search("").is_empty());
        assert!(index.search("   ").is_empty());
    }

    #[test]
    fn exact_title_segment_ranks_first() {
        let index = DocIndex::load(&sample()).unwrap();
        let results = index.search("test_rrule");
        assert_eq!(
            titles(&results),
            vec!["ChainRulesTestUtils.test_rrule", "ChainRulesTestUtils"]
        );
    }

    #[test]
    fn title_matches_rank_above_text_matches() {
        let index = DocIndex::load(&sample()).unwrap();
        let hits = index.search_with("rrule", &SearchOptions::default());
        let kinds: Vec<MatchKind> = hits.iter().map(|h| h.kind).collect();
        assert_eq!(
            kinds,
            vec![MatchKind::Title, MatchKind::Title, MatchKind::Text]
        );
        // Ties keep index order.
        assert_eq!(hits[0].position, 2);
        assert_eq!(hits[1].position, 4);
        assert_eq!(hits[2].position, 3);
    }

    #[test]
    fn search_is_case_insensitive() {
        let index = DocIndex::load(&sample()).unwrap();
        assert_eq!(index.search("RRULE"), index.search("rrule"));
        assert_eq!(index.search("Maybe_Inferred"), index.search("maybe_inferred"));
    }

    #[test]
    fn multi_word_queries_match_tokens() {
        let index = DocIndex::load(&sample()).unwrap();
        let hits = index.search_with("rrule testing", &SearchOptions::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entry.title, "Testing the rrule");
        assert_eq!(hits[0].kind, MatchKind::TitleTokens);

        let hits = index.search_with("finite rrule", &SearchOptions::default());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].kind, MatchKind::Text);
    }

    #[test]
    fn options_filter_and_limit() {
        let index = DocIndex::load(&sample()).unwrap();
        let opts = SearchOptions {
            categories: vec![Category::Section],
            ..Default::default()
        };
        let hits = index.search_with("rrule", &opts);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].entry.title, "Testing the rrule");

        let opts = SearchOptions {
            page: Some("API".to_string()),
            ..Default::default()
        };
        assert!(index
            .search_with("rule", &opts)
            .iter()
            .all(|h| h.entry.page == "API"));

        let opts = SearchOptions {
            limit: Some(1),
            ..Default::default()
        };
        assert_eq!(index.search_with("rrule", &opts).len(), 1);
    }

    #[test]
    fn pages_group_in_first_seen_order() {
        let index = DocIndex::load(&sample()).unwrap();
        let pages = index.pages();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page, "API");
        // The trailing macro entry joins the API group.
        assert_eq!(pages[0].entries.len(), 4);
        assert_eq!(pages[1].page, "ChainRulesTestUtils");
        assert_eq!(pages[1].entries.len(), 2);
    }

    #[test]
    fn lookup_helpers() {
        let index = DocIndex::load(&sample()).unwrap();
        assert_eq!(index.by_category(Category::Method).len(), 2);
        assert_eq!(
            index.find_location("index.html").map(|e| e.category),
            Some(Category::Page)
        );
        assert!(index.find_location("nope.html").is_none());
        assert_eq!((&index).into_iter().count(), index.len());
    }

    #[test]
    fn reserialized_entries_load_back_unchanged() {
        let index = DocIndex::load(&sample()).unwrap();
        let again = DocIndex::load(&index.to_json().unwrap()).unwrap();
        assert_eq!(index.entries(), again.entries());

        let text = index.to_json_string(false).unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn final_sigma_matches_like_any_sigma() {
        let index = DocIndex::from_entries(vec![DocEntry {
            location: "greek.html".to_string(),
            page: "Greek".to_string(),
            title: "ΟΔΟΣ".to_string(),
            text: String::new(),
            category: Category::Page,
        }]);
        for q in ["ΟΔΟΣ", "ΔΟΣ", "ΟΣ", "Σ", "σ", "οδος"] {
            assert_eq!(index.search(q).len(), 1, "query {}", q);
        }
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn index_is_shareable_across_threads() {
        assert_send_sync::<DocIndex>();

        let index = DocIndex::load(&sample()).unwrap();
        let (a, b) = std::thread::scope(|s| {
            let a = s.spawn(|| index.search("rrule").len());
            let b = s.spawn(|| index.search("RRULE").len());
            (a.join().unwrap(), b.join().unwrap())
        });
        assert_eq!(a, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn documenter_js_layout() {
        let index = DocIndex::load(&sample()).unwrap();
        let js = index.to_documenter_js().unwrap();
        assert!(js.starts_with("var documenterSearchIndex = {\"docs\":\n[{\"location\""));
        assert!(js.ends_with("]\n}\n"));
    }
}
