//! Hashtag extraction from collected social posts and keyword aggregation
//! into signal counts.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Regex pattern for a hashtag: `#` followed by letters, digits or `_`.
pub const HASHTAG_PATTERN: &str = r"#([\p{L}\p{N}_]+)";

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HASHTAG_PATTERN).expect("valid regex"));

/// Extract lower-cased hashtags (without `#`) in first-seen order,
/// deduplicated.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    HASHTAG_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// Mention count and summed engagement for one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub mentions: i64,
    pub engagement: i64,
}

/// Aggregate `(hashtags, engagement)` pairs into per-keyword counts.
///
/// Each post counts once per hashtag it carries. Sorted by mentions desc,
/// engagement desc, then keyword asc.
pub fn aggregate<'a, I>(items: I) -> Vec<KeywordCount>
where
    I: IntoIterator<Item = (&'a [String], i64)>,
{
    let mut by_keyword: HashMap<&'a str, (i64, i64)> = HashMap::new();
    for (tags, engagement) in items {
        for tag in tags {
            let entry = by_keyword.entry(tag.as_str()).or_default();
            entry.0 = entry.0.saturating_add(1);
            entry.1 = entry.1.saturating_add(engagement.max(0));
        }
    }

    let mut counts: Vec<KeywordCount> = by_keyword
        .into_iter()
        .map(|(keyword, (mentions, engagement))| KeywordCount {
            keyword: keyword.to_string(),
            mentions,
            engagement,
        })
        .collect();

    counts.sort_by(|a, b| {
        b.mentions
            .cmp(&a.mentions)
            .then(b.engagement.cmp(&a.engagement))
            .then_with(|| a.keyword.cmp(&b.keyword))
    });
    counts
}
