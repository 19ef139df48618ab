//! Word frequency counting and ranking.
//!
//! Tokens are the whitespace-separated pieces of a record's text, lowercased.
//! Nothing else is normalized: punctuation attached to a word stays attached,
//! so `"great."` and `"great"` are counted separately. Bare punctuation
//! tokens are only dropped when the stop-word set lists them.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::{Record, WordCount};

/// Default number of ranked words returned.
pub const DEFAULT_WORD_LIMIT: usize = 10;

/// Conjunctions and bare punctuation excluded from counting unless the
/// caller supplies a different set.
pub const DEFAULT_STOP_WORDS: &[&str] = &["and", "but", "or", "for", "nor", "yet", "so", ".", ",", "!", "?"];

// ---------------------------------------------------------------------------
// Text source
// ---------------------------------------------------------------------------

/// Which record field feeds the frequency table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    /// The description as loaded (markup stripped).
    #[default]
    Raw,
    /// The classifier's tagged rendering. Classifier markers become tokens.
    Annotated,
}

impl TextSource {
    pub fn select<'r>(&self, record: &'r Record) -> &'r str {
        match self {
            Self::Raw => record.raw_text(),
            Self::Annotated => record.token_text(),
        }
    }
}

impl std::fmt::Display for TextSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Raw => write!(f, "raw"),
            Self::Annotated => write!(f, "annotated"),
        }
    }
}

// ---------------------------------------------------------------------------
// Stop words
// ---------------------------------------------------------------------------

/// Set of lowercase tokens excluded from counting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Build a set from arbitrary-case words; entries are lowercased.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    /// Empty set: every token counts.
    pub fn none() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
    }

    pub fn contains(&self, token: &str) -> bool {
        if token.chars().any(char::is_uppercase) {
            self.words.contains(&token.to_lowercase())
        } else {
            self.words.contains(token)
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Entries in sorted order (for display and stable output).
    pub fn sorted(&self) -> Vec<&str> {
        let mut words: Vec<&str> = self.words.iter().map(String::as_str).collect();
        words.sort_unstable();
        words
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_WORDS)
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// ---------------------------------------------------------------------------
// Frequency table
// ---------------------------------------------------------------------------

/// Token → count, remembering the order tokens were first seen.
///
/// First-seen order is what breaks ties when ranking, so it must survive
/// merging: `merge` appends tokens new to `self` in `other`'s order. Merging
/// shard tables in input order therefore yields the same table as counting
/// the whole collection at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    index: HashMap<String, usize>,
    entries: Vec<WordCount>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: &[Record], stop_words: &StopWords, source: TextSource) -> Self {
        let mut table = Self::new();
        for record in records {
            table.add_text(source.select(record), stop_words);
        }
        table
    }

    /// Count each shard independently and merge the partial tables in order.
    pub fn from_shards<'a, I>(shards: I, stop_words: &StopWords, source: TextSource) -> Self
    where
        I: IntoIterator<Item = &'a [Record]>,
    {
        shards
            .into_iter()
            .map(|shard| Self::from_records(shard, stop_words, source))
            .fold(Self::new(), |mut acc, part| {
                acc.merge(part);
                acc
            })
    }

    pub fn add_text(&mut self, text: &str, stop_words: &StopWords) {
        for token in text.split_whitespace() {
            let token = token.to_lowercase();
            if stop_words.contains(&token) {
                continue;
            }
            self.add(token, 1);
        }
    }

    fn add(&mut self, token: String, count: usize) {
        match self.index.get(&token) {
            Some(&i) => self.entries[i].count += count,
            None => {
                self.index.insert(token.clone(), self.entries.len());
                self.entries.push(WordCount { word: token, count });
            }
        }
    }

    /// Sum `other` into `self`. Associative; commutative in counts.
    pub fn merge(&mut self, other: FrequencyTable) {
        for entry in other.entries {
            self.add(entry.word, entry.count);
        }
    }

    pub fn get(&self, token: &str) -> Option<usize> {
        self.index.get(token).map(|&i| self.entries[i].count)
    }

    /// Number of distinct tokens.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of counted tokens.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &WordCount> {
        self.entries.iter()
    }

    /// Top `limit` entries by descending count; ties keep first-seen order.
    pub fn ranked(&self, limit: usize) -> Vec<WordCount> {
        self.clone().into_ranked(limit)
    }

    pub fn into_ranked(self, limit: usize) -> Vec<WordCount> {
        if limit == 0 {
            return Vec::new();
        }
        let mut entries = self.entries;
        // sort_by is stable
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(limit);
        entries
    }
}

/// Rank the most used words across `records`.
pub fn most_used_words(
    records: &[Record],
    limit: usize,
    stop_words: &StopWords,
    source: TextSource,
) -> Vec<WordCount> {
    let table = FrequencyTable::from_records(records, stop_words, source);
    log::debug!(
        "counted {} tokens ({} distinct) from {} records",
        table.total(),
        table.len(),
        records.len()
    );
    table.into_ranked(limit)
}
