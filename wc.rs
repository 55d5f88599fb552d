use std::borrow::Cow;
use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

// Compile regexes once
// ECMAScript `\s`: includes U+FEFF, excludes U+0085 (unlike Unicode White_Space)
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}]+")
        .unwrap()
});
static NON_LETTER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-zA-Z]").unwrap());

/// One distinct word and how many tokens normalized to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// How entries with equal counts are ordered relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieOrder {
    /// Earlier first occurrence ranks first.
    #[default]
    FirstSeen,
    /// Byte-wise ascending word.
    Lexicographic,
}

/// Count-descending list of words for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyReport {
    entries: Vec<WordCount>,
    token_count: usize,
}

impl FrequencyReport {
    pub fn entries(&self) -> &[WordCount] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WordCount> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Non-empty whitespace-delimited tokens seen, counted or not.
    pub fn token_count(&self) -> usize {
        self.token_count
    }

    /// Tokens that passed the filter; never more than `token_count`.
    pub fn counted_tokens(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    /// The `n` most frequent entries.
    pub fn top(&self, n: usize) -> &[WordCount] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn into_entries(self) -> Vec<WordCount> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a FrequencyReport {
    type Item = &'a WordCount;
    type IntoIter = std::slice::Iter<'a, WordCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Strip everything outside `[a-zA-Z]`. Case is left untouched.
pub fn normalize(token: &str) -> Cow<'_, str> {
    NON_LETTER_REGEX.replace_all(token, "")
}

/// A normalized word counts only when it starts with a lowercase ASCII letter.
pub fn is_counted(word: &str) -> bool {
    word.as_bytes().first().is_some_and(u8::is_ascii_lowercase)
}

/// Word frequencies of `text`, ties kept in first-seen order.
pub fn analyze(text: &str) -> FrequencyReport {
    analyze_with(text, TieOrder::FirstSeen)
}

pub fn analyze_with(text: &str, tie_order: TieOrder) -> FrequencyReport {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<WordCount> = Vec::new();
    let mut token_count = 0;

    // split yields an empty leading/trailing piece around edge whitespace
    for token in WHITESPACE_REGEX.split(text).filter(|t| !t.is_empty()) {
        token_count += 1;
        let word = normalize(token);
        if !is_counted(&word) {
            continue;
        }
        match index.get(&*word) {
            Some(&i) => entries[i].count += 1,
            None => {
                index.insert(word.to_string(), entries.len());
                entries.push(WordCount {
                    word: word.into_owned(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, so equal counts keep insertion order
    match tie_order {
        TieOrder::FirstSeen => entries.sort_by(|a, b| b.count.cmp(&a.count)),
        TieOrder::Lexicographic => {
            entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)))
        }
    }

    FrequencyReport {
        entries,
        token_count,
    }
}
