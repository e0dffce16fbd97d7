// src/keywords.rs
use regex::Regex;
use std::collections::{HashMap, HashSet};

use crate::text::title_case;

pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "with", "from", "into", "using", "based", "over", "through", "under", "within", "this",
    "that", "have",
];

pub const DEFAULT_MIN_WORD_LEN: usize = 4;

/// Lowercased words that never count as keywords.
#[derive(Debug, Clone)]
pub struct StopWords(HashSet<String>);

impl StopWords {
    pub fn new<S: AsRef<str>>(words: impl IntoIterator<Item = S>) -> Self {
        Self(words.into_iter().map(|w| w.as_ref().to_lowercase()).collect())
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0.contains(&word.to_lowercase())
    }
}

#[cfg(test)]
impl Default for StopWords {
    fn default() -> Self {
        Self::new(DEFAULT_STOP_WORDS)
    }
}

/// Word counts that remember the order in which each word was first seen.
#[derive(Debug, Clone, Default)]
pub struct KeywordCounts {
    entries: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl KeywordCounts {
    pub fn add(&mut self, word: String) {
        match self.index.get(&word) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(word.clone(), self.entries.len());
                self.entries.push((word, 1));
            }
        }
    }

    #[cfg(test)]
    pub fn get(&self, word: &str) -> Option<u32> {
        self.index.get(word).map(|&i| self.entries[i].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (word, count, first_seen) in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32, usize)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, (w, c))| (w.as_str(), *c, i))
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for KeywordCounts {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut out = KeywordCounts::default();
        for (w, c) in iter {
            let w = w.into();
            match out.index.get(&w) {
                Some(&i) => out.entries[i].1 += c,
                None => {
                    out.index.insert(w.clone(), out.entries.len());
                    out.entries.push((w, c));
                }
            }
        }
        out
    }
}

pub struct KeywordExtractor {
    stop_words: StopWords,
    token_re: Regex,
}

impl KeywordExtractor {
    pub fn new(stop_words: StopWords, min_word_len: usize) -> Self {
        let min = min_word_len.max(1);
        let token_re = Regex::new(&format!(r"\b[A-Za-z]{{{min},}}\b"))
            .expect("token pattern is valid for any length");
        Self { stop_words, token_re }
    }

    pub fn extract<S: AsRef<str>>(&self, titles: &[S]) -> KeywordCounts {
        let mut counts = KeywordCounts::default();
        for title in titles {
            for m in self.token_re.find_iter(title.as_ref()) {
                let w = title_case(m.as_str());
                if self.stop_words.contains(&w) {
                    continue;
                }
                counts.add(w);
            }
        }
        counts
    }
}

#[cfg(test)]
impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(StopWords::default(), DEFAULT_MIN_WORD_LEN)
    }
}
