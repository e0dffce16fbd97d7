// src/weights.rs
use std::cmp::Reverse;

use crate::keywords::KeywordCounts;
use crate::models::WeightMap;

pub const DEFAULT_MAX_KEYWORDS: usize = 50;
pub const DEFAULT_MAX_WEIGHT: u32 = 50;

#[derive(Debug, Clone, Copy)]
pub struct WeightParams {
    pub max_keywords: usize, // 50
    pub max_weight: u32,     // 50
}

#[cfg(test)]
impl Default for WeightParams {
    fn default() -> Self {
        Self {
            max_keywords: DEFAULT_MAX_KEYWORDS,
            max_weight: DEFAULT_MAX_WEIGHT,
        }
    }
}

/// Most frequent words first; ties keep first-seen order.
pub fn top_keywords(counts: &KeywordCounts, limit: usize) -> Vec<(String, u32)> {
    let mut v: Vec<(&str, u32, usize)> = counts.iter().collect();
    v.sort_by_key(|&(_, c, first_seen)| (Reverse(c), first_seen));
    v.truncate(limit);
    v.into_iter().map(|(w, c, _)| (w.to_string(), c)).collect()
}

/// Scale the top keywords so the most frequent one maps to `max_weight`.
pub fn normalize(counts: &KeywordCounts, params: WeightParams) -> WeightMap {
    let top = top_keywords(counts, params.max_keywords);
    let top_count = match top.first() {
        Some((_, c)) if *c > 0 => *c,
        _ => return WeightMap::default(),
    };

    top.into_iter()
        .map(|(w, c)| {
            let weight = (c as f64 / top_count as f64 * params.max_weight as f64) as u32;
            (w, weight)
        })
        .collect()
}
