use serde::Serialize;

/// Ordered word -> weight mapping, serialized as `[[word, weight], ...]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WeightMap {
    pub entries: Vec<(String, u32)>,
}

impl WeightMap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, word: &str) -> Option<u32> {
        self.entries.iter().find(|(w, _)| w == word).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(w, v)| (w.as_str(), *v))
    }

    /// Keep only the first `n` entries.
    pub fn truncated(mut self, n: usize) -> Self {
        self.entries.truncate(n);
        self
    }
}

impl FromIterator<(String, u32)> for WeightMap {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

/// Ordered word -> signed delta against the previous run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DiffMap {
    pub entries: Vec<(String, i64)>,
}

impl DiffMap {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, word: &str) -> Option<i64> {
        self.entries.iter().find(|(w, _)| w == word).map(|(_, v)| *v)
    }
}
