use indexmap::IndexMap;

/// Frequency table that remembers the order in which keys were first seen.
///
/// Ranking sorts stably by descending count, so ties always come out in
/// first-seen order.
#[derive(Debug, Default, Clone)]
pub struct FrequencyTable {
    counts: IndexMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of `key`.
    pub fn increment(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.to_string(), 1);
            }
        }
    }

    /// Count for `key`, zero when never seen.
    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// All entries, highest count first, ties in first-seen order.
    pub fn ranked(&self) -> Vec<(String, u64)> {
        let mut ranked: Vec<(String, u64)> = self
            .counts
            .iter()
            .map(|(k, c)| (k.clone(), *c))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The highest-count entry; the earliest-seen key wins a tie.
    pub fn most_common(&self) -> Option<(&str, u64)> {
        self.iter().fold(None, |best, (key, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((key, count)),
        })
    }
}
