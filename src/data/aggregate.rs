use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::model::{KeyField, Record};

/// One row of a [`TopNResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub key: String,
    pub count: usize,
}

/// The most frequent categories of a column, highest count first.
///
/// Equal counts keep the order in which the keys were first seen in the
/// input sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TopNResult {
    pub entries: Vec<CategoryCount>,
}

impl TopNResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryCount> {
        self.entries.iter()
    }

    /// The selected keys, for membership filtering.
    pub fn key_set(&self) -> HashSet<&str> {
        self.entries.iter().map(|e| e.key.as_str()).collect()
    }

    /// `(key, count)` pairs, mostly for assertions and printing.
    pub fn pairs(&self) -> Vec<(&str, usize)> {
        self.entries
            .iter()
            .map(|e| (e.key.as_str(), e.count))
            .collect()
    }
}

/// Count records per `key_field` value and keep the `n` most frequent.
///
/// Records with an empty key are not counted. Fewer than `n` distinct keys
/// returns all of them; `n == 0` returns nothing.
pub fn top_n<'a, I>(records: I, key_field: KeyField, n: usize) -> TopNResult
where
    I: IntoIterator<Item = &'a Record>,
{
    // counts in first-seen order; `slot` maps key -> index into `counts`
    let mut slot: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(&'a str, usize)> = Vec::new();

    for record in records {
        let Some(key) = record.key(key_field) else {
            continue;
        };
        match slot.get(key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                slot.insert(key, counts.len());
                counts.push((key, 1));
            }
        }
    }

    // stable: ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    log::trace!("top {n} by {key_field}: {counts:?}");

    TopNResult {
        entries: counts
            .into_iter()
            .map(|(key, count)| CategoryCount {
                key: key.to_string(),
                count,
            })
            .collect(),
    }
}
