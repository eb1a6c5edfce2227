//! Scored free-text search over store names and descriptions.

use std::collections::HashMap;

use storefront_core::StoreId;
use storefront_stores::Store;

/// Maximum number of text-search results.
pub const TEXT_RESULT_CAP: usize = 5;

/// Inverted index over the tokens of each store's name and description.
///
/// Relevance is summed term frequency across the query's tokens; results are
/// ranked by score descending (the score is the only ordering key, so equal
/// scores keep their index order).
pub struct TextIndex {
    /// term -> (store ordinal, occurrences)
    postings: HashMap<String, Vec<(usize, u32)>>,
    ids: Vec<StoreId>,
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

impl TextIndex {
    /// Build the index from a snapshot of stores.
    pub fn build(stores: &[Store]) -> Self {
        let mut postings: HashMap<String, Vec<(usize, u32)>> = HashMap::new();

        for (ordinal, store) in stores.iter().enumerate() {
            let mut counts: HashMap<String, u32> = HashMap::new();
            for token in tokenize(&store.name).chain(tokenize(&store.description)) {
                *counts.entry(token).or_insert(0) += 1;
            }
            for (token, count) in counts {
                postings.entry(token).or_default().push((ordinal, count));
            }
        }

        Self {
            postings,
            ids: stores.iter().map(|s| s.id).collect(),
        }
    }

    /// Rank stores matching `query`, best first, capped at
    /// [`TEXT_RESULT_CAP`]. Stores matching none of the query's tokens are
    /// absent from the result.
    pub fn search(&self, query: &str) -> Vec<(StoreId, u32)> {
        let mut scores: HashMap<usize, u32> = HashMap::new();

        for token in tokenize(query) {
            if let Some(entries) = self.postings.get(&token) {
                for (ordinal, count) in entries {
                    *scores.entry(*ordinal).or_insert(0) += count;
                }
            }
        }

        let mut ranked: Vec<(usize, u32)> = scores.into_iter().collect();
        // Score descending; ordinal ascending keeps equal scores deterministic.
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(TEXT_RESULT_CAP);

        ranked
            .into_iter()
            .map(|(ordinal, score)| (self.ids[ordinal], score))
            .collect()
    }
}
