use crate::internal::models::Hit;
use strum_macros::{Display, EnumIter};

/// Column identifiers controlling display order. A closed set, so an
/// unknown sort key is unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumIter)]
pub enum SortKey {
    #[default]
    None,
    Title,
    Author,
    Comments,
    Points,
}

/// Return a sorted copy of `hits` for the given key. The input is never
/// mutated.
///
/// `None` preserves the original order. String keys sort ascending, numeric
/// keys descending (highest first). All sorts are stable.
pub fn sorted_hits(key: SortKey, hits: &[Hit]) -> Vec<Hit> {
    let mut sorted = hits.to_vec();
    match key {
        SortKey::None => {}
        SortKey::Title => sorted.sort_by(|a, b| a.title.cmp(&b.title)),
        SortKey::Author => sorted.sort_by(|a, b| a.author.cmp(&b.author)),
        SortKey::Comments => sorted.sort_by(|a, b| b.num_comments.cmp(&a.num_comments)),
        SortKey::Points => sorted.sort_by(|a, b| b.points.cmp(&a.points)),
    }
    sorted
}

/// Sort state of the results table: active key plus a reverse toggle.
///
/// Selecting the active key again flips the direction; selecting a different
/// key switches to it and resets the direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableSort {
    pub key: SortKey,
    pub reversed: bool,
}

impl TableSort {
    pub fn select(&mut self, key: SortKey) {
        match key == self.key {
            true => self.reversed = !self.reversed,
            false => {
                self.key = key;
                self.reversed = false;
            }
        }
    }

    /// Apply the registry sort for the active key, then reverse the result
    /// when the toggle is set. Non-destructive.
    pub fn apply(&self, hits: &[Hit]) -> Vec<Hit> {
        let mut sorted = sorted_hits(self.key, hits);
        if self.reversed {
            sorted.reverse();
        }
        sorted
    }
}
