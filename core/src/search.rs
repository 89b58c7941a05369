use crate::structs::{Profile, ProfileSet, SingleLetters};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("maximum number of words must be positive")]
    ZeroMaxWords,
}

/// Backtracking enumeration of every way to partition the filter's letters
/// across at most `max_words` dictionary profiles.
///
/// Combinations are emitted through a visit callback as slices of length
/// `max_words`, with unused trailing slots left as [`Profile::EMPTY`]. No
/// enumeration order is guaranteed, only the set of emitted combinations;
/// top-level branches are independent, which is what lets the driver run
/// them in parallel.
#[derive(Debug)]
pub struct CombinationSearch<'a> {
    candidates: &'a [Profile],
    known: &'a ProfileSet,
    filter: Profile,
    max_words: usize,
    singles: SingleLetters,
}

impl<'a> CombinationSearch<'a> {
    /// `candidates` must already be restricted to subsets of `filter`, as
    /// [`WordIndex::build`](crate::dictionary::WordIndex::build) guarantees.
    pub fn new(
        candidates: &'a [Profile],
        known: &'a ProfileSet,
        filter: Profile,
        max_words: usize,
        singles: SingleLetters,
    ) -> Result<Self, SearchError> {
        if max_words == 0 {
            return Err(SearchError::ZeroMaxWords);
        }
        Ok(CombinationSearch {
            candidates,
            known,
            filter,
            max_words,
            singles,
        })
    }

    pub fn candidates(&self) -> &[Profile] {
        self.candidates
    }

    pub fn max_words(&self) -> usize {
        self.max_words
    }

    /// Runs the whole branch rooted at `first`. This is the parallel unit:
    /// each top-level candidate can be searched independently.
    pub fn emit_from(&self, first: Profile, visit: &mut dyn FnMut(&[Profile])) {
        // A first word that is not a subset of the filter would make the
        // clamped subtraction below lose letters silently; discard it here.
        if !self.filter.can_contain(&first) {
            return;
        }

        let mut chosen = vec![Profile::EMPTY; self.max_words];
        chosen[0] = first;

        let residual = self.filter - first;

        // The first word alone already reconstructs the filter
        if residual.is_empty() {
            visit(&chosen);
            return;
        }

        // No slots left, or a residual no real word can complete
        if self.max_words == 1 || !residual.is_viable(self.singles) {
            return;
        }

        // One slot left: the residual itself must be a dictionary profile
        if self.max_words == 2 {
            if self.known.contains(&residual) {
                chosen[1] = residual;
                visit(&chosen);
            }
            return;
        }

        let pool = self
            .candidates
            .iter()
            .copied()
            .filter(|p| residual.can_contain(p))
            .collect::<Vec<_>>();
        self.emit_sub(&pool, &mut chosen, 1, residual, visit);
    }

    /// Serial traversal of every top-level branch.
    pub fn emit_all(&self, visit: &mut dyn FnMut(&[Profile])) {
        for &first in self.candidates {
            self.emit_from(first, visit);
        }
    }

    fn emit_sub(
        &self,
        pool: &[Profile],
        chosen: &mut Vec<Profile>,
        depth: usize,
        residual: Profile,
        visit: &mut dyn FnMut(&[Profile]),
    ) {
        for &word in pool {
            chosen[depth] = word;

            // Every pool entry is a subset of the residual, so equal rank
            // means an exact completion
            if word.rank() == residual.rank() {
                visit(chosen);
                continue;
            }

            // Last slot taken by a non-exact word: dead end
            if depth == self.max_words - 1 {
                continue;
            }

            let next = residual - word;
            if !next.is_viable(self.singles) {
                continue;
            }

            if depth == self.max_words - 2 {
                if self.known.contains(&next) {
                    chosen[depth + 1] = next;
                    visit(chosen);
                    chosen[depth + 1] = Profile::EMPTY;
                }
                continue;
            }

            let next_pool = pool
                .iter()
                .copied()
                .filter(|p| next.can_contain(p))
                .collect::<Vec<_>>();
            self.emit_sub(&next_pool, chosen, depth + 1, next, visit);
        }

        chosen[depth] = Profile::EMPTY;
    }
}
