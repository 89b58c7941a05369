use crate::dictionary::WordIndex;
use crate::expand::expand;
use crate::search::CombinationSearch;
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DigestParseError {
    #[error("digest \"{0}\" has an odd number of hexadecimal digits")]
    OddLength(String),
    #[error("digest \"{0}\" contains a non-hexadecimal character")]
    InvalidCharacter(String),
}

/// A digest to search for, with the label it should be reported under
/// (typically its own hex spelling).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetDigest {
    pub bytes: Vec<u8>,
    pub label: String,
}

impl TargetDigest {
    /// Parses a hex digest string, case-insensitively. The core is width
    /// agnostic; callers fixing a concrete algorithm check the length.
    pub fn from_hex(hex: &str) -> Result<TargetDigest, DigestParseError> {
        let label = hex.trim().to_lowercase();
        if label.len() % 2 != 0 {
            return Err(DigestParseError::OddLength(label));
        }

        let mut bytes = Vec::with_capacity(label.len() / 2);
        for pair in label.as_bytes().chunks(2) {
            match (hex_value(pair[0]), hex_value(pair[1])) {
                (Some(hi), Some(lo)) => bytes.push(hi << 4 | lo),
                _ => return Err(DigestParseError::InvalidCharacter(label)),
            }
        }

        Ok(TargetDigest { bytes, label })
    }
}

fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

/// One verified hit: a candidate phrase whose digest equalled a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub phrase: Vec<u8>,
    pub target_index: usize,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    pub phrases_tested: u64,
    pub elapsed: Duration,
}

/// Streams every candidate phrase through an injected digest function and
/// compares against the target set by exact byte equality. Phrases are never
/// retained; a mismatch is the normal case and is simply dropped.
pub struct MatchDriver<D> {
    digest: D,
    targets: Vec<TargetDigest>,
}

impl<D> MatchDriver<D>
where
    D: Fn(&[u8]) -> Vec<u8> + Sync,
{
    pub fn new(digest: D, targets: Vec<TargetDigest>) -> Self {
        MatchDriver { digest, targets }
    }

    pub fn targets(&self) -> &[TargetDigest] {
        &self.targets
    }

    /// Drives search, expansion and digest comparison across all top-level
    /// candidates. With the `parallel` feature the candidates are split
    /// across the ambient rayon pool; run inside
    /// `ThreadPool::install` to pin the worker count.
    ///
    /// `on_match` fires once per hit; `on_progress` fires once per finished
    /// top-level branch with the total phrases tested so far. Both may be
    /// called from any worker.
    pub fn run<F, P>(
        &self,
        index: &WordIndex,
        search: &CombinationSearch,
        on_match: F,
        on_progress: P,
    ) -> SearchReport
    where
        F: Fn(Match) + Sync,
        P: Fn(u64) + Sync,
    {
        let tested = AtomicU64::new(0);
        let started = Instant::now();
        let candidates = search.candidates();

        #[cfg(feature = "parallel")]
        let candidates_iter = candidates.par_iter();

        #[cfg(not(feature = "parallel"))]
        let candidates_iter = candidates.iter();

        candidates_iter.for_each(|&first| {
            let mut tested_in_branch = 0u64;

            search.emit_from(first, &mut |combination| {
                expand(combination, index, &mut |phrase| {
                    tested_in_branch += 1;
                    let digest = (self.digest)(phrase);
                    if let Some(target_index) =
                        self.targets.iter().position(|t| t.bytes == digest)
                    {
                        on_match(Match {
                            phrase: phrase.to_vec(),
                            target_index,
                            elapsed: started.elapsed(),
                        });
                    }
                });
            });

            let total = tested.fetch_add(tested_in_branch, Ordering::Relaxed) + tested_in_branch;
            on_progress(total);
        });

        SearchReport {
            phrases_tested: tested.load(Ordering::Relaxed),
            elapsed: started.elapsed(),
        }
    }
}
