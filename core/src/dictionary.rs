use crate::structs::{Profile, ProfileSet, SingleLetters};
use fxhash::{FxHashMap, FxHashSet};

/// Sanitized dictionary words grouped by their letter profile, restricted to
/// profiles that fit inside the search filter. Words are kept as ASCII byte
/// strings so phrase assembly and digesting never re-encode.
#[derive(Debug, Clone)]
pub struct WordIndex {
    profiles: Vec<Profile>,
    words: FxHashMap<Profile, Vec<Box<[u8]>>>,
}

impl WordIndex {
    /// Builds the index from raw word-list lines. Blank lines, duplicates,
    /// words with non a-z characters, disallowed single letters and words
    /// that cannot fit inside `filter` are all silently discarded; a noisy
    /// dictionary is routine input, not an error.
    pub fn build<I, S>(lines: I, filter: &Profile, singles: SingleLetters) -> WordIndex
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = FxHashSet::default();
        let mut words: FxHashMap<Profile, Vec<Box<[u8]>>> = FxHashMap::default();

        for line in lines {
            let word = line.as_ref().trim().to_lowercase();
            if word.is_empty() || word.len() > filter.rank() as usize {
                continue;
            }
            let profile = match Profile::from_text(&word) {
                Ok(profile) => profile,
                Err(_) => continue,
            };
            if !profile.is_viable(singles) || !filter.can_contain(&profile) {
                continue;
            }
            if !seen.insert(word.clone()) {
                continue;
            }
            words
                .entry(profile)
                .or_default()
                .push(word.into_bytes().into_boxed_slice());
        }

        // Higher-rank words first: they shrink the residual faster, which
        // improves average pruning yield
        let mut profiles = words.keys().copied().collect::<Vec<_>>();
        profiles.sort_by(|a, b| b.rank().cmp(&a.rank()));

        WordIndex { profiles, words }
    }

    /// Candidate profiles in descending rank order.
    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    /// All words sharing `profile`, in insertion order.
    pub fn words(&self, profile: &Profile) -> &[Box<[u8]>] {
        self.words.get(profile).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn profile_set(&self) -> ProfileSet {
        self.profiles.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
