use core::fmt;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use std::ops::Sub;
use thiserror::Error;

pub const ALPHABET_LEN: usize = 26;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("character '{character}' in \"{text}\" is outside a-z")]
    InvalidCharacter { text: String, character: char },
}

/// Allow-list of letters that may stand alone as a one-letter word.
///
/// A residual profile asking for exactly one occurrence of a letter outside
/// this list can never be completed by a real word, so the branch is pruned.
/// The default is the English set: a, i, o.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleLetters(u32);

impl SingleLetters {
    pub const NONE: SingleLetters = SingleLetters(0);

    pub fn new(letters: &str) -> Result<Self, ProfileError> {
        let mut bits = 0u32;
        for c in letters.chars() {
            match c {
                'a'..='z' => bits |= 1 << (c as u8 - b'a'),
                _ => {
                    return Err(ProfileError::InvalidCharacter {
                        text: letters.to_string(),
                        character: c,
                    })
                }
            }
        }
        Ok(SingleLetters(bits))
    }

    pub fn contains(self, c: char) -> bool {
        match c {
            'a'..='z' => self.contains_index((c as u8 - b'a') as usize),
            _ => false,
        }
    }

    pub(crate) fn contains_index(self, index: usize) -> bool {
        self.0 & (1 << index) != 0
    }
}

impl Default for SingleLetters {
    fn default() -> Self {
        // 'a', 'i', 'o'
        SingleLetters(1 | 1 << 8 | 1 << 14)
    }
}

/// Letter-occurrence counts of a word or search filter, with the total
/// cached as `rank`. The atomic unit of the combination search: words with
/// the same profile are interchangeable until phrase expansion.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Profile {
    counts: [u8; ALPHABET_LEN],
    rank: u16,
}

impl Profile {
    pub const EMPTY: Profile = Profile {
        counts: [0; ALPHABET_LEN],
        rank: 0,
    };

    /// Counts the letters of the lower-cased, trimmed input. Any character
    /// outside a-z after folding is an error, never an empty profile.
    pub fn from_text(text: &str) -> Result<Profile, ProfileError> {
        let text = text.trim().to_lowercase();
        let mut counts = [0u8; ALPHABET_LEN];
        let mut rank = 0u16;

        for c in text.chars() {
            match c {
                'a'..='z' => {
                    counts[(c as u8 - b'a') as usize] += 1;
                    rank += 1;
                }
                _ => {
                    return Err(ProfileError::InvalidCharacter {
                        text: text.clone(),
                        character: c,
                    })
                }
            }
        }

        Ok(Profile { counts, rank })
    }

    pub fn rank(&self) -> u16 {
        self.rank
    }

    pub fn is_empty(&self) -> bool {
        self.rank == 0
    }

    /// Subset test: every letter of `other` can be drawn from `self`.
    /// The central pruning predicate of the search.
    pub fn can_contain(&self, other: &Profile) -> bool {
        if other.rank > self.rank {
            return false;
        }
        self.counts
            .iter()
            .zip(other.counts.iter())
            .all(|(a, b)| a >= b)
    }

    /// Whether this profile could still be realized by real words: more than
    /// one letter, or a single letter from the allow-list. Empty profiles
    /// are never viable.
    pub fn is_viable(&self, singles: SingleLetters) -> bool {
        match self.rank {
            0 => false,
            1 => self
                .counts
                .iter()
                .position(|&c| c > 0)
                .map_or(false, |i| singles.contains_index(i)),
            _ => true,
        }
    }
}

impl Sub for Profile {
    type Output = Profile;

    /// Per-letter clamped subtraction. The resulting rank is the sum of the
    /// clamped differences, which only equals `self.rank - rhs.rank` when
    /// `rhs` was actually a subset.
    fn sub(self, rhs: Profile) -> Profile {
        let mut counts = [0u8; ALPHABET_LEN];
        let mut rank = 0u16;

        for i in 0..ALPHABET_LEN {
            let n = self.counts[i].saturating_sub(rhs.counts[i]);
            counts[i] = n;
            rank += u16::from(n);
        }

        Profile { counts, rank }
    }
}

impl PartialEq for Profile {
    fn eq(&self, other: &Self) -> bool {
        // rank is a fast pre-check, not a substitute
        self.rank == other.rank && self.counts == other.counts
    }
}

impl Eq for Profile {}

impl Hash for Profile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut code = u32::from(self.rank);
        for &c in self.counts.iter() {
            code = code.wrapping_mul(397) ^ u32::from(c);
        }
        state.write_u32(code);
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &count) in self.counts.iter().enumerate() {
            for _ in 0..count {
                write!(f, "{}", (b'a' + i as u8) as char)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxhash::FxHashSet;
    use rstest::rstest;

    fn profile(text: &str) -> Profile {
        Profile::from_text(text).unwrap()
    }

    #[rstest]
    #[case("listen", 6)]
    #[case("  Listen  ", 6)]
    #[case("a", 1)]
    #[case("", 0)]
    fn from_text_ok(#[case] text: &str, #[case] rank: u16) {
        assert_eq!(profile(text).rank(), rank);
    }

    #[rstest]
    #[case("don't")]
    #[case("two words")]
    #[case("żółw")]
    #[case("word9")]
    fn from_text_rejects_non_alphabetic(#[case] text: &str) {
        assert!(Profile::from_text(text).is_err());
    }

    #[test]
    fn anagrams_share_a_profile() {
        assert_eq!(profile("listen"), profile("silent"));
        assert_ne!(profile("listen"), profile("listens"));
        assert_ne!(profile("ab"), profile("cd"));
    }

    #[rstest]
    #[case("listen")]
    #[case("a")]
    #[case("")]
    fn can_contain_is_reflexive(#[case] text: &str) {
        let p = profile(text);
        assert!(p.can_contain(&p));
    }

    #[rstest]
    #[case("poultry", "poult", true)]
    #[case("poultry", "outlaws", false)]
    #[case("abc", "abcd", false)]
    #[case("abc", "aa", false)]
    fn can_contain_cases(#[case] outer: &str, #[case] inner: &str, #[case] expected: bool) {
        assert_eq!(profile(outer).can_contain(&profile(inner)), expected);
    }

    #[rstest]
    #[case("listen")]
    #[case("aaa")]
    #[case("")]
    fn subtracting_self_yields_empty(#[case] text: &str) {
        let p = profile(text);
        let diff = p - p;
        assert!(diff.is_empty());
        assert_eq!(diff, Profile::EMPTY);
    }

    #[test]
    fn subtract_removes_letters() {
        assert_eq!(profile("poultry") - profile("poult"), profile("ry"));
        assert_eq!(profile("aabb") - profile("ab"), profile("ab"));
    }

    #[test]
    fn subtract_clamps_at_zero() {
        // "xyz" is not a subset; only the overlap is removed
        let diff = profile("abc") - profile("xyz");
        assert_eq!(diff, profile("abc"));
        let diff = profile("aab") - profile("abb");
        assert_eq!(diff, profile("a"));
        assert_eq!(diff.rank(), 1);
    }

    #[rstest]
    #[case("ab", true)]
    #[case("a", true)]
    #[case("i", true)]
    #[case("o", true)]
    #[case("t", false)]
    #[case("", false)]
    fn viability_cases(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(profile(text).is_viable(SingleLetters::default()), expected);
    }

    #[test]
    fn viability_respects_allow_list() {
        let singles = SingleLetters::new("xy").unwrap();
        assert!(profile("x").is_viable(singles));
        assert!(!profile("a").is_viable(singles));
        assert!(!profile("x").is_viable(SingleLetters::NONE));
    }

    #[test]
    fn single_letters_rejects_non_alphabetic() {
        assert!(SingleLetters::new("a i").is_err());
    }

    #[test]
    fn equal_profiles_collapse_in_a_set() {
        let mut set = FxHashSet::default();
        set.insert(profile("listen"));
        set.insert(profile("silent"));
        set.insert(profile("enlist"));
        set.insert(profile("tinsel"));
        assert_eq!(set.len(), 1);
        assert!(set.contains(&profile("inlets")));
    }

    #[test]
    fn display_lists_letters_in_order() {
        assert_eq!(profile("banana").to_string(), "aaabnn");
        assert_eq!(Profile::EMPTY.to_string(), "");
    }
}
