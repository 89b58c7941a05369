pub mod profile;

use fxhash::FxHashSet;
pub use profile::{Profile, ProfileError, SingleLetters, ALPHABET_LEN};

/// Dictionary-wide membership set of letter profiles. Built once per search
/// and read-only afterwards; the search uses it to close the final phrase
/// slot with a single lookup instead of another recursion level.
pub type ProfileSet = FxHashSet<Profile>;
