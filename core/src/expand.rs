use crate::dictionary::WordIndex;
use crate::structs::Profile;
use itertools::Itertools;

pub const WORD_SEPARATOR: u8 = b' ';

/// Expands one letter-distribution combination into every literal phrase it
/// stands for: the cartesian product of the word groups behind each profile,
/// joined by a single space, in search order. Trailing [`Profile::EMPTY`]
/// slots are unused word positions and are dropped.
///
/// The phrase buffer is reused between visits; callers that keep a phrase
/// must copy it.
pub fn expand(combination: &[Profile], index: &WordIndex, visit: &mut dyn FnMut(&[u8])) {
    let groups = combination
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| index.words(p))
        .collect::<Vec<_>>();

    if groups.is_empty() {
        return;
    }

    let mut phrase = Vec::new();
    for words in groups.iter().map(|group| group.iter()).multi_cartesian_product() {
        phrase.clear();
        for (i, word) in words.iter().enumerate() {
            if i > 0 {
                phrase.push(WORD_SEPARATOR);
            }
            phrase.extend_from_slice(word);
        }
        visit(&phrase);
    }
}
