use crate::structs::{Profile, ProfileError};
use std::io::{self, BufRead};
use std::{fs::File, path::Path};

/// Reads a word list, one candidate word per line. Lines are returned raw;
/// sanitization belongs to [`WordIndex::build`](crate::dictionary::WordIndex::build).
pub fn load_words<P>(filename: P) -> io::Result<Vec<String>>
where
    P: AsRef<Path>,
{
    let file = File::open(filename)?;
    io::BufReader::new(file).lines().collect()
}

/// Builds the search filter from an anagram string. ASCII spaces separate
/// words and are stripped; any other non a-z character is a configuration
/// error, never an empty filter.
pub fn filter_from_anagram(anagram: &str) -> Result<Profile, ProfileError> {
    let stripped = anagram
        .trim()
        .chars()
        .filter(|&c| c != ' ')
        .collect::<String>();
    Profile::from_text(&stripped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_ignores_spaces() {
        let filter = filter_from_anagram("poultry outwits ants").unwrap();
        assert_eq!(filter, Profile::from_text("poultryoutwitsants").unwrap());
        assert_eq!(filter.rank(), 18);
    }

    #[test]
    fn filter_rejects_other_characters() {
        assert!(filter_from_anagram("poultry-outwits-ants").is_err());
        assert!(filter_from_anagram("ants?").is_err());
    }
}
