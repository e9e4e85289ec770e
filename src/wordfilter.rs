use regex::Regex;
use std::{collections::HashSet, sync::LazyLock};

#[allow(clippy::unwrap_used)]
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").unwrap());

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum WordFilterMode {
    /// Keep words spelled only with the given characters
    OnlyThese,
    /// Keep words which use none of the given characters
    #[default]
    AvoidThese,
}

/// Picks words out of running text by the characters they use, for
/// building proof text from what a font can already set
#[derive(Debug, Clone)]
pub struct WordFilter {
    characters: String,
    mode: WordFilterMode,
    case_sensitive: bool,
}

impl WordFilter {
    pub fn new(characters: impl Into<String>, mode: WordFilterMode) -> Self {
        WordFilter {
            characters: characters.into(),
            mode,
            case_sensitive: false,
        }
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    fn fold(&self, s: &str) -> String {
        if self.case_sensitive {
            s.to_string()
        } else {
            s.to_lowercase()
        }
    }

    fn character_set(&self) -> HashSet<char> {
        self.fold(&self.characters).chars().collect()
    }

    fn keeps(&self, set: &HashSet<char>, word: &str) -> bool {
        let word = self.fold(word);
        match self.mode {
            WordFilterMode::OnlyThese => word.chars().all(|c| set.contains(&c)),
            WordFilterMode::AvoidThese => !word.chars().any(|c| set.contains(&c)),
        }
    }

    pub fn matches(&self, word: &str) -> bool {
        self.keeps(&self.character_set(), word)
    }

    /// The matching words of `text`, in order, separated by spaces
    pub fn filter(&self, text: &str) -> String {
        let set = self.character_set();
        WORD.find_iter(text)
            .map(|m| m.as_str())
            .filter(|word| self.keeps(&set, word))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TEXT: &str = "Handgloves, hamburgefonstiv! Nun, minimum: 'Hoh' said the moon.";

    #[test]
    fn test_only_these() {
        let filter = WordFilter::new("nmuohi", WordFilterMode::OnlyThese);
        assert_eq!(filter.filter(TEXT), "Nun minimum Hoh moon");
    }

    #[test]
    fn test_only_these_case_sensitive() {
        let filter = WordFilter::new("nmuohi", WordFilterMode::OnlyThese).case_sensitive(true);
        assert_eq!(filter.filter(TEXT), "minimum moon");
    }

    #[test]
    fn test_matches_single_word() {
        let filter = WordFilter::new("xyz", WordFilterMode::AvoidThese);
        assert!(filter.matches("Hamburg"));
        assert!(!filter.matches("Zurich"));
    }

    #[test]
    fn test_avoid_these() {
        let filter = WordFilter::new("AEI", WordFilterMode::AvoidThese);
        assert_eq!(filter.filter(TEXT), "Nun Hoh moon");
        let filter = filter.case_sensitive(true);
        assert_eq!(filter.filter("Aa aa"), "aa");
    }
}
