//! Morphological decomposition.
//!
//! This module segments a word into a prefix, a middle, and a suffix by
//! deterministic longest match against a configured [`AffixTable`].
//! Decomposition is a total function: every input string, including the
//! empty string, produces exactly one result, and the absence of an affix
//! match is itself a valid result, never an error.

use crate::affix::AffixTable;

/// The morphological analysis of one word.
///
/// The three components are subslices of the analyzed word, so the
/// concatenation `prefix + middle + suffix` reconstructs the word exactly,
/// by construction. The value borrows the word it was computed from and is
/// valid for as long as that string lives; callers that need to keep an
/// analysis own the middle (or the whole surface) themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decomposition<'a> {
    prefix: &'a str,
    middle: &'a str,
    suffix: &'a str,
    has_ligature: bool,
}

impl<'a> Decomposition<'a> {
    /// Returns the matched prefix, possibly empty.
    #[inline(always)]
    pub fn prefix(&self) -> &'a str {
        self.prefix
    }

    /// Returns the middle unit.
    ///
    /// The middle is empty only when the source word was empty or was
    /// wholly consumed by a prefix match; the empty-middle guard applies
    /// to suffixes alone.
    #[inline(always)]
    pub fn middle(&self) -> &'a str {
        self.middle
    }

    /// Returns the matched suffix, possibly empty.
    #[inline(always)]
    pub fn suffix(&self) -> &'a str {
        self.suffix
    }

    /// Returns whether the middle contains an articulator glyph.
    #[inline(always)]
    pub fn has_ligature(&self) -> bool {
        self.has_ligature
    }

    /// Returns whether no affix matched at either end.
    #[inline(always)]
    pub fn is_bare(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty()
    }

    /// Reconstructs the analyzed word.
    ///
    /// # Returns
    ///
    /// The concatenation of prefix, middle, and suffix, which equals the
    /// source word.
    pub fn surface(&self) -> String {
        let mut surface =
            String::with_capacity(self.prefix.len() + self.middle.len() + self.suffix.len());
        surface.push_str(self.prefix);
        surface.push_str(self.middle);
        surface.push_str(self.suffix);
        surface
    }
}

/// The morphological decomposer.
///
/// A decomposer owns its [`AffixTable`] and applies the same deterministic
/// segmentation to every word:
///
/// 1. The prefix inventory is scanned in descending-length order; the
///    first entry that literally prefixes the word is removed from the
///    front.
/// 2. The suffix inventory is scanned the same way against the remaining
///    string; the first entry that literally suffixes it is removed from
///    the back, unless its removal would leave an empty middle, in which
///    case suffix matching is skipped entirely for the word.
/// 3. Whatever remains is the middle.
/// 4. The ligature flag is set when the middle contains an articulator
///    glyph.
pub struct Decomposer {
    table: AffixTable,
}

impl Decomposer {
    /// Creates a decomposer over the given affix table.
    ///
    /// # Arguments
    ///
    /// * `table` - The affix inventory configuration.
    pub const fn new(table: AffixTable) -> Self {
        Self { table }
    }

    /// Returns a reference to the affix table in use.
    #[inline(always)]
    pub fn table(&self) -> &AffixTable {
        &self.table
    }

    /// Decomposes a word into prefix, middle, and suffix.
    ///
    /// # Arguments
    ///
    /// * `word` - The word to segment.
    ///
    /// # Returns
    ///
    /// The [`Decomposition`] of the word. The empty word yields an
    /// all-empty decomposition.
    pub fn decompose<'a>(&self, word: &'a str) -> Decomposition<'a> {
        let mut rest = word;

        let mut prefix = &word[..0];
        if self
            .table
            .shortest_prefix_len()
            .is_some_and(|min| rest.len() >= min)
        {
            for entry in self.table.prefixes() {
                if rest.starts_with(entry.as_str()) {
                    prefix = &word[..entry.len()];
                    rest = &word[entry.len()..];
                    break;
                }
            }
        }

        let mut middle = rest;
        let mut suffix = &rest[rest.len()..];
        if self
            .table
            .shortest_suffix_len()
            .is_some_and(|min| rest.len() >= min)
        {
            for entry in self.table.suffixes() {
                if rest.ends_with(entry.as_str()) {
                    // The first literal match decides. A match consuming the
                    // whole remainder would empty the middle, and suffix
                    // matching is skipped entirely for such a word.
                    if rest.len() > entry.len() {
                        let cut = rest.len() - entry.len();
                        middle = &rest[..cut];
                        suffix = &rest[cut..];
                    }
                    break;
                }
            }
        }

        let has_ligature = middle
            .chars()
            .any(|c| self.table.articulators().contains(&c));

        Decomposition {
            prefix,
            middle,
            suffix,
            has_ligature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_decomposer() -> Decomposer {
        Decomposer::new(
            AffixTable::new(
                vec!["qo".into(), "ch".into(), "da".into()],
                vec!["aiin".into(), "iin".into(), "dy".into()],
                [],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_both_affixes_match() {
        let d = reference_decomposer().decompose("qokaiin");
        assert_eq!("qo", d.prefix());
        assert_eq!("k", d.middle());
        assert_eq!("aiin", d.suffix());
    }

    #[test]
    fn test_empty_middle_guard() {
        // The suffix "iin" matches the remainder after "da" but would empty
        // the middle, so no suffix is taken at all.
        let d = reference_decomposer().decompose("daiin");
        assert_eq!("da", d.prefix());
        assert_eq!("iin", d.middle());
        assert_eq!("", d.suffix());
    }

    #[test]
    fn test_empty_middle_guard_stops_scanning() {
        let decomposer = Decomposer::new(
            AffixTable::new(vec![], vec!["iin".into(), "in".into()], []).unwrap(),
        );
        // "iin" is the first literal match and would empty the middle; the
        // shorter "in" must not be tried afterwards.
        let d = decomposer.decompose("iin");
        assert_eq!("iin", d.middle());
        assert_eq!("", d.suffix());
    }

    #[test]
    fn test_no_match() {
        let d = reference_decomposer().decompose("xyz");
        assert_eq!("", d.prefix());
        assert_eq!("xyz", d.middle());
        assert_eq!("", d.suffix());
        assert!(d.is_bare());
    }

    #[test]
    fn test_empty_word() {
        let d = reference_decomposer().decompose("");
        assert_eq!("", d.prefix());
        assert_eq!("", d.middle());
        assert_eq!("", d.suffix());
        assert!(!d.has_ligature());
    }

    #[test]
    fn test_word_wholly_consumed_by_prefix() {
        // No prefix-side counterpart of the empty-middle guard exists: a
        // word equal to a configured prefix yields an empty middle.
        let d = reference_decomposer().decompose("qo");
        assert_eq!("qo", d.prefix());
        assert_eq!("", d.middle());
        assert_eq!("", d.suffix());
        assert_eq!("qo", d.surface());
    }

    #[test]
    fn test_word_shorter_than_shortest_affix() {
        let d = reference_decomposer().decompose("y");
        assert_eq!("", d.prefix());
        assert_eq!("y", d.middle());
        assert_eq!("", d.suffix());
    }

    #[test]
    fn test_longest_prefix_wins() {
        let decomposer = Decomposer::new(
            AffixTable::new(vec!["q".into(), "qo".into()], vec![], []).unwrap(),
        );
        let d = decomposer.decompose("qokedy");
        assert_eq!("qo", d.prefix());
        assert_eq!("kedy", d.middle());
    }

    #[test]
    fn test_ligature_flag() {
        let decomposer = Decomposer::new(
            AffixTable::new(
                vec!["ch".into()],
                vec!["dy".into()],
                ['c', 'h'],
            )
            .unwrap(),
        );
        assert!(decomposer.decompose("qokchdy").has_ligature());
        assert!(!decomposer.decompose("qokedy").has_ligature());
        // Articulators inside a matched affix do not set the flag.
        assert!(!decomposer.decompose("chody").has_ligature());
    }

    #[test]
    fn test_concatenation_invariant() {
        let decomposer = reference_decomposer();
        for word in ["qokaiin", "daiin", "xyz", "", "chol", "qo", "dy", "aiin", "qodaiin"] {
            let d = decomposer.decompose(word);
            assert_eq!(word, d.surface());
            assert_eq!(word, format!("{}{}{}", d.prefix(), d.middle(), d.suffix()));
        }
    }
}
