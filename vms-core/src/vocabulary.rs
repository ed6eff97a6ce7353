//! Shared/exclusive vocabulary classification.
//!
//! This module classifies every distinct middle unit observed under a pair
//! of register filters as cross-register shared or register-exclusive.
//! The classification is a pure distributional fact about which register(s)
//! produced a middle string; it carries no semantic claim whatsoever.
//!
//! The result is an immutable snapshot, computed once per corpus and
//! register pair, and byte-for-byte reproducible: all sets are ordered
//! containers, so no hash iteration order leaks into the output.

use std::collections::{BTreeMap, BTreeSet};

use crate::decompose::Decomposer;
use crate::view::TokenView;

/// The classification tag of a middle unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VocabularyClass {
    /// The middle appears under both register filters.
    Shared,
    /// The middle appears under exactly one register filter.
    Exclusive,
}

/// The immutable shared/exclusive classification of a register pair.
///
/// Built by [`classify`](Self::classify) from two filtered token streams,
/// typically the two line-text registers restricted to the primary
/// transcription pass and to clean tokens. Besides the per-middle tag, the
/// two raw membership sets stay accessible for scripts that need them
/// directly.
pub struct VocabularyIndex {
    classes: BTreeMap<String, VocabularyClass>,
    middles_a: BTreeSet<String>,
    middles_b: BTreeSet<String>,
}

impl VocabularyIndex {
    /// Classifies the middle units of two register streams.
    ///
    /// Every token of each stream is decomposed, the resulting middle
    /// strings are collected into one set per stream, and each middle is
    /// tagged [`Shared`](VocabularyClass::Shared) if both sets contain it,
    /// [`Exclusive`](VocabularyClass::Exclusive) otherwise. Empty middles,
    /// which arise from empty source words or from words wholly consumed
    /// by a prefix match, are not vocabulary and are dropped.
    ///
    /// For a fixed corpus snapshot and view pair the result is identical
    /// across repeated runs.
    ///
    /// # Arguments
    ///
    /// * `decomposer` - The decomposer to apply per token.
    /// * `view_a` - The first register stream.
    /// * `view_b` - The second register stream.
    pub fn classify(decomposer: &Decomposer, view_a: &TokenView, view_b: &TokenView) -> Self {
        let collect = |view: &TokenView| {
            view.iter()
                .map(|t| decomposer.decompose(t.word()).middle().to_string())
                .filter(|m| !m.is_empty())
                .collect::<BTreeSet<_>>()
        };
        let middles_a = collect(view_a);
        let middles_b = collect(view_b);

        let mut classes = BTreeMap::new();
        for middle in middles_a.union(&middles_b) {
            let class = if middles_a.contains(middle) && middles_b.contains(middle) {
                VocabularyClass::Shared
            } else {
                VocabularyClass::Exclusive
            };
            classes.insert(middle.clone(), class);
        }

        Self {
            classes,
            middles_a,
            middles_b,
        }
    }

    /// Returns the classification of a middle unit, or `None` if the
    /// middle was not observed under either register.
    #[inline(always)]
    pub fn class_of(&self, middle: &str) -> Option<VocabularyClass> {
        self.classes.get(middle).copied()
    }

    /// Returns the full middle-to-class mapping.
    #[inline(always)]
    pub fn classes(&self) -> &BTreeMap<String, VocabularyClass> {
        &self.classes
    }

    /// Returns the middles observed under the first register.
    #[inline(always)]
    pub fn middles_a(&self) -> &BTreeSet<String> {
        &self.middles_a
    }

    /// Returns the middles observed under the second register.
    #[inline(always)]
    pub fn middles_b(&self) -> &BTreeSet<String> {
        &self.middles_b
    }

    /// Returns the shared middles, in lexical order.
    pub fn shared(&self) -> impl Iterator<Item = &str> {
        self.middles_a
            .intersection(&self.middles_b)
            .map(String::as_str)
    }

    /// Returns the middles exclusive to the first register, in lexical
    /// order.
    pub fn exclusive_a(&self) -> impl Iterator<Item = &str> {
        self.middles_a
            .difference(&self.middles_b)
            .map(String::as_str)
    }

    /// Returns the middles exclusive to the second register, in lexical
    /// order.
    pub fn exclusive_b(&self) -> impl Iterator<Item = &str> {
        self.middles_b
            .difference(&self.middles_a)
            .map(String::as_str)
    }

    /// Returns the number of distinct classified middles.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns whether no middle was observed at all.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::affix::AffixTable;
    use crate::corpus::{RegisterTag, TranscriptCorpus};

    fn fixture() -> (TranscriptCorpus, Decomposer) {
        let data = "\
word,folio,line,section,register,placement,transcriber
qokaiin,f1r,1,herbal,A,P1,H
qozzaiin,f1r,1,herbal,A,P1,H
qokaiin,f75r,1,bio,B,P1,H
cheedy,f75r,1,bio,B,P1,H
";
        let corpus = TranscriptCorpus::from_reader(data.as_bytes()).unwrap();
        let table = AffixTable::new(
            vec!["qo".into(), "ch".into(), "da".into()],
            vec!["aiin".into(), "iin".into(), "dy".into()],
            [],
        )
        .unwrap();
        (corpus, Decomposer::new(table))
    }

    #[test]
    fn test_shared_and_exclusive() {
        let (corpus, decomposer) = fixture();
        let a = corpus.primary_track("H").register(RegisterTag::A).clean();
        let b = corpus.primary_track("H").register(RegisterTag::B).clean();
        let vocab = VocabularyIndex::classify(&decomposer, &a, &b);

        // "k" comes out of both registers, "zz" only out of A.
        assert_eq!(Some(VocabularyClass::Shared), vocab.class_of("k"));
        assert_eq!(Some(VocabularyClass::Exclusive), vocab.class_of("zz"));
        assert_eq!(None, vocab.class_of("ol"));

        assert_eq!(vec!["k"], vocab.shared().collect::<Vec<_>>());
        assert_eq!(vec!["zz"], vocab.exclusive_a().collect::<Vec<_>>());
        assert_eq!(vec!["ee"], vocab.exclusive_b().collect::<Vec<_>>());
    }

    #[test]
    fn test_raw_membership_sets() {
        let (corpus, decomposer) = fixture();
        let a = corpus.primary_track("H").register(RegisterTag::A).clean();
        let b = corpus.primary_track("H").register(RegisterTag::B).clean();
        let vocab = VocabularyIndex::classify(&decomposer, &a, &b);

        assert!(vocab.middles_a().contains("k"));
        assert!(vocab.middles_a().contains("zz"));
        assert!(!vocab.middles_b().contains("zz"));
    }

    #[test]
    fn test_classification_is_idempotent() {
        let (corpus, decomposer) = fixture();
        let run = || {
            let a = corpus.primary_track("H").register(RegisterTag::A).clean();
            let b = corpus.primary_track("H").register(RegisterTag::B).clean();
            VocabularyIndex::classify(&decomposer, &a, &b)
        };
        let first = run();
        let second = run();
        assert_eq!(first.classes(), second.classes());
        assert_eq!(first.middles_a(), second.middles_a());
        assert_eq!(first.middles_b(), second.middles_b());
    }

    #[test]
    fn test_prefix_consumed_word_contributes_no_middle() {
        let data = "\
word,folio,line,section,register,placement,transcriber
qo,f1r,1,herbal,A,P1,H
qokaiin,f75r,1,bio,B,P1,H
";
        let corpus = TranscriptCorpus::from_reader(data.as_bytes()).unwrap();
        let (_, decomposer) = fixture();
        let a = corpus.primary_track("H").register(RegisterTag::A).clean();
        let b = corpus.primary_track("H").register(RegisterTag::B).clean();
        let vocab = VocabularyIndex::classify(&decomposer, &a, &b);

        // "qo" decomposes to an empty middle and must vanish entirely.
        assert!(vocab.middles_a().is_empty());
        assert_eq!(None, vocab.class_of(""));
        assert_eq!(1, vocab.len());
    }

    #[test]
    fn test_empty_views() {
        let (corpus, decomposer) = fixture();
        let a = corpus.primary_track("H").section("no-such-section");
        let b = corpus.primary_track("H").section("no-such-section");
        let vocab = VocabularyIndex::classify(&decomposer, &a, &b);
        assert!(vocab.is_empty());
        assert_eq!(0, vocab.len());
    }
}
