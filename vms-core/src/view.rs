//! Filtered token streams.
//!
//! This module provides read-only, filtered windows over a loaded
//! [`TranscriptCorpus`]. A view never copies token data: it holds the
//! positions of its tokens in the corpus sequence, preserving a single
//! source of truth, and filters compose by narrowing that position list.
//! Token order within a view always matches source row order.

use crate::corpus::{RegisterTag, Token, TranscriptCorpus};

/// A read-only filtered window over a corpus.
///
/// Views are built by chaining filters, each of which consumes the view
/// and returns a narrowed one:
///
/// ```
/// # fn main() -> vms_core::errors::Result<()> {
/// # use vms_core::{RegisterTag, TranscriptCorpus};
/// # let data = "word,folio,line,section,register,placement,transcriber\n\
/// #             daiin,f1r,1,herbal,A,P1,H";
/// # let corpus = TranscriptCorpus::from_reader(data.as_bytes())?;
/// let stream = corpus
///     .primary_track("H")
///     .register(RegisterTag::A)
///     .clean();
/// # assert_eq!(stream.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct TokenView<'c> {
    corpus: &'c TranscriptCorpus,
    positions: Vec<usize>,
}

impl<'c> TokenView<'c> {
    /// Creates the unfiltered view over every token of the corpus.
    pub(crate) fn all(corpus: &'c TranscriptCorpus) -> Self {
        Self {
            corpus,
            positions: (0..corpus.len()).collect(),
        }
    }

    /// Narrows the view to positions whose token satisfies the predicate.
    fn retain<F>(mut self, pred: F) -> Self
    where
        F: Fn(&Token) -> bool,
    {
        self.positions.retain(|&pos| {
            // Positions are constructed from the corpus, so indexing holds.
            pred(&self.corpus.tokens()[pos])
        });
        self
    }

    /// Keeps only tokens of the given register.
    ///
    /// # Arguments
    ///
    /// * `tag` - The register to keep.
    pub fn register(self, tag: RegisterTag) -> Self {
        self.retain(|t| t.register() == tag)
    }

    /// Keeps only tokens of the given transcription pass.
    ///
    /// # Arguments
    ///
    /// * `transcriber_id` - The transcriber identifier to keep.
    pub fn transcriber(self, transcriber_id: &str) -> Self {
        self.retain(|t| t.transcriber() == transcriber_id)
    }

    /// Keeps only tokens of the given content section.
    ///
    /// # Arguments
    ///
    /// * `section_tag` - The section tag to keep.
    pub fn section(self, section_tag: &str) -> Self {
        self.retain(|t| t.section() == section_tag)
    }

    /// Keeps only tokens of the given folio.
    ///
    /// # Arguments
    ///
    /// * `folio_id` - The folio identifier to keep.
    pub fn folio(self, folio_id: &str) -> Self {
        self.retain(|t| t.folio() == folio_id)
    }

    /// Drops every uncertainty-marked token.
    ///
    /// This is the default posture of all clean-token analyses; a caller
    /// that needs damage-aware statistics simply skips this filter.
    pub fn clean(self) -> Self {
        self.retain(|t| !t.is_uncertain())
    }

    /// Returns the corpus this view borrows.
    #[inline(always)]
    pub fn corpus(&self) -> &'c TranscriptCorpus {
        self.corpus
    }

    /// Returns the positions of the view's tokens in the corpus sequence.
    #[inline(always)]
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Returns the token at the given index within the view.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&'c Token> {
        self.positions
            .get(index)
            .map(|&pos| &self.corpus.tokens()[pos])
    }

    /// Returns the number of tokens in the view.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns whether the view contains no tokens.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns an iterator over the view's tokens, in source order.
    pub fn iter(&self) -> TokenViewIter<'_, 'c> {
        TokenViewIter {
            view: self,
            front: 0,
            back: self.positions.len(),
        }
    }
}

impl<'a, 'c> IntoIterator for &'a TokenView<'c> {
    type Item = &'c Token;
    type IntoIter = TokenViewIter<'a, 'c>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over the tokens of a [`TokenView`].
///
/// Supports traversal from both ends.
pub struct TokenViewIter<'a, 'c> {
    view: &'a TokenView<'c>,
    front: usize,
    back: usize,
}

impl<'a, 'c> Iterator for TokenViewIter<'a, 'c> {
    type Item = &'c Token;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            let t = self.view.get(self.front);
            self.front += 1;
            t
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'a, 'c> DoubleEndedIterator for TokenViewIter<'a, 'c> {
    #[inline(always)]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.back -= 1;
            self.view.get(self.back)
        } else {
            None
        }
    }
}

impl<'a, 'c> ExactSizeIterator for TokenViewIter<'a, 'c> {}
