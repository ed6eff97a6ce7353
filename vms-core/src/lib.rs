//! # vms-core
//!
//! The shared transcript-loading and morphological-decomposition core used
//! by the manuscript analysis scripts.
//!
//! ## Overview
//!
//! Every analysis in the repository, whether a frequency count, a
//! hypothesis test, or a dictionary builder, starts from the same pipeline:
//! a raw interlinear transcription is parsed into an immutable sequence of
//! [`Token`] records, filtered down to a register and transcription pass of
//! interest, and each word is segmented into a prefix, a middle, and a
//! suffix against a configured affix inventory. This crate owns that
//! pipeline and nothing else; statistics and interpretation live in the
//! scripts built on top of it.
//!
//! ## Main components
//!
//! - **Corpus loading**: [`TranscriptCorpus`] parses a header-described,
//!   delimited transcription file, skipping (and counting) malformed rows.
//! - **Filtered streams**: [`TokenView`] exposes chainable, read-only
//!   register/transcriber/section filters over the loaded corpus.
//! - **Decomposition**: [`Decomposer`] splits a word into prefix, middle,
//!   and suffix by deterministic longest match against an [`AffixTable`].
//! - **Vocabulary classification**: [`VocabularyIndex`] partitions observed
//!   middle units into cross-register shared and register-exclusive sets.
//! - **Structure indexing**: [`StructureIndex`] groups tokens into lines,
//!   paragraphs, and page-placement zones per folio.
//!
//! ## Usage
//!
//! ```
//! # fn main() -> vms_core::errors::Result<()> {
//! use vms_core::{AffixTable, Decomposer, RegisterTag, TranscriptCorpus, VocabularyIndex};
//!
//! let transcript = "word,folio,line,section,register,placement,transcriber
//! qokaiin,f1r,1,herbal,B,P1,H
//! daiin,f1r,1,herbal,B,P1,H
//! chody,f1v,1,herbal,A,P1,H";
//!
//! let corpus = TranscriptCorpus::from_reader(transcript.as_bytes())?;
//! assert_eq!(corpus.len(), 3);
//!
//! let table = AffixTable::new(
//!     vec!["qo".into(), "ch".into(), "da".into()],
//!     vec!["aiin".into(), "iin".into(), "dy".into()],
//!     ['c', 'h'],
//! )?;
//! let decomposer = Decomposer::new(table);
//!
//! let d = decomposer.decompose("qokaiin");
//! assert_eq!((d.prefix(), d.middle(), d.suffix()), ("qo", "k", "aiin"));
//!
//! let a = corpus.primary_track("H").register(RegisterTag::A).clean();
//! let b = corpus.primary_track("H").register(RegisterTag::B).clean();
//! let vocab = VocabularyIndex::classify(&decomposer, &a, &b);
//! assert!(vocab.class_of("k").is_some());
//! # Ok(())
//! # }
//! ```

/// Affix inventory configuration.
pub mod affix;

/// Transcript parsing and token records.
pub mod corpus;

/// Morphological decomposition.
pub mod decompose;

/// Error type definitions.
pub mod errors;

/// Folio, paragraph, and placement indexing.
pub mod structure;

/// Delimited-row parsing helpers.
pub mod utils;

/// Filtered token streams.
pub mod view;

/// Shared/exclusive vocabulary classification.
pub mod vocabulary;


// Re-exports
pub use affix::AffixTable;
pub use corpus::{RegisterTag, Token, TranscriptCorpus, UNCERTAIN_MARKER};
pub use decompose::{Decomposer, Decomposition};
pub use structure::{FolioIndex, Paragraph, ParagraphGlyphs, Placement, StructureIndex};
pub use view::TokenView;
pub use vocabulary::{VocabularyClass, VocabularyIndex};

/// The version number of this library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
