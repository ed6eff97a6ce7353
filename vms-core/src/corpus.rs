//! Transcript parsing and token records.
//!
//! This module parses the source transcription file into an immutable
//! sequence of [`Token`] records. A transcript is a header-described,
//! comma-delimited record file: the header row names the fields, and every
//! following row is one word occurrence with its page, line, section,
//! register, placement, and transcription-pass attributes.
//!
//! Rows whose field count does not match the header are skipped and
//! counted, never fatal; the only fatal failure is a file that cannot be
//! opened or a header missing a required column.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use hashbrown::HashMap;

use crate::errors::{Result, VmsError};
use crate::utils::split_row;
use crate::view::TokenView;

/// The reserved marker for an illegible glyph.
///
/// Words containing this marker are retained in the raw corpus but are
/// excluded by [`TokenView::clean`] from every clean-token stream.
pub const UNCERTAIN_MARKER: char = '?';

/// The required header columns of a transcript file.
const REQUIRED_COLUMNS: [&str; 7] = [
    "word",
    "folio",
    "line",
    "section",
    "register",
    "placement",
    "transcriber",
];

/// The linguistic register of a token.
///
/// The two line-text registers are opaque statistical groupings; everything
/// else, chiefly the circular-diagram pages, falls under [`Azc`].
///
/// The variant order (`A` < `B` < `Azc`) is used as the deterministic
/// tie-break wherever a dominant register is computed.
///
/// [`Azc`]: RegisterTag::Azc
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegisterTag {
    /// The first line-text register.
    A,
    /// The second line-text register.
    B,
    /// The diagram register, and any row not tagged `A` or `B`.
    Azc,
}

impl RegisterTag {
    /// Parses a register field value.
    ///
    /// The mapping is total: `"A"` and `"B"` (case-insensitively) map to
    /// their registers, and everything else is the diagram register.
    ///
    /// # Arguments
    ///
    /// * `code` - The raw register field value.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "A" | "a" => Self::A,
            "B" | "b" => Self::B,
            _ => Self::Azc,
        }
    }
}

impl FromStr for RegisterTag {
    type Err = &'static str;

    /// Parses an explicit register name, for command-line use.
    ///
    /// Unlike [`RegisterTag::from_code`], unknown names are rejected.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "A" | "a" => Ok(Self::A),
            "B" | "b" => Ok(Self::B),
            "AZC" | "azc" => Ok(Self::Azc),
            _ => Err("Could not parse a register name"),
        }
    }
}

impl std::fmt::Display for RegisterTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
            Self::Azc => write!(f, "AZC"),
        }
    }
}

/// One occurrence of a word-form in the manuscript.
///
/// A token is immutable once constructed: it is created during the corpus
/// parse, never mutated, and dropped with the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    word: String,
    folio: String,
    line: String,
    section: String,
    register: RegisterTag,
    placement: String,
    transcriber: String,
}

impl Token {
    /// Returns the word-form, which may contain uncertainty markers.
    #[inline(always)]
    pub fn word(&self) -> &str {
        &self.word
    }

    /// Returns the folio (page) identifier.
    #[inline(always)]
    pub fn folio(&self) -> &str {
        &self.folio
    }

    /// Returns the line identifier within the folio.
    #[inline(always)]
    pub fn line(&self) -> &str {
        &self.line
    }

    /// Returns the coarse content-region tag.
    #[inline(always)]
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Returns the register of the token.
    #[inline(always)]
    pub fn register(&self) -> RegisterTag {
        self.register
    }

    /// Returns the raw page-placement code.
    ///
    /// Use [`Placement::from_code`](crate::Placement::from_code) to bucket
    /// the code into its placement zone.
    #[inline(always)]
    pub fn placement(&self) -> &str {
        &self.placement
    }

    /// Returns the identifier of the transcription pass that produced this
    /// row.
    #[inline(always)]
    pub fn transcriber(&self) -> &str {
        &self.transcriber
    }

    /// Returns whether the word contains an uncertainty marker.
    #[inline(always)]
    pub fn is_uncertain(&self) -> bool {
        self.word.contains(UNCERTAIN_MARKER)
    }

    /// Returns whether every glyph of the word is an uncertainty marker.
    ///
    /// Such a word carries no legible glyph at all; paragraph segmentation
    /// treats it as structurally invisible.
    #[inline(always)]
    pub fn is_fully_uncertain(&self) -> bool {
        !self.word.is_empty() && self.word.chars().all(|c| c == UNCERTAIN_MARKER)
    }
}

/// The parsed, immutable transcript.
///
/// The corpus preserves source row order and is read-only after the load;
/// every downstream product ([`TokenView`], the vocabulary and structure
/// indexes) borrows it rather than copying token data.
pub struct TranscriptCorpus {
    tokens: Vec<Token>,
    skipped_rows: usize,
}

impl TranscriptCorpus {
    /// Loads a transcript from the file at the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - The path of the transcript file.
    ///
    /// # Errors
    ///
    /// [`VmsError::IoError`] is returned if the file cannot be opened.
    /// This is the fatal boundary case of the core; the caller must handle
    /// it.
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::from_reader(File::open(path)?)
    }

    /// Parses a transcript from the given reader.
    ///
    /// The first non-comment row is the header. It must declare the seven
    /// required columns (`word`, `folio`, `line`, `section`, `register`,
    /// `placement`, `transcriber`); column order is irrelevant, and extra
    /// columns are ignored. Every following row with the header's field
    /// count becomes one [`Token`]; rows with any other field count are
    /// skipped and counted.
    ///
    /// # Arguments
    ///
    /// * `rdr` - The reader of the transcript.
    ///
    /// # Errors
    ///
    /// [`VmsError::InvalidFormat`] is returned if the header is missing or
    /// lacks a required column.
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let reader = BufReader::new(rdr);
        let mut lines = reader.lines();

        let header = loop {
            match lines.next() {
                Some(line) => {
                    let line = line?;
                    let trimmed = line.trim();
                    if trimmed.is_empty() || trimmed.starts_with('#') {
                        continue;
                    }
                    break split_row(trimmed);
                }
                None => {
                    return Err(VmsError::invalid_format(
                        "transcript",
                        "the file contains no header row",
                    ));
                }
            }
        };

        let mut columns = HashMap::new();
        for (idx, name) in header.iter().enumerate() {
            columns.insert(name.trim().to_ascii_lowercase(), idx);
        }
        let mut indices = [0usize; REQUIRED_COLUMNS.len()];
        for (slot, name) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = *columns.get(name).ok_or_else(|| {
                VmsError::invalid_format(
                    "transcript",
                    format!("the header is missing the required column '{name}'"),
                )
            })?;
        }
        let [word_i, folio_i, line_i, section_i, register_i, placement_i, transcriber_i] = indices;

        let mut tokens = vec![];
        let mut skipped_rows = 0;
        for (row_no, line) in lines.enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let fields = split_row(trimmed);
            if fields.len() != header.len() {
                skipped_rows += 1;
                log::warn!(
                    "skipping malformed transcript row {}: expected {} fields, found {}",
                    row_no + 2,
                    header.len(),
                    fields.len(),
                );
                continue;
            }
            tokens.push(Token {
                word: fields[word_i].clone(),
                folio: fields[folio_i].clone(),
                line: fields[line_i].clone(),
                section: fields[section_i].clone(),
                register: RegisterTag::from_code(&fields[register_i]),
                placement: fields[placement_i].clone(),
                transcriber: fields[transcriber_i].clone(),
            });
        }

        log::info!(
            "loaded {} tokens ({} malformed rows skipped)",
            tokens.len(),
            skipped_rows,
        );

        Ok(Self {
            tokens,
            skipped_rows,
        })
    }

    /// Returns the tokens in source row order.
    #[inline(always)]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the token at the given position.
    #[inline(always)]
    pub fn get(&self, pos: usize) -> Option<&Token> {
        self.tokens.get(pos)
    }

    /// Returns the number of tokens in the corpus.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns whether the corpus contains no tokens.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the number of malformed rows skipped during the parse.
    #[inline(always)]
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Returns an unfiltered view over every token, in source order.
    ///
    /// This is the damage-aware stream: uncertainty-marked tokens are
    /// included until [`TokenView::clean`] is applied.
    pub fn view(&self) -> TokenView<'_> {
        TokenView::all(self)
    }

    /// Returns the view filtered to one transcription pass.
    ///
    /// Analyses that require a single unambiguous pass start here with the
    /// canonical reference transcriber; the other passes stay reachable
    /// through [`TokenView::transcriber`] on the unfiltered view.
    ///
    /// # Arguments
    ///
    /// * `transcriber_id` - The identifier of the canonical pass.
    pub fn primary_track(&self, transcriber_id: &str) -> TokenView<'_> {
        self.view().transcriber(transcriber_id)
    }
}
