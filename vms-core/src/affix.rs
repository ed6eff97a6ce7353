//! Affix inventory configuration.
//!
//! This module manages the configured prefix and suffix inventories that
//! drive morphological decomposition, together with the small "articulator"
//! glyph set that marks compound glyphs inside a word's middle.
//!
//! The inventory is versioned configuration data, not code: different
//! analyses substitute refined tables without touching the decomposition
//! algorithm, and no table is ever redefined inline by a script.

use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::errors::{Result, VmsError};

/// The configured affix inventories for decomposition.
///
/// The table holds:
/// - the prefix inventory, ordered by descending length so that a linear
///   scan implements longest match;
/// - the suffix inventory, ordered the same way;
/// - the articulator glyph set checked against a word's middle.
///
/// A table is immutable after construction and is injected into a
/// [`Decomposer`](crate::Decomposer).
#[derive(Debug, Clone, Default)]
pub struct AffixTable {
    prefixes: Vec<String>,
    suffixes: Vec<String>,
    articulators: BTreeSet<char>,
}

impl AffixTable {
    /// Creates a table from in-memory inventories.
    ///
    /// Both inventories are re-sorted by descending length (ties broken
    /// lexically) so that scanning order is a pure function of the
    /// inventory contents.
    ///
    /// # Arguments
    ///
    /// * `prefixes` - The prefix inventory.
    /// * `suffixes` - The suffix inventory.
    /// * `articulators` - The articulator glyph set.
    ///
    /// # Errors
    ///
    /// [`VmsError::InvalidArgument`] is returned if an inventory contains
    /// an empty entry.
    pub fn new<I>(prefixes: Vec<String>, suffixes: Vec<String>, articulators: I) -> Result<Self>
    where
        I: IntoIterator<Item = char>,
    {
        if prefixes.iter().any(String::is_empty) {
            return Err(VmsError::invalid_argument(
                "prefixes",
                "must not contain an empty entry",
            ));
        }
        if suffixes.iter().any(String::is_empty) {
            return Err(VmsError::invalid_argument(
                "suffixes",
                "must not contain an empty entry",
            ));
        }
        let mut prefixes = prefixes;
        let mut suffixes = suffixes;
        prefixes.sort_by_key(|e| (Reverse(e.len()), e.clone()));
        prefixes.dedup();
        suffixes.sort_by_key(|e| (Reverse(e.len()), e.clone()));
        suffixes.dedup();
        Ok(Self {
            prefixes,
            suffixes,
            articulators: articulators.into_iter().collect(),
        })
    }

    /// Reads a table from a sectioned text file.
    ///
    /// The format mirrors the other configuration files of the toolchain:
    /// `#` starts a comment, blank lines are ignored, and the section
    /// headers `[prefixes]`, `[suffixes]`, and `[articulators]` introduce
    /// one entry per line. An articulator entry must be a single glyph.
    ///
    /// # Arguments
    ///
    /// * `rdr` - The reader of the affix definition file.
    ///
    /// # Errors
    ///
    /// [`VmsError::InvalidFormat`] is returned for an unknown section
    /// header, an entry outside any section, or a multi-glyph articulator
    /// entry.
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        #[derive(Clone, Copy)]
        enum Section {
            Prefixes,
            Suffixes,
            Articulators,
        }

        let reader = BufReader::new(rdr);

        let mut prefixes = vec![];
        let mut suffixes = vec![];
        let mut articulators = vec![];

        let mut section = None;
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match line {
                "[prefixes]" => section = Some(Section::Prefixes),
                "[suffixes]" => section = Some(Section::Suffixes),
                "[articulators]" => section = Some(Section::Articulators),
                line if line.starts_with('[') => {
                    return Err(VmsError::invalid_format(
                        "affix.def",
                        format!("unknown section header: {line}"),
                    ));
                }
                line => match section {
                    Some(Section::Prefixes) => prefixes.push(line.to_string()),
                    Some(Section::Suffixes) => suffixes.push(line.to_string()),
                    Some(Section::Articulators) => {
                        let mut chars = line.chars();
                        let glyph = chars.next();
                        let rest = chars.next();
                        if let (Some(glyph), None) = (glyph, rest) {
                            articulators.push(glyph);
                        } else {
                            return Err(VmsError::invalid_format(
                                "affix.def",
                                "an articulator entry must be a single glyph",
                            ));
                        }
                    }
                    None => {
                        return Err(VmsError::invalid_format(
                            "affix.def",
                            "an entry must follow a section header",
                        ));
                    }
                },
            }
        }

        Self::new(prefixes, suffixes, articulators)
    }

    /// Reads a table from the file at the given path.
    ///
    /// # Arguments
    ///
    /// * `path` - The path of the affix definition file.
    ///
    /// # Errors
    ///
    /// [`VmsError::IoError`] is returned if the file cannot be opened;
    /// format errors are those of [`Self::from_reader`].
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::from_reader(File::open(path)?)
    }

    /// Returns the prefix inventory, ordered by descending length.
    #[inline(always)]
    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Returns the suffix inventory, ordered by descending length.
    #[inline(always)]
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Returns the articulator glyph set.
    #[inline(always)]
    pub fn articulators(&self) -> &BTreeSet<char> {
        &self.articulators
    }

    /// Returns the byte length of the shortest configured prefix, or
    /// `None` if the inventory is empty.
    #[inline(always)]
    pub fn shortest_prefix_len(&self) -> Option<usize> {
        // Inventories are sorted by descending length.
        self.prefixes.last().map(|e| e.len())
    }

    /// Returns the byte length of the shortest configured suffix, or
    /// `None` if the inventory is empty.
    #[inline(always)]
    pub fn shortest_suffix_len(&self) -> Option<usize> {
        self.suffixes.last().map(|e| e.len())
    }
}
