//! Folio, paragraph, and placement indexing.
//!
//! This module groups the tokens of a stream into per-folio lines and
//! paragraphs and buckets each raw placement code into its page-layout
//! zone. Paragraph boundaries are detected by a small configured class of
//! paragraph-initial glyphs: a line whose first legible token begins with
//! one of them opens a new paragraph.
//!
//! Lines and paragraphs hold positions into the corpus token sequence, not
//! copies, so the corpus remains the single source of truth for token
//! data.

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::ops::Range;
use std::path::Path;

use hashbrown::HashMap;

use crate::corpus::{RegisterTag, TranscriptCorpus};
use crate::errors::{Result, VmsError};
use crate::view::TokenView;

/// The page-layout zone of a token, bucketed from its raw placement code.
///
/// Unrecognized codes fall into [`Other`](Placement::Other); no code is
/// ever dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Running paragraph-body text.
    ParagraphText,
    /// A label attached to a drawing.
    Label,
    /// A ring of a circular diagram.
    Ring,
    /// A circular band of text.
    Circle,
    /// A star- or spoke-arranged zone.
    Star,
    /// Any code outside the recognized family.
    Other,
}

impl Placement {
    /// Buckets a raw placement code into its zone.
    ///
    /// The code family is keyed by the leading letter: `P` for paragraph
    /// text, `L` for labels, and `R`/`C`/`S` for the diagram zones of
    /// ring-, circle-, and star-type layouts.
    ///
    /// # Arguments
    ///
    /// * `code` - The raw placement code of a token.
    pub fn from_code(code: &str) -> Self {
        match code.trim().chars().next().map(|c| c.to_ascii_uppercase()) {
            Some('P') => Self::ParagraphText,
            Some('L') => Self::Label,
            Some('R') => Self::Ring,
            Some('C') => Self::Circle,
            Some('S') => Self::Star,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ParagraphText => "paragraph",
            Self::Label => "label",
            Self::Ring => "ring",
            Self::Circle => "circle",
            Self::Star => "star",
            Self::Other => "other",
        };
        write!(f, "{name}")
    }
}

/// The configured paragraph-initial glyph class.
///
/// A small reserved set of leading glyphs used structurally at paragraph
/// boundaries. Like the affix inventories, the class is versioned
/// configuration, supplied to [`StructureIndex::build`] rather than
/// hardcoded.
#[derive(Debug, Clone, Default)]
pub struct ParagraphGlyphs {
    initials: BTreeSet<char>,
}

impl ParagraphGlyphs {
    /// Creates the class from an in-memory glyph set.
    ///
    /// # Arguments
    ///
    /// * `initials` - The paragraph-initial glyphs.
    pub fn new<I>(initials: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        Self {
            initials: initials.into_iter().collect(),
        }
    }

    /// Reads the class from a text file with one glyph per line.
    ///
    /// `#` starts a comment and blank lines are ignored; an entry must be
    /// a single glyph.
    ///
    /// # Arguments
    ///
    /// * `rdr` - The reader of the glyph class file.
    ///
    /// # Errors
    ///
    /// [`VmsError::InvalidFormat`] is returned for a multi-glyph entry.
    pub fn from_reader<R>(rdr: R) -> Result<Self>
    where
        R: Read,
    {
        let reader = BufReader::new(rdr);
        let mut initials = BTreeSet::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut chars = line.chars();
            let glyph = chars.next();
            let rest = chars.next();
            if let (Some(glyph), None) = (glyph, rest) {
                initials.insert(glyph);
            } else {
                return Err(VmsError::invalid_format(
                    "paragraph.def",
                    "an entry must be a single glyph",
                ));
            }
        }
        Ok(Self { initials })
    }

    /// Reads the class from the file at the given path.
    ///
    /// # Errors
    ///
    /// [`VmsError::IoError`] is returned if the file cannot be opened.
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        Self::from_reader(File::open(path)?)
    }

    /// Returns whether the glyph belongs to the class.
    #[inline(always)]
    pub fn contains(&self, glyph: char) -> bool {
        self.initials.contains(&glyph)
    }

    /// Returns the glyphs of the class.
    #[inline(always)]
    pub fn initials(&self) -> &BTreeSet<char> {
        &self.initials
    }
}

/// One transcribed line: its identifier and the positions of its tokens.
#[derive(Debug, Clone)]
pub struct LineRecord {
    id: String,
    positions: Vec<usize>,
}

impl LineRecord {
    /// Returns the line identifier within its folio.
    #[inline(always)]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the positions of the line's tokens in the corpus sequence.
    #[inline(always)]
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }
}

/// A contiguous run of lines within a folio.
///
/// A paragraph always contains at least the line that opened it, so it is
/// never empty.
#[derive(Debug, Clone)]
pub struct Paragraph {
    line_range: Range<usize>,
    positions: Vec<usize>,
}

impl Paragraph {
    /// Returns the range of line indices (into the folio's line list)
    /// covered by this paragraph.
    #[inline(always)]
    pub fn line_range(&self) -> Range<usize> {
        self.line_range.clone()
    }

    /// Returns the positions of the paragraph's tokens in the corpus
    /// sequence.
    #[inline(always)]
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Returns the number of tokens in the paragraph.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns whether the paragraph holds no tokens.
    ///
    /// Always `false` for a paragraph built by [`StructureIndex::build`];
    /// provided for container-interface completeness.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// The structural index of one folio.
#[derive(Debug, Clone)]
pub struct FolioIndex {
    id: String,
    section: String,
    dominant_register: RegisterTag,
    lines: Vec<LineRecord>,
    paragraphs: Vec<Paragraph>,
}

impl FolioIndex {
    /// Returns the folio identifier.
    #[inline(always)]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the section tag of the folio, taken from its first token.
    #[inline(always)]
    pub fn section(&self) -> &str {
        &self.section
    }

    /// Returns the dominant register of the folio.
    ///
    /// Computed by majority vote over the folio's tokens; ties break
    /// toward the register order `A` < `B` < `AZC` so the result is a
    /// pure function of the corpus snapshot.
    #[inline(always)]
    pub fn dominant_register(&self) -> RegisterTag {
        self.dominant_register
    }

    /// Returns the folio's lines, in source order.
    #[inline(always)]
    pub fn lines(&self) -> &[LineRecord] {
        &self.lines
    }

    /// Returns the folio's paragraphs, in source order.
    ///
    /// A folio with zero lines has zero paragraphs.
    #[inline(always)]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Returns the lines covered by the given paragraph.
    pub fn paragraph_lines(&self, paragraph: &Paragraph) -> &[LineRecord] {
        &self.lines[paragraph.line_range()]
    }
}

/// The folio/paragraph/placement index of a token stream.
///
/// Built once per corpus snapshot; immutable afterwards. Folios appear in
/// first-appearance order.
pub struct StructureIndex {
    folios: Vec<FolioIndex>,
}

impl StructureIndex {
    /// Builds the structural index of a token stream.
    ///
    /// Tokens are grouped into folios and lines in source order. Within
    /// each folio, paragraphs are segmented by a two-state machine: the
    /// folio starts awaiting its first line, the first line always opens
    /// the first paragraph, and every later line opens a new paragraph
    /// exactly when its first legible token begins with a glyph of the
    /// paragraph-initial class. A line whose tokens are all fully
    /// uncertain extends the current paragraph. The end of the folio
    /// closes the open paragraph.
    ///
    /// # Arguments
    ///
    /// * `view` - The token stream to index, typically one transcription
    ///   pass.
    /// * `glyphs` - The paragraph-initial glyph class.
    pub fn build(view: &TokenView, glyphs: &ParagraphGlyphs) -> Self {
        let corpus = view.corpus();

        // Group positions into folios and lines, preserving first
        // appearance order for folios and source order inside them.
        let mut folio_order: HashMap<&str, usize> = HashMap::new();
        let mut raw: Vec<(usize, Vec<LineRecord>)> = vec![];
        for &pos in view.positions() {
            let token = &corpus.tokens()[pos];
            let folio_idx = match folio_order.get(token.folio()) {
                Some(&idx) => idx,
                None => {
                    folio_order.insert(token.folio(), raw.len());
                    raw.push((pos, vec![]));
                    raw.len() - 1
                }
            };
            let lines = &mut raw[folio_idx].1;
            match lines.last_mut() {
                Some(last) if last.id == token.line() => last.positions.push(pos),
                _ => lines.push(LineRecord {
                    id: token.line().to_string(),
                    positions: vec![pos],
                }),
            }
        }

        let folios = raw
            .into_iter()
            .map(|(first_pos, lines)| {
                let first = &corpus.tokens()[first_pos];
                let paragraphs = Self::segment_paragraphs(corpus, &lines, glyphs);
                let dominant_register = Self::dominant_register(corpus, &lines);
                FolioIndex {
                    id: first.folio().to_string(),
                    section: first.section().to_string(),
                    dominant_register,
                    lines,
                    paragraphs,
                }
            })
            .collect();

        Self { folios }
    }

    /// Runs the paragraph state machine over one folio's lines.
    fn segment_paragraphs(
        corpus: &TranscriptCorpus,
        lines: &[LineRecord],
        glyphs: &ParagraphGlyphs,
    ) -> Vec<Paragraph> {
        let mut paragraphs = vec![];
        let mut open: Option<usize> = None;

        let close = |paragraphs: &mut Vec<Paragraph>, start: usize, end: usize| {
            let positions = lines[start..end]
                .iter()
                .flat_map(|l| l.positions.iter().copied())
                .collect();
            paragraphs.push(Paragraph {
                line_range: start..end,
                positions,
            });
        };

        for (li, line) in lines.iter().enumerate() {
            let starts_new = line
                .positions
                .iter()
                .map(|&pos| &corpus.tokens()[pos])
                .find(|t| !t.is_fully_uncertain())
                .and_then(|t| t.word().chars().next())
                .is_some_and(|glyph| glyphs.contains(glyph));
            match open {
                // The folio awaits its first line: it opens the first
                // paragraph whatever its initial glyph is.
                None => open = Some(li),
                Some(start) if starts_new => {
                    close(&mut paragraphs, start, li);
                    open = Some(li);
                }
                Some(_) => {}
            }
        }
        if let Some(start) = open {
            close(&mut paragraphs, start, lines.len());
        }

        paragraphs
    }

    /// Majority-votes the register of a folio's tokens.
    fn dominant_register(
        corpus: &TranscriptCorpus,
        lines: &[LineRecord],
    ) -> RegisterTag {
        let mut counts = [0usize; 3];
        for line in lines {
            for &pos in &line.positions {
                counts[corpus.tokens()[pos].register() as usize] += 1;
            }
        }
        // Ties break toward the variant order A < B < AZC.
        [RegisterTag::A, RegisterTag::B, RegisterTag::Azc]
            .into_iter()
            .zip(counts)
            .max_by_key(|&(tag, count)| (count, std::cmp::Reverse(tag)))
            .map(|(tag, _)| tag)
            .unwrap_or(RegisterTag::Azc)
    }

    /// Returns the folios in first-appearance order.
    #[inline(always)]
    pub fn folios(&self) -> &[FolioIndex] {
        &self.folios
    }

    /// Looks up a folio by its identifier.
    pub fn folio(&self, folio_id: &str) -> Option<&FolioIndex> {
        self.folios.iter().find(|f| f.id() == folio_id)
    }

    /// Returns the number of indexed folios.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.folios.len()
    }

    /// Returns whether the index holds no folios.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.folios.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::TranscriptCorpus;

    fn gallows() -> ParagraphGlyphs {
        ParagraphGlyphs::new(['p', 'f', 't', 'k'])
    }

    #[test]
    fn test_placement_bucketing() {
        assert_eq!(Placement::ParagraphText, Placement::from_code("P1"));
        assert_eq!(Placement::Label, Placement::from_code("L"));
        assert_eq!(Placement::Ring, Placement::from_code("R2"));
        assert_eq!(Placement::Circle, Placement::from_code("C1"));
        assert_eq!(Placement::Star, Placement::from_code("S"));
        assert_eq!(Placement::Other, Placement::from_code("X0"));
        assert_eq!(Placement::Other, Placement::from_code(""));
    }

    #[test]
    fn test_paragraph_glyphs_from_reader() {
        let data = "# gallows class, v1\np\nf\nt\nk\n";
        let glyphs = ParagraphGlyphs::from_reader(data.as_bytes()).unwrap();
        assert!(glyphs.contains('p'));
        assert!(!glyphs.contains('d'));
        assert_eq!(4, glyphs.initials().len());
    }

    #[test]
    fn test_paragraph_glyphs_rejects_multi_glyph_entry() {
        assert!(ParagraphGlyphs::from_reader("pf".as_bytes()).is_err());
    }

    #[test]
    fn test_segmentation() {
        let data = "\
word,folio,line,section,register,placement,transcriber
daiin,f1r,1,herbal,A,P1,H
chol,f1r,1,herbal,A,P1,H
shol,f1r,2,herbal,A,P1,H
pchedy,f1r,3,herbal,A,P1,H
okaiin,f1r,3,herbal,A,P1,H
dchor,f1r,4,herbal,A,P1,H
";
        let corpus = TranscriptCorpus::from_reader(data.as_bytes()).unwrap();
        let view = corpus.primary_track("H");
        let index = StructureIndex::build(&view, &gallows());

        let folio = index.folio("f1r").unwrap();
        assert_eq!(4, folio.lines().len());
        // Line 1 opens the folio's first paragraph even though "daiin"
        // does not begin with a gallows glyph; line 3 ("pchedy") starts a
        // new one; lines 2 and 4 extend.
        assert_eq!(2, folio.paragraphs().len());
        assert_eq!(0..2, folio.paragraphs()[0].line_range());
        assert_eq!(2..4, folio.paragraphs()[1].line_range());
        assert_eq!(3, folio.paragraphs()[0].len());
        assert_eq!(3, folio.paragraphs()[1].len());
    }

    #[test]
    fn test_no_paragraph_is_empty() {
        let data = "\
word,folio,line,section,register,placement,transcriber
pol,f1r,1,herbal,A,P1,H
tol,f1r,2,herbal,A,P1,H
kol,f1r,3,herbal,A,P1,H
";
        let corpus = TranscriptCorpus::from_reader(data.as_bytes()).unwrap();
        let index = StructureIndex::build(&corpus.view(), &gallows());
        let folio = index.folio("f1r").unwrap();
        // Every line is paragraph-initial, so each forms its own
        // single-line paragraph.
        assert_eq!(3, folio.paragraphs().len());
        for paragraph in folio.paragraphs() {
            assert!(!paragraph.is_empty());
            assert_eq!(1, paragraph.len());
        }
    }

    #[test]
    fn test_fully_uncertain_first_token_is_not_initial() {
        let data = "\
word,folio,line,section,register,placement,transcriber
daiin,f1r,1,herbal,A,P1,H
???,f1r,2,herbal,A,P1,H
chol,f1r,2,herbal,A,P1,H
";
        let corpus = TranscriptCorpus::from_reader(data.as_bytes()).unwrap();
        let index = StructureIndex::build(&corpus.view(), &gallows());
        let folio = index.folio("f1r").unwrap();
        // The fully uncertain token is skipped; "chol" is the first
        // legible token of line 2 and is not paragraph-initial, so the
        // line folds into the open paragraph.
        assert_eq!(1, folio.paragraphs().len());
        assert_eq!(3, folio.paragraphs()[0].len());
    }

    #[test]
    fn test_uncertain_only_line_extends_paragraph() {
        let data = "\
word,folio,line,section,register,placement,transcriber
daiin,f1r,1,herbal,A,P1,H
??,f1r,2,herbal,A,P1,H
pol,f1r,3,herbal,A,P1,H
";
        let corpus = TranscriptCorpus::from_reader(data.as_bytes()).unwrap();
        let index = StructureIndex::build(&corpus.view(), &gallows());
        let folio = index.folio("f1r").unwrap();
        assert_eq!(2, folio.paragraphs().len());
        assert_eq!(0..2, folio.paragraphs()[0].line_range());
    }

    #[test]
    fn test_dominant_register_majority_and_tie_break() {
        let data = "\
word,folio,line,section,register,placement,transcriber
daiin,f1r,1,herbal,A,P1,H
chol,f1r,1,herbal,B,P1,H
shol,f1r,2,herbal,B,P1,H
otedy,f75r,1,bio,B,P1,H
okar,f75r,1,bio,A,P1,H
";
        let corpus = TranscriptCorpus::from_reader(data.as_bytes()).unwrap();
        let index = StructureIndex::build(&corpus.view(), &gallows());
        assert_eq!(
            RegisterTag::B,
            index.folio("f1r").unwrap().dominant_register()
        );
        // One A, one B: the tie breaks toward A.
        assert_eq!(
            RegisterTag::A,
            index.folio("f75r").unwrap().dominant_register()
        );
    }

    #[test]
    fn test_folio_first_appearance_order() {
        let data = "\
word,folio,line,section,register,placement,transcriber
otedy,f75r,1,bio,B,P1,H
daiin,f1r,1,herbal,A,P1,H
okar,f75r,2,bio,B,P1,H
";
        let corpus = TranscriptCorpus::from_reader(data.as_bytes()).unwrap();
        let index = StructureIndex::build(&corpus.view(), &gallows());
        let ids: Vec<_> = index.folios().iter().map(|f| f.id()).collect();
        assert_eq!(vec!["f75r", "f1r"], ids);
        assert_eq!(2, index.folio("f75r").unwrap().lines().len());
    }

    #[test]
    fn test_empty_view_yields_empty_index() {
        let data = "\
word,folio,line,section,register,placement,transcriber
daiin,f1r,1,herbal,A,P1,H
";
        let corpus = TranscriptCorpus::from_reader(data.as_bytes()).unwrap();
        let view = corpus.primary_track("no-such-pass");
        let index = StructureIndex::build(&view, &gallows());
        assert!(index.is_empty());
        assert!(index.folio("f1r").is_none());
    }
}
