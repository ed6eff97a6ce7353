//! A utility that reports shared and exclusive vocabulary.
//!
//! This binary loads a transcript and an affix table, filters a register
//! pair down to the primary transcription pass and to clean tokens, and
//! prints the shared and register-exclusive middle units.

use std::error::Error;
use std::path::PathBuf;

use vms_core::{AffixTable, Decomposer, RegisterTag, TranscriptCorpus, VocabularyIndex};

use clap::Parser;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[clap(name = "vocab", about = "Classifies middle units as shared or exclusive")]
struct Args {
    /// Transcript file.
    #[clap(short = 't', long)]
    transcript: PathBuf,

    /// Affix definition file.
    #[clap(short = 'a', long)]
    affix: PathBuf,

    /// Identifier of the primary transcription pass.
    #[clap(short = 'T', long, default_value = "H")]
    transcriber: String,

    /// The register pair to compare.
    ///
    /// Specify two comma-separated register names (A, B, or AZC).
    #[clap(short = 'r', long, value_delimiter(','), default_values = ["A", "B"])]
    registers: Vec<RegisterTag>,

    /// Prints the full membership lists instead of only the counts.
    #[clap(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();
    let [reg_a, reg_b]: [RegisterTag; 2] = args
        .registers
        .as_slice()
        .try_into()
        .map_err(|_| "exactly two registers must be specified")?;

    eprintln!("Loading the transcript...");
    let corpus = TranscriptCorpus::from_path(&args.transcript)?;
    eprintln!(
        "Loaded {} tokens ({} malformed rows skipped)",
        corpus.len(),
        corpus.skipped_rows(),
    );

    let table = AffixTable::from_path(&args.affix)?;
    let decomposer = Decomposer::new(table);

    let view_a = corpus
        .primary_track(&args.transcriber)
        .register(reg_a)
        .clean();
    let view_b = corpus
        .primary_track(&args.transcriber)
        .register(reg_b)
        .clean();
    eprintln!(
        "Register {reg_a}: {} tokens, register {reg_b}: {} tokens",
        view_a.len(),
        view_b.len(),
    );

    let vocab = VocabularyIndex::classify(&decomposer, &view_a, &view_b);

    println!("Distinct middles = {}", vocab.len());
    println!("Shared = {}", vocab.shared().count());
    println!("Exclusive to {reg_a} = {}", vocab.exclusive_a().count());
    println!("Exclusive to {reg_b} = {}", vocab.exclusive_b().count());

    if args.verbose {
        println!("[shared]");
        for middle in vocab.shared() {
            println!("{middle}");
        }
        println!("[exclusive {reg_a}]");
        for middle in vocab.exclusive_a() {
            println!("{middle}");
        }
        println!("[exclusive {reg_b}]");
        for middle in vocab.exclusive_b() {
            println!("{middle}");
        }
    }

    Ok(())
}
