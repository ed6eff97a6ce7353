//! A utility that decomposes words morphologically.
//!
//! This binary loads an affix definition file, reads whitespace-separated
//! words from standard input, and writes one analysis per word in the
//! selected output format (plain, tsv, or detail).

use std::error::Error;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use vms_core::{AffixTable, Decomposer};

use clap::Parser;

/// The output mode.
#[derive(Clone, Debug)]
enum OutputMode {
    Plain,
    Tsv,
    Detail,
}

impl FromStr for OutputMode {
    type Err = &'static str;

    /// Parses an output mode from its name.
    ///
    /// # Arguments
    ///
    /// * `mode` - One of "plain", "tsv", or "detail".
    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "plain" => Ok(Self::Plain),
            "tsv" => Ok(Self::Tsv),
            "detail" => Ok(Self::Detail),
            _ => Err("Could not parse a mode"),
        }
    }
}

/// Command-line arguments.
#[derive(Parser, Debug)]
#[clap(name = "decompose", about = "Decomposes words into prefix/middle/suffix")]
struct Args {
    /// Affix definition file.
    #[clap(short = 'a', long)]
    affix: PathBuf,

    /// Output mode. Choices are plain, tsv, and detail.
    #[clap(short = 'O', long, default_value = "plain")]
    output_mode: OutputMode,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();

    eprintln!("Loading the affix table...");
    let table = AffixTable::from_path(&args.affix)?;
    let decomposer = Decomposer::new(table);

    eprintln!("Ready to decompose");

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    let lines = std::io::stdin().lock().lines();
    for line in lines {
        let line = line?;
        for word in line.split_whitespace() {
            let d = decomposer.decompose(word);
            match args.output_mode {
                OutputMode::Plain => {
                    writeln!(&mut out, "{}-{}-{}", d.prefix(), d.middle(), d.suffix())?;
                }
                OutputMode::Tsv => {
                    writeln!(
                        &mut out,
                        "{}\t{}\t{}\t{}",
                        word,
                        d.prefix(),
                        d.middle(),
                        d.suffix(),
                    )?;
                }
                OutputMode::Detail => {
                    writeln!(
                        &mut out,
                        "{}\tprefix={}\tmiddle={}\tsuffix={}\tligature={}\tbare={}",
                        word,
                        d.prefix(),
                        d.middle(),
                        d.suffix(),
                        d.has_ligature(),
                        d.is_bare(),
                    )?;
                }
            }
        }
        if is_tty {
            out.flush()?;
        }
    }

    Ok(())
}
