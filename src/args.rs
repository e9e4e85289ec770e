use clap::{Parser, Subcommand};
use glyphsmith::{
    kerning::{GroupKind, LineLayout, Ordering, Script},
    proofs::ALPHABET,
    wordfilter::WordFilterMode,
};
use std::path::PathBuf;

/// Glyph-data chores for font sources
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub verbosity: clap_verbosity_flag::Verbosity,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate kerning strings, one tab per secondary group
    Kern(KernArgs),
    /// Apply filters to a font and save the result
    Filter(FilterArgs),
    /// Generate proof tabs
    Proof(ProofArgs),
    /// Pick words out of a text by the characters they use
    Words(WordsArgs),
}

/// Where tab text goes
#[derive(clap::Args, Debug)]
#[command(next_help_heading = "Output")]
pub struct TabOutput {
    /// Write each tab to a numbered text file in this directory instead of standard output
    #[arg(short = 'd', long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(clap::Args, Debug)]
pub struct KernArgs {
    /// Font source to take glyphs from
    pub font: String,

    /// Writing system of the letter groups
    #[arg(short, long, value_enum, default_value_t = Script::Latin)]
    pub script: Script,

    /// Group to kern
    #[arg(short, long, value_enum)]
    pub primary: GroupKind,

    /// Groups to kern it against (comma-separated)
    #[arg(short, long, value_enum, value_delimiter = ',')]
    pub against: Vec<GroupKind>,

    #[arg(short, long, default_value_t, value_enum)]
    pub ordering: Ordering,

    #[arg(short, long, default_value_t, value_enum)]
    pub layout: LineLayout,

    /// JSON file replacing the built-in character groups
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub output: TabOutput,
}

#[derive(clap::Args, Debug)]
pub struct FilterArgs {
    /// Font source to filter
    pub input: String,

    /// Output file (.ufo or .json)
    pub output: String,

    /// Only touch these glyphs (comma-separated); filters on the whole font ignore this
    #[arg(short, long, value_delimiter = ',')]
    pub glyphs: Vec<String>,
}

#[derive(clap::Args, Debug)]
pub struct ProofArgs {
    /// Font source to proof
    pub font: String,

    #[command(subcommand)]
    pub proof: Proof,

    #[command(flatten)]
    pub output: TabOutput,
}

#[derive(Subcommand, Debug)]
pub enum Proof {
    /// Each currency symbol against every figure
    Currency,
    /// Glyphs alongside each letter of the alphabet
    Alphabet {
        /// Glyphs to show (comma-separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        glyphs: Vec<String>,
        /// Letters to pair them with
        #[arg(long, default_value = ALPHABET)]
        alphabet: String,
    },
    /// One letter using each mark
    DiacriticSpecimen,
    /// Every glyph using each mark, one tab per mark
    Diacritics,
    /// Glyphs whose side bearings differ between masters
    Sidebearings {
        /// Master to compare against; the first master if not given
        #[arg(short, long)]
        master: Option<String>,
    },
    /// Glyphs drawn with live strokes, one tab per master
    LiveStrokes,
}

#[derive(clap::Args, Debug)]
pub struct WordsArgs {
    /// Characters to filter by
    pub characters: String,

    /// Text file to read; standard input if not given
    pub input: Option<PathBuf>,

    #[arg(short, long, default_value_t, value_enum)]
    pub mode: WordFilterMode,

    /// Match upper and lower case exactly
    #[arg(long)]
    pub case_sensitive: bool,
}
