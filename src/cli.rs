use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cascinstall")]
#[command(version)]
#[command(about = "Inspect CASC install manifests", long_about = None)]
#[command(after_help = "Examples:\n  \
  cascinstall list install.bin -t Windows -t enUS     files for a Windows enUS install\n  \
  cascinstall list install.bin --csv -o install.csv   export the whole manifest as CSV\n  \
  cascinstall hash --path Interface/Icons/foo.blp     lookup key for an archive path")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short = 'q', global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List manifest files, optionally filtered by tag
    List(ListArgs),
    /// List tags with their type and file count
    Tags(ManifestArgs),
    /// Show the manifest header and totals
    Info(ManifestArgs),
    /// Print the lookup3 hash of a string
    Hash(HashArgs),
}

#[derive(Args, Debug)]
pub struct ManifestArgs {
    /// Install manifest file (already decoded from its archive container)
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub input: ManifestArgs,

    /// Only files carrying one of these tags (default: all files)
    #[arg(short = 't', long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Write `;`-separated CSV instead of `name [tags]` lines
    #[arg(long)]
    pub csv: bool,

    /// Write to a file instead of stdout
    #[arg(short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output buffer size in bytes before waiting for the destination
    #[arg(long, value_name = "BYTES", default_value_t = crate::io::DEFAULT_HIGH_WATER_MARK)]
    pub buffer: usize,

    /// Fail if bytes remain after the last file record
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct HashArgs {
    /// Text to hash (UTF-8 bytes)
    pub text: String,

    /// Primary seed
    #[arg(long, default_value_t = 0)]
    pub seed1: u32,

    /// Secondary seed
    #[arg(long, default_value_t = 0)]
    pub seed2: u32,

    /// Normalise as an archive path first (upper-case, `\` separators)
    #[arg(long)]
    pub path: bool,
}

impl Cli {
    /// Log filter directive for the verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
