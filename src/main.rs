//! Main entry point for the cascinstall CLI application.
//!
//! This binary decodes install manifest files and lists, filters or
//! summarises their contents.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cascinstall::cli::{Command, HashArgs, ListArgs, ManifestArgs};
use cascinstall::{
    BackpressuredWriter, Catalog, CatalogIndex, Cli, HashKey, InstallManifestParser, LineSink,
    ListFormat, ParserConfig, StreamSink, TagFilter, WriterConfig,
};

/// Application entry point.
///
/// Parses command-line arguments, sets up logging and dispatches to the
/// subcommand handler.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::List(args) => list_files(&args).await,
        Command::Tags(args) => list_tags(&args).await,
        Command::Info(args) => show_info(&args).await,
        Command::Hash(args) => {
            print_hash(&args);
            Ok(())
        }
    }
}

/// Read and decode a manifest file.
async fn load_catalog(args: &ManifestArgs, config: ParserConfig) -> Result<Catalog> {
    let data = cascinstall::io::read_buffer(&args.manifest).await?;
    let catalog = InstallManifestParser::with_config(config)
        .parse(&data)
        .with_context(|| format!("failed to decode {}", args.manifest.display()))?;

    info!(
        "loaded {} ({} tags, {} files)",
        args.manifest.display(),
        catalog.tags().len(),
        catalog.files().len()
    );
    Ok(catalog)
}

/// List manifest files through the backpressured writer.
///
/// Output goes to stdout unless `-o` names a file. Only files carrying at
/// least one of the `-t` tags are listed when any are given.
async fn list_files(args: &ListArgs) -> Result<()> {
    let config = ParserConfig::new().require_fully_consumed(args.strict);
    let catalog = load_catalog(&args.input, config).await?;

    let filter = if args.tags.is_empty() {
        TagFilter::Any
    } else {
        for tag in &args.tags {
            if catalog.tag(tag).is_none() {
                tracing::warn!("tag '{}' does not exist in this manifest", tag);
            }
        }
        TagFilter::only(args.tags.iter().cloned())
    };
    let format = if args.csv {
        ListFormat::Csv
    } else {
        ListFormat::Plain
    };

    let writer_config = WriterConfig::new().high_water_mark(args.buffer);
    let count = match &args.output {
        Some(path) => {
            let writer = BackpressuredWriter::create(path, &writer_config).await?;
            stream_listing(&catalog, &filter, format, writer).await?
        }
        None => {
            let writer =
                BackpressuredWriter::new(StreamSink::new(tokio::io::stdout(), &writer_config));
            stream_listing(&catalog, &filter, format, writer).await?
        }
    };

    info!("listed {} files", count);
    Ok(())
}

/// Write the listing, then close the writer even if the listing failed.
async fn stream_listing<S: LineSink>(
    catalog: &Catalog,
    filter: &TagFilter,
    format: ListFormat,
    mut writer: BackpressuredWriter<S>,
) -> Result<usize> {
    let listed = cascinstall::write_listing(catalog, filter, format, &mut writer).await;
    let closed = writer.close().await;
    let count = listed?;
    closed?;
    Ok(count)
}

/// List tags with their type and the number of files each selects.
async fn list_tags(args: &ManifestArgs) -> Result<()> {
    let catalog = load_catalog(args, ParserConfig::default()).await?;
    let index = CatalogIndex::build(&catalog);

    println!("{:<24}  {:<16}  {:>8}", "Tag", "Type", "Files");
    println!("{}", "-".repeat(52));
    for tag in catalog.tags() {
        println!(
            "{:<24}  {:<16}  {:>8}",
            tag.name,
            tag.tag_type.label(),
            index.files_for_tag(&tag.name).len()
        );
    }

    Ok(())
}

/// Print the manifest header and size totals.
async fn show_info(args: &ManifestArgs) -> Result<()> {
    let catalog = load_catalog(args, ParserConfig::default()).await?;
    let header = catalog.header();

    println!("Version:    {}", header.version);
    println!("Hash size:  {} bytes", header.hash_size);
    println!("Tags:       {}", header.tag_count);
    println!("Files:      {}", header.file_count);
    println!("Mask size:  {} bytes", header.mask_size());
    println!("Total size: {}", format_size(catalog.total_size()));

    Ok(())
}

/// Print the lookup3 hash of the given text.
fn print_hash(args: &HashArgs) {
    let key = if args.path {
        if args.seed1 != 0 || args.seed2 != 0 {
            tracing::warn!("seeds are ignored with --path");
        }
        HashKey::for_path(&args.text)
    } else {
        cascinstall::hash(args.text.as_bytes(), args.seed1, args.seed2)
    };

    println!("{}  (low {:08x}, high {:08x})", key, key.low, key.high);
}

/// Format a byte size into a human-readable string.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_size(500), "500 bytes");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
