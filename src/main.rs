//! Command-line front end: inspect, export, and carve bookmark files.

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use bookcarve::export::export;
use bookcarve::source::Section;
use bookcarve::{carve, codec, CarveMatch, Document, Summary};

#[derive(Parser)]
#[command(name = "bookcarve", about = "Recover and validate Chromium bookmark files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse and validate a bookmarks file, printing its vital signs.
    Inspect {
        /// Bookmarks file (- for stdin).
        file: PathBuf,
        /// Also print the bookmark tree.
        #[arg(short, long)]
        tree: bool,
        /// Show dates in the tree listing.
        #[arg(short, long)]
        verbose: bool,
    },
    /// Export a bookmarks file as importable HTML.
    Export {
        /// Bookmarks file (- for stdin).
        file: PathBuf,
        /// Destination (- for stdout).
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Scan disk images or dumps for recoverable bookmark files.
    Carve {
        /// Input images.
        #[arg(required = true)]
        images: Vec<PathBuf>,
        /// Byte offset to start scanning at.
        #[arg(long, default_value_t = 0)]
        start: u64,
        /// Number of bytes to scan (default: to end of input).
        #[arg(long)]
        length: Option<u64>,
        /// Write each recovered file into this directory.
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Emit one JSON object per match instead of text.
        #[arg(short, long)]
        json: bool,
        /// Suppress per-match reporting.
        #[arg(short, long)]
        quiet: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match Cli::parse().command {
        Command::Inspect {
            file,
            tree,
            verbose,
        } => inspect(&file, tree, verbose),
        Command::Export { file, output } => export_html(&file, &output),
        Command::Carve {
            images,
            start,
            length,
            output,
            json,
            quiet,
        } => carve_images(&images, start, length, output.as_deref(), json, quiet),
    }
}

/// Reads and strictly validates a bookmarks file; an invalid checksum is
/// fatal here (unlike carving, inspect targets a file the user believes
/// is genuine and wants told otherwise).
fn read_document(path: &Path) -> Result<Document> {
    let bytes = if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        buf
    } else {
        fs::read(path).with_context(|| format!("read {}", path.display()))?
    };
    let (doc, valid) = codec::decode(&bytes)?;
    if !valid {
        bail!("parse bookmarks: invalid checksum");
    }
    Ok(doc)
}

fn inspect(path: &Path, tree: bool, verbose: bool) -> Result<()> {
    let doc = read_document(path)?;
    let summary = Summary::of(&doc);

    println!("Version: {}", doc.version);
    println!("Folders: {}", summary.folders);
    println!("Bookmarks: {}", summary.urls);
    println!("Modified: {}", summary.most_recent);
    println!("Checksum: {}", doc.checksum);
    println!("Bookmarks bar GUID: {}", doc.roots.bookmark_bar.guid);

    if tree {
        println!();
        for item in doc.walk() {
            let pad = "  ".repeat(item.depth());
            if item.node.is_folder() {
                if verbose && !item.node.date_added.is_zero() {
                    println!(
                        "{}+ {} [{} -> {}]",
                        pad, item.node.name, item.node.date_added, item.node.date_modified
                    );
                } else {
                    println!("{}+ {}", pad, item.node.name);
                }
            } else {
                if verbose && !item.node.date_added.is_zero() {
                    println!("{}- {} [{}]", pad, item.node.name, item.node.date_added);
                } else {
                    println!("{}- {}", pad, item.node.name);
                }
                println!("{}  {}", pad, item.node.url.as_deref().unwrap_or(""));
            }
        }
        println!();
    }
    Ok(())
}

fn export_html(path: &Path, output: &Path) -> Result<()> {
    let doc = read_document(path)?;
    if output.as_os_str() == "-" {
        export(io::stdout().lock(), &doc, |_| None::<String>)?;
    } else {
        let f = File::create(output).with_context(|| format!("create {}", output.display()))?;
        export(f, &doc, |_| None::<String>)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct MatchRecord {
    input: InputRecord,
    #[serde(rename = "match")]
    found: FoundRecord,
    bookmarks: BookmarksRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
}

#[derive(Serialize)]
struct InputRecord {
    path: String,
    basename: String,
}

#[derive(Serialize)]
struct FoundRecord {
    offset: u64,
    length: u64,
}

#[derive(Serialize)]
struct BookmarksRecord {
    bar_guid: String,
    checksum: String,
    date: DateRecord,
    count: CountRecord,
}

#[derive(Serialize)]
struct DateRecord {
    unix: i64,
    unix_micros: i64,
    yyyymmdd: String,
}

#[derive(Serialize)]
struct CountRecord {
    folders: u64,
    urls: u64,
}

fn carve_images(
    images: &[PathBuf],
    start: u64,
    length: Option<u64>,
    output: Option<&Path>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    if let Some(dir) = output {
        fs::create_dir_all(dir).with_context(|| format!("create output dir {}", dir.display()))?;
    }

    let mut failed = false;
    for path in images {
        if let Err(err) = carve_image(path, start, length, output, json, quiet) {
            eprintln!("error: failed to carve {}: {:#}", path.display(), err);
            failed = true;
        }
    }
    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn carve_image(
    path: &Path,
    start: u64,
    length: Option<u64>,
    output: Option<&Path>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let section = Section::new(file, start, length.unwrap_or(u64::MAX));

    carve(&section, |m: CarveMatch| {
        report_match(path, start, &m, output, json, quiet)?;
        Ok::<_, anyhow::Error>(ControlFlow::Continue(()))
    })
}

fn report_match(
    path: &Path,
    start: u64,
    m: &CarveMatch,
    output: Option<&Path>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let summary = Summary::of(&m.document);
    let basename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let offset = start + m.offset;

    let out_name = output.map(|_| {
        format!(
            "bookmarks.{}-{}.{}.json",
            sanitize(&basename),
            offset,
            m.document.checksum
        )
    });

    if !quiet {
        if json {
            let record = MatchRecord {
                input: InputRecord {
                    path: path.display().to_string(),
                    basename,
                },
                found: FoundRecord {
                    offset,
                    length: m.len(),
                },
                bookmarks: BookmarksRecord {
                    bar_guid: m.document.roots.bookmark_bar.guid.to_string(),
                    checksum: m.document.checksum.clone(),
                    date: DateRecord {
                        unix: summary.most_recent.to_unix_secs(),
                        unix_micros: summary.most_recent.to_unix_micros(),
                        yyyymmdd: summary
                            .most_recent
                            .to_datetime()
                            .map(|dt| dt.format("%Y%m%d").to_string())
                            .unwrap_or_default(),
                    },
                    count: CountRecord {
                        folders: summary.folders,
                        urls: summary.urls,
                    },
                },
                output: out_name.clone(),
            };
            let mut stdout = io::stdout().lock();
            serde_json::to_writer(&mut stdout, &record)?;
            stdout.write_all(b"\n")?;
        } else {
            let dest = out_name
                .as_deref()
                .map(|n| format!(" -> {}", n))
                .unwrap_or_default();
            println!(
                "{}:{}+{} [{} @ {}] {} ({},{}){}",
                path.display(),
                offset,
                m.len(),
                m.document.roots.bookmark_bar.guid,
                summary.most_recent,
                m.document.checksum,
                summary.folders,
                summary.urls,
                dest
            );
        }
    }

    if let (Some(dir), Some(name)) = (output, out_name) {
        fs::write(dir.join(&name), &m.bytes).with_context(|| format!("write output {}", name))?;
    }
    Ok(())
}

/// Restricts recovered-file names to a safe character set.
fn sanitize(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '.' | '_' | '-' | ' ' => c,
            _ => '_',
        })
        .collect()
}
