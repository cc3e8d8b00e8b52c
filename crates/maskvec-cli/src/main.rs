use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info, LevelFilter};
use maskvec_rs::{mask, trace_many, Params, Rle};
use serde::Serialize;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "maskvec")]
#[command(about = "Convert COCO run-length masks into traced boundary paths")]
struct Cli {
    /// Log progress to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Trace each RLE into an array of path strings
    Trace {
        /// JSON file holding one RLE object or an array of them
        file: PathBuf,

        /// Drop loops enclosing fewer pixels than this
        #[arg(long, default_value_t = 0)]
        min_area: u64,

        /// Keep every loop in extraction direction instead of reversing holes
        #[arg(long)]
        no_holes: bool,
    },
    /// Print area and bounding box of each RLE
    Stats {
        file: PathBuf,
    },
    /// Rewrite each RLE with COCO compressed-string counts
    Compress {
        file: PathBuf,
    },
}

#[derive(Serialize)]
struct Stats {
    area: u64,
    bbox: [u32; 4],
}

#[derive(Serialize)]
struct CompressedRle {
    size: [u32; 2],
    counts: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let output = match cli.command {
        Command::Trace {
            file,
            min_area,
            no_holes,
        } => {
            let rles = load_rles(&file)?;
            let params = Params {
                resolve_holes: !no_holes,
                min_area,
            };
            info!("tracing {} masks from {:?}", rles.len(), file);
            let paths = trace_many(&rles, &params)
                .into_iter()
                .enumerate()
                .map(|(i, r)| r.with_context(|| format!("failed to trace mask {}", i)))
                .collect::<Result<Vec<_>>>()?;
            serde_json::to_string(&paths)?
        }
        Command::Stats { file } => {
            let stats: Vec<Stats> = load_rles(&file)?
                .iter()
                .map(|rle| Stats {
                    area: mask::area(rle),
                    bbox: mask::to_bbox(rle),
                })
                .collect();
            serde_json::to_string(&stats)?
        }
        Command::Compress { file } => {
            let compressed: Vec<CompressedRle> = load_rles(&file)?
                .iter()
                .map(|rle| CompressedRle {
                    size: [rle.h, rle.w],
                    counts: mask::rle_to_string(rle),
                })
                .collect();
            serde_json::to_string(&compressed)?
        }
    };

    println!("{}", output);
    Ok(())
}

/// Read a file holding either a single RLE object or an array of them.
fn load_rles(path: &Path) -> Result<Vec<Rle>> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?;
    let value: Value =
        serde_json::from_str(&text).with_context(|| format!("{:?} is not valid JSON", path))?;

    let rles = match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value(item).with_context(|| format!("invalid RLE at index {}", i))
            })
            .collect::<Result<Vec<Rle>>>()?,
        other => vec![serde_json::from_value(other).context("invalid RLE")?],
    };
    debug!("loaded {} RLEs from {:?}", rles.len(), path);
    Ok(rles)
}
