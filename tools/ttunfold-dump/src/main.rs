//! Print the matricized layout of a tensor train.
//!
//! Usage: `ttunfold-dump cores.json [--unfold I_JK] [--strict] [--cells]`
//!
//! The input is a JSON list of arrays (`key`, `shape`, `data`, and
//! optionally `dtype` and `order`), or an object with such a list under
//! `cores`. Set `RUST_LOG=debug` to see what the engine resolves.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use ttunfold::{ArrayEntry, Axis, MatricizeOptions, TTMat, TensorTrain, UnfoldDir};

#[derive(Parser)]
#[command(name = "ttunfold-dump")]
#[command(about = "Print the matricized layout of a tensor train")]
struct Args {
    /// JSON file with the core arrays
    input: PathBuf,

    /// Unfold direction (IJ_K, JI_K, I_JK, I_KJ, IJ_KL); defaults to the train's default
    #[arg(short, long)]
    unfold: Option<UnfoldDir>,

    /// Ignore the boundary overrides of the first and last core
    #[arg(long)]
    strict: bool,

    /// Print one line per element with its matrix cell and tooltip
    #[arg(long)]
    cells: bool,

    /// List the unfold directions available for the train and exit
    #[arg(long)]
    list_unfolds: bool,
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Input {
    List(Vec<ArrayEntry>),
    Object { cores: Vec<ArrayEntry> },
}

impl Input {
    fn into_entries(self) -> Vec<ArrayEntry> {
        match self {
            Input::List(entries) => entries,
            Input::Object { cores } => cores,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let content = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let input: Input = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;
    let entries = input.into_entries();
    tracing::debug!(input = %args.input.display(), arrays = entries.len(), "read input");
    let tt = TensorTrain::from_entries(entries).context("Failed to build tensor train")?;

    if args.list_unfolds {
        for unfold in tt.available_unfolds() {
            let marker = if *unfold == tt.default_unfold() { " (default)" } else { "" };
            println!("{:<6} {}{}", unfold.name(), unfold.description(), marker);
        }
        return Ok(());
    }

    let options = MatricizeOptions {
        unfold: args.unfold,
        strict: args.strict,
    };
    let mat = tt
        .matricize_with(&options)
        .context("Failed to matricize tensor train")?;

    print_layout(&tt, &mat, args.cells);
    Ok(())
}

fn print_layout(tt: &TensorTrain, mat: &TTMat, cells: bool) {
    println!(
        "{} tensor train, {} cores, unfold {} ({}){}",
        tt.kind(),
        mat.len(),
        mat.unfold(),
        mat.unfold().description(),
        if mat.strict() { ", strict" } else { "" }
    );

    for (core, fig) in mat.iter() {
        let shape = core.core().shape();
        println!();
        println!("{}  shape {:?}", fig.title(), shape);
        for axis in Axis::BOTH {
            let name = match axis {
                Axis::X => "x",
                Axis::Y => "y",
            };
            println!(
                "  {}: {:<12} matrix {:>4} = inner {:>3} * outer {:>3}",
                name,
                fig.axis_label(axis),
                core.mat_shape().at(axis),
                core.inner_shape().at(axis),
                core.outer_shape().at(axis),
            );
        }

        if cells {
            for (i, pos, value) in core.cells() {
                let tip = fig.tooltip_text_with(&core.idx_to_orig_sub(i), ", ");
                println!("    [{:>4}] ({:>3}, {:>3}) {:>12.6}  {}", i, pos.y, pos.x, value, tip);
            }
        }
    }
}
