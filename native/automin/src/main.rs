//! # automin CLI entry point
//!
//! Reads an NFA, determinizes it, minimizes the DFA and prints both.

use anyhow::Context;
use automin::{Automaton, minimize, subset_construction, text};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Convert an NFA to a DFA and minimize it.
#[derive(Parser, Debug)]
#[command(name = "automin", version, about)]
struct Cli {
    /// Automaton description to read.
    input: PathBuf,

    /// Format of the input file.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    from: Format,

    /// Format to print results in.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    to: Format,

    /// Stop after subset construction.
    #[arg(long)]
    dfa_only: bool,

    /// Raise the log level (-v debug, -vv trace) when RUST_LOG is unset.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn render(automaton: &Automaton, format: Format) -> anyhow::Result<String> {
    Ok(match format {
        Format::Text => automaton.to_string(),
        Format::Json => text::to_json(automaton)?,
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let nfa = match cli.from {
        Format::Text => text::read_file(&cli.input),
        Format::Json => text::read_json_file(&cli.input),
    }
    .with_context(|| format!("cannot read {}", cli.input.display()))?;
    tracing::info!(
        states = nfa.states().len(),
        symbols = nfa.alphabet().len(),
        transitions = nfa.transition_count(),
        "read automaton"
    );

    let dfa = subset_construction(&nfa).context("subset construction failed")?;
    println!("DFA:\n{}", render(&dfa, cli.to)?);

    if !cli.dfa_only {
        let minimized = minimize(&dfa).context("minimization failed")?;
        println!("Minimized DFA:\n{}", render(&minimized, cli.to)?);
    }

    Ok(())
}
