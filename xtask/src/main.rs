//! Build automation for the rdo workspace.
//!
//! Run with `cargo xtask <command>`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use xshell::{Shell, cmd};

/// Library crates and their optional features, each checked on its own.
const FEATURE_MATRIX: &[(&str, &[&str])] = &[
    ("rdo-types", &["chrono", "uuid", "decimal", "json"]),
    ("rdo-sql", &["json"]),
    ("rdo-client", &["chrono", "uuid", "decimal", "json"]),
];

/// Fuzz targets under `fuzz/fuzz_targets`.
const FUZZ_TARGETS: [&str; 3] = ["interpolate", "connection_uri", "parse_literals"];

#[derive(Parser)]
#[command(name = "xtask", about = "Build automation for rdo")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Format check, clippy, tests, feature matrix and docs
    Ci {
        /// Also give every fuzz target a short run (nightly + cargo-fuzz)
        #[arg(long)]
        fuzz_smoke: bool,
    },
    /// Check formatting
    Fmt,
    /// Clippy over all targets, warnings denied
    Clippy,
    /// Tests with default features
    Test,
    /// Check each library crate with no optional features, then one at a time
    Features,
    /// Build docs with warnings denied
    Doc,
    /// Run the interpolation benchmarks
    Bench,
    /// Fuzz one target, or all of them in turn
    Fuzz {
        /// Target name; omit to run every target
        target: Option<String>,
        /// Seconds per target
        #[arg(long, default_value_t = 60)]
        seconds: u64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;
    sh.change_dir(workspace_root()?);

    match cli.command {
        Command::Ci { fuzz_smoke } => {
            fmt(&sh)?;
            clippy(&sh)?;
            test(&sh)?;
            features(&sh)?;
            doc(&sh)?;
            if fuzz_smoke {
                for target in FUZZ_TARGETS {
                    fuzz(&sh, target, 10)?;
                }
            }
            println!("ci: ok");
        }
        Command::Fmt => fmt(&sh)?,
        Command::Clippy => clippy(&sh)?,
        Command::Test => test(&sh)?,
        Command::Features => features(&sh)?,
        Command::Doc => doc(&sh)?,
        Command::Bench => cmd!(sh, "cargo bench -p rdo-sql").run()?,
        Command::Fuzz { target, seconds } => match target {
            Some(target) => fuzz(&sh, &target, seconds)?,
            None => {
                for target in FUZZ_TARGETS {
                    fuzz(&sh, target, seconds)?;
                }
            }
        },
    }

    Ok(())
}

/// The directory holding the workspace `Cargo.toml`.
fn workspace_root() -> Result<PathBuf> {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .map(Path::to_path_buf)
        .context("xtask manifest has no parent directory")
}

fn fmt(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo fmt --all -- --check").run()?;
    Ok(())
}

fn clippy(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo clippy --workspace --all-targets -- -D warnings").run()?;
    Ok(())
}

fn test(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo test --workspace").run()?;
    Ok(())
}

fn features(sh: &Shell) -> Result<()> {
    for &(krate, optional) in FEATURE_MATRIX {
        println!("{krate}: no optional features");
        cmd!(sh, "cargo check -p {krate} --no-default-features").run()?;

        for &feature in optional {
            println!("{krate}: only {feature}");
            cmd!(sh, "cargo check -p {krate} --no-default-features --features {feature}").run()?;
        }
    }
    Ok(())
}

fn doc(sh: &Shell) -> Result<()> {
    let _flags = sh.push_env("RUSTDOCFLAGS", "-D warnings");
    cmd!(sh, "cargo doc --workspace --no-deps").run()?;
    Ok(())
}

fn fuzz(sh: &Shell, target: &str, seconds: u64) -> Result<()> {
    if !FUZZ_TARGETS.contains(&target) {
        bail!("unknown fuzz target {target:?}; expected one of {FUZZ_TARGETS:?}");
    }
    let max_time = format!("-max_total_time={seconds}");
    cmd!(sh, "cargo +nightly fuzz run {target} -- {max_time}").run()?;
    Ok(())
}
