//! Two-stage pipeline simulator CLI.
//!
//! This binary provides a single entry point for all simulation modes. It performs:
//! 1. **Single run:** Execute a program under one run mode and print its statistics.
//! 2. **Comparison:** Execute a program under every run mode from fresh state and
//!    print the results side by side.
//!
//! With no subcommand the built-in demo program is compared.

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pipesim_core::common::Result;
use pipesim_core::config::{Config, RunMode};
use pipesim_core::sim::{ProgramImage, RunReport, Simulator, run_all_modes};

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Two-stage pipeline simulator with forwarding and a data cache",
    long_about = "Run a program through a Fetch/Execute pipeline and report cycles, stalls, \
                  flushes, forwardings, and cache behaviour.\n\nPrograms are assembly listings \
                  or JSON images; without --program the built-in demo is used.\n\nExamples:\n  \
                  pipesim\n  pipesim run --mode no-optimization --dump\n  \
                  pipesim run -p prog.asm --mode forwarding+cache --log trace.log\n  \
                  pipesim compare -p prog.json --config sim.json"
)]
struct Cli {
    /// Log every pipeline event (equivalent to RUST_LOG=debug).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program under a single configuration.
    Run {
        /// Program listing (.asm) or image (.json); defaults to the demo.
        #[arg(short, long)]
        program: Option<PathBuf>,

        /// Run mode: no-optimization, forwarding-only, or forwarding+cache.
        #[arg(short, long)]
        mode: Option<RunMode>,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Cycle cap before the run is declared non-terminating.
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Append trace events to this file.
        #[arg(long)]
        log: Option<PathBuf>,

        /// Print a JSON summary instead of the text report.
        #[arg(long)]
        json: bool,

        /// Also print registers, memory, and cache contents.
        #[arg(long)]
        dump: bool,
    },

    /// Run a program under every mode and compare.
    Compare {
        /// Program listing (.asm) or image (.json); defaults to the demo.
        #[arg(short, long)]
        program: Option<PathBuf>,

        /// JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Print the reports as a JSON array.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Run {
            program,
            mode,
            config,
            max_cycles,
            log,
            json,
            dump,
        }) => cmd_run(
            program.as_deref(),
            mode,
            config.as_deref(),
            max_cycles,
            log.as_deref(),
            json,
            dump,
        ),
        Some(Commands::Compare {
            program,
            config,
            json,
        }) => cmd_compare(program.as_deref(), config.as_deref(), json),
        None => cmd_compare(None, None, false),
    };

    if let Err(e) = result {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Installs the `fmt` subscriber. `RUST_LOG` wins; otherwise `warn`, or
/// `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(p) => Config::from_json(&fs::read_to_string(p)?),
        None => Ok(Config::default()),
    }
}

fn load_program(path: Option<&Path>) -> Result<ProgramImage> {
    let image = path.map_or_else(|| Ok(ProgramImage::demo()), ProgramImage::from_path)?;
    tracing::info!(
        program = %path.map_or_else(|| "<demo>".into(), |p| p.display().to_string()),
        cells = image.cells.len(),
        "program loaded"
    );
    Ok(image)
}

/// Runs one configuration, printing stats (and optionally state dumps).
///
/// On non-termination the partial stats and machine state are printed
/// before the error is returned.
fn cmd_run(
    program: Option<&Path>,
    mode: Option<RunMode>,
    config_path: Option<&Path>,
    max_cycles: Option<u64>,
    log: Option<&Path>,
    json: bool,
    dump: bool,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(mode) = mode {
        config = config.for_mode(mode);
    }
    if let Some(n) = max_cycles {
        config.general.max_cycles = n;
    }
    if log.is_some() {
        config.general.record_events = true;
    }

    let image = load_program(program)?;
    let mut sim = Simulator::new(&config, &image)?;

    if !json {
        println!("Configuration: {}", config.mode());
        println!(
            "  Max cycles: {}  Start PC: {:#04x}  Miss penalty: {}",
            config.general.max_cycles, config.general.start_pc, config.cache.miss_penalty
        );
        println!();
    }

    let outcome = sim.run();

    if let Some(path) = log {
        sim.events().write_to(path)?;
    }

    match outcome {
        Ok(report) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report.stats.print();
            }
            if dump {
                print_dump(&sim);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("\n[!] {e}");
            print_dump(&sim);
            sim.stats().print();
            Err(e)
        }
    }
}

fn print_dump(sim: &Simulator) {
    let cpu = sim.cpu();
    println!("\nREGISTERS");
    for line in cpu.dump_state() {
        println!("  {line}");
    }
    println!("\nMEMORY");
    for line in cpu.memory.dump_range(0, 256) {
        println!("  {line}");
    }
    if let Some(cache) = &cpu.cache {
        println!("\nDATA CACHE");
        for line in cache.dump() {
            println!("  {line}");
        }
    }
}

/// Runs every mode and prints a comparison table.
fn cmd_compare(program: Option<&Path>, config_path: Option<&Path>, json: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let image = load_program(program)?;
    let results = run_all_modes(&config, &image);

    if json {
        let reports: Vec<&RunReport> = results.iter().filter_map(|(_, r)| r.as_ref().ok()).collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        print_table(&results);
    }

    results
        .into_iter()
        .find_map(|(_, r)| r.err())
        .map_or(Ok(()), Err)
}

fn print_table(results: &[(RunMode, Result<RunReport>)]) {
    println!(
        "{:<18} {:>7} {:>7} {:>6} {:>8} {:>8} {:>8} {:>6} {:>6} {:>7}",
        "mode", "cycles", "insts", "cpi", "hazard", "cache", "flushes", "fwds", "hits", "misses"
    );
    println!("{}", "-".repeat(92));
    for (mode, result) in results {
        match result {
            Ok(r) => println!(
                "{:<18} {:>7} {:>7} {:>6.2} {:>8} {:>8} {:>8} {:>6} {:>6} {:>7}",
                mode.name(),
                r.stats.cycles,
                r.stats.instructions_retired,
                r.cpi,
                r.stats.stalls_data,
                r.stats.stalls_mem,
                r.stats.flushes,
                r.stats.forwards,
                r.stats.dcache_hits,
                r.stats.dcache_misses,
            ),
            Err(e) => println!("{:<18} error: {e}", mode.name()),
        }
    }
}
