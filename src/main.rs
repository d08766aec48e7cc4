//! te-genome - Binary Entry Point
//!
//! Runs the worked insertion example and a seeded amplification workload
//! against the chosen backend, printing renderings and a run summary.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use te_genome::{GenomeError, GenomeKind, Simulation, SimulationConfig};

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "te-genome")]
#[command(about = "Simulate transposable elements in a circular genome")]
struct Args {
    /// Genome backend (`contiguous` or `linked`)
    #[arg(short, long, default_value_t = GenomeKind::Linked)]
    kind: GenomeKind,

    /// Initial number of empty sites
    #[arg(short, long, default_value_t = 1_000)]
    size: usize,

    /// Number of simulated events
    #[arg(long, default_value_t = 500)]
    steps: usize,

    /// Longest TE created by an insert event
    #[arg(long, default_value_t = 20)]
    max_te_length: usize,

    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print the final rendering of the simulated genome
    #[arg(long)]
    show: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), GenomeError> {
    println!("===========================================");
    println!("  te-genome - {} backend", args.kind);
    println!("===========================================");
    println!();

    // Worked example: a hit on an active run disables it
    let mut genome = args.kind.build(5);
    println!("Fresh genome:      {}", genome);
    let first = genome.insert_te(2, 2)?;
    println!("insert_te(2, 2) -> {first}: {}", genome);
    let second = genome.insert_te(2, 1)?;
    println!("insert_te(2, 1) -> {second}: {}", genome);
    if let Some(copy) = genome.copy_te(second, -2) {
        println!("copy_te({second}, -2) -> {copy}: {}", genome);
    }
    genome.disable_te(second);
    println!("disable_te({second}):     {}", genome);
    println!("Active TEs: {:?}", genome.active_records());
    println!();

    let config = SimulationConfig {
        initial_size: args.size,
        steps: args.steps,
        max_te_length: args.max_te_length,
        seed: args.seed,
        ..Default::default()
    };
    info!(kind = %args.kind, ?config, "starting simulation");

    let mut simulation = Simulation::new(config)?;
    let mut genome = simulation.build_genome(args.kind);
    let report = simulation.run(genome.as_mut())?;

    println!("=== RESULTS ===");
    println!("{report}");
    if args.show {
        println!();
        println!("{}", genome);
    }

    Ok(())
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("te_genome=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
