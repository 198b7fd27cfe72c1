//! Recast CLI
//!
//! A command-line interface for the recast specialization engine: run the
//! comparative mapping benchmark, demonstrate proxy interception, inspect
//! registered type descriptors, or drive the interactive function
//! dispatcher.

use anyhow::Context;
use clap::{Parser, Subcommand};
use recast::dispatch::FunctionRegistry;
use recast::harness::{self, HarnessConfig};
use recast::samples::{Person, Programmer};
use recast::{records_from_json, Specializer, TypeInfo, VERSION};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recast")]
#[command(author, version, about = "A runtime type-specialization engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the comparative mapping benchmark
    Bench {
        /// Passes per strategy over the record set
        #[arg(short, long, default_value_t = 1000)]
        passes: usize,

        /// Number of generated records
        #[arg(short, long, default_value_t = 1000)]
        records: usize,

        /// Read records from a JSON file instead of generating them
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Start the interactive function dispatcher
    Dispatch,

    /// Demonstrate proxy interception over the sample Person type
    Proxy,

    /// Print the descriptor of a registered type
    Describe {
        /// The type name to describe
        type_name: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let engine = Specializer::new();
    engine.register::<Programmer>();
    engine.register::<Person>();

    match cli.command {
        Commands::Bench {
            passes,
            records,
            input,
        } => run_bench(&engine, passes, records, input),
        Commands::Dispatch => run_dispatch(&engine),
        Commands::Proxy => run_proxy_demo(&engine),
        Commands::Describe { type_name } => {
            let info = engine.resolve(&type_name)?;
            println!("{}", info);
            Ok(())
        }
    }
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "error",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run_bench(
    engine: &Specializer,
    passes: usize,
    records: usize,
    input: Option<PathBuf>,
) -> anyhow::Result<()> {
    let report = match input {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let records = records_from_json(&json)?;
            harness::run_over(engine, passes, &records)?
        }
        None => harness::run(engine, HarnessConfig { passes, records })?,
    };
    print!("{}", report);
    Ok(())
}

fn run_dispatch(engine: &Specializer) -> anyhow::Result<()> {
    let mut registry = FunctionRegistry::new();

    registry.register("Engine", "Version", || VERSION.to_string());
    registry.register("Samples", "Programmer", || {
        TypeInfo::of::<Programmer>().to_string()
    });
    registry.register("Samples", "Person", || TypeInfo::of::<Person>().to_string());
    {
        let stats = engine.stats();
        registry.register("Engine", "Stats", move || format!("{:?}", stats));
    }

    registry.run_loop()?;
    Ok(())
}

/// Mirrors the classic interception walkthrough: watch FirstName, assign it
/// three times, print the final state
fn run_proxy_demo(engine: &Specializer) -> anyhow::Result<()> {
    let mut proxy = engine.proxy_for::<Person>()?;

    proxy.before_set(Person::first_name_selector(), |old, new| {
        println!("changing FirstName from {} to {}", old, new);
        Ok(())
    })?;

    proxy.set(Person::first_name_selector(), "Graeme")?;
    proxy.set(Person::last_name_selector(), "Hill")?;
    proxy.set(Person::first_name_selector(), "foo")?;
    proxy.set(Person::first_name_selector(), "bar")?;

    println!("{}", proxy.object().inner());
    Ok(())
}
