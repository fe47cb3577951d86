//! Run a workload file against one or all table strategies and print probe
//! totals. `RUST_LOG=debug` shows resizes and rebuilds.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use probe_table::workload::{Strategy, Workload};
use probe_table::{DeletionMode, PrimeSource};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Compare collision-resolution strategies on a workload")]
struct Args {
    /// Workload file: one `put <key> <value>`, `get <key>` or `remove <key>` per line.
    workload: PathBuf,

    #[arg(short, long, value_enum, default_value_t = StrategyArg::All)]
    strategy: StrategyArg,

    #[arg(short, long, value_enum, default_value_t = DeletionArg::Hard)]
    deletion: DeletionArg,

    /// Starting capacity, rounded up to a prime.
    #[arg(long)]
    initial_capacity: Option<usize>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StrategyArg {
    Chained,
    Linear,
    Ordered,
    Quadratic,
    All,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DeletionArg {
    Soft,
    Hard,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let workload = Workload::from_path(&args.workload)
        .with_context(|| format!("loading {}", args.workload.display()))?;
    let strategies: Vec<Strategy> = match args.strategy {
        StrategyArg::Chained => vec![Strategy::Chained],
        StrategyArg::Linear => vec![Strategy::Linear],
        StrategyArg::Ordered => vec![Strategy::OrderedLinear],
        StrategyArg::Quadratic => vec![Strategy::Quadratic],
        StrategyArg::All => Strategy::ALL.to_vec(),
    };
    let deletion = match args.deletion {
        DeletionArg::Soft => DeletionMode::Soft,
        DeletionArg::Hard => DeletionMode::Hard,
    };
    let primes = match args.initial_capacity {
        Some(n) => PrimeSource::with_initial(n),
        None => PrimeSource::new(),
    };

    println!(
        "{}: {} commands, {} deletion",
        args.workload.display(),
        workload.len(),
        deletion
    );
    for strategy in strategies {
        let mut table = strategy.table(deletion, primes.clone());
        let report = workload
            .run(table.as_mut())
            .with_context(|| format!("running the {strategy} table"))?;
        println!("{strategy}:\n{report}");
    }
    Ok(())
}
