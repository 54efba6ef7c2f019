use anyhow::Context;
use coresim::*;
use rayon::prelude::*;

/// Runs one workload under many strategy/quantum pairs in parallel
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to input
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    filename:   PathBuf,

    /// Strategies to try (all of them if omitted)
    #[arg(short, long, value_enum, value_delimiter = ',')]
    memory:     Vec<Strategy>,

    /// Quanta to try
    #[arg(short, long, value_delimiter = ',', default_values_t = vec![1, 2, 3])]
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    quanta:     Vec<SimTime>,

    /// Memory capacity in KB
    #[arg(short, long, default_value_t = MEMORY_CAPACITY_KB)]
    #[arg(value_parser = clap::value_parser!(usize))]
    capacity:   usize,

    /// Diagnostics on stderr; repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose:    u8,
}

/// One finished run of the grid.
struct Row {
    config:     Config,
    summary:    Summary,
    counts:     CountingLog,
}

fn main() -> anyhow::Result<()> {
    let cli = Args::parse();
    coresim::logger::init(cli.verbose)?;

    let procs = read_from_path::<TextParser, RawProcess>(cli.filename.clone())
        .with_context(|| format!("Cannot load {}", cli.filename.display()))?;
    let strategies = if cli.memory.is_empty() {
        Strategy::ALL.to_vec()
    } else {
        cli.memory
    };
    let grid: Vec<Config> = strategies.iter()
        .cartesian_product(cli.quanta.iter())
        .map(|(s, q)| Config::new(*s, *q).with_capacity(cli.capacity))
        .collect();
    info!("{} runs over {} processes", grid.len(), procs.len());

    // Every run owns its own copy of the workload.
    let rows = grid.into_par_iter()
        .map(|config| -> Result<Row, SimError> {
            let mut sim = Simulation::new(procs.clone(), &config)?;
            let mut counts = CountingLog::default();
            let summary = sim.run(&mut counts)?;
            Ok(Row { config, summary, counts })
        })
        .collect::<Result<Vec<Row>, SimError>>()?;

    println!(
        "{} processes, {} units of service in total",
        procs.len(),
        workload::total_service(&procs)
    );
    println!("strategy\tquantum\tturnaround\tmax-ovh\tavg-ovh\tmakespan\tdispatches\tevicted");
    for r in rows.iter().sorted_by_key(|r| (r.config.strategy, r.config.quantum)) {
        println!(
            "{}\t{}\t{}\t{:.2}\t{:.2}\t{}\t{}\t{}",
            r.config.strategy,
            r.config.quantum,
            r.summary.avg_turnaround,
            r.summary.max_overhead,
            r.summary.avg_overhead,
            r.summary.makespan,
            r.counts.dispatches,
            r.counts.frames_evicted,
        );
    }

    Ok(())
}
