use anyhow::Context;
use coresim::*;

/// Round-robin scheduling over a simulated memory manager
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to input
    #[arg(short, long, value_parser = clap::value_parser!(PathBuf))]
    filename:   PathBuf,

    /// Memory allocation strategy
    #[arg(short, long, value_enum)]
    memory:     Strategy,

    /// Simulated time units per scheduling step
    #[arg(short, long)]
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    quantum:    SimTime,

    /// Memory capacity in KB
    #[arg(short, long, default_value_t = MEMORY_CAPACITY_KB)]
    #[arg(value_parser = clap::value_parser!(usize))]
    capacity:   usize,

    /// Diagnostics on stderr; repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose:    u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Args::parse();
    coresim::logger::init(cli.verbose)?;

    let procs = read_from_path::<TextParser, RawProcess>(cli.filename.clone())
        .with_context(|| format!("Cannot load {}", cli.filename.display()))?;
    let config = Config::new(cli.memory, cli.quantum).with_capacity(cli.capacity);
    info!("{} processes, {} memory, quantum {}", procs.len(), config.strategy, config.quantum);

    let mut sim = Simulation::new(procs, &config)?;
    let stdout = std::io::stdout();
    let mut log = WriterLog::new(stdout.lock());
    let summary = sim.run(&mut log)?;

    let mut out = log.into_inner();
    writeln!(out, "{summary}")?;
    out.flush()?;

    Ok(())
}
