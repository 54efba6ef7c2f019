use crate::*;

mod golden;
mod scheduling;

fn load(input: &str) -> Vec<Process> {
    let procs = TextParser::new(PathBuf::new())
        .read_from(input.as_bytes())
        .unwrap();
    workload::init(procs).unwrap()
}

fn simulate(input: &str, config: Config) -> (Vec<Event>, Summary) {
    let mut sim = Simulation::new(load(input), &config).unwrap();
    let mut events: Vec<Event> = vec![];
    let summary = sim.run(&mut events).unwrap();
    (events, summary)
}

/// The full output of a run, exactly as `memsched` prints it.
fn render(input: &str, config: Config) -> String {
    let (events, summary) = simulate(input, config);
    let mut out = events.iter().join("\n");
    out.push('\n');
    out.push_str(&summary.to_string());
    out
}

fn running_names(events: &[Event]) -> Vec<String> {
    events.iter()
        .filter_map(|e| match e {
            Event::Running { name, .. } => Some(name.clone()),
            _ => None,
        })
        .collect()
}
