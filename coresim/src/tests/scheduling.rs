use pretty_assertions::assert_eq;

use super::{load, running_names, simulate};
use crate::*;

#[test]
fn single_quantum_process() {
    for strategy in Strategy::ALL {
        let (events, summary) = simulate("0 solo 3 64\n", Config::new(strategy, 3));
        let finished = events.iter()
            .find_map(|e| match e {
                Event::Finished { time, .. } => Some(*time),
                _ => None,
            });

        assert_eq!(finished, Some(3), "{strategy}");
        assert_eq!(summary.avg_turnaround, 3, "{strategy}");
        assert_eq!(summary.max_overhead, 1.0, "{strategy}");
        assert_eq!(summary.avg_overhead, 1.0, "{strategy}");
        assert_eq!(summary.makespan, 3, "{strategy}");
        assert_eq!(summary.finished, 1, "{strategy}");
    }
}

#[test]
fn round_robin_is_strict() {
    // Four equal processes, three quanta each.
    let input = "0 p0 6 10\n0 p1 6 10\n0 p2 6 10\n0 p3 6 10\n";
    let (events, summary) = simulate(input, Config::new(Strategy::Infinite, 2));

    let expected: Vec<String> = (0..3)
        .flat_map(|_| (0..4).map(|i| format!("p{i}")))
        .collect();
    assert_eq!(running_names(&events), expected);
    assert_eq!(summary.makespan, 24);
}

#[test]
fn lone_process_keeps_the_cpu() {
    let (events, summary) = simulate("0 solo 9 10\n", Config::new(Strategy::Infinite, 3));

    assert_eq!(running_names(&events), vec!["solo"]);
    assert_eq!(summary.makespan, 9);
}

#[test]
fn idle_cpu_waits_for_arrival() {
    let (events, summary) = simulate("5 late 1 10\n", Config::new(Strategy::Infinite, 2));

    assert_eq!(
        events,
        vec![
            Event::Running {
                time:       6,
                name:       String::from("late"),
                remaining:  1,
                placement:  None,
            },
            Event::Finished {
                time:           8,
                name:           String::from("late"),
                proc_remaining: 0,
            },
        ]
    );
    assert_eq!(summary.avg_turnaround, 3);
    assert_eq!(summary.max_overhead, 3.0);
    assert_eq!(summary.makespan, 8);
}

#[test]
fn preemption_keeps_memory() {
    let procs = load("0 a 6 100\n0 b 6 100\n");
    let mut sim = Simulation::new(procs, &Config::new(Strategy::FirstFit, 2)).unwrap();
    let mut events: Vec<Event> = vec![];

    assert!(sim.step(&mut events).unwrap());
    assert_eq!(sim.running().map(|p| p.id), Some(0));
    assert!(sim.step(&mut events).unwrap());
    assert_eq!(sim.running().map(|p| p.id), Some(1));

    let a = &sim.processes()[0];
    assert_eq!(a.status, Status::Ready);
    assert_eq!(a.block, Some(0));
    assert_eq!(sim.processes()[1].block, Some(100));
    assert_eq!(sim.ready_queue().collect::<Vec<_>>(), vec![0]);
    assert_eq!(sim.memory().units_in_use(), 200);
    assert_eq!(sim.clock(), 4);
}

#[test]
fn completion_releases_everything() {
    let input = "0 a 5 300\n1 b 2 700\n1 c 8 40\n3 d 4 1500\n";
    for strategy in Strategy::ALL {
        let mut sim = Simulation::new(load(input), &Config::new(strategy, 2)).unwrap();
        let mut events: Vec<Event> = vec![];
        sim.run(&mut events).unwrap();

        assert!(sim.is_done());
        assert!(sim.running().is_none());
        assert_eq!(sim.memory().units_in_use(), 0, "{strategy}");
        for p in sim.processes() {
            assert!(p.is_finished(), "{strategy}: {}", p.name);
            assert!(!p.is_resident(), "{strategy}: {}", p.name);
        }
        if let MemoryManager::Paged(paging) = sim.memory() {
            assert!(paging.recency().is_empty());
        }
    }
}

#[test]
fn finished_count_reports_ready_queue() {
    // b and c arrive while a runs; a finishes first.
    let input = "0 a 1 10\n0 b 3 10\n0 c 3 10\n";
    let (events, _) = simulate(input, Config::new(Strategy::Infinite, 1));

    assert_eq!(
        events[1],
        Event::Finished {
            time:           1,
            name:           String::from("a"),
            proc_remaining: 2,
        }
    );
}

#[test]
fn oversized_process_is_fatal() {
    let input = "0 whale 3 4096\n";
    for strategy in [Strategy::FirstFit, Strategy::Paged] {
        let mut sim = Simulation::new(load(input), &Config::new(strategy, 1)).unwrap();
        let err = sim.run(&mut Vec::<Event>::new()).unwrap_err();
        assert!(matches!(err, SimError::Capacity { .. }), "{strategy}: {err}");
    }
}

#[test]
fn virtual_runs_oversized_process_partially() {
    let (events, summary) = simulate("0 whale 3 4096\n", Config::new(Strategy::Virtual, 1));

    match &events[0] {
        Event::Running { placement: Some(Placement::Frames { usage, frames }), .. } => {
            assert_eq!(*usage, 100);
            assert_eq!(frames.len(), MEMORY_CAPACITY_KB / FRAME_SIZE_KB);
        },
        other => panic!("Unexpected first event {other:?}"),
    }
    assert_eq!(summary.finished, 1);
}

#[test]
fn bad_configuration_is_rejected() {
    let procs = load("0 a 1 10\n");
    let zero_quantum = Simulation::new(procs.clone(), &Config::new(Strategy::Infinite, 0));
    assert!(matches!(zero_quantum, Err(SimError::Config(_))));

    let tiny = Simulation::new(procs, &Config::new(Strategy::Paged, 1).with_capacity(3));
    assert!(matches!(tiny, Err(SimError::Config(_))));
}

#[test]
fn clock_overflow_is_an_error() {
    let mut sim = Simulation::new(load("0 a 1 10\n"), &Config::new(Strategy::Infinite, u64::MAX)).unwrap();
    let mut events: Vec<Event> = vec![];

    assert!(sim.step(&mut events).unwrap());
    assert_eq!(sim.clock(), u64::MAX);
    let err = sim.step(&mut events).unwrap_err();
    assert!(matches!(err, SimError::Config(_)), "{err}");
}
