pub use std::{
    collections::VecDeque,
    fmt,
    io::{BufRead, BufReader, Write},
    path::PathBuf,
};
pub use thiserror::Error;
pub use itertools::Itertools;
pub use indexmap::IndexSet;
pub use clap::{Parser, ValueEnum};
pub use log::{debug, info, trace, warn};

pub use crate::{Process, Simulation,
    memory::{MemoryManager, PagingMode},
    stats::Summary,
};

/// The unit for measuring simulated time. Arrival, service and
/// remaining times, the clock and the quantum all share it.
pub type SimTime = u64;

/// Index of a [Process] within its [Simulation]. Assigned
/// sequentially, in input order, starting from 0.
pub type Pid = usize;

/// Index of a page frame within the frame table.
pub type FrameIdx = usize;

/// Default size of the simulated memory.
pub const MEMORY_CAPACITY_KB: usize = 2048;
/// Size of one page frame. 2048 KB of memory thus hold 512 frames.
pub const FRAME_SIZE_KB: usize = 4;
/// Frames a process must hold before it may run under [Strategy::Virtual].
pub const WORKING_SET_FRAMES: usize = 4;
pub const MAX_NAME_LEN: usize = 9;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Status {
    /// Loaded, but its arrival time has not come yet.
    Unready,
    Ready,
    Running,
    Finished,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Debug)]
pub enum Strategy {
    /// Memory is never a constraint
    Infinite,
    /// Contiguous allocation at the lowest fitting address
    FirstFit,
    /// 4 KB paging; victims lose all their frames
    Paged,
    /// 4 KB paging with a 4-frame working set; victims lose only what is needed
    Virtual,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Infinite,
        Strategy::FirstFit,
        Strategy::Paged,
        Strategy::Virtual,
    ];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Infinite  => "infinite",
            Strategy::FirstFit  => "first-fit",
            Strategy::Paged     => "paged",
            Strategy::Virtual   => "virtual",
        })
    }
}

/// Everything a [Simulation] needs to know besides the workload itself.
#[derive(Copy, Clone, Debug)]
pub struct Config {
    pub strategy:       Strategy,
    pub quantum:        SimTime,
    pub capacity_kb:    usize,
}

impl Config {
    pub fn new(strategy: Strategy, quantum: SimTime) -> Self {
        Self {
            strategy,
            quantum,
            capacity_kb: MEMORY_CAPACITY_KB,
        }
    }

    pub fn with_capacity(mut self, capacity_kb: usize) -> Self {
        self.capacity_kb = capacity_kb;
        self
    }
}

/// Every way a simulation can fail.
///
/// Note that a first-fit refusal is *not* in here: not finding a hole
/// is a normal outcome, reported as `Ok(false)` by
/// [MemoryManager::try_allocate].
#[derive(Error, Debug)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("line {line}: {message}")]
    Input {
        line:       usize,
        message:    String,
    },
    #[error("workload contains no processes")]
    EmptyWorkload,
    /// Appears while validating the loaded workload.
    #[error("{message}\n{culprit:?}")]
    Workload {
        message:    String,
        culprit:    Box<Process>,
    },
    #[error("process {name} needs {needed} units but memory only has {capacity}")]
    Capacity {
        name:       String,
        needed:     usize,
        capacity:   usize,
    },
    #[error("every ready process was refused memory at time {time}")]
    Starved {
        time:       SimTime,
    },
    #[error("eviction at time {time} reclaimed {reclaimed} of {wanted} frames")]
    EvictionShort {
        time:       SimTime,
        wanted:     usize,
        reclaimed:  usize,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

//---START EXTERNAL INTERFACES
// The types listed below read workloads into `coresim`.
//
// To support another format, write a type that satisfies
// the `ProcessGen` trait.

/// Defines the interface for reading processes.
pub trait ProcessGen<T> {
    fn new(path: PathBuf) -> Self;
    /// Either the processes found at the source, in order, or the
    /// first problem met while reading them.
    fn read_procs(&self) -> Result<Vec<Process>, SimError>;
    /// Uses one parsed record to spawn a [Process].
    fn gen_single(&self, d: T, id: Pid) -> Process;
}

/// One line of the text format, before it becomes a [Process].
#[derive(Debug, Clone)]
pub struct RawProcess {
    pub arrival:    SimTime,
    pub name:       String,
    pub service:    SimTime,
    pub mem_kb:     usize,
}

/// Reads whitespace-separated `arrival name service memory` lines.
pub struct TextParser {
    pub path: PathBuf,
}

impl TextParser {
    pub fn read_from<R: BufRead>(&self, reader: R) -> Result<Vec<Process>, SimError> {
        let mut res = vec![];
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            // Trailing blank lines are common; tolerate them anywhere.
            if fields.is_empty() {
                continue;
            }
            let bad = |message: String| SimError::Input { line: idx + 1, message };
            if fields.len() != 4 {
                return Err(bad(format!("expected 4 fields, found {}", fields.len())));
            }
            let raw = RawProcess {
                arrival:    fields[0].parse().map_err(|_| bad(format!("bad arrival time {:?}", fields[0])))?,
                name:       fields[1].to_string(),
                service:    fields[2].parse().map_err(|_| bad(format!("bad service time {:?}", fields[2])))?,
                mem_kb:     fields[3].parse().map_err(|_| bad(format!("bad memory size {:?}", fields[3])))?,
            };
            let id = res.len();
            res.push(self.gen_single(raw, id));
        }

        Ok(res)
    }
}

impl ProcessGen<RawProcess> for TextParser {
    fn new(path: PathBuf) -> Self {
        Self {
            path
        }
    }

    fn read_procs(&self) -> Result<Vec<Process>, SimError> {
        let fd = std::fs::File::open(&self.path)?;
        self.read_from(BufReader::new(fd))
    }

    fn gen_single(&self, d: RawProcess, id: Pid) -> Process {
        Process::new(id, d.name, d.arrival, d.service, d.mem_kb)
    }
}

pub fn read_from_path<T, B>(file_path: PathBuf) -> Result<Vec<Process>, SimError>
where T: ProcessGen<B> {
    let parser = T::new(file_path);
    let procs = parser.read_procs()?;

    crate::workload::init(procs)
}
//---END EXTERNAL INTERFACES

//---START EVENT LOG
/// Where a just-dispatched process lives in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Block {
        usage:  usize,
        start:  usize,
    },
    Frames {
        usage:  usize,
        frames: Vec<FrameIdx>,
    },
}

/// Everything the simulation reports, one variant per log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Running {
        time:       SimTime,
        name:       String,
        remaining:  SimTime,
        // `None` under the infinite strategy.
        placement:  Option<Placement>,
    },
    Finished {
        time:           SimTime,
        name:           String,
        proc_remaining: usize,
    },
    Evicted {
        time:   SimTime,
        frames: Vec<FrameIdx>,
    },
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Running { time, name, remaining, placement } => {
                write!(f, "{time},RUNNING,process-name={name},remaining-time={remaining}")?;
                match placement {
                    Some(Placement::Block { usage, start }) => {
                        write!(f, ",mem-usage={usage}%,allocated-at={start}")
                    },
                    Some(Placement::Frames { usage, frames }) => {
                        write!(f, ",mem-usage={usage}%,mem-frames=[{}]", frames.iter().join(","))
                    },
                    None => Ok(()),
                }
            },
            Event::Finished { time, name, proc_remaining } => {
                write!(f, "{time},FINISHED,process-name={name},proc-remaining={proc_remaining}")
            },
            Event::Evicted { time, frames } => {
                write!(f, "{time},EVICTED,evicted-frames=[{}]", frames.iter().join(","))
            },
        }
    }
}

/// A sink for [Event]s. The simulation never formats anything itself.
pub trait EventLog {
    fn record(&mut self, evt: Event) -> std::io::Result<()>;
}

impl EventLog for Vec<Event> {
    fn record(&mut self, evt: Event) -> std::io::Result<()> {
        self.push(evt);
        Ok(())
    }
}

/// Writes one line per [Event] to any [Write]r.
pub struct WriterLog<W: Write> {
    out: W,
}

impl<W: Write> WriterLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> EventLog for WriterLog<W> {
    fn record(&mut self, evt: Event) -> std::io::Result<()> {
        writeln!(self.out, "{evt}")
    }
}

/// Keeps only counts. Used when many runs are compared and
/// nobody is going to read the individual lines.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountingLog {
    pub dispatches:     usize,
    pub completions:    usize,
    pub frames_evicted: usize,
}

impl EventLog for CountingLog {
    fn record(&mut self, evt: Event) -> std::io::Result<()> {
        match evt {
            Event::Running { .. }           => { self.dispatches += 1; },
            Event::Finished { .. }          => { self.completions += 1; },
            Event::Evicted { frames, .. }   => { self.frames_evicted += frames.len(); },
        }
        Ok(())
    }
}
//---END EVENT LOG
