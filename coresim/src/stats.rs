use crate::helpe::*;

/// Running totals over completed processes.
#[derive(Default, Debug, Clone)]
pub struct Tally {
    total_turnaround:   SimTime,
    // One turnaround/service ratio per completed process.
    overheads:          Vec<f64>,
}

impl Tally {
    pub fn record(&mut self, turnaround: SimTime, service: SimTime) {
        debug_assert!(service > 0, "Zero service time slipped past init");
        self.total_turnaround += turnaround;
        self.overheads.push(turnaround as f64 / service as f64);
    }

    pub fn summarize(&self, makespan: SimTime) -> Summary {
        let finished = self.overheads.len();
        if finished == 0 {
            return Summary {
                makespan,
                ..Summary::default()
            };
        }

        Summary {
            avg_turnaround: self.total_turnaround.div_ceil(finished as SimTime),
            max_overhead:   self.overheads.iter().copied().fold(0.0, f64::max),
            avg_overhead:   self.overheads.iter().sum::<f64>() / finished as f64,
            makespan,
            finished,
        }
    }
}

/// What is printed once every process has finished.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Rounded up.
    pub avg_turnaround: SimTime,
    pub max_overhead:   f64,
    pub avg_overhead:   f64,
    pub makespan:       SimTime,
    pub finished:       usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Turnaround time {}", self.avg_turnaround)?;
        writeln!(f, "Time overhead {:.2} {:.2}", self.max_overhead, self.avg_overhead)?;
        write!(f, "Makespan {}", self.makespan)
    }
}
