use crate::{helpe::*, stats::Tally};

impl Simulation {
    /// Sets up a run over an already validated workload (see
    /// [`crate::workload::init`]). Nothing has arrived yet and the
    /// clock reads 0.
    pub fn new(procs: Vec<Process>, config: &Config) -> Result<Self, SimError> {
        if config.quantum == 0 {
            return Err(SimError::Config(String::from("quantum must be at least 1")));
        }
        let memory = MemoryManager::new(config.strategy, config.capacity_kb)?;

        Ok(Self {
            unready:    (0..procs.len()).collect(),
            ready:      VecDeque::new(),
            running:    None,
            memory,
            clock:      0,
            quantum:    config.quantum,
            unfinished: procs.len(),
            tally:      Tally::default(),
            procs,
        })
    }

    /// Runs until every process has finished.
    pub fn run<L: EventLog>(&mut self, log: &mut L) -> Result<Summary, SimError> {
        while self.step(log)? {}

        Ok(self.summary())
    }

    /// Simulates one quantum. Returns `false` once there is nothing
    /// left to run.
    ///
    /// Within a step, new arrivals are admitted first, then the running
    /// process is charged its quantum (and retired if done), and finally
    /// the head of the ready queue that can obtain memory is dispatched.
    pub fn step<L: EventLog>(&mut self, log: &mut L) -> Result<bool, SimError> {
        if self.unfinished == 0 {
            return Ok(false);
        }
        self.admit();

        if let Some(pid) = self.running {
            let p = &mut self.procs[pid];
            p.remaining = p.remaining.saturating_sub(self.quantum);
            if p.remaining == 0 {
                self.finish(pid, log)?;
            }
        }

        // With nobody waiting, a running process simply keeps the CPU:
        // no preemption, no new RUNNING line.
        if !self.ready.is_empty() {
            if let Some(pid) = self.running.take() {
                self.procs[pid].status = Status::Ready;
                self.ready.push_back(pid);
            }
            self.dispatch(log)?;
        }

        self.clock = self.clock.checked_add(self.quantum).ok_or_else(|| {
            SimError::Config(format!("quantum {} overflows the clock at {}", self.quantum, self.clock))
        })?;

        Ok(self.unfinished > 0)
    }

    /// Moves every process whose arrival time has come to the ready
    /// queue, in arrival order.
    fn admit(&mut self) {
        while let Some(&pid) = self.unready.front() {
            if self.procs[pid].arrival > self.clock {
                break;
            }
            self.unready.pop_front();
            self.procs[pid].status = Status::Ready;
            self.ready.push_back(pid);
            trace!("{} admitted at {}", self.procs[pid].name, self.clock);
        }
    }

    fn finish<L: EventLog>(&mut self, pid: Pid, log: &mut L) -> Result<(), SimError> {
        self.memory.free(pid, &mut self.procs, self.clock, log)?;

        let p = &mut self.procs[pid];
        p.status = Status::Finished;
        self.tally.record(p.turnaround(self.clock), p.service);
        log.record(Event::Finished {
            time:           self.clock,
            name:           p.name.clone(),
            proc_remaining: self.ready.len(),
        })?;

        self.running = None;
        self.unfinished -= 1;

        Ok(())
    }

    /// Picks the first ready process that can get memory. Refused
    /// candidates go to the back of the queue, so everyone else keeps
    /// their relative order.
    fn dispatch<L: EventLog>(&mut self, log: &mut L) -> Result<(), SimError> {
        let mut refusals = 0;
        let pid = loop {
            let Some(pid) = self.ready.pop_front() else {
                return Err(SimError::Starved { time: self.clock });
            };
            if self.memory.try_allocate(pid, &mut self.procs, self.clock, log)? {
                break pid;
            }
            debug!("{} refused memory at {}", self.procs[pid].name, self.clock);
            self.ready.push_back(pid);
            refusals += 1;
            // A full rotation without success will never end.
            if refusals >= self.ready.len() {
                return Err(SimError::Starved { time: self.clock });
            }
        };

        self.memory.touch(pid);
        self.running = Some(pid);
        let p = &mut self.procs[pid];
        p.status = Status::Running;
        log.record(Event::Running {
            time:       self.clock,
            name:       p.name.clone(),
            remaining:  p.remaining,
            placement:  self.memory.placement(p),
        })?;

        Ok(())
    }

    pub fn summary(&self) -> Summary {
        self.tally.summarize(self.clock.saturating_sub(self.quantum))
    }

    #[inline(always)]
    pub fn clock(&self) -> SimTime {
        self.clock
    }

    #[inline(always)]
    pub fn is_done(&self) -> bool {
        self.unfinished == 0
    }

    pub fn processes(&self) -> &[Process] {
        &self.procs
    }

    pub fn memory(&self) -> &MemoryManager {
        &self.memory
    }

    pub fn running(&self) -> Option<&Process> {
        self.running.map(|pid| &self.procs[pid])
    }

    /// Pids waiting for the CPU, head first.
    pub fn ready_queue(&self) -> impl Iterator<Item = Pid> + '_ {
        self.ready.iter().copied()
    }
}
