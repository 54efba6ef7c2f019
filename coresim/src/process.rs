use crate::helpe::*;

impl Process {
    /// Creates a freshly loaded [Process]: unready, holding no memory,
    /// with all of its service still ahead of it.
    pub fn new(
        id:         Pid,
        name:       String,
        arrival:    SimTime,
        service:    SimTime,
        mem_kb:     usize,
    ) -> Self {
        Self {
            id,
            name,
            arrival,
            service,
            remaining:  service,
            mem_kb,
            status:     Status::Unready,
            block:      None,
            frames:     vec![],
        }
    }

    /// Number of [FRAME_SIZE_KB] frames needed to hold the whole process.
    #[inline(always)]
    pub fn frames_needed(&self) -> usize {
        self.mem_kb.div_ceil(FRAME_SIZE_KB)
    }

    /// Allocation units currently held: KB for a contiguous block,
    /// frames otherwise. Zero under the infinite strategy.
    #[inline(always)]
    pub fn units_held(&self) -> usize {
        if self.block.is_some() {
            self.mem_kb
        } else {
            self.frames.len()
        }
    }

    #[inline(always)]
    pub fn is_resident(&self) -> bool {
        self.block.is_some() || !self.frames.is_empty()
    }

    #[inline(always)]
    pub fn is_finished(&self) -> bool {
        self.status == Status::Finished
    }

    /// Time spent in the system if the process completes at `now`.
    #[inline(always)]
    pub fn turnaround(&self, now: SimTime) -> SimTime {
        now - self.arrival
    }
}
