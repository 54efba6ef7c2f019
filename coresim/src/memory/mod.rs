//! Memory managers. One [MemoryManager] is built per simulation from
//! the configured [Strategy], and every request is dispatched on it.

mod contiguous;
mod paging;

pub mod recency;
pub mod table;

pub use contiguous::Contiguous;
pub use paging::{Paging, PagingMode};

use crate::helpe::*;

#[derive(Debug, Clone)]
pub enum MemoryManager {
    Infinite,
    FirstFit(Contiguous),
    Paged(Paging),
}

impl MemoryManager {
    pub fn new(strategy: Strategy, capacity_kb: usize) -> Result<Self, SimError> {
        if capacity_kb == 0 {
            return Err(SimError::Config(String::from("memory capacity must be positive")));
        }

        Ok(match strategy {
            Strategy::Infinite  => Self::Infinite,
            Strategy::FirstFit  => Self::FirstFit(Contiguous::new(capacity_kb)),
            Strategy::Paged     => Self::Paged(Paging::new(capacity_kb, PagingMode::Fixed)?),
            Strategy::Virtual   => Self::Paged(Paging::new(capacity_kb, PagingMode::Virtual)?),
        })
    }

    /// Makes sure `procs[pid]` holds memory before it runs.
    ///
    /// Returns `Ok(false)` only under first-fit, when no hole is big
    /// enough yet; nothing is modified in that case and the caller is
    /// expected to try again later. Already-allocated processes always
    /// succeed without any change.
    pub fn try_allocate<L: EventLog>(
        &mut self,
        pid:    Pid,
        procs:  &mut [Process],
        now:    SimTime,
        log:    &mut L,
    ) -> Result<bool, SimError> {
        match self {
            Self::Infinite      => Ok(true),
            Self::FirstFit(c)   => c.allocate(&mut procs[pid]),
            Self::Paged(p)      => p.allocate(pid, procs, now, log),
        }
    }

    /// Releases everything `procs[pid]` holds.
    pub fn free<L: EventLog>(
        &mut self,
        pid:    Pid,
        procs:  &mut [Process],
        now:    SimTime,
        log:    &mut L,
    ) -> Result<(), SimError> {
        match self {
            Self::Infinite      => Ok(()),
            Self::FirstFit(c)   => {
                c.free(&mut procs[pid]);
                Ok(())
            },
            Self::Paged(p)      => p.free(pid, procs, now, log),
        }
    }

    /// Records that `pid` was just dispatched.
    pub fn touch(&mut self, pid: Pid) {
        if let Self::Paged(p) = self {
            p.touch(pid);
        }
    }

    /// What the `RUNNING` line reports about `proc`.
    pub fn placement(&self, proc: &Process) -> Option<Placement> {
        match self {
            Self::Infinite      => None,
            Self::FirstFit(c)   => proc.block.map(|start| Placement::Block {
                usage:  c.usage_percent(),
                start,
            }),
            Self::Paged(p)      => Some(Placement::Frames {
                usage:  p.usage_percent(),
                frames: proc.frames.clone(),
            }),
        }
    }

    /// Units currently marked used: KB under first-fit, frames under
    /// the paged strategies.
    pub fn units_in_use(&self) -> usize {
        match self {
            Self::Infinite      => 0,
            Self::FirstFit(c)   => c.usage(),
            Self::Paged(p)      => p.table().count_used(),
        }
    }

    /// Size of the unit table. Zero under the infinite strategy, which
    /// keeps none.
    pub fn capacity_units(&self) -> usize {
        match self {
            Self::Infinite      => 0,
            Self::FirstFit(c)   => c.table().len(),
            Self::Paged(p)      => p.table().len(),
        }
    }
}
