use crate::helpe::*;
use super::{recency::RecencyQueue, table::FrameTable};

/// How much of itself a process needs resident, and therefore
/// how much an eviction victim gives up.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PagingMode {
    /// The whole process must be resident. Victims lose every frame.
    Fixed,
    /// A [WORKING_SET_FRAMES] working set suffices. Victims lose only
    /// as many frames as the pending request still lacks.
    Virtual,
}

/// Paged allocation over a [FrameTable] of [FRAME_SIZE_KB] frames.
///
/// Pressure is never answered with a refusal. Instead, frames are
/// reclaimed from other processes, least recently dispatched first,
/// as tracked by the [RecencyQueue].
#[derive(Debug, Clone)]
pub struct Paging {
    frames:     FrameTable,
    recency:    RecencyQueue,
    mode:       PagingMode,
}

impl Paging {
    pub fn new(capacity_kb: usize, mode: PagingMode) -> Result<Self, SimError> {
        let num_frames = capacity_kb / FRAME_SIZE_KB;
        if num_frames == 0 {
            return Err(SimError::Config(format!(
                "{capacity_kb} KB cannot hold a single {FRAME_SIZE_KB} KB frame"
            )));
        }

        Ok(Self {
            frames:     FrameTable::new(num_frames),
            recency:    RecencyQueue::new(),
            mode,
        })
    }

    /// Gives `procs[pid]` its frames unless it already holds some.
    ///
    /// In [PagingMode::Fixed] the process gets all the frames it needs,
    /// evicting others to make room. In [PagingMode::Virtual] it gets as
    /// many as are free, and eviction only runs to secure the working set.
    pub fn allocate<L: EventLog>(
        &mut self,
        pid:    Pid,
        procs:  &mut [Process],
        now:    SimTime,
        log:    &mut L,
    ) -> Result<bool, SimError> {
        if !procs[pid].frames.is_empty() {
            return Ok(true);
        }
        let required = procs[pid].frames_needed();
        let free = self.frames.count_free();

        let granted = match self.mode {
            PagingMode::Fixed => {
                if required > self.frames.len() {
                    return Err(SimError::Capacity {
                        name:       procs[pid].name.clone(),
                        needed:     required,
                        capacity:   self.frames.len(),
                    });
                }
                if free < required {
                    let wanted = required - free;
                    let reclaimed = self.evict(wanted, procs, now, log)?.len();
                    if reclaimed < wanted {
                        return Err(SimError::EvictionShort { time: now, wanted, reclaimed });
                    }
                }
                required
            },
            PagingMode::Virtual => {
                let budget = required.min(WORKING_SET_FRAMES);
                if free < budget {
                    self.evict(budget - free, procs, now, log)?;
                }
                required.min(self.frames.count_free())
            },
        };

        let assigned = self.frames.first_free(granted);
        for &f in &assigned {
            self.frames.mark(f, true);
        }
        procs[pid].frames = assigned;

        Ok(true)
    }

    /// Reclaims at least `wanted` frames from resident processes, least
    /// recently dispatched first, unless there is nobody left to take
    /// them from. Returns the frames in the order they were reclaimed.
    ///
    /// A victim that ends up with no frames leaves the recency queue and
    /// will fault its frames back in at its next dispatch. A victim that
    /// keeps some stays at the head.
    pub fn evict<L: EventLog>(
        &mut self,
        wanted: usize,
        procs:  &mut [Process],
        now:    SimTime,
        log:    &mut L,
    ) -> Result<Vec<FrameIdx>, SimError> {
        let mut reclaimed = vec![];
        while reclaimed.len() < wanted {
            let Some(victim) = self.recency.front() else { break; };
            let held = procs[victim].frames.len();
            if held == 0 || procs[victim].is_finished() {
                self.recency.remove(victim);
                continue;
            }

            let quota = match self.mode {
                PagingMode::Fixed   => held,
                PagingMode::Virtual => (wanted - reclaimed.len()).min(held),
            };
            for f in procs[victim].frames.drain(..quota) {
                self.frames.mark(f, false);
                reclaimed.push(f);
            }
            debug!("Evicted {quota} of {held} frames from {}", procs[victim].name);

            if procs[victim].frames.is_empty() {
                self.recency.remove(victim);
            }
        }

        if reclaimed.len() < wanted {
            warn!("Eviction at {now} found only {} of {wanted} frames", reclaimed.len());
        }
        if !reclaimed.is_empty() {
            log.record(Event::Evicted {
                time:   now,
                frames: reclaimed.clone(),
            })?;
        }

        Ok(reclaimed)
    }

    /// Releases every frame of `procs[pid]` and forgets it was ever
    /// dispatched.
    pub fn free<L: EventLog>(
        &mut self,
        pid:    Pid,
        procs:  &mut [Process],
        now:    SimTime,
        log:    &mut L,
    ) -> Result<(), SimError> {
        let released = std::mem::take(&mut procs[pid].frames);
        for &f in &released {
            self.frames.mark(f, false);
        }
        self.recency.remove(pid);
        log.record(Event::Evicted {
            time:   now,
            frames: released,
        })?;

        Ok(())
    }

    pub fn touch(&mut self, pid: Pid) {
        self.recency.touch(pid);
    }

    /// Share of frames in use, in whole percent, rounded up.
    pub fn usage_percent(&self) -> usize {
        (100 * self.frames.count_used()).div_ceil(self.frames.len())
    }

    pub fn table(&self) -> &FrameTable {
        &self.frames
    }

    pub fn recency(&self) -> &RecencyQueue {
        &self.recency
    }
}
