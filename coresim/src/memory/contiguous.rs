use crate::helpe::*;
use super::table::BlockTable;

/// First-fit contiguous allocation over a [BlockTable] of KB units.
#[derive(Debug, Clone)]
pub struct Contiguous {
    blocks: BlockTable,
    // Units handed out, kept alongside the table for cheap usage reports.
    usage:  usize,
}

impl Contiguous {
    pub fn new(capacity_kb: usize) -> Self {
        Self {
            blocks: BlockTable::new(capacity_kb),
            usage:  0,
        }
    }

    /// Places `proc` at the lowest hole that fits it. Returns `false`,
    /// touching nothing, when there is no such hole right now.
    pub fn allocate(&mut self, proc: &mut Process) -> Result<bool, SimError> {
        if proc.block.is_some() {
            return Ok(true);
        }
        if proc.mem_kb > self.blocks.len() {
            return Err(SimError::Capacity {
                name:       proc.name.clone(),
                needed:     proc.mem_kb,
                capacity:   self.blocks.len(),
            });
        }

        match self.blocks.find_first_fit(proc.mem_kb) {
            Some(start) => {
                self.blocks.mark_range(start, proc.mem_kb, true);
                self.usage += proc.mem_kb;
                proc.block = Some(start);
                Ok(true)
            },
            None => {
                debug!("No {} KB hole for {} ({} KB in use)", proc.mem_kb, proc.name, self.usage);
                Ok(false)
            },
        }
    }

    pub fn free(&mut self, proc: &mut Process) {
        if let Some(start) = proc.block.take() {
            self.blocks.mark_range(start, proc.mem_kb, false);
            self.usage -= proc.mem_kb;
        }
    }

    pub fn usage(&self) -> usize {
        self.usage
    }

    /// Share of memory in use, in whole percent, rounded up.
    pub fn usage_percent(&self) -> usize {
        (100 * self.usage).div_ceil(self.blocks.len())
    }

    pub fn table(&self) -> &BlockTable {
        &self.blocks
    }
}
