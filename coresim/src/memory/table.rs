/// A fixed-length array of free/used flags, one per allocation unit.
///
/// The same structure backs both the block table of the contiguous
/// strategy (one unit per KB) and the frame table of the paged ones
/// (one unit per frame).
#[derive(Debug, Clone)]
pub struct UnitTable {
    used: Vec<bool>,
}

pub type BlockTable = UnitTable;
pub type FrameTable = UnitTable;

impl UnitTable {
    /// Creates a table of `len` free units.
    pub fn new(len: usize) -> Self {
        Self {
            used: vec![false; len],
        }
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.used.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    #[inline(always)]
    pub fn is_used(&self, idx: usize) -> bool {
        self.used[idx]
    }

    /// Flips a single unit. Units must actually change state: marking
    /// a used unit as used means two owners, which is a bug upstream.
    #[inline(always)]
    pub fn mark(&mut self, idx: usize, used: bool) {
        debug_assert!(self.used[idx] != used, "Unit {idx} is already {}", if used { "used" } else { "free" });
        self.used[idx] = used;
    }

    pub fn mark_range(&mut self, start: usize, len: usize, used: bool) {
        for idx in start..start + len {
            self.mark(idx, used);
        }
    }

    pub fn count_free(&self) -> usize {
        self.used.iter().filter(|u| !**u).count()
    }

    pub fn count_used(&self) -> usize {
        self.len() - self.count_free()
    }

    /// Returns the lowest offset at which `len` consecutive units are
    /// free. No compaction is attempted; `None` just means "not now".
    pub fn find_first_fit(&self, len: usize) -> Option<usize> {
        if len > self.len() {
            return None;
        }
        let mut run_start = 0;
        let mut run_len = 0;
        for (idx, used) in self.used.iter().enumerate() {
            if run_len == len {
                break;
            }
            if *used {
                run_start = idx + 1;
                run_len = 0;
            } else {
                run_len += 1;
            }
        }

        if run_len == len { Some(run_start) } else { None }
    }

    /// Up to `n` free unit indices, lowest first.
    pub fn first_free(&self, n: usize) -> Vec<usize> {
        self.used.iter()
            .enumerate()
            .filter(|(_, used)| !**used)
            .map(|(idx, _)| idx)
            .take(n)
            .collect()
    }
}
