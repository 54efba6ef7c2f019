use crate::helpe::*;

/// Processes in the order they were last dispatched, least recent
/// first. Each pid appears at most once.
///
/// This is the victim source for eviction: the head is the resident
/// process that has waited longest since it last ran.
#[derive(Debug, Clone, Default)]
pub struct RecencyQueue {
    order: IndexSet<Pid>,
}

impl RecencyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves `pid` to the tail, inserting it if absent.
    pub fn touch(&mut self, pid: Pid) {
        self.order.shift_remove(&pid);
        self.order.insert(pid);
    }

    pub fn remove(&mut self, pid: Pid) -> bool {
        self.order.shift_remove(&pid)
    }

    /// The least recently dispatched process.
    pub fn front(&self) -> Option<Pid> {
        self.order.first().copied()
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.order.contains(&pid)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Pid> + '_ {
        self.order.iter().copied()
    }
}
