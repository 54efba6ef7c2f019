use crate::helpe::*;

/// Validates a freshly read set of processes.
/// A successfully returned workload is guaranteed to be
/// compliant with all of `coresim`'s assumptions. These are:
/// - there is at least one process
/// - no process has zero service time
/// - no process has zero memory
/// - every name is 1 to [MAX_NAME_LEN] characters long
/// - arrival times never decrease (admission only looks at the head)
///
/// This function is the gatekeeper to the rest of the library.
pub fn init(mut procs: Vec<Process>) -> Result<Vec<Process>, SimError> {
    if procs.is_empty() {
        return Err(SimError::EmptyWorkload);
    }
    let mut last_arrival = 0;
    for idx in 0..procs.len() {
        let p = &procs[idx];
        let message = if p.service == 0 {
            "Process with 0 service time found!"
        } else if p.mem_kb == 0 {
            "Process with 0 memory found!"
        } else if p.name.is_empty() || p.name.chars().count() > MAX_NAME_LEN {
            "Process name must be 1 to 9 characters long!"
        } else if p.arrival < last_arrival {
            "Arrival times must not decrease!"
        } else {
            last_arrival = p.arrival;
            continue;
        };

        return Err(SimError::Workload {
            message: String::from(message),
            culprit: Box::new(procs.swap_remove(idx)),
        });
    }

    Ok(procs)
}

/// Sum of all service times. No schedule can have a shorter makespan
/// than this, minus the arrival of the first process.
pub fn total_service(procs: &[Process]) -> SimTime {
    procs.iter().map(|p| p.service).sum()
}
