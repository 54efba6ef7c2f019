use pretty_assertions::assert_eq;

use super::render;
use crate::*;

#[test]
fn infinite() {
    let input = "0 P1 4 100\n1 P2 2 100\n";
    let expected = "\
0,RUNNING,process-name=P1,remaining-time=4
2,RUNNING,process-name=P2,remaining-time=2
4,FINISHED,process-name=P2,proc-remaining=1
4,RUNNING,process-name=P1,remaining-time=2
6,FINISHED,process-name=P1,proc-remaining=0
Turnaround time 5
Time overhead 1.50 1.50
Makespan 6";

    assert_eq!(render(input, Config::new(Strategy::Infinite, 2)), expected);
}

#[test]
fn first_fit_retries_refused_process() {
    // P2 cannot fit next to P1 and has to wait for it to finish.
    let input = "0 P1 10 1000\n1 P2 4 1200\n2 P3 3 500\n";
    let expected = "\
0,RUNNING,process-name=P1,remaining-time=10,mem-usage=49%,allocated-at=0
3,RUNNING,process-name=P3,remaining-time=3,mem-usage=74%,allocated-at=1000
6,FINISHED,process-name=P3,proc-remaining=2
6,RUNNING,process-name=P1,remaining-time=7,mem-usage=49%,allocated-at=0
9,RUNNING,process-name=P1,remaining-time=4,mem-usage=49%,allocated-at=0
12,RUNNING,process-name=P1,remaining-time=1,mem-usage=49%,allocated-at=0
15,FINISHED,process-name=P1,proc-remaining=1
15,RUNNING,process-name=P2,remaining-time=4,mem-usage=59%,allocated-at=0
21,FINISHED,process-name=P2,proc-remaining=0
Turnaround time 13
Time overhead 5.00 2.61
Makespan 21";

    assert_eq!(render(input, Config::new(Strategy::FirstFit, 3)), expected);
}

#[test]
fn paged_evicts_least_recent_process() {
    // 8 frames; three processes of 3 frames each.
    let input = "0 A 2 12\n0 B 2 12\n0 C 1 12\n";
    let expected = "\
0,RUNNING,process-name=A,remaining-time=2,mem-usage=38%,mem-frames=[0,1,2]
1,RUNNING,process-name=B,remaining-time=2,mem-usage=75%,mem-frames=[3,4,5]
2,EVICTED,evicted-frames=[0,1,2]
2,RUNNING,process-name=C,remaining-time=1,mem-usage=75%,mem-frames=[0,1,2]
3,EVICTED,evicted-frames=[0,1,2]
3,FINISHED,process-name=C,proc-remaining=2
3,RUNNING,process-name=A,remaining-time=1,mem-usage=75%,mem-frames=[0,1,2]
4,EVICTED,evicted-frames=[0,1,2]
4,FINISHED,process-name=A,proc-remaining=1
4,RUNNING,process-name=B,remaining-time=1,mem-usage=38%,mem-frames=[3,4,5]
5,EVICTED,evicted-frames=[3,4,5]
5,FINISHED,process-name=B,proc-remaining=0
Turnaround time 4
Time overhead 3.00 2.50
Makespan 5";

    let config = Config::new(Strategy::Paged, 1).with_capacity(32);
    assert_eq!(render(input, config), expected);
}

#[test]
fn virtual_takes_only_what_it_lacks() {
    // A grabs 5 of 8 frames; B then needs a working set of 4 and
    // takes a single frame away from A, which keeps running on 4.
    let input = "0 A 2 20\n0 B 2 16\n";
    let expected = "\
0,RUNNING,process-name=A,remaining-time=2,mem-usage=63%,mem-frames=[0,1,2,3,4]
1,EVICTED,evicted-frames=[0]
1,RUNNING,process-name=B,remaining-time=2,mem-usage=100%,mem-frames=[0,5,6,7]
2,RUNNING,process-name=A,remaining-time=1,mem-usage=100%,mem-frames=[1,2,3,4]
3,EVICTED,evicted-frames=[1,2,3,4]
3,FINISHED,process-name=A,proc-remaining=1
3,RUNNING,process-name=B,remaining-time=1,mem-usage=50%,mem-frames=[0,5,6,7]
4,EVICTED,evicted-frames=[0,5,6,7]
4,FINISHED,process-name=B,proc-remaining=0
Turnaround time 4
Time overhead 2.00 1.75
Makespan 4";

    let config = Config::new(Strategy::Virtual, 1).with_capacity(32);
    assert_eq!(render(input, config), expected);
}
