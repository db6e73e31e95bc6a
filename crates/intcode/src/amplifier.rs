//! Amplifier chains and feedback rings.
//!
//! Several machines run the same controller program, each seeded with a
//! distinct phase setting. In a serial chain the signal flows through each
//! stage once; in a feedback ring the last stage's output is routed back to
//! the first until every stage halts. All routing is explicit channel
//! hand-off performed here, one stage at a time.

use intcode_vm::{Machine, Program, Status};
use smallvec::SmallVec;

use crate::error::{blocked_failure, DriverError};

/// A phase assignment, one value per amplifier stage.
pub type Phases = SmallVec<[i64; 5]>;

/// Send `signal` through a serial chain, one freshly loaded machine per
/// phase, and return what the last stage emits.
pub fn chain_signal(program: &Program, phases: &[i64]) -> Result<i64, DriverError> {
    let mut signal = 0;
    for &phase in phases {
        let mut machine = Machine::new(program);
        machine.feed([phase, signal]);
        if machine.run_until_blocked() != Status::Halted {
            return Err(blocked_failure(&machine, "running an amplifier stage"));
        }
        signal = machine
            .drain_output()
            .last()
            .copied()
            .ok_or_else(|| DriverError::Protocol("amplifier stage emitted no signal".to_string()))?;
    }
    Ok(signal)
}

/// Run a feedback ring to completion and return the final signal handed
/// back to the first stage.
///
/// Each stage runs until it blocks, its output is moved onto the next
/// stage's input channel, and the round-robin repeats until the last stage
/// halts. A round in which nothing moves means the controller deadlocked.
pub fn feedback_signal(program: &Program, phases: &[i64]) -> Result<i64, DriverError> {
    let mut ring: Vec<Machine> = phases
        .iter()
        .map(|&phase| {
            let mut machine = Machine::new(program);
            machine.push_input(phase);
            machine
        })
        .collect();
    let Some(first) = ring.first_mut() else {
        return Err(DriverError::Protocol("feedback ring has no stages".to_string()));
    };
    first.push_input(0);

    let last = ring.len() - 1;
    let mut signal = None;
    loop {
        let mut moved = 0;
        for i in 0..ring.len() {
            if ring[i].run_until_blocked() == Status::Faulted {
                return Err(blocked_failure(&ring[i], "running a feedback stage"));
            }
            let output = ring[i].drain_output();
            moved += output.len();
            if i == last {
                if let Some(&value) = output.last() {
                    signal = Some(value);
                }
            }
            let next = (i + 1) % ring.len();
            ring[next].feed(output);
        }
        if ring[last].status() == Status::Halted {
            return signal
                .ok_or_else(|| DriverError::Protocol("feedback ring emitted no signal".to_string()));
        }
        if moved == 0 {
            return Err(DriverError::Protocol(
                "feedback ring deadlocked with every stage starved".to_string(),
            ));
        }
    }
}

/// Best signal over all orderings of the serial phase settings 0..=4.
pub fn best_chain_signal(program: &Program) -> Result<i64, DriverError> {
    best_signal(program, [0, 1, 2, 3, 4], chain_signal)
}

/// Best signal over all orderings of the feedback phase settings 5..=9.
pub fn best_feedback_signal(program: &Program) -> Result<i64, DriverError> {
    best_signal(program, [5, 6, 7, 8, 9], feedback_signal)
}

fn best_signal(
    program: &Program,
    phases: [i64; 5],
    run: fn(&Program, &[i64]) -> Result<i64, DriverError>,
) -> Result<i64, DriverError> {
    let mut best = None;
    for ordering in permutations(Phases::from_slice(&phases)) {
        let signal = run(program, &ordering)?;
        if best.is_none_or(|b| signal > b) {
            best = Some(signal);
        }
    }
    best.ok_or_else(|| DriverError::Protocol("no phase orderings to try".to_string()))
}

/// All orderings of `values`, by Heap's algorithm.
fn permutations(mut values: Phases) -> Vec<Phases> {
    fn heap(values: &mut Phases, k: usize, out: &mut Vec<Phases>) {
        if k <= 1 {
            out.push(values.clone());
            return;
        }
        for i in 0..k {
            heap(values, k - 1, out);
            if k % 2 == 1 {
                values.swap(0, k - 1);
            } else {
                values.swap(i, k - 1);
            }
        }
    }

    let mut out = Vec::new();
    let len = values.len();
    heap(&mut values, len, &mut out);
    out
}
