//! Batch runs: memory-patch programs and self-test programs.
//!
//! These are the non-interactive drivers: load, optionally patch memory,
//! run to the halt instruction, read the result out of memory or the output
//! channel.

use intcode_vm::{Machine, Program, Status};

use crate::error::{blocked_failure, DriverError};

/// Run a program to the halt instruction with the given inputs queued up
/// front, returning everything it wrote to the output channel.
pub fn run_program(program: &Program, inputs: &[i64]) -> Result<Vec<i64>, DriverError> {
    let mut machine = Machine::new(program);
    machine.feed(inputs.iter().copied());
    match machine.run_until_blocked() {
        Status::Halted => Ok(machine.drain_output()),
        _ => Err(blocked_failure(&machine, "running a batch program")),
    }
}

/// Patch addresses 1 and 2, run to halt, and return the value left at
/// address 0.
pub fn run_with_patch(program: &Program, noun: i64, verb: i64) -> Result<i64, DriverError> {
    let mut machine = Machine::new(program);
    machine.memory_mut().write(1, noun)?;
    machine.memory_mut().write(2, verb)?;
    match machine.run_until_blocked() {
        Status::Halted => Ok(machine.memory().read(0)?),
        _ => Err(blocked_failure(&machine, "running a patched program")),
    }
}

/// Search the 0..=99 noun/verb grid for the patch that leaves `target` at
/// address 0. A candidate that faults simply isn't the answer.
pub fn find_patch(program: &Program, target: i64) -> Option<(i64, i64)> {
    for noun in 0..=99 {
        for verb in 0..=99 {
            if let Ok(result) = run_with_patch(program, noun, verb) {
                if result == target {
                    return Some((noun, verb));
                }
            }
        }
    }
    None
}

/// Run a self-test program for the given system id.
///
/// The program reports a sequence of per-check results followed by one
/// diagnostic code; every check result must be zero. Returns the code.
pub fn self_test(program: &Program, system_id: i64) -> Result<i64, DriverError> {
    let output = run_program(program, &[system_id])?;
    let (&code, checks) = output
        .split_last()
        .ok_or_else(|| DriverError::Protocol("self-test produced no output".to_string()))?;
    if let Some(&bad) = checks.iter().find(|&&v| v != 0) {
        return Err(DriverError::Protocol(format!(
            "self-test check failed with {}",
            bad
        )));
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(cells: &[i64]) -> Program {
        Program::new(cells.to_vec())
    }

    #[test]
    fn run_program_collects_output() {
        let out = run_program(&program(&[3, 0, 4, 0, 99]), &[123]).unwrap();
        assert_eq!(out, vec![123]);
    }

    #[test]
    fn run_program_rejects_starvation() {
        let err = run_program(&program(&[3, 0, 99]), &[]).unwrap_err();
        assert!(matches!(err, DriverError::UnexpectedSuspension { .. }));
    }

    #[test]
    fn patch_overwrites_noun_and_verb() {
        // With noun=0/verb=0 this is the self-add: mem[0] = mem[0] + mem[0].
        let result = run_with_patch(&program(&[1, 9, 9, 0, 99, 0, 0, 0, 0, 1]), 0, 0).unwrap();
        assert_eq!(result, 2);
    }

    #[test]
    fn find_patch_round_trips() {
        let image = program(&[1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50]);
        let (noun, verb) = find_patch(&image, 3500).expect("target is reachable");
        assert_eq!(run_with_patch(&image, noun, verb).unwrap(), 3500);
    }

    #[test]
    fn find_patch_gives_up() {
        assert_eq!(find_patch(&program(&[99]), 12345), None);
    }

    #[test]
    fn self_test_returns_final_code() {
        // Prints 0, 0, then echoes the system id as the code.
        let image = program(&[104, 0, 104, 0, 3, 0, 4, 0, 99]);
        assert_eq!(self_test(&image, 9).unwrap(), 9);
    }

    #[test]
    fn self_test_flags_failed_check() {
        let image = program(&[104, 7, 104, 0, 99]);
        let err = self_test(&image, 1).unwrap_err();
        assert!(err.to_string().contains("7"));
    }
}
