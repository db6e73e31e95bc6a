//! Instruction-word decoding.
//!
//! An instruction word packs a two-digit opcode in its lowest digits and one
//! addressing-mode digit per operand above it:
//! `word = opcode + 100*mode1 + 1000*mode2 + 10000*mode3`.

use crate::error::Fault;

/// Addressing mode for one operand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// The raw word is an address; the operand is the value stored there.
    #[default]
    Position,
    /// The raw word is the operand itself. Never legal for write destinations.
    Immediate,
    /// The raw word is an offset from the relative base register.
    Relative,
}

impl Mode {
    fn from_digit(digit: i64) -> Option<Mode> {
        match digit {
            0 => Some(Mode::Position),
            1 => Some(Mode::Immediate),
            2 => Some(Mode::Relative),
            _ => None,
        }
    }
}

/// Operation selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    Add,
    Multiply,
    Input,
    Output,
    JumpIfTrue,
    JumpIfFalse,
    LessThan,
    Equals,
    AdjustRelativeBase,
    Halt,
}

impl Opcode {
    fn from_code(code: i64) -> Option<Opcode> {
        match code {
            1 => Some(Opcode::Add),
            2 => Some(Opcode::Multiply),
            3 => Some(Opcode::Input),
            4 => Some(Opcode::Output),
            5 => Some(Opcode::JumpIfTrue),
            6 => Some(Opcode::JumpIfFalse),
            7 => Some(Opcode::LessThan),
            8 => Some(Opcode::Equals),
            9 => Some(Opcode::AdjustRelativeBase),
            99 => Some(Opcode::Halt),
            _ => None,
        }
    }

    /// How many operand words follow the instruction word.
    pub fn operand_count(self) -> usize {
        match self {
            Opcode::Add | Opcode::Multiply | Opcode::LessThan | Opcode::Equals => 3,
            Opcode::JumpIfTrue | Opcode::JumpIfFalse => 2,
            Opcode::Input | Opcode::Output | Opcode::AdjustRelativeBase => 1,
            Opcode::Halt => 0,
        }
    }

    /// Human-readable name, for diagnostics.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "add",
            Opcode::Multiply => "mul",
            Opcode::Input => "in",
            Opcode::Output => "out",
            Opcode::JumpIfTrue => "jnz",
            Opcode::JumpIfFalse => "jz",
            Opcode::LessThan => "lt",
            Opcode::Equals => "eq",
            Opcode::AdjustRelativeBase => "arb",
            Opcode::Halt => "halt",
        }
    }
}

/// A decoded instruction: the operation plus the addressing mode of each
/// operand it takes. Modes for operands the opcode does not use are left at
/// the Position default and their digits are ignored, as the historical
/// encoding allows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub modes: [Mode; 3],
}

impl Instruction {
    /// Decode an instruction word. Fails on an unrecognized opcode or an
    /// out-of-range mode digit for an operand the opcode actually uses.
    pub fn decode(word: i64) -> Result<Instruction, Fault> {
        let opcode =
            Opcode::from_code(word % 100).ok_or(Fault::UnknownOpcode { opcode: word % 100 })?;

        let mut modes = [Mode::Position; 3];
        let mut digits = word / 100;
        for mode in modes.iter_mut().take(opcode.operand_count()) {
            let digit = digits % 10;
            *mode = Mode::from_digit(digit).ok_or(Fault::InvalidMode { digit })?;
            digits /= 10;
        }

        Ok(Instruction { opcode, modes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_bare_opcode() {
        let instr = Instruction::decode(2).unwrap();
        assert_eq!(instr.opcode, Opcode::Multiply);
        assert_eq!(instr.modes, [Mode::Position; 3]);
    }

    #[test]
    fn decode_mixed_modes() {
        // 1002: multiply, operand 1 position, operand 2 immediate, dst position.
        let instr = Instruction::decode(1002).unwrap();
        assert_eq!(instr.opcode, Opcode::Multiply);
        assert_eq!(instr.modes, [Mode::Position, Mode::Immediate, Mode::Position]);
    }

    #[test]
    fn decode_relative_modes() {
        // 21101: add, both value operands immediate, dst relative.
        let instr = Instruction::decode(21101).unwrap();
        assert_eq!(instr.opcode, Opcode::Add);
        assert_eq!(instr.modes, [Mode::Immediate, Mode::Immediate, Mode::Relative]);
    }

    #[test]
    fn decode_unknown_opcode() {
        assert_eq!(
            Instruction::decode(5555),
            Err(Fault::UnknownOpcode { opcode: 55 })
        );
        assert_eq!(Instruction::decode(0), Err(Fault::UnknownOpcode { opcode: 0 }));
        assert_eq!(
            Instruction::decode(-1),
            Err(Fault::UnknownOpcode { opcode: -1 })
        );
    }

    #[test]
    fn decode_invalid_mode_digit() {
        // 301: add with mode digit 3 on the first operand.
        assert_eq!(Instruction::decode(301), Err(Fault::InvalidMode { digit: 3 }));
    }

    #[test]
    fn unused_mode_digits_are_ignored() {
        // Halt takes no operands; stray upper digits are not an error.
        let instr = Instruction::decode(39999).unwrap();
        assert_eq!(instr.opcode, Opcode::Halt);
    }
}
