//! Driver-side errors.

use intcode_vm::{AddressFault, Fault, Machine, Status};
use thiserror::Error;

use crate::load::LoadError;

/// Errors raised while driving a machine.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The machine raised a fatal fault mid-run.
    #[error("machine faulted: {0}")]
    Fault(#[from] Fault),

    /// The machine halted where the driver still expected to talk to it.
    #[error("machine halted while {context}")]
    UnexpectedHalt { context: &'static str },

    /// The machine asked for input where the driver expected it to finish.
    #[error("machine suspended while {context}")]
    UnexpectedSuspension { context: &'static str },

    /// The machine's output did not follow the driver's protocol.
    #[error("protocol violation: {0}")]
    Protocol(String),
}

impl From<AddressFault> for DriverError {
    fn from(fault: AddressFault) -> Self {
        DriverError::Fault(fault.into())
    }
}

/// Classify a machine that blocked somewhere the driver wanted it to keep
/// going (or to halt cleanly).
pub(crate) fn blocked_failure(machine: &Machine, context: &'static str) -> DriverError {
    match machine.status() {
        Status::Suspended => DriverError::UnexpectedSuspension { context },
        Status::Halted => DriverError::UnexpectedHalt { context },
        _ => match machine.fault() {
            Some(fault) => DriverError::Fault(fault),
            None => DriverError::Protocol(format!("machine stopped unexpectedly while {context}")),
        },
    }
}
