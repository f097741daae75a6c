use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VmError {
    #[error("unrecognized opcode {opcode:#06X} at {address:#05X}")]
    UnrecognizedOpcode { opcode: u16, address: u16 },

    /// Only raised with [`Config::strict_stack`](super::config::Config).
    #[error("call stack overflow at {address:#05X}")]
    StackOverflow { address: u16 },

    /// Only raised with [`Config::strict_stack`](super::config::Config).
    #[error("return with empty call stack at {address:#05X}")]
    StackUnderflow { address: u16 },

    #[error("program is {size} bytes, at most {max} fit in memory")]
    ProgramTooLarge { size: usize, max: usize },
}

impl VmError {
    /// Whether this error stops the machine until reset.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, VmError::ProgramTooLarge { .. })
    }
}
