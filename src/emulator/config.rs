/// Behaviour switches for the virtual machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Halt on call stack overflow or underflow instead of ignoring it.
    pub strict_stack: bool,
}

impl Config {
    pub fn strict() -> Config {
        Config { strict_stack: true }
    }
}
