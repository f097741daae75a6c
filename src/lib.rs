//! A CHIP-8 virtual machine core.
//!
//! The machine owns its memory, registers, call stack, timers, display and
//! keypad. It performs no I/O: the host loads a program, calls
//! [`VirtualMachine::step`] and [`VirtualMachine::tick`] at whatever rates it
//! likes, feeds key states in and reads the framebuffer out.

pub mod emulator;

pub use emulator::config::Config;
pub use emulator::error::VmError;
pub use emulator::vm::VirtualMachine;
