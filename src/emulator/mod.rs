pub mod ascii_display;
pub mod basics;
pub mod config;
pub mod display;
pub mod error;
pub mod keypad;
pub mod memory;
pub mod program;
pub mod timers;
pub mod vm;
