use crate::executor::{Executor, TIMER_INTERVAL};
use chip8::{VirtualMachine, VmError};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::{fs::File, io, io::Read, path::Path, time::Duration};
use thiserror::Error;

pub struct Config {
    pub steps_per_frame: u32,
    pub frame_interval: Duration,
    pub frames: u32,
}

#[derive(Debug, Error)]
pub enum RomError {
    #[error("cannot read ROM: {0}")]
    Io(#[from] io::Error),
    #[error("unknown profile {0:?}")]
    UnknownProfile(String),
    #[error(transparent)]
    Vm(#[from] VmError),
}

lazy_static! {
    static ref PROFILES: HashMap<&'static str, Config> = vec![
        ("default", Config {
            steps_per_frame: 10,
            frame_interval: TIMER_INTERVAL,
            frames: 600,
        }),
        ("slow", Config {
            steps_per_frame: 2,
            frame_interval: TIMER_INTERVAL,
            frames: 600,
        }),
        ("fast", Config {
            steps_per_frame: 30,
            frame_interval: TIMER_INTERVAL,
            frames: 600,
        }),
        ("headless", Config {
            steps_per_frame: 10,
            frame_interval: Duration::from_millis(0),
            frames: 6000,
        }),
    ]
    .into_iter()
    .collect();
}

pub fn profile(name: &str) -> Result<&'static Config, RomError> {
    PROFILES
        .get(name)
        .ok_or_else(|| RomError::UnknownProfile(name.to_string()))
}

pub fn profile_names() -> Vec<&'static str> {
    let mut names: Vec<_> = PROFILES.keys().copied().collect();
    names.sort_unstable();
    names
}

fn load_rom_file(path: &Path) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut raw_rom = Vec::new();
    file.read_to_end(&mut raw_rom)?;
    Ok(raw_rom)
}

/// Reads a ROM and wraps a freshly loaded VM in an executor paced by the
/// named profile. Returns the executor and the number of frames to run.
pub fn load_rom(path: &Path, profile_name: &str) -> Result<(Executor, u32), RomError> {
    let config = profile(profile_name)?;
    let mut vm = VirtualMachine::new();
    vm.load_program(&load_rom_file(path)?)?;
    let executor = Executor::new(config.steps_per_frame, config.frame_interval, vm);
    Ok((executor, config.frames))
}
