use chip8::{VirtualMachine, VmError};
use log::info;
use std::{
    thread,
    time::{Duration, Instant},
};

pub const TIMER_INTERVAL: Duration = Duration::from_micros(16667);

/// Drives a VM in frames: a fixed number of steps followed by one timer
/// tick, then a sleep until the frame interval has passed.
pub struct Executor {
    steps_per_frame: u32,
    frame_interval: Duration,
    vm: VirtualMachine,
}

impl Executor {
    pub fn new(steps_per_frame: u32, frame_interval: Duration, vm: VirtualMachine) -> Executor {
        Executor {
            steps_per_frame,
            frame_interval,
            vm,
        }
    }

    pub fn vm(&self) -> &VirtualMachine {
        &self.vm
    }

    /// Runs one frame. Returns whether the display changed during it.
    pub fn run_frame(&mut self) -> Result<bool, VmError> {
        for _ in 0..self.steps_per_frame {
            self.vm.step()?;
        }
        self.vm.tick();
        Ok(self.vm.take_display_changed())
    }

    /// Runs up to `frames` frames and returns how many of them redrew the
    /// screen. Stops early if the machine halts.
    pub fn run_frames(&mut self, frames: u32) -> Result<u32, VmError> {
        let mut redraws = 0;
        for _ in 0..frames {
            let started = Instant::now();
            if self.run_frame()? {
                redraws += 1;
            }
            if let Some(rest) = self.frame_interval.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }
        info!("ran {} frames, {} redraws", frames, redraws);
        Ok(redraws)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn executor_for(program: &[u8], steps_per_frame: u32) -> Executor {
        let mut vm = VirtualMachine::seeded(3);
        vm.load_program(program).unwrap();
        Executor::new(steps_per_frame, Duration::from_millis(0), vm)
    }

    #[test]
    fn test_timer_ticks_once_per_frame() {
        // delay = 10, then spin
        let mut executor = executor_for(&[0x60, 0x0A, 0xF0, 0x15, 0x12, 0x04], 7);
        assert_eq!(executor.run_frames(4), Ok(0));
        assert_eq!(executor.vm().delay_timer().0, 6);
    }

    #[test]
    fn test_counts_redraws() {
        // I = glyph 0, draw, spin
        let mut executor = executor_for(&[0xA0, 0x00, 0xD0, 0x05, 0x12, 0x04], 1);
        assert_eq!(executor.run_frames(5), Ok(1));
    }

    #[test]
    fn test_stops_on_halt() {
        let mut executor = executor_for(&[0x00, 0x00], 10);
        assert_eq!(
            executor.run_frames(3),
            Err(VmError::UnrecognizedOpcode {
                opcode: 0,
                address: 0x200
            })
        );
        assert!(executor.vm().is_halted());
    }
}
