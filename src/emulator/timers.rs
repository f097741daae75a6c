use super::basics::Value;

/// Delay and sound down-counters, driven by an external 60 Hz tick.
#[derive(Clone, Copy, Debug, Default)]
pub struct Timers {
    pub delay: Value,
    pub sound: Value,
}

impl Timers {
    pub fn tick(&mut self) {
        self.delay.0 = self.delay.0.saturating_sub(1);
        self.sound.0 = self.sound.0.saturating_sub(1);
    }

    pub fn sound_active(&self) -> bool {
        self.sound.0 > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_floors_at_zero() {
        let mut timers = Timers::default();
        timers.tick();
        assert_eq!(timers.delay, Value(0));
        assert_eq!(timers.sound, Value(0));
    }

    #[test]
    fn test_independent_countdown() {
        let mut timers = Timers {
            delay: Value(3),
            sound: Value(1),
        };
        assert!(timers.sound_active());
        timers.tick();
        assert_eq!(timers.delay, Value(2));
        assert!(!timers.sound_active());
        timers.tick();
        timers.tick();
        timers.tick();
        assert_eq!(timers.delay, Value(0));
    }
}
