use super::basics::{Register, KEY_COUNT};

/// The hexadecimal keypad and the pending `Fx0A` wait.
#[derive(Clone, Debug, Default)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
    waiting: Option<Register>,
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    /// Indices outside 0-15 are ignored.
    pub fn set_key(&mut self, index: usize, pressed: bool) {
        if let Some(key) = self.keys.get_mut(index) {
            *key = pressed;
        }
    }

    /// Indices outside 0-15 are never pressed.
    pub fn is_pressed(&self, index: usize) -> bool {
        self.keys.get(index).copied().unwrap_or(false)
    }

    /// Lowest-numbered key currently held down.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|k| *k).map(|i| i as u8)
    }

    pub fn waiting_register(&self) -> Option<Register> {
        self.waiting
    }

    pub fn wait_for_key(&mut self, reg: Register) {
        self.waiting = Some(reg);
    }

    /// If a wait is pending and some key is down, ends the wait and returns
    /// the register to fill together with the key index.
    pub fn resolve_wait(&mut self) -> Option<(Register, u8)> {
        let reg = self.waiting?;
        let key = self.first_pressed()?;
        self.waiting = None;
        Some((reg, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_key_bounds() {
        let mut keypad = Keypad::new();
        keypad.set_key(16, true);
        keypad.set_key(usize::MAX, true);
        assert_eq!(keypad.first_pressed(), None);
        keypad.set_key(15, true);
        assert!(keypad.is_pressed(15));
        assert!(!keypad.is_pressed(16));
        keypad.set_key(15, false);
        assert!(!keypad.is_pressed(15));
    }

    #[test]
    fn test_first_pressed_is_lowest() {
        let mut keypad = Keypad::new();
        keypad.set_key(9, true);
        keypad.set_key(3, true);
        assert_eq!(keypad.first_pressed(), Some(3));
    }

    #[test]
    fn test_resolve_wait() {
        let mut keypad = Keypad::new();
        keypad.set_key(4, true);
        assert_eq!(keypad.resolve_wait(), None);

        keypad.set_key(4, false);
        keypad.wait_for_key(Register(7));
        assert_eq!(keypad.resolve_wait(), None);
        assert_eq!(keypad.waiting_register(), Some(Register(7)));

        keypad.set_key(0xA, true);
        assert_eq!(keypad.resolve_wait(), Some((Register(7), 0xA)));
        assert_eq!(keypad.waiting_register(), None);
    }
}
