use super::basics::{Address, SCREEN_HEIGHT, SCREEN_WIDTH};
use super::memory::Memory;

/// Monochrome 64x32 framebuffer, stored row-major.
#[derive(Clone)]
pub struct Display {
    pixels: [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT],
    changed: bool,
}

impl Display {
    pub fn new() -> Display {
        Display {
            pixels: [[false; SCREEN_WIDTH]; SCREEN_HEIGHT],
            changed: false,
        }
    }

    pub fn pixels(&self) -> &[[bool; SCREEN_WIDTH]; SCREEN_HEIGHT] {
        &self.pixels
    }

    /// Out-of-range coordinates read as unlit.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.pixels
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Returns the changed flag and resets it.
    pub fn take_changed(&mut self) -> bool {
        std::mem::replace(&mut self.changed, false)
    }

    pub fn clear(&mut self) {
        for row in self.pixels.iter_mut() {
            for pixel in row.iter_mut() {
                if *pixel {
                    *pixel = false;
                    self.changed = true;
                }
            }
        }
    }

    /// XORs a sprite of `height` rows, read from memory at `sprite`, onto the
    /// screen with its top-left corner at `(sx, sy)`. Pixels past the right or
    /// bottom edge are clipped.
    ///
    /// Returns true if any lit pixel was turned off.
    pub fn draw(
        &mut self,
        sx: usize,
        sy: usize,
        sprite: Address,
        height: u8,
        memory: &Memory,
    ) -> bool {
        let mut collided = false;
        for row in 0..height {
            let y = sy + row as usize;
            if y >= SCREEN_HEIGHT {
                break;
            }
            let bits = memory.read(sprite.offset(row as u16)).0;
            for col in 0..8 {
                let x = sx + col;
                if x >= SCREEN_WIDTH {
                    break;
                }
                if bits & (0x80 >> col) == 0 {
                    continue;
                }
                let pixel = &mut self.pixels[y][x];
                if *pixel {
                    collided = true;
                }
                *pixel = !*pixel;
                self.changed = true;
            }
        }
        collided
    }
}

impl Default for Display {
    fn default() -> Self {
        Display::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emulator::basics::Value;

    fn memory_with(sprite: &[u8]) -> Memory {
        let mut memory = Memory::new();
        memory.load_program(sprite);
        memory
    }

    fn lit_count(display: &Display) -> usize {
        display
            .pixels()
            .iter()
            .map(|row| row.iter().filter(|p| **p).count())
            .sum()
    }

    #[test]
    fn test_draw_and_undraw() {
        let memory = Memory::new();
        let mut display = Display::new();
        // glyph "0"
        assert!(!display.draw(10, 4, Address(0), 5, &memory));
        assert!(display.take_changed());
        assert!(display.pixel(10, 4));
        assert!(display.pixel(13, 4));
        assert!(!display.pixel(11, 5));
        assert_eq!(lit_count(&display), 14);

        assert!(display.draw(10, 4, Address(0), 5, &memory));
        assert!(display.take_changed());
        assert_eq!(lit_count(&display), 0);
    }

    #[test]
    fn test_partial_overlap() {
        let memory = memory_with(&[0b1100_0000, 0b0011_0000]);
        let mut display = Display::new();
        assert!(!display.draw(0, 0, Address(0x200), 1, &memory));
        // second row shares no lit pixels with the first
        assert!(!display.draw(0, 0, Address(0x201), 1, &memory));
        assert_eq!(lit_count(&display), 4);
        assert!(display.draw(1, 0, Address(0x200), 1, &memory));
        assert!(display.pixel(0, 0));
        assert!(!display.pixel(1, 0));
        assert!(!display.pixel(2, 0));
        assert!(display.pixel(3, 0));
    }

    #[test]
    fn test_clipping() {
        let memory = memory_with(&[0xFF, 0xFF, 0xFF]);
        let mut display = Display::new();
        display.draw(60, 30, Address(0x200), 3, &memory);
        assert_eq!(lit_count(&display), 8);
        assert!(display.pixel(63, 31));
        assert!(!display.pixel(0, 0));
        assert!(!display.pixel(0, 31));
    }

    #[test]
    fn test_offscreen_start() {
        let memory = memory_with(&[0xFF]);
        let mut display = Display::new();
        assert!(!display.draw(64, 0, Address(0x200), 1, &memory));
        assert!(!display.draw(0, 200, Address(0x200), 1, &memory));
        assert!(!display.changed());
        assert_eq!(lit_count(&display), 0);
    }

    #[test]
    fn test_blank_sprite_does_not_change() {
        let mut memory = Memory::new();
        memory.write(Address(0x300), Value(0));
        let mut display = Display::new();
        display.draw(0, 0, Address(0x300), 1, &memory);
        assert!(!display.changed());
    }

    #[test]
    fn test_clear() {
        let memory = Memory::new();
        let mut display = Display::new();
        display.clear();
        assert!(!display.changed());

        display.draw(0, 0, Address(0), 5, &memory);
        display.take_changed();
        display.clear();
        assert!(display.take_changed());
        assert!(!display.take_changed());
        assert_eq!(lit_count(&display), 0);
    }

    #[test]
    fn test_sprite_past_memory_end() {
        let mut memory = Memory::new();
        memory.write(Address(0xFFF), Value(0x80));
        let mut display = Display::new();
        display.draw(0, 0, Address(0xFFF), 3, &memory);
        assert!(display.pixel(0, 0));
        assert!(!display.pixel(0, 1));
        assert_eq!(lit_count(&display), 1);
    }
}
