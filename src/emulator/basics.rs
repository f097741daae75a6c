pub const MEMORY_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;
pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub const FONT_OFFSET: u16 = 0;
pub const GLYPH_SIZE: u16 = 5;
pub const STACK_DEPTH: usize = 16;
pub const REGISTER_COUNT: usize = 16;
pub const KEY_COUNT: usize = 16;

/// Hexadecimal digits 0-F, five rows of 8 pixels each.
pub const FONT_SPRITES: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct Address(pub u16);

impl Address {
    /// Moves past one instruction word.
    pub fn advance(&mut self) {
        self.0 = self.0.wrapping_add(2);
    }

    pub fn offset(self, by: u16) -> Address {
        Address(self.0.wrapping_add(by))
    }
}

/// Index of one of the general purpose registers V0-VF.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Register(pub u8);

impl Register {
    pub const V0: Register = Register(0);
    pub const VF: Register = Register(0xF);
}

#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub struct Value(pub u8);
