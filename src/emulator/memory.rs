use super::basics::{Address, Value, FONT_OFFSET, FONT_SPRITES, MEMORY_SIZE, PROGRAM_START};

/// The 4 KiB address space. Accesses past the end never trap: reads yield
/// zero and writes are dropped.
#[derive(Clone)]
pub struct Memory {
    cells: [Value; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the font glyphs in place.
    pub fn new() -> Memory {
        let mut cells = [Value(0); MEMORY_SIZE];
        for (cell, font_byte) in cells
            .iter_mut()
            .skip(FONT_OFFSET as usize)
            .zip(FONT_SPRITES.iter())
        {
            *cell = Value(*font_byte);
        }
        Memory { cells }
    }

    pub fn read(&self, addr: Address) -> Value {
        self.cells
            .get(addr.0 as usize)
            .copied()
            .unwrap_or(Value(0))
    }

    pub fn write(&mut self, addr: Address, value: Value) {
        if let Some(cell) = self.cells.get_mut(addr.0 as usize) {
            *cell = value;
        }
    }

    /// Copies `program` to the program area. Bytes that would land past the
    /// end of memory are dropped.
    pub fn load_program(&mut self, program: &[u8]) {
        for (cell, byte) in self
            .cells
            .iter_mut()
            .skip(PROGRAM_START as usize)
            .zip(program.iter())
        {
            *cell = Value(*byte);
        }
    }

    pub fn as_bytes(&self) -> impl Iterator<Item = u8> + '_ {
        self.cells.iter().map(|v| v.0)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Memory::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emulator::basics::MAX_PROGRAM_SIZE;

    #[test]
    fn test_font_loaded() {
        let memory = Memory::new();
        for (i, byte) in FONT_SPRITES.iter().enumerate() {
            assert_eq!(memory.read(Address(i as u16)), Value(*byte));
        }
        assert!(memory.as_bytes().skip(FONT_SPRITES.len()).all(|b| b == 0));
    }

    #[test]
    fn test_out_of_range() {
        let mut memory = Memory::new();
        memory.write(Address(0x1000), Value(0xAB));
        memory.write(Address(0xFFFF), Value(0xAB));
        assert_eq!(memory.read(Address(0x1000)), Value(0));
        assert_eq!(memory.read(Address(0xFFFF)), Value(0));
        memory.write(Address(0xFFF), Value(0xAB));
        assert_eq!(memory.read(Address(0xFFF)), Value(0xAB));
    }

    #[test]
    fn test_load_program() {
        let mut memory = Memory::new();
        memory.load_program(&[0x12, 0x00, 0x34]);
        assert_eq!(memory.read(Address(0x200)), Value(0x12));
        assert_eq!(memory.read(Address(0x201)), Value(0x00));
        assert_eq!(memory.read(Address(0x202)), Value(0x34));
        assert_eq!(memory.read(Address(0x203)), Value(0));
    }

    #[test]
    fn test_load_program_truncates() {
        let mut memory = Memory::new();
        let program = vec![0x77; MAX_PROGRAM_SIZE + 10];
        memory.load_program(&program);
        assert_eq!(memory.read(Address(0xFFF)), Value(0x77));
        assert_eq!(memory.as_bytes().count(), MEMORY_SIZE);
    }
}
