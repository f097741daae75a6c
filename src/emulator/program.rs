use super::basics::{Address, Register, Value};

/// A decoded CHIP-8 instruction.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Instruction {
    ClearDisplay,
    ReturnSubroutine,
    Jump(Address),
    CallSubroutine(Address),
    IfEqualConst(Register, Value),
    IfNotEqualConst(Register, Value),
    IfEqual(Register, Register),
    SetConst(Register, Value),
    AddConst(Register, Value),
    Set(Register, Register),
    Or(Register, Register),
    And(Register, Register),
    Xor(Register, Register),
    Add(Register, Register),
    Sub(Register, Register),
    RightShift(Register),
    NegSub(Register, Register),
    LeftShift(Register),
    IfNotEqual(Register, Register),
    SetI(Address),
    JumpAdd(Address),
    Rand(Register, Value),
    Draw(Register, Register, Value),
    IfKey(Register),
    IfNotKey(Register),
    GetDelayTimer(Register),
    WaitKey(Register),
    SetDelayTimer(Register),
    SetSoundTimer(Register),
    AddToI(Register),
    SpriteAddr(Register),
    Decimal(Register),
    StoreRegisters(Register),
    LoadRegisters(Register),
}

macro_rules! NNN {
    ($x:expr) => {
        Address(($x.1 as u16) << 8 | ($x.2 as u16) << 4 | ($x.3 as u16))
    };
}

macro_rules! NN {
    ($x:expr) => {
        Value($x.2 << 4 | $x.3)
    };
}

macro_rules! N {
    ($x:expr) => {
        Value($x.3)
    };
}

macro_rules! X {
    ($x:expr) => {
        Register($x.1)
    };
}

macro_rules! Y {
    ($x:expr) => {
        Register($x.2)
    };
}

impl Instruction {
    /// Decodes the instruction word made of `hi` followed by `lo`.
    pub fn from_bytes(hi: u8, lo: u8) -> Option<Instruction> {
        Instruction::decode(u16::from(hi) << 8 | u16::from(lo))
    }

    /// Decodes a 16-bit opcode. Returns `None` for words outside the base
    /// instruction set, including machine code routines (`0nnn`).
    pub fn decode(opcode: u16) -> Option<Instruction> {
        let nibbles = (
            (opcode >> 12 & 0x0F) as u8,
            (opcode >> 8 & 0x0F) as u8,
            (opcode >> 4 & 0x0F) as u8,
            (opcode & 0x0F) as u8,
        );
        let instruction = match nibbles {
            (0x0, 0x0, 0xE, 0x0) => Instruction::ClearDisplay,
            (0x0, 0x0, 0xE, 0xE) => Instruction::ReturnSubroutine,
            (0x1, _, _, _) => Instruction::Jump(NNN!(nibbles)),
            (0x2, _, _, _) => Instruction::CallSubroutine(NNN!(nibbles)),
            (0x3, _, _, _) => Instruction::IfEqualConst(X!(nibbles), NN!(nibbles)),
            (0x4, _, _, _) => Instruction::IfNotEqualConst(X!(nibbles), NN!(nibbles)),
            (0x5, _, _, 0x0) => Instruction::IfEqual(X!(nibbles), Y!(nibbles)),
            (0x6, _, _, _) => Instruction::SetConst(X!(nibbles), NN!(nibbles)),
            (0x7, _, _, _) => Instruction::AddConst(X!(nibbles), NN!(nibbles)),
            (0x8, _, _, 0x0) => Instruction::Set(X!(nibbles), Y!(nibbles)),
            (0x8, _, _, 0x1) => Instruction::Or(X!(nibbles), Y!(nibbles)),
            (0x8, _, _, 0x2) => Instruction::And(X!(nibbles), Y!(nibbles)),
            (0x8, _, _, 0x3) => Instruction::Xor(X!(nibbles), Y!(nibbles)),
            (0x8, _, _, 0x4) => Instruction::Add(X!(nibbles), Y!(nibbles)),
            (0x8, _, _, 0x5) => Instruction::Sub(X!(nibbles), Y!(nibbles)),
            (0x8, _, _, 0x6) => Instruction::RightShift(X!(nibbles)),
            (0x8, _, _, 0x7) => Instruction::NegSub(X!(nibbles), Y!(nibbles)),
            (0x8, _, _, 0xE) => Instruction::LeftShift(X!(nibbles)),
            (0x9, _, _, 0x0) => Instruction::IfNotEqual(X!(nibbles), Y!(nibbles)),
            (0xA, _, _, _) => Instruction::SetI(NNN!(nibbles)),
            (0xB, _, _, _) => Instruction::JumpAdd(NNN!(nibbles)),
            (0xC, _, _, _) => Instruction::Rand(X!(nibbles), NN!(nibbles)),
            (0xD, _, _, _) => Instruction::Draw(X!(nibbles), Y!(nibbles), N!(nibbles)),
            (0xE, _, 0x9, 0xE) => Instruction::IfKey(X!(nibbles)),
            (0xE, _, 0xA, 0x1) => Instruction::IfNotKey(X!(nibbles)),
            (0xF, _, 0x0, 0x7) => Instruction::GetDelayTimer(X!(nibbles)),
            (0xF, _, 0x0, 0xA) => Instruction::WaitKey(X!(nibbles)),
            (0xF, _, 0x1, 0x5) => Instruction::SetDelayTimer(X!(nibbles)),
            (0xF, _, 0x1, 0x8) => Instruction::SetSoundTimer(X!(nibbles)),
            (0xF, _, 0x1, 0xE) => Instruction::AddToI(X!(nibbles)),
            (0xF, _, 0x2, 0x9) => Instruction::SpriteAddr(X!(nibbles)),
            (0xF, _, 0x3, 0x3) => Instruction::Decimal(X!(nibbles)),
            (0xF, _, 0x5, 0x5) => Instruction::StoreRegisters(X!(nibbles)),
            (0xF, _, 0x6, 0x5) => Instruction::LoadRegisters(X!(nibbles)),
            _ => return None,
        };
        Some(instruction)
    }
}
