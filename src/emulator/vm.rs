use super::basics::{
    Address, Register, Value, FONT_OFFSET, GLYPH_SIZE, MAX_PROGRAM_SIZE, PROGRAM_START,
    REGISTER_COUNT, STACK_DEPTH,
};
use super::config::Config;
use super::display::Display;
use super::error::VmError;
use super::keypad::Keypad;
use super::memory::Memory;
use super::program::Instruction;
use super::timers::Timers;
use arrayvec::ArrayVec;
use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Holds the logic of a virtual machine in action, including things like the
/// program counter and the memory.
///
/// The random source used by `Cxnn` is injected, so a seeded generator makes
/// a run fully reproducible.
pub struct VirtualMachine<R: RngCore = StdRng> {
    program_counter: Address,
    stack: ArrayVec<[Address; STACK_DEPTH]>,
    registers: [Value; REGISTER_COUNT],
    register_i: Address,
    timers: Timers,
    memory: Memory,
    display: Display,
    keypad: Keypad,
    error: Option<VmError>,
    config: Config,
    rng: R,
}

impl VirtualMachine<StdRng> {
    /// Creates a new VM with an entropy-seeded random source.
    pub fn new() -> VirtualMachine<StdRng> {
        VirtualMachine::with_config(Config::default(), StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> VirtualMachine<StdRng> {
        VirtualMachine::with_config(Config::default(), StdRng::seed_from_u64(seed))
    }
}

impl Default for VirtualMachine<StdRng> {
    fn default() -> Self {
        VirtualMachine::new()
    }
}

impl<R: RngCore> VirtualMachine<R> {
    /// Creates a new VM instance with all registers and memory set accordingly.
    pub fn with_config(config: Config, rng: R) -> VirtualMachine<R> {
        VirtualMachine {
            program_counter: Address(PROGRAM_START),
            stack: ArrayVec::new(),
            registers: [Value(0); REGISTER_COUNT],
            register_i: Address(0),
            timers: Timers::default(),
            memory: Memory::new(),
            display: Display::new(),
            keypad: Keypad::new(),
            error: None,
            config,
            rng,
        }
    }

    /// Puts every piece of machine state back to power-on. The program is
    /// gone afterwards; the configuration and random source are kept.
    pub fn reset(&mut self) {
        debug!("resetting virtual machine");
        self.program_counter = Address(PROGRAM_START);
        self.stack.clear();
        self.registers = [Value(0); REGISTER_COUNT];
        self.register_i = Address(0);
        self.timers = Timers::default();
        self.memory = Memory::new();
        self.display = Display::new();
        self.keypad = Keypad::new();
        self.error = None;
    }

    /// Copies a program to 0x200. Programs that do not fit are rejected and
    /// leave memory untouched.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), VmError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(VmError::ProgramTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }
        debug!("loading {} byte program", program.len());
        self.memory.load_program(program);
        Ok(())
    }

    /// Counts both timers down by one. Call at 60 Hz.
    pub fn tick(&mut self) {
        self.timers.tick();
    }

    /// Executes one instruction.
    ///
    /// While a key wait is pending and no key is down this does nothing. Once
    /// the machine has halted every call returns the recorded error.
    pub fn step(&mut self) -> Result<(), VmError> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        if self.keypad.waiting_register().is_some() {
            match self.keypad.resolve_wait() {
                Some((reg, key)) => *self.register(reg) = Value(key),
                None => return Ok(()),
            }
        }

        let address = self.program_counter;
        let hi = self.memory.read(address).0;
        let lo = self.memory.read(address.offset(1)).0;
        self.program_counter.advance();

        match Instruction::from_bytes(hi, lo) {
            Some(instruction) => {
                trace!("{:#05X}: {:?}", address.0, instruction);
                self.execute_instruction(&instruction, address)
            }
            None => self.halt(VmError::UnrecognizedOpcode {
                opcode: u16::from(hi) << 8 | u16::from(lo),
                address: address.0,
            }),
        }
    }

    pub fn set_key(&mut self, index: usize, pressed: bool) {
        self.keypad.set_key(index, pressed);
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn display_changed(&self) -> bool {
        self.display.changed()
    }

    /// Reads the display changed flag and clears it.
    pub fn take_display_changed(&mut self) -> bool {
        self.display.take_changed()
    }

    pub fn should_emit_sound(&self) -> bool {
        self.timers.sound_active()
    }

    pub fn error(&self) -> Option<&VmError> {
        self.error.as_ref()
    }

    pub fn is_halted(&self) -> bool {
        self.error.is_some()
    }

    pub fn waiting_register(&self) -> Option<Register> {
        self.keypad.waiting_register()
    }

    pub fn pc(&self) -> Address {
        self.program_counter
    }

    pub fn index(&self) -> Address {
        self.register_i
    }

    pub fn registers(&self) -> &[Value; REGISTER_COUNT] {
        &self.registers
    }

    pub fn stack(&self) -> &[Address] {
        &self.stack
    }

    pub fn delay_timer(&self) -> Value {
        self.timers.delay
    }

    pub fn sound_timer(&self) -> Value {
        self.timers.sound
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn config(&self) -> Config {
        self.config
    }

    fn halt(&mut self, err: VmError) -> Result<(), VmError> {
        warn!("halting: {}", err);
        self.error = Some(err.clone());
        Err(err)
    }

    /// Returns the control flow from a subroutine.
    fn return_subroutine(&mut self, at: Address) -> Result<(), VmError> {
        match self.stack.pop() {
            Some(addr) => self.program_counter = addr,
            None if self.config.strict_stack => {
                return self.halt(VmError::StackUnderflow { address: at.0 })
            }
            None => {}
        }
        Ok(())
    }

    /// Calls a subroutine. A full stack drops the return address unless the
    /// stack is strict.
    fn call_subroutine(&mut self, target: Address, at: Address) -> Result<(), VmError> {
        if self.stack.try_push(self.program_counter).is_err() && self.config.strict_stack {
            return self.halt(VmError::StackOverflow { address: at.0 });
        }
        self.program_counter = target;
        Ok(())
    }

    /// Returns the value of one of the registers.
    fn register(&mut self, reg: Register) -> &mut Value {
        &mut self.registers[reg.0 as usize & 0x0F]
    }

    fn get(&self, reg: Register) -> u8 {
        self.registers[reg.0 as usize & 0x0F].0
    }

    /// Stores an ALU result in `vx` and then the flag in VF, so VF as the
    /// destination ends up holding the flag.
    fn set_with_flag(&mut self, vx: Register, value: u8, flag: bool) {
        *self.register(vx) = Value(value);
        *self.register(Register::VF) = Value(flag as u8);
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.program_counter.advance();
        }
    }

    /// Executes a single decoded instruction. The program counter already
    /// points past it.
    fn execute_instruction(
        &mut self,
        instruction: &Instruction,
        at: Address,
    ) -> Result<(), VmError> {
        match *instruction {
            // Jumps
            Instruction::CallSubroutine(addr) => return self.call_subroutine(addr, at),
            Instruction::ReturnSubroutine => return self.return_subroutine(at),
            Instruction::Jump(addr) => self.program_counter = addr,
            Instruction::JumpAdd(addr) => {
                self.program_counter = addr.offset(u16::from(self.get(Register::V0)));
            }

            // Conditionals
            Instruction::IfEqualConst(vx, n) => self.skip_if(self.get(vx) == n.0),
            Instruction::IfNotEqualConst(vx, n) => self.skip_if(self.get(vx) != n.0),
            Instruction::IfEqual(vx, vy) => self.skip_if(self.get(vx) == self.get(vy)),
            Instruction::IfNotEqual(vx, vy) => self.skip_if(self.get(vx) != self.get(vy)),

            // Register Arithmetic
            Instruction::SetConst(vx, n) => *self.register(vx) = n,
            Instruction::AddConst(vx, n) => {
                let value = self.get(vx).wrapping_add(n.0);
                *self.register(vx) = Value(value);
            }
            Instruction::Set(vx, vy) => *self.register(vx) = Value(self.get(vy)),
            Instruction::Or(vx, vy) => *self.register(vx) = Value(self.get(vx) | self.get(vy)),
            Instruction::And(vx, vy) => *self.register(vx) = Value(self.get(vx) & self.get(vy)),
            Instruction::Xor(vx, vy) => *self.register(vx) = Value(self.get(vx) ^ self.get(vy)),
            Instruction::Add(vx, vy) => {
                let (value, carry) = self.get(vx).overflowing_add(self.get(vy));
                self.set_with_flag(vx, value, carry);
            }
            Instruction::Sub(vx, vy) => {
                let (value, borrow) = self.get(vx).overflowing_sub(self.get(vy));
                self.set_with_flag(vx, value, !borrow);
            }
            Instruction::RightShift(vx) => {
                let old = self.get(vx);
                self.set_with_flag(vx, old >> 1, old & 0x01 != 0);
            }
            Instruction::NegSub(vx, vy) => {
                let (value, borrow) = self.get(vy).overflowing_sub(self.get(vx));
                self.set_with_flag(vx, value, !borrow);
            }
            Instruction::LeftShift(vx) => {
                let old = self.get(vx);
                self.set_with_flag(vx, old << 1, old & 0x80 != 0);
            }

            // Key presses
            Instruction::IfKey(vx) => {
                let pressed = self.keypad.is_pressed(self.get(vx) as usize);
                self.skip_if(pressed);
            }
            Instruction::IfNotKey(vx) => {
                let pressed = self.keypad.is_pressed(self.get(vx) as usize);
                self.skip_if(!pressed);
            }
            Instruction::WaitKey(vx) => self.keypad.wait_for_key(vx),

            // Graphics
            Instruction::Draw(vx, vy, n) => {
                let x0 = self.get(vx) as usize;
                let y0 = self.get(vy) as usize;
                let collided = self
                    .display
                    .draw(x0, y0, self.register_i, n.0, &self.memory);
                *self.register(Register::VF) = Value(collided as u8);
            }
            Instruction::ClearDisplay => self.display.clear(),
            Instruction::SpriteAddr(vx) => {
                let digit = u16::from(self.get(vx) & 0x0F);
                self.register_i = Address(FONT_OFFSET + digit * GLYPH_SIZE);
            }

            // Timers
            Instruction::GetDelayTimer(vx) => *self.register(vx) = self.timers.delay,
            Instruction::SetDelayTimer(vx) => self.timers.delay = Value(self.get(vx)),
            Instruction::SetSoundTimer(vx) => self.timers.sound = Value(self.get(vx)),

            // I register
            Instruction::SetI(addr) => self.register_i = addr,
            Instruction::AddToI(vx) => {
                self.register_i = self.register_i.offset(u16::from(self.get(vx)));
            }
            Instruction::Decimal(vx) => {
                let value = self.get(vx);
                let base = self.register_i;
                self.memory.write(base, Value(value / 100));
                self.memory.write(base.offset(1), Value(value / 10 % 10));
                self.memory.write(base.offset(2), Value(value % 10));
            }
            Instruction::StoreRegisters(vx) => {
                for i in 0..=vx.0 {
                    let value = Value(self.get(Register(i)));
                    self.memory.write(self.register_i.offset(u16::from(i)), value);
                }
            }
            Instruction::LoadRegisters(vx) => {
                for i in 0..=vx.0 {
                    let value = self.memory.read(self.register_i.offset(u16::from(i)));
                    *self.register(Register(i)) = value;
                }
            }

            // Misc
            Instruction::Rand(vx, n) => {
                let rand: u8 = self.rng.gen();
                *self.register(vx) = Value(rand & n.0);
            }
        }
        Ok(())
    }
}
