use std::io::Read;

use crate::constants::{MEMORY_SIZE, PROGRAM_START};
use crate::error::{Fault, LoadError};
use crate::instruction::Instruction;
use crate::operations;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - the current `state` (registers, memory, frame buffer)
///  - `pressed_keys`, filled in by some input collaborator
///  - a monotonic `cycle_count` used by the frontend for pacing
///
/// Supplies interfaces for:
/// - loading programs
/// - pressing and releasing keys
/// - advancing the CPU one instruction at a time
/// - advancing its timers once per frame
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    pressed_keys: [bool; 16],
    cycle_count: u64,
    program_size: usize,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8 {
            state: State::new(),
            pressed_keys: [false; 16],
            cycle_count: 0,
            program_size: 0,
        }
    }

    /// Load a program from a byte source.
    ///
    /// The font sprites are already in place below 0x200 (see
    /// `State::new`); the program bytes land at 0x200. Fails if the source
    /// can't be read or the program doesn't fit in memory. Returns the
    /// loaded length, which is recorded for diagnostics only.
    pub fn load_program(&mut self, reader: &mut dyn Read) -> Result<usize, LoadError> {
        let mut program = Vec::new();
        reader.read_to_end(&mut program)?;

        let start = PROGRAM_START as usize;
        let capacity = MEMORY_SIZE - start;
        if program.len() > capacity {
            return Err(LoadError::TooLarge {
                size: program.len(),
                capacity,
            });
        }

        self.state.memory[start..start + program.len()].copy_from_slice(&program);
        self.program_size = program.len();
        log::info!("loaded {} byte program at {:#06X}", program.len(), start);
        Ok(program.len())
    }

    /// The current frame buffer, read by the display once per frame
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Set the pressed status of a key
    ///
    /// # Arguments
    /// * `key` the logical key 0..F that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.pressed_keys[key as usize] = true;
    }

    /// Unset the pressed status of a key
    ///
    /// # Arguments
    /// * `key` the logical key 0..F that was released
    pub fn key_release(&mut self, key: u8) {
        self.pressed_keys[key as usize] = false;
    }

    /// Advances the CPU by a single cycle
    /// - fetches and decodes the opcode under the program counter
    /// - executes it against the current state
    ///
    /// Returns the total cycle count, which only ever grows. Faults
    /// (invalid opcode, stack or memory violations) are terminal; the
    /// interpreter is left in its pre-fault state.
    pub fn step(&mut self) -> Result<u64, Fault> {
        let opcode = self.fetch()?;
        let instruction = Instruction::decode(opcode).ok_or(Fault::InvalidOpcode {
            opcode,
            pc: self.state.pc,
        })?;
        log::trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            opcode,
            self.state.v,
            self.state.i,
            self.state.pc
        );
        self.state = operations::execute(instruction, &self.state, &self.pressed_keys)?;
        self.cycle_count += 1;
        Ok(self.cycle_count)
    }

    /// Decrements both timers, flooring at 0
    ///
    /// Called once per rendered frame, not once per instruction.
    pub fn tick_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Re-zeroes every register, timer and the frame buffer, restores the
    /// sprite sheet and points the program counter back at 0x200. The
    /// cycle count is pacing bookkeeping and is deliberately not reset.
    pub fn reset(&mut self) {
        self.state = State::new();
        self.pressed_keys = [false; 16];
        self.program_size = 0;
    }

    /// The number of cycles executed so far
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }

    /// The length of the loaded program in bytes
    pub fn program_size(&self) -> usize {
        self.program_size
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two
    /// subsequent bytes. An unconstrained jump can point the pc anywhere,
    /// so the fetch itself is bounds checked.
    fn fetch(&self) -> Result<u16, Fault> {
        let pc = self.state.pc as usize;
        if pc + 1 >= MEMORY_SIZE {
            return Err(Fault::MemoryOutOfBounds { address: pc });
        }
        Ok(u16::from(self.state.memory[pc]) << 8 | u16::from(self.state.memory[pc + 1]))
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_combines_bytes() {
        let mut chip8 = Chip8::new();
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(chip8.fetch(), Ok(0xAABB));
    }

    #[test]
    fn test_fetch_faults_past_memory() {
        let mut chip8 = Chip8::new();
        chip8.state.pc = 0xFFF;
        assert_eq!(
            chip8.fetch(),
            Err(Fault::MemoryOutOfBounds { address: 0xFFF })
        );
    }

    #[test]
    fn test_step_advances_pc_and_cycle_count() {
        let mut chip8 = Chip8::new();
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0x00, 0xE0]);
        assert_eq!(chip8.step(), Ok(1));
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.cycle_count(), 1);
    }

    #[test]
    fn test_step_reports_invalid_opcode() {
        let mut chip8 = Chip8::new();
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0x0A, 0xBC]);
        assert_eq!(
            chip8.step(),
            Err(Fault::InvalidOpcode {
                opcode: 0x0ABC,
                pc: 0x200
            })
        );
        // the fault is terminal; nothing advanced
        assert_eq!(chip8.state.pc, 0x200);
        assert_eq!(chip8.cycle_count(), 0);
    }

    #[test]
    fn test_load_program() {
        let mut chip8 = Chip8::new();
        let mut program: &[u8] = &[0x00, 0xE0, 0x12, 0x00];
        assert_eq!(chip8.load_program(&mut program).unwrap(), 4);
        assert_eq!(chip8.state.memory[0x200..0x204], [0x00, 0xE0, 0x12, 0x00]);
        assert_eq!(chip8.program_size(), 4);
        assert_eq!(chip8.state.pc, 0x200);
    }

    #[test]
    fn test_load_program_rejects_oversized() {
        let mut chip8 = Chip8::new();
        let big = vec![0u8; 4096 - 0x200 + 1];
        let mut reader: &[u8] = &big;
        match chip8.load_program(&mut reader) {
            Err(LoadError::TooLarge { size, capacity }) => {
                assert_eq!(size, 3585);
                assert_eq!(capacity, 3584);
            }
            other => panic!("expected TooLarge, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_load_program_accepts_max_size() {
        let mut chip8 = Chip8::new();
        let max = vec![0xAAu8; 4096 - 0x200];
        let mut reader: &[u8] = &max;
        assert_eq!(chip8.load_program(&mut reader).unwrap(), 3584);
        assert_eq!(chip8.state.memory[0xFFF], 0xAA);
    }

    #[test]
    fn test_keys_round_trip() {
        let mut chip8 = Chip8::new();
        chip8.key_press(0xE);
        assert!(chip8.pressed_keys[0xE]);
        chip8.key_release(0xE);
        assert!(!chip8.pressed_keys[0xE]);
    }

    #[test]
    fn test_key_skip_sees_pressed_key() {
        let mut chip8 = Chip8::new();
        // EX9E with V0 = 0: skip if key 0 is down
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0xE0, 0x9E]);
        chip8.key_press(0x0);
        chip8.step().unwrap();
        assert_eq!(chip8.state.pc, 0x204);
    }

    #[test]
    fn test_tick_timers_floor_at_zero() {
        let mut chip8 = Chip8::new();
        chip8.state.delay_timer = 2;
        chip8.state.sound_timer = 1;
        chip8.tick_timers();
        chip8.tick_timers();
        assert_eq!(chip8.state.delay_timer, 0);
        assert_eq!(chip8.state.sound_timer, 0);
        // a further tick must not underflow
        chip8.tick_timers();
        assert_eq!(chip8.state.delay_timer, 0);
        assert_eq!(chip8.state.sound_timer, 0);
    }

    #[test]
    fn test_reset_restores_initial_state_but_not_cycles() {
        let mut chip8 = Chip8::new();
        let mut program: &[u8] = &[0x6A, 0xBC];
        chip8.load_program(&mut program).unwrap();
        chip8.step().unwrap();
        chip8.key_press(0x3);
        chip8.reset();
        assert_eq!(chip8.state.pc, 0x200);
        assert_eq!(chip8.state.v, [0; 16]);
        assert_eq!(chip8.state.memory[0x200], 0);
        assert!(!chip8.pressed_keys[0x3]);
        assert_eq!(chip8.cycle_count(), 1);
    }

    #[test]
    fn test_fx0a_busy_polls_across_steps() {
        let mut chip8 = Chip8::new();
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0xF1, 0x0A]);
        // no key: the same instruction re-executes each cycle
        chip8.step().unwrap();
        chip8.step().unwrap();
        assert_eq!(chip8.state.pc, 0x200);
        assert_eq!(chip8.cycle_count(), 2);
        // a key press lets it through
        chip8.key_press(0x5);
        chip8.step().unwrap();
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.v[0x1], 0x1);
    }
}
