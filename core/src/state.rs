use std::ops::Range;

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET, STACK_DEPTH,
};
use crate::error::Fault;

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, starting at 0x200
///
/// Pointer
/// - (sp) an 8-bit stack pointer in [0, 16]
///     - it points at the next free stack slot, so 16 means full
///
/// Timers
/// - 2 8-bit countdown timers (delay & sound)
/// - both are decremented once per rendered frame and floor at 0
///
/// ## Memory
/// - a 16 entry stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x050 holds the sprite sheet
///     - 0x200 onward holds the loaded program
/// - a 64x32 frame buffer of 1-bit pixels
///
/// All accesses through the index register are bounds checked and fault
/// rather than touching adjacent state.
#[derive(Debug, Copy, Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
}

impl State {
    pub fn new() -> Self {
        // 0x000..0x050 is reserved for the sprite sheet
        let mut memory = [0; MEMORY_SIZE];
        memory[..SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        }
    }

    /// Bounds-checks a `len` byte memory range starting at the index
    /// register and returns it for indexing into `memory`.
    pub(crate) fn mem_range(&self, len: usize) -> Result<Range<usize>, Fault> {
        let start = self.i as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            return Err(Fault::MemoryOutOfBounds { address: end - 1 });
        }
        Ok(start..end)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// The FrameBuffer is indexed as [y][x]
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
