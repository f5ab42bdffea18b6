/// The horizontal resolution of the Chip-8 display.
pub const DISPLAY_WIDTH: usize = 64;

/// The vertical resolution of the Chip-8 display.
pub const DISPLAY_HEIGHT: usize = 32;

/// The size of addressable memory in bytes.
pub const MEMORY_SIZE: usize = 4096;

/// The address at which loaded programs begin; everything below it is
/// reserved for the interpreter (in practice, the sprite sheet).
pub const PROGRAM_START: u16 = 0x200;

/// The number of return addresses the call stack can hold.
pub const STACK_DEPTH: usize = 16;

/// The display refresh rate in frames per second.
pub const FRAME_RATE: u32 = 60;

/// How many CPU instructions run between consecutive frames.
/// The reference machine runs at 540 instructions per second.
pub const INSTRUCTIONS_PER_FRAME: u64 = 540 / FRAME_RATE as u64;

/// Sprites for the hexadecimal digits 0..F.
///
/// Each sprite is 5 bytes; each byte is one 8-pixel row (only the high
/// nibble is ever set). The sheet is copied to address 0x000 so that the
/// sprite for digit `d` lives at `d * 5`.
pub const SPRITE_SHEET: [u8; 80] = [
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
