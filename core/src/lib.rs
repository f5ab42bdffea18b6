pub use chip8::Chip8;
pub use constants::{FRAME_RATE, INSTRUCTIONS_PER_FRAME};
pub use error::{Fault, LoadError};
pub use instruction::Instruction;

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod operations;
pub mod state;
