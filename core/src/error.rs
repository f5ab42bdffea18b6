use thiserror::Error;

/// Fatal interpreter faults.
///
/// The original hardware had no notion of these; a bad program would read
/// or write whatever happened to be at the computed address. Here every
/// violation is surfaced explicitly and terminates the run.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum Fault {
    /// The fetched instruction matches none of the 35 known forms.
    #[error("invalid opcode {opcode:#06X} at pc {pc:#06X}")]
    InvalidOpcode { opcode: u16, pc: u16 },

    /// A fetch or index-register-relative access fell outside memory.
    #[error("memory access out of bounds at address {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    /// A subroutine call was made with all 16 stack slots in use.
    #[error("stack overflow on call at pc {pc:#06X}")]
    StackOverflow { pc: u16 },

    /// A return was executed with an empty call stack.
    #[error("stack underflow on return at pc {pc:#06X}")]
    StackUnderflow { pc: u16 },

    /// A key-skip instruction named a key outside 0..F.
    #[error("key {key:#04X} is out of range")]
    KeyOutOfRange { key: u8 },
}

/// Errors raised while loading a program, before execution starts.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read program: {0}")]
    Io(#[from] std::io::Error),

    /// The program does not fit between the load address and the end of
    /// memory. The original performed no such check and would scribble
    /// past the end of its buffer.
    #[error("program is {size} bytes but only {capacity} bytes fit in memory")]
    TooLarge { size: usize, capacity: usize },
}
