use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, STACK_DEPTH};
use crate::error::Fault;
use crate::instruction::Instruction;
use crate::state::State;

/// Applies a decoded instruction to a state snapshot, producing the next
/// state. Every instruction advances `pc` by 2 itself unless it redirects
/// control flow; the instructions that can violate an invariant (stack,
/// memory, key range) fault instead of corrupting state.
pub fn execute(
    instruction: Instruction,
    state: &State,
    pressed_keys: &[bool; 16],
) -> Result<State, Fault> {
    use Instruction::*;
    match instruction {
        Clr => Ok(clr(state)),
        Rts => rts(state),
        Jump { nnn } => Ok(jump(nnn, state)),
        Call { nnn } => call(nnn, state),
        Ske { x, kk } => Ok(ske(x, kk, state)),
        Skne { x, kk } => Ok(skne(x, kk, state)),
        Skre { x, y } => Ok(skre(x, y, state)),
        Load { x, kk } => Ok(load(x, kk, state)),
        Add { x, kk } => Ok(add(x, kk, state)),
        Mv { x, y } => Ok(mv(x, y, state)),
        Or { x, y } => Ok(or(x, y, state)),
        And { x, y } => Ok(and(x, y, state)),
        Xor { x, y } => Ok(xor(x, y, state)),
        Addr { x, y } => Ok(addr(x, y, state)),
        Sub { x, y } => Ok(sub(x, y, state)),
        Shr { x } => Ok(shr(x, state)),
        Subn { x, y } => Ok(subn(x, y, state)),
        Shl { x } => Ok(shl(x, state)),
        Skrne { x, y } => Ok(skrne(x, y, state)),
        Loadi { nnn } => Ok(loadi(nnn, state)),
        Jumpi { nnn } => Ok(jumpi(nnn, state)),
        Rand { x, kk } => Ok(rand(x, kk, state)),
        Draw { x, y, n } => draw(x, y, n, state),
        Skpr { x } => skpr(x, state, pressed_keys),
        Skup { x } => skup(x, state, pressed_keys),
        Moved { x } => Ok(moved(x, state)),
        Keyd { x } => Ok(keyd(x, state, pressed_keys)),
        Loads { x } => Ok(loads(x, state)),
        Ld { x } => Ok(ld(x, state)),
        Addi { x } => Ok(addi(x, state)),
        Ldspr { x } => Ok(ldspr(x, state)),
        Bcd { x } => bcd(x, state),
        Stor { x } => stor(x, state),
        Read { x } => read(x, state),
    }
}

/// clear
fn clr(state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
        ..*state
    }
}

/// PC = STACK.pop()
/// The pushed address is the resumption point itself, so no further +2
fn rts(state: &State) -> Result<State, Fault> {
    if state.sp == 0 {
        return Err(Fault::StackUnderflow { pc: state.pc });
    }
    let sp = state.sp - 1;
    Ok(State {
        pc: state.stack[sp as usize],
        sp,
        ..*state
    })
}

/// PC = addr
fn jump(nnn: u16, state: &State) -> State {
    State { pc: nnn, ..*state }
}

/// STACK.push(PC + 2); PC = addr
fn call(nnn: u16, state: &State) -> Result<State, Fault> {
    if state.sp as usize == STACK_DEPTH {
        return Err(Fault::StackOverflow { pc: state.pc });
    }
    let mut stack = state.stack;
    stack[state.sp as usize] = state.pc + 0x2;
    Ok(State {
        pc: nnn,
        sp: state.sp + 1,
        stack,
        ..*state
    })
}

/// if Vx == kk then pc += 2
fn ske(x: u8, kk: u8, state: &State) -> State {
    let pc = if state.v[x as usize] == kk {
        state.pc + 0x4
    } else {
        state.pc + 0x2
    };
    State { pc, ..*state }
}

/// if Vx != kk then pc += 2
fn skne(x: u8, kk: u8, state: &State) -> State {
    let pc = if state.v[x as usize] != kk {
        state.pc + 0x4
    } else {
        state.pc + 0x2
    };
    State { pc, ..*state }
}

/// if Vx == Vy then pc += 2
fn skre(x: u8, y: u8, state: &State) -> State {
    let pc = if state.v[x as usize] == state.v[y as usize] {
        state.pc + 0x4
    } else {
        state.pc + 0x2
    };
    State { pc, ..*state }
}

/// Vx = kk
fn load(x: u8, kk: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = kk;
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx += kk
/// Wraps implicitly and never touches the flag register
fn add(x: u8, kk: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = v[x as usize].wrapping_add(kk);
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx = Vy
fn mv(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = v[y as usize];
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx |= Vy
fn or(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] |= v[y as usize];
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx &= Vy
fn and(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] &= v[y as usize];
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx ^= Vy
fn xor(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] ^= v[y as usize];
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// Vx += Vy; VF = carry
fn addr(x: u8, y: u8, state: &State) -> State {
    let (res, over) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    let mut v = state.v;
    v[0xF] = over as u8;
    v[x as usize] = res;
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// VF = Vx > Vy; Vx -= Vy
/// The flag is a strict comparison before the subtraction, so equal
/// operands clear it even though no borrow occurs
fn sub(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[0xF] = (state.v[x as usize] > state.v[y as usize]) as u8;
    v[x as usize] = state.v[x as usize].wrapping_sub(state.v[y as usize]);
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// VF = Vx & 1; Vx >>= 1
/// Shifts Vx in place; the y operand is decoded but never read
fn shr(x: u8, state: &State) -> State {
    let mut v = state.v;
    v[0xF] = v[x as usize] & 0x1;
    v[x as usize] >>= 1;
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// VF = Vy > Vx; Vx = Vy - Vx
fn subn(x: u8, y: u8, state: &State) -> State {
    let mut v = state.v;
    v[0xF] = (state.v[y as usize] > state.v[x as usize]) as u8;
    v[x as usize] = state.v[y as usize].wrapping_sub(state.v[x as usize]);
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// VF = high bit of Vx; Vx <<= 1
/// Shifts Vx in place; the y operand is decoded but never read
fn shl(x: u8, state: &State) -> State {
    let mut v = state.v;
    v[0xF] = v[x as usize] >> 7;
    v[x as usize] <<= 1;
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// if Vx != Vy then pc += 2
fn skrne(x: u8, y: u8, state: &State) -> State {
    let pc = if state.v[x as usize] != state.v[y as usize] {
        state.pc + 0x4
    } else {
        state.pc + 0x2
    };
    State { pc, ..*state }
}

/// I = addr
fn loadi(nnn: u16, state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        i: nnn,
        ..*state
    }
}

/// PC = V0 + addr, then PC += 2
/// The extra increment lands execution one instruction past the computed
/// target; kept for compatibility with programs written against it
fn jumpi(nnn: u16, state: &State) -> State {
    State {
        pc: u16::from(state.v[0x0]) + nnn + 0x2,
        ..*state
    }
}

/// Vx = rand_byte & kk
fn rand(x: u8, kk: u8, state: &State) -> State {
    let rand_byte: u8 = rand::random();
    let mut v = state.v;
    v[x as usize] = rand_byte & kk;
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// draw_sprite(x=Vx y=Vy rows=n)
/// XORs an n-row sprite from memory at I onto the frame buffer at (Vx, Vy).
/// Both axes wrap independently. VF is cleared first and set if any pixel
/// transitions from on to off; once set it stays set for the whole draw.
fn draw(x: u8, y: u8, n: u8, state: &State) -> Result<State, Fault> {
    let sprite = &state.memory[state.mem_range(n as usize)?];
    let mut v = state.v;
    let mut frame_buffer = state.frame_buffer;

    v[0xF] = 0x0;
    for (row, &bits) in sprite.iter().enumerate() {
        let py = (state.v[y as usize] as usize + row) % DISPLAY_HEIGHT;
        for bit in 0..8 {
            let px = (state.v[x as usize] as usize + bit) % DISPLAY_WIDTH;
            let pixel = (bits >> (7 - bit)) & 0x1;
            let old = frame_buffer[py][px];
            frame_buffer[py][px] ^= pixel;
            if old == 0x1 && frame_buffer[py][px] == 0x0 {
                v[0xF] = 0x1;
            }
        }
    }

    Ok(State {
        pc: state.pc + 0x2,
        v,
        frame_buffer,
        ..*state
    })
}

/// if Vx.pressed then pc += 2
fn skpr(x: u8, state: &State, pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let pc = if key_state(state.v[x as usize], pressed_keys)? {
        state.pc + 0x4
    } else {
        state.pc + 0x2
    };
    Ok(State { pc, ..*state })
}

/// if !Vx.pressed then pc += 2
fn skup(x: u8, state: &State, pressed_keys: &[bool; 16]) -> Result<State, Fault> {
    let pc = if !key_state(state.v[x as usize], pressed_keys)? {
        state.pc + 0x4
    } else {
        state.pc + 0x2
    };
    Ok(State { pc, ..*state })
}

/// Looks up a key by the value of a register, which unlike a decoded
/// nibble can name a key that doesn't exist
fn key_state(key: u8, pressed_keys: &[bool; 16]) -> Result<bool, Fault> {
    pressed_keys
        .get(key as usize)
        .copied()
        .ok_or(Fault::KeyOutOfRange { key })
}

/// Vx = DT
fn moved(x: u8, state: &State) -> State {
    let mut v = state.v;
    v[x as usize] = state.delay_timer;
    State {
        pc: state.pc + 0x2,
        v,
        ..*state
    }
}

/// busy-poll for a keypress
/// If any key is down, Vx = 1 (the literal 1, not the key index) and
/// execution advances; otherwise pc is left alone so the instruction
/// re-executes on the next cycle
fn keyd(x: u8, state: &State, pressed_keys: &[bool; 16]) -> State {
    if pressed_keys.iter().any(|&pressed| pressed) {
        let mut v = state.v;
        v[x as usize] = 0x1;
        State {
            pc: state.pc + 0x2,
            v,
            ..*state
        }
    } else {
        *state
    }
}

/// DT = Vx
fn loads(x: u8, state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        delay_timer: state.v[x as usize],
        ..*state
    }
}

/// ST = Vx
fn ld(x: u8, state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        sound_timer: state.v[x as usize],
        ..*state
    }
}

/// I += Vx
fn addi(x: u8, state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        i: state.i.wrapping_add(u16::from(state.v[x as usize])),
        ..*state
    }
}

/// I = Vx * 5
/// Set I to the sprite sheet address for the digit Vx
fn ldspr(x: u8, state: &State) -> State {
    State {
        pc: state.pc + 0x2,
        i: u16::from(state.v[x as usize]) * 5,
        ..*state
    }
}

/// mem[I..I+3] = bcd(Vx)
fn bcd(x: u8, state: &State) -> Result<State, Fault> {
    let range = state.mem_range(3)?;
    let value = state.v[x as usize];
    let mut memory = state.memory;
    memory[range].copy_from_slice(&[value / 100, value % 100 / 10, value % 10]);
    Ok(State {
        pc: state.pc + 0x2,
        memory,
        ..*state
    })
}

/// mem[I..=I+x] = V0..=Vx
fn stor(x: u8, state: &State) -> Result<State, Fault> {
    let range = state.mem_range(x as usize + 1)?;
    let mut memory = state.memory;
    memory[range].copy_from_slice(&state.v[..=x as usize]);
    Ok(State {
        pc: state.pc + 0x2,
        memory,
        ..*state
    })
}

/// V0..=Vx = mem[I..=I+x]
fn read(x: u8, state: &State) -> Result<State, Fault> {
    let range = state.mem_range(x as usize + 1)?;
    let mut v = state.v;
    v[..=x as usize].copy_from_slice(&state.memory[range]);
    Ok(State {
        pc: state.pc + 0x2,
        v,
        ..*state
    })
}
