/// # Instructions
///
/// Chip-8 opcodes are 16 bits each. The high nibble selects a broad
/// category; four categories (0x0, 0x8, 0xE, 0xF) dispatch further on the
/// low nibble or the whole low byte. The remaining nibbles carry operands:
/// - `[_nnn]` a 12-bit address
/// - `[_x__]` the register Vx or the range V0..Vx
/// - `[__y_]` the register Vy
/// - `[__kk]` an 8-bit immediate
/// - `[___n]` a 4-bit immediate (sprite height)
///
/// Decoding is total over the 35 known forms; any other bit pattern yields
/// `None` and the caller reports it as a fatal fault.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Instruction {
    /// 00E0: clear the frame buffer
    Clr,
    /// 00EE: PC = STACK.pop()
    Rts,
    /// 1NNN: PC = nnn
    Jump { nnn: u16 },
    /// 2NNN: STACK.push(PC + 2); PC = nnn
    Call { nnn: u16 },
    /// 3XKK: if Vx == kk then skip
    Ske { x: u8, kk: u8 },
    /// 4XKK: if Vx != kk then skip
    Skne { x: u8, kk: u8 },
    /// 5XY0: if Vx == Vy then skip
    Skre { x: u8, y: u8 },
    /// 6XKK: Vx = kk
    Load { x: u8, kk: u8 },
    /// 7XKK: Vx += kk (wrapping, no flag)
    Add { x: u8, kk: u8 },
    /// 8XY0: Vx = Vy
    Mv { x: u8, y: u8 },
    /// 8XY1: Vx |= Vy
    Or { x: u8, y: u8 },
    /// 8XY2: Vx &= Vy
    And { x: u8, y: u8 },
    /// 8XY3: Vx ^= Vy
    Xor { x: u8, y: u8 },
    /// 8XY4: Vx += Vy; VF = carry
    Addr { x: u8, y: u8 },
    /// 8XY5: VF = Vx > Vy; Vx -= Vy (wrapping)
    Sub { x: u8, y: u8 },
    /// 8XY6: VF = Vx & 1; Vx >>= 1 (operates on Vx only, not Vy)
    Shr { x: u8 },
    /// 8XY7: VF = Vy > Vx; Vx = Vy - Vx (wrapping)
    Subn { x: u8, y: u8 },
    /// 8XYE: VF = high bit of Vx; Vx <<= 1 (operates on Vx only, not Vy)
    Shl { x: u8 },
    /// 9XY0: if Vx != Vy then skip
    Skrne { x: u8, y: u8 },
    /// ANNN: I = nnn
    Loadi { nnn: u16 },
    /// BNNN: PC = V0 + nnn, then PC += 2 (the extra increment is a quirk)
    Jumpi { nnn: u16 },
    /// CXKK: Vx = random byte & kk
    Rand { x: u8, kk: u8 },
    /// DXYN: XOR an n-row sprite at (Vx, Vy); VF = collision
    Draw { x: u8, y: u8, n: u8 },
    /// EX9E: if key Vx is pressed then skip
    Skpr { x: u8 },
    /// EXA1: if key Vx is not pressed then skip
    Skup { x: u8 },
    /// FX07: Vx = DT
    Moved { x: u8 },
    /// FX0A: busy-poll for any key; Vx = 1 once one is down
    Keyd { x: u8 },
    /// FX15: DT = Vx
    Loads { x: u8 },
    /// FX18: ST = Vx
    Ld { x: u8 },
    /// FX1E: I += Vx (wrapping)
    Addi { x: u8 },
    /// FX29: I = Vx * 5 (sprite sheet address for digit Vx)
    Ldspr { x: u8 },
    /// FX33: mem[I..I+3] = BCD digits of Vx
    Bcd { x: u8 },
    /// FX55: mem[I..=I+x] = V0..=Vx
    Stor { x: u8 },
    /// FX65: V0..=Vx = mem[I..=I+x]
    Read { x: u8 },
}

fn x(opcode: u16) -> u8 {
    ((opcode & 0x0F00) >> 8) as u8
}

fn y(opcode: u16) -> u8 {
    ((opcode & 0x00F0) >> 4) as u8
}

fn n(opcode: u16) -> u8 {
    (opcode & 0x000F) as u8
}

fn kk(opcode: u16) -> u8 {
    (opcode & 0x00FF) as u8
}

fn nnn(opcode: u16) -> u16 {
    opcode & 0x0FFF
}

impl Instruction {
    /// Decodes a raw opcode, or `None` if it matches no known form.
    pub fn decode(opcode: u16) -> Option<Self> {
        use Instruction::*;
        let instruction = match opcode >> 12 {
            0x0 => match opcode {
                0x00E0 => Clr,
                0x00EE => Rts,
                // 0NNN machine-code calls are not supported
                _ => return None,
            },
            0x1 => Jump { nnn: nnn(opcode) },
            0x2 => Call { nnn: nnn(opcode) },
            0x3 => Ske {
                x: x(opcode),
                kk: kk(opcode),
            },
            0x4 => Skne {
                x: x(opcode),
                kk: kk(opcode),
            },
            0x5 if n(opcode) == 0x0 => Skre {
                x: x(opcode),
                y: y(opcode),
            },
            0x6 => Load {
                x: x(opcode),
                kk: kk(opcode),
            },
            0x7 => Add {
                x: x(opcode),
                kk: kk(opcode),
            },
            0x8 => {
                let (x, y) = (x(opcode), y(opcode));
                match n(opcode) {
                    0x0 => Mv { x, y },
                    0x1 => Or { x, y },
                    0x2 => And { x, y },
                    0x3 => Xor { x, y },
                    0x4 => Addr { x, y },
                    0x5 => Sub { x, y },
                    0x6 => Shr { x },
                    0x7 => Subn { x, y },
                    0xE => Shl { x },
                    _ => return None,
                }
            }
            0x9 if n(opcode) == 0x0 => Skrne {
                x: x(opcode),
                y: y(opcode),
            },
            0xA => Loadi { nnn: nnn(opcode) },
            0xB => Jumpi { nnn: nnn(opcode) },
            0xC => Rand {
                x: x(opcode),
                kk: kk(opcode),
            },
            0xD => Draw {
                x: x(opcode),
                y: y(opcode),
                n: n(opcode),
            },
            0xE => match kk(opcode) {
                0x9E => Skpr { x: x(opcode) },
                0xA1 => Skup { x: x(opcode) },
                _ => return None,
            },
            0xF => {
                let x = x(opcode);
                match kk(opcode) {
                    0x07 => Moved { x },
                    0x0A => Keyd { x },
                    0x15 => Loads { x },
                    0x18 => Ld { x },
                    0x1E => Addi { x },
                    0x29 => Ldspr { x },
                    0x33 => Bcd { x },
                    0x55 => Stor { x },
                    0x65 => Read { x },
                    _ => return None,
                }
            }
            _ => return None,
        };
        Some(instruction)
    }
}
