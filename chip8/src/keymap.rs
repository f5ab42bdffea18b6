use sdl2::keyboard::Keycode;

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// Logical keys 0..9 map from both the number row and the numeric keypad,
/// and A..F from the matching letter keys. The arrow keys alias onto
/// 2/4/6/8 so directional games are playable without the keypad:
/// ```text
///         |8|
///      |4| ^ |6|
///  <- Left | Right ->
///         |2|
///         Down
/// ```
/// Several physical keys mapping to one logical key is deliberate; the
/// core only ever sees the logical 0..F index.
pub fn keymap(key: Keycode) -> Option<u8> {
    match key {
        Keycode::Num0 | Keycode::Kp0 => Some(0x0),
        Keycode::Num1 | Keycode::Kp1 => Some(0x1),
        Keycode::Num2 | Keycode::Kp2 | Keycode::Down => Some(0x2),
        Keycode::Num3 | Keycode::Kp3 => Some(0x3),
        Keycode::Num4 | Keycode::Kp4 | Keycode::Left => Some(0x4),
        Keycode::Num5 | Keycode::Kp5 => Some(0x5),
        Keycode::Num6 | Keycode::Kp6 | Keycode::Right => Some(0x6),
        Keycode::Num7 | Keycode::Kp7 => Some(0x7),
        Keycode::Num8 | Keycode::Kp8 | Keycode::Up => Some(0x8),
        Keycode::Num9 | Keycode::Kp9 => Some(0x9),
        Keycode::A => Some(0xA),
        Keycode::B => Some(0xB),
        Keycode::C => Some(0xC),
        Keycode::D => Some(0xD),
        Keycode::E => Some(0xE),
        Keycode::F => Some(0xF),
        _ => None,
    }
}
