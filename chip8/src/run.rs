use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use sdl2::event::Event;

use chip8_core::{Chip8, FRAME_RATE, INSTRUCTIONS_PER_FRAME};
use chip8_display::{Display, DisplayConfig};

use crate::keymap::keymap;

/// Loads the program at `rom` and runs it until the window is closed or
/// the interpreter faults.
///
/// Each iteration of the pacing loop:
/// - drains pending input events into the keypad
/// - runs one frame's worth of instructions
/// - sleeps until the frame deadline, renders, and ticks the timers once
///
/// The deadline advances by exactly one frame interval from the previous
/// deadline rather than from "now", so sleep inaccuracy never accumulates
/// into drift.
pub fn run(rom: &Path) -> Result<(), String> {
    let mut chip8 = Chip8::new();

    let file = File::open(rom).map_err(|e| format!("could not open {}: {}", rom.display(), e))?;
    let mut reader = BufReader::new(file);
    let loaded = chip8
        .load_program(&mut reader)
        .map_err(|e| e.to_string())?;
    log::info!("running {} ({} bytes)", rom.display(), loaded);

    // Get SDL2 context
    let sdl = sdl2::init()?;
    let mut display = Display::new(&sdl, DisplayConfig::default())?;
    let mut events = sdl.event_pump()?;

    // Frame deadlines are anchored to a monotonic clock
    let frame_interval = Duration::from_secs(1) / FRAME_RATE;
    let mut next_frame = Instant::now() + frame_interval;

    'frame: loop {
        // Sample input before running the batch
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'frame,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_press(kc);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_release(kc);
                    }
                }
                _ => continue,
            }
        }

        // Run one frame's worth of instructions; a fault ends the run.
        // The cycle count never resets, so the batch boundary is wherever
        // it next divides evenly.
        loop {
            let cycles = chip8.step().map_err(|fault| {
                log::error!("{}", fault);
                fault.to_string()
            })?;
            if cycles % INSTRUCTIONS_PER_FRAME == 0 {
                break;
            }
        }

        // Block until the frame deadline, then present and tick timers
        let now = Instant::now();
        if next_frame > now {
            thread::sleep(next_frame - now);
        }
        display.render(chip8.frame_buffer())?;
        chip8.tick_timers();
        next_frame += frame_interval;
    }

    Ok(())
}
