use sdl2::pixels::{Color, PixelFormatEnum};

use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::state::FrameBuffer;

/// Presentation settings, passed in explicitly at construction.
///
/// `on`/`off` are the colors a lit and an unlit cell map to; `scale` is
/// the integer size multiplier for each logical pixel.
#[derive(Debug, Copy, Clone)]
pub struct DisplayConfig {
    pub on: Color,
    pub off: Color,
    pub scale: u32,
}

impl Default for DisplayConfig {
    /// Green on black, like the reference frontend
    fn default() -> Self {
        DisplayConfig {
            on: Color::RGB(0, 255, 0),
            off: Color::RGB(0, 0, 0),
            scale: 10,
        }
    }
}

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels whose on/off
/// state is encoded as 1/0 in the core's frame buffer. The display neither
/// tracks dirtiness nor diffs frames; it renders whatever buffer it is
/// handed, once per call.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
    config: DisplayConfig,
}

impl Display {
    /// Creates a window-backed display bound to an sdl2 context.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context with which to draw
    /// * `config` colors and pixel scale
    pub fn new(sdl: &sdl2::Sdl, config: DisplayConfig) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "chip-8 emulator",
                DISPLAY_WIDTH as u32 * config.scale,
                DISPLAY_HEIGHT as u32 * config.scale,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

        Ok(Display { canvas, config })
    }

    /// Expands a 1-bit frame buffer into RGB24 texture bytes.
    ///
    /// An SDL2 RGB24 texture is a 1D array of concatenated rows of 3-byte
    /// pixels; each cell becomes the configured on or off color.
    fn rasterize(config: DisplayConfig, frame: &FrameBuffer) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(DISPLAY_WIDTH * DISPLAY_HEIGHT * 3);
        for row in frame.iter() {
            for &pixel in row.iter() {
                let color = if pixel == 0 { config.off } else { config.on };
                bytes.extend_from_slice(&[color.r, color.g, color.b]);
            }
        }
        bytes
    }

    /// Rasterizes the frame buffer, scales it to the window and presents it.
    ///
    /// # Arguments
    /// * `frame` the core's frame buffer for the current frame
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        let bytes = Self::rasterize(self.config, frame);
        texture
            .with_lock(None, |buffer: &mut [u8], _pitch: usize| {
                buffer.copy_from_slice(&bytes);
            })
            .map_err(|e| e.to_string())?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}
