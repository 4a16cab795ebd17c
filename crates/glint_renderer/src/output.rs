//! Pixel sinks that receive a render in scan order.
//!
//! The camera hands each sink the raw sample sum and the sample count for
//! every pixel. Averaging, gamma and byte conversion happen here.

use crate::renderer::color_to_rgb8;
use crate::{Color, RenderError, RenderResult};
use std::io::Write;
use std::path::Path;

/// Receiver for rendered pixels.
///
/// `begin` is called once with the image size, then `write_pixel` once per
/// pixel, rows top to bottom and left to right, then `finish`.
pub trait PixelSink {
    fn begin(&mut self, width: u32, height: u32) -> RenderResult<()>;

    /// Accept one pixel's summed color and the number of samples in the sum.
    fn write_pixel(&mut self, sum: Color, samples: u32) -> RenderResult<()>;

    fn finish(&mut self) -> RenderResult<()>;
}

/// Progress through an image of known size.
#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    expected: usize,
    written: usize,
    started: bool,
}

impl Cursor {
    fn start(&mut self, width: u32, height: u32) {
        *self = Cursor {
            expected: width as usize * height as usize,
            written: 0,
            started: true,
        };
    }

    fn advance(&mut self) -> RenderResult<()> {
        if !self.started {
            return Err(RenderError::SinkNotStarted);
        }
        if self.written == self.expected {
            return Err(RenderError::PixelOverflow {
                expected: self.expected,
            });
        }
        self.written += 1;
        Ok(())
    }

    fn check_complete(&self) -> RenderResult<()> {
        if !self.started {
            return Err(RenderError::SinkNotStarted);
        }
        if self.written != self.expected {
            return Err(RenderError::Incomplete {
                written: self.written,
                expected: self.expected,
            });
        }
        Ok(())
    }
}

/// Streams a plain-text PPM (`P3`) image.
pub struct PpmWriter<W: Write> {
    writer: W,
    cursor: Cursor,
}

impl<W: Write> PpmWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            cursor: Cursor::default(),
        }
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PixelSink for PpmWriter<W> {
    fn begin(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.cursor.start(width, height);
        writeln!(self.writer, "P3")?;
        writeln!(self.writer, "{} {}", width, height)?;
        writeln!(self.writer, "255")?;
        Ok(())
    }

    fn write_pixel(&mut self, sum: Color, samples: u32) -> RenderResult<()> {
        self.cursor.advance()?;
        let [r, g, b] = color_to_rgb8(sum, samples);
        writeln!(self.writer, "{} {} {}", r, g, b)?;
        Ok(())
    }

    fn finish(&mut self) -> RenderResult<()> {
        self.cursor.check_complete()?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps the raw sums in memory.
///
/// Useful for inspecting a render and for saving through the `image` crate
/// in any format it can encode.
#[derive(Debug, Clone, Default)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    sums: Vec<Color>,
    samples: Vec<u32>,
    cursor: Cursor,
}

impl PixelBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Summed sample colors in scan order.
    pub fn sums(&self) -> &[Color] {
        &self.sums
    }

    /// Sample counts in scan order.
    pub fn samples(&self) -> &[u32] {
        &self.samples
    }

    /// Averaged, gamma-corrected 8-bit RGB bytes in scan order.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.sums
            .iter()
            .zip(&self.samples)
            .flat_map(|(&sum, &n)| color_to_rgb8(sum, n))
            .collect()
    }

    /// Build an `image` crate buffer from a completed render.
    pub fn to_image(&self) -> RenderResult<image::RgbImage> {
        self.cursor.check_complete()?;
        image::RgbImage::from_raw(self.width, self.height, self.to_rgb8()).ok_or(
            RenderError::Incomplete {
                written: self.sums.len(),
                expected: self.width as usize * self.height as usize,
            },
        )
    }

    /// Save a completed render; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        let path = path.as_ref();
        self.to_image()?.save(path)?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

impl PixelSink for PixelBuffer {
    fn begin(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.cursor.start(width, height);
        self.width = width;
        self.height = height;
        self.sums.clear();
        self.samples.clear();
        self.sums.reserve(self.cursor.expected);
        self.samples.reserve(self.cursor.expected);
        Ok(())
    }

    fn write_pixel(&mut self, sum: Color, samples: u32) -> RenderResult<()> {
        self.cursor.advance()?;
        self.sums.push(sum);
        self.samples.push(samples);
        Ok(())
    }

    fn finish(&mut self) -> RenderResult<()> {
        self.cursor.check_complete()
    }
}
