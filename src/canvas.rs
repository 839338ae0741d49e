use std::io;
use std::io::{ BufWriter, Write };
use std::fs::File;
use std::path::Path;

use log::debug;

use crate::color::Color;
use crate::consts::{ PPM_MAX_COLOR, PPM_LINE_WIDTH };
use crate::error::Result;

/// A canvas for drawing pixels.
///
/// The render loop writes one color per pixel here; once it finishes, the
/// canvas can be saved as a plain-text PPM image.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored as a flattened, row-major vector.
    pixels: Vec<Color>,
}

/// Scales a channel to `0..=255`.
///
/// Anything at or below `0.0` is `0`, anything at or above `1.0` is `255`, and
/// everything in between is rounded to the nearest integer.
fn channel_value(c: f64) -> usize {
    if c <= 0.0 {
        0
    } else if c >= 1.0 {
        PPM_MAX_COLOR
    } else {
        (c * PPM_MAX_COLOR as f64).round() as usize
    }
}

impl Canvas {
    /// Creates a new all-black canvas with specified width and height.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); width * height]
        }
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Coordinates past the edge are clamped onto the last row or column.
    /// `x` is the column and `y` is the row, both zero-indexed.
    ///
    /// ```
    /// # use ray_caster::color::Color;
    /// # use ray_caster::canvas::Canvas;
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, purple);
    /// assert_eq!(canvas.pixel_at(4, 2), Some(purple));
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: Color) {
        if self.width == 0 || self.height == 0 {
            return;
        }

        let x = x.min(self.width - 1);
        let y = y.min(self.height - 1);
        self.pixels[(y * self.width) + x] = pixel;
    }

    /// Reads a color from a location on the `Canvas`, or `None` if the
    /// location is out-of-bounds.
    pub fn pixel_at(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// Serializes the canvas as a plain (P3) PPM image.
    ///
    /// Each pixel row starts on a new line. Within a row, values are wrapped
    /// so no line exceeds 70 columns. The image ends with an empty line.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "{}", PPM_MAX_COLOR)?;

        for row in self.pixels.chunks(self.width.max(1)) {
            let mut col = 0;
            for pixel in row {
                for channel in &[pixel.r, pixel.g, pixel.b] {
                    let value = channel_value(*channel).to_string();

                    if col == 0 {
                        write!(out, "{}", value)?;
                        col = value.len();
                    } else if col + 1 + value.len() > PPM_LINE_WIDTH {
                        write!(out, "\n{}", value)?;
                        col = value.len();
                    } else {
                        write!(out, " {}", value)?;
                        col += 1 + value.len();
                    }
                }
            }

            writeln!(out)?;
        }

        writeln!(out)?;
        Ok(())
    }

    /// Serializes the canvas into an in-memory PPM string.
    pub fn to_ppm(&self) -> String {
        let mut buf = Vec::new();
        self.write_ppm(&mut buf).expect("writing to a Vec cannot fail");

        String::from_utf8(buf).expect("PPM output is ASCII")
    }

    /// Saves a canvas to a PPM file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!("writing {}x{} PPM to {}", self.width, self.height, path.display());

        let mut out = BufWriter::new(File::create(path)?);
        self.write_ppm(&mut out)?;
        out.flush()?;

        Ok(())
    }
}

#[test]
fn new_canvas_is_black() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.width, 10);
    assert_eq!(c.height, 20);
    for y in 0..20 {
        for x in 0..10 {
            assert_eq!(c.pixel_at(x, y), Some(Color::black()));
        }
    }
}

#[test]
fn write_pixel_clamps() {
    let mut c = Canvas::new(10, 20);
    c.write_pixel(15, 40, Color::red());

    assert_eq!(c.pixel_at(9, 19), Some(Color::red()));
    assert_eq!(c.pixel_at(10, 19), None);
}

#[test]
fn ppm_header() {
    let c = Canvas::new(5, 3);
    let ppm = c.to_ppm();
    let lines: Vec<&str> = ppm.lines().collect();

    assert_eq!(&lines[0..3], &["P3", "5 3", "255"]);
}

#[test]
fn ppm_pixel_data() {
    let mut c = Canvas::new(5, 3);
    c.write_pixel(0, 0, Color::rgb(1.5, 0.0, 0.0));
    c.write_pixel(2, 1, Color::rgb(0.0, 0.5, 0.0));
    c.write_pixel(4, 2, Color::rgb(-0.5, 0.0, 1.0));

    let ppm = c.to_ppm();
    let lines: Vec<&str> = ppm.lines().collect();

    assert_eq!(lines[3], "255 0 0 0 0 0 0 0 0 0 0 0 0 0 0");
    assert_eq!(lines[4], "0 0 0 0 0 0 0 128 0 0 0 0 0 0 0");
    assert_eq!(lines[5], "0 0 0 0 0 0 0 0 0 0 0 0 0 0 255");
}

#[test]
fn ppm_splits_long_lines() {
    let mut c = Canvas::new(10, 2);
    for y in 0..2 {
        for x in 0..10 {
            c.write_pixel(x, y, Color::rgb(1.0, 0.8, 0.6));
        }
    }

    let ppm = c.to_ppm();
    let lines: Vec<&str> = ppm.lines().collect();

    assert_eq!(lines[3],
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204");
    assert_eq!(lines[4],
        "153 255 204 153 255 204 153 255 204 153 255 204 153");
    assert_eq!(lines[5],
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204");
    assert_eq!(lines[6],
        "153 255 204 153 255 204 153 255 204 153 255 204 153");
    assert!(lines.iter().all(|l| l.len() <= PPM_LINE_WIDTH));
}

#[test]
fn ppm_ends_with_blank_line() {
    let c = Canvas::new(5, 3);

    assert!(c.to_ppm().ends_with("\n\n"));
}
