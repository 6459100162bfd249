use std::io;
use std::io::{ BufWriter, Write };
use std::fs::File;
use std::path::Path;

use crate::color::Color;
use crate::consts::MAX_COLOR_VALUE;

/// A canvas for drawing pixels.
///
/// This structure stores the results of the ray tracer. The `Camera` traces
/// one ray per pixel and writes the resulting color here, unclamped. Colors
/// are only clamped to displayable values when the canvas is written out.
///
/// For now, only plain-text PPM (`P3`) images are supported.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored as a flattened vector of rows.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new black canvas with specified width and height.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); width * height]
        }
    }

    /// Saves a canvas to a PPM file.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_ppm(&mut out)?;
        out.flush()
    }

    /// Writes a canvas as a plain-text PPM image.
    ///
    /// The header is the `P3` magic, the width and height, and the maximum
    /// channel value. Then each image row is written on its own line, top to
    /// bottom, as space-separated `r g b` triples.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> io::Result<()> {
        // Write PPM header, as well as metadata
        writeln!(out, "P3")?;
        writeln!(out, "{} {}", self.width, self.height)?;
        writeln!(out, "{}", MAX_COLOR_VALUE)?;

        for row in self.pixels.chunks(self.width.max(1)) {
            let triples: Vec<String> = row.iter()
                .map(|pixel| {
                    let [r, g, b] = pixel.to_display();
                    format!("{} {} {}", r, g, b)
                })
                .collect();

            writeln!(out, "{}", triples.join(" "))?;
        }

        Ok(())
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored. Pixels are specified in column-row
    /// order, where `x` is the column of the pixel, and `y` is the row. Rows
    /// and columns are zero-indexed, and row 0 is the top of the image.
    ///
    /// # Examples
    ///
    /// Writing a pixel to the fourth column, second row on an 8-by-8 canvas:
    ///
    /// ```
    /// # use ellipsoid_tracer::color::Color;
    /// # use ellipsoid_tracer::canvas::Canvas;
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, &purple);
    /// assert_eq!(canvas.read_pixel(4, 2).unwrap(), purple);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: &Color) {
        // Silently ignore out-of-bounds pixels
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = *pixel;
    }

    /// Reads a color from a location on the `Canvas`.
    ///
    /// If the specified pixel location is out-of-bounds, `None` is returned.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        // Return nothing if pixel is out-of-bounds
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }
}

#[test]
fn new_canvas_is_black() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.read_pixel(9, 19), Some(Color::black()));
    assert_eq!(c.read_pixel(10, 0), None);
}

#[test]
fn out_of_bounds_writes_are_ignored() {
    let mut c = Canvas::new(2, 2);
    c.write_pixel(2, 0, &Color::white());

    assert_eq!(c, Canvas::new(2, 2));
}

#[test]
fn ppm_header_and_rows() {
    let mut c = Canvas::new(3, 2);
    c.write_pixel(0, 0, &Color::rgb(1.5, 0.0, 0.0));
    c.write_pixel(1, 0, &Color::rgb(0.0, 0.5, 0.0));
    c.write_pixel(2, 1, &Color::rgb(-0.5, 0.0, 1.0));

    let mut out = Vec::new();
    c.write_ppm(&mut out).unwrap();

    let ppm = String::from_utf8(out).unwrap();
    assert_eq!(ppm, "P3\n3 2\n255\n\
        255 0 0 0 128 0 0 0 0\n\
        0 0 0 0 0 0 0 0 255\n");
}
