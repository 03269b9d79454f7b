use crate::coding::deflate::Compressor;
use crate::coding::run_length::{self, Run, RunLengthError};
pub use error::{CompressionError, DecompressionError};
pub use format::{read_color, read_header, write_color, Header};
use image::{DynamicImage, ImageBuffer, Rgb, RgbImage};
pub use palette::{build_palette, Palette};
use std::collections::HashMap;
use std::fmt::{self, Write as _};
use std::io::{self, Read, Write};
pub use traits::CompressDecompress;

mod error;
mod format;
mod palette;
mod traits;

const CHANNELS: usize = 3;

/// The text form of an image: a header, a palette and one line of runs per row.
///
/// ```text
/// <height> <width> <palette size>
/// <RRGGBB color 0>
/// ...
/// <row 0 runs>
/// ...
/// ```
///
/// A `Container` always holds exactly `height` rows, each covering exactly
/// `width` pixels with indices that point into its palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    width: u32,
    height: u32,
    palette: Palette,
    rows: Vec<Vec<Run>>,
}

impl Container {
    /// Builds the palette of the image and run-length encodes each row with it.
    pub fn from_image(image: &RgbImage) -> Result<Container, CompressionError> {
        let (width, height) = image.dimensions();

        // Check for edge-case image dimensions.
        if width == 0 || height == 0 {
            if height > 0 {
                return Err(CompressionError::EmptyRow { row: 0 });
            }
            return Ok(Container {
                width,
                height,
                palette: Palette::default(),
                rows: Vec::new(),
            });
        }

        let palette = build_palette(image.pixels());
        let index_map = palette.index_map();
        let stride = width as usize * CHANNELS;
        let pixels = &image.as_raw()[..stride * height as usize];

        let rows = encode_rows(pixels, stride, &index_map)
            .into_iter()
            .enumerate()
            // `encode_row` only fails on rows without pixels.
            .map(|(row, runs)| runs.map_err(|_| CompressionError::EmptyRow { row }))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Container {
            width,
            height,
            palette,
            rows,
        })
    }

    /// Parses and validates the text form of a container.
    ///
    /// The header is checked first, then the palette, then the number of
    /// rows, and finally every row in order. Blank lines among the rows,
    /// including lines holding only whitespace such as a lone `\r`, are
    /// skipped.
    pub fn parse(text: &str) -> Result<Container, DecompressionError> {
        let mut lines = text.split('\n');

        let header = read_header(lines.next().unwrap_or_default())?;
        let invalid_dimensions = DecompressionError::InvalidDimensions {
            width: header.width,
            height: header.height,
        };
        (header.width as usize)
            .checked_mul(header.height as usize)
            .and_then(|pixels| pixels.checked_mul(CHANNELS))
            .ok_or(invalid_dimensions)?;

        let mut colors = Vec::new();
        for i in 0..header.palette_size {
            // Line 1 is the header.
            let line_number = i + 2;
            let line = lines
                .next()
                .ok_or_else(|| DecompressionError::MalformedPalette {
                    line: line_number,
                    content: String::new(),
                })?;
            colors.push(read_color(line, line_number)?);
        }
        let palette = Palette::from_colors(colors);

        let row_lines: Vec<&str> = lines.filter(|line| !line.trim().is_empty()).collect();
        if row_lines.len() != header.height as usize {
            return Err(DecompressionError::RowCountMismatch {
                expected: header.height as usize,
                actual: row_lines.len(),
            });
        }

        let rows = parse_rows(&row_lines, palette.len(), header.width)?;

        Ok(Container {
            width: header.width,
            height: header.height,
            palette,
            rows,
        })
    }

    /// Expands the runs of every row back into pixels.
    pub fn to_image(&self) -> Result<RgbImage, DecompressionError> {
        let colors = self.palette.colors();

        let mut buf = Vec::new();
        for runs in &self.rows {
            for Rgb(channels) in run_length::expand_runs(runs, colors) {
                buf.extend_from_slice(&channels);
            }
        }

        ImageBuffer::from_raw(self.width, self.height, buf).ok_or(
            DecompressionError::InvalidDimensions {
                width: self.width,
                height: self.height,
            },
        )
    }

    pub fn header(&self) -> Header {
        Header {
            height: self.height,
            width: self.width,
            palette_size: self.palette.len(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// The runs of every row, top to bottom.
    pub fn rows(&self) -> &[Vec<Run>] {
        &self.rows
    }
}

/// Writes the text form of the container. Lines are separated by `\n`,
/// with no newline after the last one.
impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())?;
        for &color in self.palette.colors() {
            f.write_char('\n')?;
            write_color(f, color)?;
        }
        for runs in &self.rows {
            f.write_char('\n')?;
            run_length::write_runs(f, runs)?;
        }
        Ok(())
    }
}

fn encode_pixel_row(
    row: &[u8],
    index_map: &HashMap<Rgb<u8>, usize>,
) -> Result<Vec<Run>, RunLengthError> {
    let indices: Vec<usize> = row
        .chunks_exact(CHANNELS)
        .map(|p| index_map[&Rgb([p[0], p[1], p[2]])])
        .collect();
    run_length::encode_row(&indices)
}

#[cfg(not(feature = "parallel"))]
fn encode_rows(
    pixels: &[u8],
    stride: usize,
    index_map: &HashMap<Rgb<u8>, usize>,
) -> Vec<Result<Vec<Run>, RunLengthError>> {
    pixels
        .chunks_exact(stride)
        .map(|row| encode_pixel_row(row, index_map))
        .collect()
}

#[cfg(feature = "parallel")]
fn encode_rows(
    pixels: &[u8],
    stride: usize,
    index_map: &HashMap<Rgb<u8>, usize>,
) -> Vec<Result<Vec<Run>, RunLengthError>> {
    use rayon::prelude::*;

    pixels
        .par_chunks_exact(stride)
        .map(|row| encode_pixel_row(row, index_map))
        .collect()
}

/// Parses one row of runs and checks it against the palette size and the
/// image width. `row` is only used to report errors.
pub fn parse_row(
    line: &str,
    palette_size: usize,
    width: u32,
    row: usize,
) -> Result<Vec<Run>, DecompressionError> {
    let runs = run_length::parse_runs(line).map_err(|err| DecompressionError::in_row(row, err))?;
    run_length::check_runs(&runs, palette_size, width)
        .map_err(|err| DecompressionError::in_row(row, err))?;
    Ok(runs)
}

/// Decodes one row of runs into exactly `width` colors.
pub fn decode_row(
    line: &str,
    palette: &Palette,
    width: u32,
    row: usize,
) -> Result<Vec<Rgb<u8>>, DecompressionError> {
    let runs = parse_row(line, palette.len(), width, row)?;
    Ok(run_length::expand_runs(&runs, palette.colors()).collect())
}

#[cfg(not(feature = "parallel"))]
fn parse_rows(
    lines: &[&str],
    palette_size: usize,
    width: u32,
) -> Result<Vec<Vec<Run>>, DecompressionError> {
    lines
        .iter()
        .enumerate()
        .map(|(row, line)| parse_row(line, palette_size, width, row))
        .collect()
}

#[cfg(feature = "parallel")]
fn parse_rows(
    lines: &[&str],
    palette_size: usize,
    width: u32,
) -> Result<Vec<Vec<Run>>, DecompressionError> {
    use rayon::prelude::*;

    let rows: Vec<Result<Vec<Run>, DecompressionError>> = lines
        .par_iter()
        .enumerate()
        .map(|(row, line)| parse_row(line, palette_size, width, row))
        .collect();
    // Report the topmost failing row.
    rows.into_iter().collect()
}

/// Compresses the text form of the container and writes it out.
pub fn write_container<W, C>(
    container: &Container,
    compressor: &C,
    mut to: W,
) -> Result<(), CompressionError>
where
    W: Write,
    C: Compressor,
{
    let compressed = compressor.compress(container.to_string().as_bytes())?;
    to.write_all(&compressed)?;
    to.flush()?;
    Ok(())
}

/// Reads everything from `from`, decompresses it and parses the container.
pub fn read_container<R, C>(compressor: &C, mut from: R) -> Result<Container, DecompressionError>
where
    R: Read,
    C: Compressor,
{
    let mut data = Vec::new();
    from.read_to_end(&mut data)?;

    let text = compressor
        .decompress(&data)
        .map_err(DecompressionError::CorruptData)?;
    let text = String::from_utf8(text).map_err(|err| {
        DecompressionError::CorruptData(io::Error::new(io::ErrorKind::InvalidData, err))
    })?;

    Container::parse(&text)
}

impl CompressDecompress for RgbImage {
    fn compress_with<W, C>(&self, compressor: &C, to: W) -> Result<(), CompressionError>
    where
        W: Write,
        C: Compressor,
    {
        let container = Container::from_image(self)?;
        write_container(&container, compressor, to)
    }

    fn decompress_with<R, C>(compressor: &C, from: R) -> Result<Self, DecompressionError>
    where
        Self: Sized,
        R: Read,
        C: Compressor,
    {
        read_container(compressor, from)?.to_image()
    }
}

/// Images of any color type are stored as opaque 8-bit RGB, so
/// decompression always yields `DynamicImage::ImageRgb8`.
impl CompressDecompress for DynamicImage {
    fn compress_with<W, C>(&self, compressor: &C, to: W) -> Result<(), CompressionError>
    where
        W: Write,
        C: Compressor,
    {
        match self {
            DynamicImage::ImageRgb8(rgb8) => rgb8.compress_with(compressor, to),
            other => other.to_rgb8().compress_with(compressor, to),
        }
    }

    fn decompress_with<R, C>(compressor: &C, from: R) -> Result<Self, DecompressionError>
    where
        Self: Sized,
        R: Read,
        C: Compressor,
    {
        Ok(DynamicImage::ImageRgb8(RgbImage::decompress_with(
            compressor, from,
        )?))
    }
}

pub fn compress_image<W, T>(to: W, image: T) -> Result<(), CompressionError>
where
    W: Write,
    T: CompressDecompress,
{
    image.compress(to)
}

pub fn decompress_image<R>(from: R) -> Result<DynamicImage, DecompressionError>
where
    R: Read,
{
    DynamicImage::decompress(from)
}
