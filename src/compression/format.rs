use super::error::DecompressionError;
use crate::coding::run_length::parse_decimal;
use image::Rgb;
use std::fmt;

/// The first line of a container: `height width palette_size`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Header {
    pub height: u32,
    pub width: u32,
    pub palette_size: usize,
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.height, self.width, self.palette_size)
    }
}

pub fn read_header(line: &str) -> Result<Header, DecompressionError> {
    let malformed = || DecompressionError::MalformedHeader {
        header: line.to_string(),
    };

    let fields: Vec<&str> = line.split_ascii_whitespace().collect();
    let &[height, width, palette_size] = fields.as_slice() else {
        return Err(malformed());
    };

    Ok(Header {
        height: parse_decimal(height).ok_or_else(malformed)?,
        width: parse_decimal(width).ok_or_else(malformed)?,
        palette_size: parse_decimal(palette_size).ok_or_else(malformed)?,
    })
}

/// Writes a color as six uppercase hex digits: `RRGGBB`.
pub fn write_color<W>(to: &mut W, color: Rgb<u8>) -> fmt::Result
where
    W: fmt::Write,
{
    let Rgb([r, g, b]) = color;
    write!(to, "{r:02X}{g:02X}{b:02X}")
}

/// Reads a color written by [`write_color`]. Lowercase digits are accepted.
///
/// `line_number` is only used to report errors.
pub fn read_color(line: &str, line_number: usize) -> Result<Rgb<u8>, DecompressionError> {
    let malformed = || DecompressionError::MalformedPalette {
        line: line_number,
        content: line.to_string(),
    };

    if line.len() != 6 || !line.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(malformed());
    }

    let channel = |i: usize| u8::from_str_radix(&line[i..i + 2], 16).map_err(|_| malformed());
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_header() {
        let header = Header {
            height: 1,
            width: 2,
            palette_size: 1,
        };
        assert_eq!(header.to_string(), "1 2 1");
        assert_eq!(read_header("1 2 1").unwrap(), header);
        assert_eq!(read_header("1  2\t1").unwrap(), header);
    }

    #[test]
    fn test_malformed_header() {
        for line in ["", "1 2", "1 2 3 4", "1 x 3", "-1 2 3", "1.0 2 3", "99999999999 1 1"] {
            match read_header(line) {
                Err(DecompressionError::MalformedHeader { header }) => assert_eq!(header, line),
                other => panic!("{line:?} parsed as {other:?}"),
            }
        }
    }

    #[test]
    fn test_colors() {
        let mut line = String::new();
        write_color(&mut line, Rgb([255, 0, 10])).unwrap();
        assert_eq!(line, "FF000A");

        assert_eq!(read_color("FF000A", 2).unwrap(), Rgb([255, 0, 10]));
        assert_eq!(read_color("ff000a", 2).unwrap(), Rgb([255, 0, 10]));
        assert_eq!(read_color("000000", 2).unwrap(), Rgb([0, 0, 0]));
    }

    #[test]
    fn test_malformed_colors() {
        for line in ["", "FF00", "FF000A0", "GG0000", "+F0000", "FF 000"] {
            match read_color(line, 3) {
                Err(DecompressionError::MalformedPalette { line: 3, content }) => {
                    assert_eq!(content, line)
                }
                other => panic!("{line:?} parsed as {other:?}"),
            }
        }
    }
}
