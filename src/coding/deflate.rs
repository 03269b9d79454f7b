use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::{self, Read, Write};

/// A lossless byte-stream compressor used for the final stage of the codec.
pub trait Compressor {
    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>>;

    /// Inverts [`Compressor::compress`].
    ///
    /// Returns an error if `data` is not a valid stream.
    fn decompress(&self, data: &[u8]) -> io::Result<Vec<u8>>;
}

/// Compresses to a zlib stream (deflate with the zlib wrapper).
#[derive(Debug, Clone, Copy)]
pub struct ZlibCompressor {
    level: Compression,
}

impl ZlibCompressor {
    /// Creates a compressor for the given level, from 0 (store) to 9 (best).
    /// Levels above 9 are clamped to 9.
    pub fn new(level: u32) -> ZlibCompressor {
        ZlibCompressor {
            level: Compression::new(level.min(9)),
        }
    }

    pub fn level(&self) -> u32 {
        self.level.level()
    }
}

impl Default for ZlibCompressor {
    /// The maximum compression level.
    fn default() -> Self {
        ZlibCompressor {
            level: Compression::best(),
        }
    }
}

impl Compressor for ZlibCompressor {
    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::new(), self.level);
        encoder.write_all(data)?;
        encoder.finish()
    }

    fn decompress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        let mut decoder = ZlibDecoder::new(data);
        let mut buf = Vec::new();
        decoder.read_to_end(&mut buf)?;
        Ok(buf)
    }
}
