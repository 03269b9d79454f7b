use super::error::{CompressionError, DecompressionError};
use crate::coding::deflate::{Compressor, ZlibCompressor};
use std::io::{Read, Write};

/// This trait is implemented by all image types that can be stored
/// in a palette container.
pub trait CompressDecompress {
    fn compress_with<W, C>(&self, compressor: &C, to: W) -> Result<(), CompressionError>
    where
        W: Write,
        C: Compressor;

    fn decompress_with<R, C>(compressor: &C, from: R) -> Result<Self, DecompressionError>
    where
        Self: Sized,
        R: Read,
        C: Compressor;

    /// Compresses the image with zlib at the best compression level.
    fn compress<W>(&self, to: W) -> Result<(), CompressionError>
    where
        W: Write,
    {
        self.compress_with(&ZlibCompressor::default(), to)
    }

    fn decompress<R>(from: R) -> Result<Self, DecompressionError>
    where
        Self: Sized,
        R: Read,
    {
        Self::decompress_with(&ZlibCompressor::default(), from)
    }
}
