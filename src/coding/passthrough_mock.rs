use super::deflate::Compressor;
use std::io;

/// Mock compressor used to test the container codec.
/// Hands the container text through untouched so tests can read it.
pub struct PassthroughMock;

impl Compressor for PassthroughMock {
    fn compress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        Ok(data.to_vec())
    }

    fn decompress(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        Ok(data.to_vec())
    }
}
