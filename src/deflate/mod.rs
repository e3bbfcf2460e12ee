/*! A straight implementation of the DEFLATE decompressor as specified in RFC
1951 (https://tools.ietf.org/html/rfc1951).

Only the raw deflate bitstream is handled here: zlib and gzip framing
(headers, checksums, trailers) belong to the caller. */

pub mod bitsource;
pub mod decoder;
pub mod default_data;
pub mod deflate_header;

mod codepoints;
mod display;
#[cfg(test)]
mod test_utils;

pub use bitsource::{BitSource, DeflateBitReader};
pub use decoder::{
  decompress, inflate, inflate_bytes, inflate_with_options, Decompressor, DeflateReadError,
};
pub use deflate_header::DynamicHeaderInfo;

use serde::{Deserialize, Serialize};

/// Size of the history a DEFLATE stream may refer back into
pub const DEFAULT_WINDOW_SIZE: usize = 32 * 1024;
/// Literal/length alphabet of the fixed code (includes the two reserved codes)
pub const NUM_FIXED_LENGTH_CODES: usize = 288;
/// Distance alphabet of the fixed code (includes the two reserved codes)
pub const NUM_FIXED_DIST_CODES: usize = 32;
pub const NUM_CODE_LENGTH_CODES: usize = 19;
pub const END_OF_BLOCK: u16 = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InflateOptions {
  /// Capacity of the backreference window. Values other than a power of two
  /// work, but are slower.
  pub window_size: usize,
  /// Reject backreferences that reach before the first decoded byte instead
  /// of reading zeroes from the unwritten window
  pub strict_distances: bool,
  /// Fail if any whole byte follows the final block
  pub reject_trailing_data: bool,
}

impl Default for InflateOptions {
  fn default() -> Self {
    Self {
      window_size: DEFAULT_WINDOW_SIZE,
      strict_distances: false,
      reject_trailing_data: false,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockKind {
  Uncompressed,
  FixedCode,
  DynamicCode,
}

/// What was found in one block of the stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockInfo {
  pub bfinal: bool,
  pub kind: BlockKind,
  pub decoded_len: usize,
  pub header: Option<DynamicHeaderInfo>,
}

/// A fully decoded stream: the output bytes plus a record of its blocks
#[derive(Debug, Clone, Serialize)]
pub struct DeflateStream {
  pub blocks: Vec<BlockInfo>,
  #[serde(skip)]
  data: Vec<u8>,
}

impl DeflateStream {
  pub fn data(&self) -> &[u8] {
    &self.data
  }

  pub fn into_byte_stream(self) -> Vec<u8> {
    self.data
  }
}
