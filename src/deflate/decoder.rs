use super::bitsource::{BitSource, DeflateBitReader};
use super::codepoints::DEFAULT_CODEPOINTS;
use super::default_data::{FIXED_DIST_TREE, FIXED_LENGTH_TREE};
use super::deflate_header::read_header;
use super::*;
use crate::huff_tree::{CodeTree, HuffTreeError, Node};
use crate::sliding_window::CircularDictionary;

use std::io::Read;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeflateReadError {
  #[error("Block type 11 is reserved")]
  ReservedBlockType,
  #[error("Unexpected End of DEFLATE Data")]
  UnexpectedEndOfData,
  #[error("The input stream was not completely consumed")]
  StreamNotConsumed,
  #[error("Tried to go back {0} bytes, but only {1} bytes have been decoded")]
  BackrefPastStart(usize, u64),
  #[error("Backreference distance {0} is outside a window of {1} bytes")]
  BackrefOutOfWindow(usize, usize),
  #[error("Value out of range of valid encoded values: {0}")]
  CodeOutOfRange(u16),
  #[error("Reserved length symbol {0}")]
  ReservedLengthCode(u16),
  #[error("Reserved distance symbol {0}")]
  ReservedDistCode(u16),
  #[error("Length symbol encountered with empty distance code")]
  NoDistanceTree,
  #[error("The LEN and NLEN fields of an uncompressed block mismatched: {0}, {1}")]
  LenNlenMismatch(u16, u16),
  #[error("No code length value to copy")]
  NoPreviousLength,
  #[error("Code length run reaches {0}, but only {1} lengths were declared")]
  RunExceedsCodeCount(usize, usize),
  #[error("Window size must be at least one byte, got {0}")]
  InvalidWindowSize(usize),
  #[error("Huffman Tree Construction Error: {0}")]
  HuffTree(#[from] HuffTreeError),
  #[error("Other IO error: {0}")]
  IOError(#[from] std::io::Error),
}

impl DeflateReadError {
  /// Did the input run out before the stream was complete?
  pub fn is_end_of_stream(&self) -> bool {
    matches!(self, DeflateReadError::UnexpectedEndOfData)
  }
}

impl CodeTree {
  /// Read one symbol by walking the tree from the root, one bit per level
  pub fn decode_symbol<B: BitSource>(&self, bit_src: &mut B) -> Result<u16, DeflateReadError> {
    let mut node = self.root();
    loop {
      match node.child(bit_src.read_bit_no_eof()?) {
        Node::Leaf(sym) => return Ok(*sym),
        Node::Internal(inner) => node = inner,
      }
    }
  }
}

/// Decoder state for a single stream. Owns its window and output; the source
/// may be borrowed (`&mut B`) if the caller needs to keep reading after the
/// final block.
pub struct Decompressor<B: BitSource> {
  bit_src: B,
  dictionary: CircularDictionary,
  output: Vec<u8>,
  options: InflateOptions,
  blocks: Vec<BlockInfo>,
}

impl<B: BitSource> Decompressor<B> {
  pub fn new(bit_src: B) -> Result<Self, DeflateReadError> {
    Self::with_options(bit_src, InflateOptions::default())
  }

  pub fn with_options(bit_src: B, options: InflateOptions) -> Result<Self, DeflateReadError> {
    Ok(Self {
      bit_src,
      dictionary: CircularDictionary::new(options.window_size)?,
      output: Vec::new(),
      options,
      blocks: Vec::new(),
    })
  }

  /// Decode blocks until the one marked final has been consumed
  pub fn run(mut self) -> Result<DeflateStream, DeflateReadError> {
    loop {
      let bfinal = self.bit_src.read_bit_no_eof()? == 1;
      let btype = self.bit_src.read_bits(2)?;
      log::debug!("Block type is {}, final block bit {}", btype, bfinal);
      let start = self.output.len();

      let (kind, header) = match btype {
        0b00 => {
          self.uncompressed_block()?;
          (BlockKind::Uncompressed, None)
        }
        0b01 => {
          self.compressed_block(&FIXED_LENGTH_TREE, Some(&*FIXED_DIST_TREE))?;
          (BlockKind::FixedCode, None)
        }
        0b10 => {
          let header = read_header(&mut self.bit_src)?;
          self.compressed_block(&header.length_tree, header.dist_tree.as_ref())?;
          (BlockKind::DynamicCode, Some(header.info))
        }
        _ => return Err(DeflateReadError::ReservedBlockType),
      };

      let decoded_len = self.output.len() - start;
      log::debug!("Block decoded to {} bytes", decoded_len);
      self.blocks.push(BlockInfo {
        bfinal,
        kind,
        decoded_len,
        header,
      });
      if bfinal {
        break;
      }
    }

    if self.options.reject_trailing_data {
      match self.bit_src.read_byte() {
        Ok(_) => return Err(DeflateReadError::StreamNotConsumed),
        Err(DeflateReadError::UnexpectedEndOfData) => {}
        Err(e) => return Err(e),
      }
    }

    Ok(DeflateStream {
      blocks: self.blocks,
      data: self.output,
    })
  }

  fn uncompressed_block(&mut self) -> Result<(), DeflateReadError> {
    // According to 1951, we need to skip any remaining bits in the partial byte
    while self.bit_src.bit_position() != 0 {
      self.bit_src.read_bit_no_eof()?;
    }
    let len = self.bit_src.read_bits(16)? as u16;
    let nlen = self.bit_src.read_bits(16)? as u16;
    if len != !nlen {
      return Err(DeflateReadError::LenNlenMismatch(len, nlen));
    }
    log::debug!("Raw block of {} bytes", len);

    self.output.reserve(usize::from(len));
    for _ in 0..len {
      let b = self.bit_src.read_byte()?;
      self.output.push(b);
      self.dictionary.append(b);
    }
    Ok(())
  }

  fn compressed_block(
    &mut self,
    length_tree: &CodeTree,
    dist_tree: Option<&CodeTree>,
  ) -> Result<(), DeflateReadError> {
    loop {
      let sym = length_tree.decode_symbol(&mut self.bit_src)?;
      if sym < END_OF_BLOCK {
        log::trace!("Literal {}", sym);
        let b = sym as u8;
        self.output.push(b);
        self.dictionary.append(b);
        continue;
      }
      if sym == END_OF_BLOCK {
        log::trace!("End of block");
        return Ok(());
      }

      let length = DEFAULT_CODEPOINTS.read_length(sym, &mut self.bit_src)?;
      let dist_tree = dist_tree.ok_or(DeflateReadError::NoDistanceTree)?;
      let dist_sym = dist_tree.decode_symbol(&mut self.bit_src)?;
      let dist = usize::from(DEFAULT_CODEPOINTS.read_dist(dist_sym, &mut self.bit_src)?);
      log::trace!("Backreference of length {} at distance {}", length, dist);

      if self.options.strict_distances && dist as u64 > self.dictionary.written() {
        return Err(DeflateReadError::BackrefPastStart(dist, self.dictionary.written()));
      }
      self
        .dictionary
        .copy(dist, usize::from(length), &mut self.output)?;
    }
  }
}

/// Decompress a raw DEFLATE stream from a bit source
pub fn decompress<B: BitSource>(bit_src: B) -> Result<Vec<u8>, DeflateReadError> {
  Ok(Decompressor::new(bit_src)?.run()?.into_byte_stream())
}

/// Decompress a raw DEFLATE stream, keeping the per-block record
pub fn inflate_with_options<R: Read>(
  src: R,
  options: InflateOptions,
) -> Result<DeflateStream, DeflateReadError> {
  let mut bit_src = DeflateBitReader::new(src);
  let stream = Decompressor::with_options(&mut bit_src, options)?.run()?;
  bit_src.close();
  Ok(stream)
}

pub fn inflate<R: Read>(src: R) -> Result<Vec<u8>, DeflateReadError> {
  Ok(inflate_with_options(src, InflateOptions::default())?.into_byte_stream())
}

pub fn inflate_bytes(data: &[u8]) -> Result<Vec<u8>, DeflateReadError> {
  inflate(data)
}
