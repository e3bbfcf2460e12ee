//! Hand-assembles DEFLATE bitstreams for tests

use bitstream_io::{BitWrite, BitWriter, LittleEndian};

use crate::huff_tree::CodeTree;

pub struct StreamBuilder {
  writer: BitWriter<Vec<u8>, LittleEndian>,
}

impl StreamBuilder {
  pub fn new() -> Self {
    Self {
      writer: BitWriter::new(Vec::new()),
    }
  }

  /// Append an integer field, least-significant bit first
  pub fn bits(mut self, nbits: u32, value: u32) -> Self {
    if nbits > 0 {
      self.writer.write(nbits, value).unwrap();
    }
    self
  }

  /// Append Huffman code bits in the order they are read from the root
  pub fn code(mut self, bits: &[u8]) -> Self {
    for b in bits {
      self.writer.write_bit(*b == 1).unwrap();
    }
    self
  }

  pub fn sym(mut self, tree: &CodeTree, symbol: usize) -> Self {
    for b in tree.get_code(symbol).unwrap().iter() {
      self.writer.write_bit(b).unwrap();
    }
    self
  }

  pub fn align(mut self) -> Self {
    self.writer.byte_align().unwrap();
    self
  }

  pub fn bytes(mut self, data: &[u8]) -> Self {
    self.writer.write_bytes(data).unwrap();
    self
  }

  /// Pad the final byte with zeroes and return the stream
  pub fn finish(mut self) -> Vec<u8> {
    self.writer.byte_align().unwrap();
    self.writer.into_writer()
  }
}
