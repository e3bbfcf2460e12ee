/*! Human-readable summaries of a decoded stream, used by the command line
tools to show how the input was laid out. */

use std::fmt;

use super::{BlockKind, DeflateStream};

impl fmt::Display for BlockKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      BlockKind::Uncompressed => "stored",
      BlockKind::FixedCode => "fixed Huffman",
      BlockKind::DynamicCode => "dynamic Huffman",
    };
    write!(f, "{}", name)
  }
}

impl fmt::Display for DeflateStream {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(
      f,
      "DEFLATE stream: {} blocks, {} bytes decoded",
      self.blocks.len(),
      self.data.len()
    )?;
    for (i, block) in self.blocks.iter().enumerate() {
      write!(f, "  Block {}: {}, {} bytes", i, block.kind, block.decoded_len)?;
      if let Some(h) = &block.header {
        write!(
          f,
          " (HLIT {}, HDIST {}, HCLEN {}",
          h.num_lit_codes, h.num_dist_codes, h.num_codelen_codes
        )?;
        if !h.has_dist_tree {
          write!(f, ", literals only")?;
        }
        write!(f, ")")?;
      }
      if block.bfinal {
        write!(f, " [final]")?;
      }
      writeln!(f)?;
    }
    Ok(())
  }
}
