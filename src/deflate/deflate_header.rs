/*! A dynamically-encoded DEFLATE stream block is preceded by a header which
contains the following information:

  - 5 bits: HLIT, # of length/literal codes - 257
  - 5 bits: HDIST, # of distance codes - 1
  - 4 bits: HCLEN, # of Code Length codes - 4
  - (HCLEN + 4) * 3 bits of code lengths for the code alphabet specified by HCLEN,
    given in the order 16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15

  HLIT + 257 code lengths, encoded using the code length alphabet
  HDIST + 1 distance lengths, encoded with the code length alphabet
  From these code lengths, it is possible to construct the canonical Huffman
  codes used for the distance and length/lit trees, and thus to decode the
  DEFLATE payload.
*/

/* From RFC 1951:

      0 - 15: Represent code lengths of 0 - 15
          16: Copy the previous code length 3 - 6 times.
              The next 2 bits indicate repeat length
                    (0 = 3, ... , 3 = 6)
                 Example:  Codes 8, 16 (+2 bits 11),
                           16 (+2 bits 10) will expand to
                           12 code lengths of 8 (1 + 6 + 5)
          17: Repeat a code length of 0 for 3 - 10 times.
              (3 bits of length)
          18: Repeat a code length of 0 for 11 - 138 times
              (7 bits of length)

A code length of 0 indicates that the corresponding symbol in
the literal/length or distance alphabet will not occur in the
block, and should not participate in the Huffman code
construction algorithm given earlier.  If only one distance
code is used, it is encoded using one bit, not zero bits; in
this case there is a single code length of one, with one unused
code.  One distance code of zero bits means that there are no
distance codes used at all (the data is all literals).
*/

use serde::Serialize;

use super::bitsource::BitSource;
use super::decoder::DeflateReadError;
use super::{NUM_CODE_LENGTH_CODES, NUM_FIXED_DIST_CODES};
use crate::arrays;
use crate::huff_tree::{CanonicalCode, CodeTree};

const RAW_CODE_ORDER: [usize; NUM_CODE_LENGTH_CODES] =
  [16, 17, 18, 0, 8, 7, 9, 6, 10, 5, 11, 4, 12, 3, 13, 2, 14, 1, 15];

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum CodeLengthCodepoint {
  Length(u8),        // A Number of bits, 0-15
  ValueRepeat(u8),   // Valid values: 3-6
  ShortZeroRep(u8),  // Valid values: 3-10
  LongZeroRep(u8),   // Valid values: 11-138
}

impl CodeLengthCodepoint {
  fn read_from_bitstream<B: BitSource>(
    bit_src: &mut B,
    codelength_tree: &CodeTree,
  ) -> Result<Self, DeflateReadError> {
    let codept = codelength_tree.decode_symbol(bit_src)?;
    let res = match codept {
      0..=15 => Self::Length(codept as u8),
      16 => Self::ValueRepeat(3 + bit_src.read_bits(2)? as u8),
      17 => Self::ShortZeroRep(3 + bit_src.read_bits(3)? as u8),
      18 => Self::LongZeroRep(11 + bit_src.read_bits(7)? as u8),
      _ => return Err(DeflateReadError::CodeOutOfRange(codept)),
    };
    Ok(res)
  }
}

/// The counts read from a dynamic block header, kept for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DynamicHeaderInfo {
  pub num_lit_codes: usize,
  pub num_dist_codes: usize,
  pub num_codelen_codes: usize,
  pub has_dist_tree: bool,
}

/// The decoded trees of a dynamic block
#[derive(Debug, Clone)]
pub struct DynamicHeader {
  pub info: DynamicHeaderInfo,
  pub length_tree: CodeTree,
  pub dist_tree: Option<CodeTree>,
}

/// Read a DEFLATE header from stream and build the length/lit and distance trees
pub fn read_header<B: BitSource>(bit_src: &mut B) -> Result<DynamicHeader, DeflateReadError> {
  let num_lit_codes = bit_src.read_bits(5)? as usize + 257;
  let num_dist_codes = bit_src.read_bits(5)? as usize + 1;
  let num_codelen_codes = bit_src.read_bits(4)? as usize + 4;
  log::debug!(
    "Dynamic header: {} lit/len codes, {} dist codes, {} code length codes",
    num_lit_codes,
    num_dist_codes,
    num_codelen_codes
  );

  let size_code_tree = read_size_codes(bit_src, num_codelen_codes)?;
  let lengths = decode_huffman_alphabets(bit_src, &size_code_tree, num_lit_codes + num_dist_codes)?;

  let lit_lengths = arrays::copy_of(&lengths, num_lit_codes);
  let length_tree = CanonicalCode::new(&lit_lengths)?.to_code_tree()?;

  let dist_lengths = arrays::copy_of_range(&lengths, num_lit_codes, lengths.len());
  let dist_tree = build_dist_tree(dist_lengths)?;

  Ok(DynamicHeader {
    info: DynamicHeaderInfo {
      num_lit_codes,
      num_dist_codes,
      num_codelen_codes,
      has_dist_tree: dist_tree.is_some(),
    },
    length_tree,
    dist_tree,
  })
}

/// Unpack the HCLEN + 4 code lengths, returning the tree used to decode the
/// code lengths of the primary DEFLATE trees
fn read_size_codes<B: BitSource>(
  bit_src: &mut B,
  num_codes: usize,
) -> Result<CodeTree, DeflateReadError> {
  let mut codecodelen = [0u8; NUM_CODE_LENGTH_CODES];
  for code in RAW_CODE_ORDER.iter().take(num_codes) {
    codecodelen[*code] = bit_src.read_bits(3)? as u8;
  }
  Ok(CanonicalCode::new(&codecodelen)?.to_code_tree()?)
}

/// Read exactly `num_symbols` code lengths, expanding repeat codes
fn decode_huffman_alphabets<B: BitSource>(
  bit_src: &mut B,
  size_huffman: &CodeTree,
  num_symbols: usize,
) -> Result<Vec<u8>, DeflateReadError> {
  let mut lengths = vec![0u8; num_symbols];
  let mut lastlength: Option<u8> = None;
  let mut i = 0usize;

  while i < num_symbols {
    let (value, rep) = match CodeLengthCodepoint::read_from_bitstream(bit_src, size_huffman)? {
      CodeLengthCodepoint::Length(x) => (x, 1),
      CodeLengthCodepoint::ValueRepeat(n) => match lastlength {
        Some(l) => (l, n as usize),
        None => return Err(DeflateReadError::NoPreviousLength),
      },
      CodeLengthCodepoint::ShortZeroRep(n) | CodeLengthCodepoint::LongZeroRep(n) => (0, n as usize),
    };
    if i + rep > num_symbols {
      return Err(DeflateReadError::RunExceedsCodeCount(i + rep, num_symbols));
    }
    arrays::fill(&mut lengths, i, i + rep, value);
    lastlength = Some(value);
    i += rep;
  }
  Ok(lengths)
}

/// Build the distance tree, handling the degenerate cases allowed by RFC 1951:
/// no distance codes at all, or a single one-bit code.
fn build_dist_tree(mut dist_lengths: Vec<u8>) -> Result<Option<CodeTree>, DeflateReadError> {
  if dist_lengths.iter().all(|l| *l == 0) {
    return Ok(None);
  }

  let one_count = dist_lengths.iter().filter(|l| **l == 1).count();
  let other_positive = dist_lengths.iter().filter(|l| **l > 1).count();
  if one_count == 1 && other_positive == 0 {
    // Complete the code with a dummy symbol that is never valid to decode
    dist_lengths = arrays::copy_of(&dist_lengths, NUM_FIXED_DIST_CODES);
    let dummy = if dist_lengths[NUM_FIXED_DIST_CODES - 1] == 0 {
      NUM_FIXED_DIST_CODES - 1
    } else {
      NUM_FIXED_DIST_CODES - 2
    };
    dist_lengths[dummy] = 1;
  }
  Ok(Some(CanonicalCode::new(&dist_lengths)?.to_code_tree()?))
}
