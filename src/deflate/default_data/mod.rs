/*! The fixed Huffman codes of RFC 1951 3.2.6, used by blocks with BTYPE=01.
Both trees are built once and shared by every decoder. */

/* From RFC 1951:

    Lit Value    Bits        Codes
    ---------    ----        -----
      0 - 143     8          00110000 through 10111111
    144 - 255     9          110010000 through 111111111
    256 - 279     7          0000000 through 0010111
    280 - 287     8          11000000 through 11000111

Distance codes 0-31 are represented by (fixed-length) 5-bit codes.
*/

use lazy_static::lazy_static;

use super::{NUM_FIXED_DIST_CODES, NUM_FIXED_LENGTH_CODES};
use crate::huff_tree::{CanonicalCode, CodeTree, HuffTreeError};

lazy_static! {
  pub static ref FIXED_LENGTH_TREE: CodeTree =
    fixed_length_tree().expect("RFC 1951 fixed literal/length code is complete");
  pub static ref FIXED_DIST_TREE: CodeTree =
    fixed_dist_tree().expect("RFC 1951 fixed distance code is complete");
}

fn fixed_length_lengths() -> Vec<u8> {
  (0..NUM_FIXED_LENGTH_CODES)
    .map(|sym| match sym {
      0..=143 => 8,
      144..=255 => 9,
      256..=279 => 7,
      _ => 8,
    })
    .collect()
}

fn fixed_length_tree() -> Result<CodeTree, HuffTreeError> {
  CanonicalCode::new(&fixed_length_lengths())?.to_code_tree()
}

fn fixed_dist_tree() -> Result<CodeTree, HuffTreeError> {
  CanonicalCode::new(&[5u8; NUM_FIXED_DIST_CODES])?.to_code_tree()
}
