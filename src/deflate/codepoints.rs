/*! Codepoints are used by RFC 1951 to encode distances and lengths. Each codepoint
consists of a value, encoded using the appropriate Huffman Tree, possibly followed
by a number of literal bits that are used to disambiguate the codepoint. */

/* The code table from RFC 1951 is reproduced below to avoid extra ALT-TABs

             Extra               Extra               Extra
        Code Bits Length(s) Code Bits Lengths   Code Bits Length(s)
        ---- ---- ------     ---- ---- -------   ---- ---- -------
         257   0     3       267   1   15,16     277   4   67-82
         258   0     4       268   1   17,18     278   4   83-98
         259   0     5       269   2   19-22     279   4   99-114
         260   0     6       270   2   23-26     280   4  115-130
         261   0     7       271   2   27-30     281   5  131-162
         262   0     8       272   2   31-34     282   5  163-194
         263   0     9       273   3   35-42     283   5  195-226
         264   0    10       274   3   43-50     284   5  227-257
         265   1  11,12      275   3   51-58     285   0    258
         266   1  13,14      276   3   59-66

              Extra           Extra               Extra
         Code Bits Dist  Code Bits   Dist     Code Bits Distance
         ---- ---- ----  ---- ----  ------    ---- ---- --------
           0   0    1     10   4     33-48    20    9   1025-1536
           1   0    2     11   4     49-64    21    9   1537-2048
           2   0    3     12   5     65-96    22   10   2049-3072
           3   0    4     13   5     97-128   23   10   3073-4096
           4   1   5,6    14   6    129-192   24   11   4097-6144
           5   1   7,8    15   6    193-256   25   11   6145-8192
           6   2   9-12   16   7    257-384   26   12  8193-12288
           7   2  13-16   17   7    385-512   27   12 12289-16384
           8   3  17-24   18   8    513-768   28   13 16385-24576
           9   3  25-32   19   8   769-1024   29   13 24577-32768

    Length codepoints 286 and 287 and distance codepoints 30 and 31 take part
    in the fixed Huffman code but never appear in valid data.
*/

use lazy_static::lazy_static;

use super::bitsource::BitSource;
use super::decoder::DeflateReadError;

pub const MIN_LENGTH_CODE: u16 = 257;
pub const MAX_LENGTH_CODE: u16 = 285;
pub const MAX_DIST_CODE: u16 = 29;

lazy_static! {
  pub static ref DEFAULT_CODEPOINTS: CodepointDecoder = CodepointDecoder::new();
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Codepoint {
  nbits: u8,
  lo: u16,
  hi: u16,
}

impl Codepoint {
  pub fn new(nbits: u8, lo: u16) -> Self {
    let range = if nbits == 0 { 0 } else { (1u16 << nbits) - 1 };
    let hi = lo + range;
    Self { nbits, lo, hi }
  }

  /// Read the extra bits for this codepoint and produce the value they select
  pub fn read_value<B: BitSource>(&self, bit_src: &mut B) -> Result<u16, DeflateReadError> {
    let extra = bit_src.read_bits(u32::from(self.nbits))? as u16;
    let val = self.lo + extra;
    debug_assert!(val <= self.hi);
    Ok(val)
  }
}

pub struct CodepointDecoder {
  length_codepoints: Vec<Codepoint>,
  dist_codepoints: Vec<Codepoint>,
}

impl CodepointDecoder {
  pub fn new() -> Self {
    // (extra bits, lowest value) for codes 0..=29
    let dist_table: [(u8, u16); 30] = [
      (0, 1),
      (0, 2),
      (0, 3),
      (0, 4),
      (1, 5),
      (1, 7),
      (2, 9),
      (2, 13),
      (3, 17),
      (3, 25),
      (4, 33),
      (4, 49),
      (5, 65),
      (5, 97),
      (6, 129),
      (6, 193),
      (7, 257),
      (7, 385),
      (8, 513),
      (8, 769),
      (9, 1025),
      (9, 1537),
      (10, 2049),
      (10, 3073),
      (11, 4097),
      (11, 6145),
      (12, 8193),
      (12, 12289),
      (13, 16385),
      (13, 24577),
    ];

    // (extra bits, lowest value) for codes 257..=285
    let len_table: [(u8, u16); 29] = [
      (0, 3),
      (0, 4),
      (0, 5),
      (0, 6),
      (0, 7),
      (0, 8),
      (0, 9),
      (0, 10),
      (1, 11),
      (1, 13),
      (1, 15),
      (1, 17),
      (2, 19),
      (2, 23),
      (2, 27),
      (2, 31),
      (3, 35),
      (3, 43),
      (3, 51),
      (3, 59),
      (4, 67),
      (4, 83),
      (4, 99),
      (4, 115),
      (5, 131),
      (5, 163),
      (5, 195),
      (5, 227),
      (0, 258),
    ];

    let dist_codepoints = dist_table
      .iter()
      .map(|(nbits, lo)| Codepoint::new(*nbits, *lo))
      .collect();
    let length_codepoints = len_table
      .iter()
      .map(|(nbits, lo)| Codepoint::new(*nbits, *lo))
      .collect();

    Self {
      length_codepoints,
      dist_codepoints,
    }
  }

  pub fn length_codepoint(&self, sym: u16) -> Result<Codepoint, DeflateReadError> {
    if sym < MIN_LENGTH_CODE || sym > MAX_LENGTH_CODE {
      return Err(DeflateReadError::ReservedLengthCode(sym));
    }
    Ok(self.length_codepoints[usize::from(sym - MIN_LENGTH_CODE)])
  }

  pub fn dist_codepoint(&self, sym: u16) -> Result<Codepoint, DeflateReadError> {
    if sym > MAX_DIST_CODE {
      return Err(DeflateReadError::ReservedDistCode(sym));
    }
    Ok(self.dist_codepoints[usize::from(sym)])
  }

  /// Resolve a length symbol (257-285) into a match length, reading its extra bits
  pub fn read_length<B: BitSource>(&self, sym: u16, bit_src: &mut B) -> Result<u16, DeflateReadError> {
    self.length_codepoint(sym)?.read_value(bit_src)
  }

  /// Resolve a distance symbol (0-29) into a match distance, reading its extra bits
  pub fn read_dist<B: BitSource>(&self, sym: u16, bit_src: &mut B) -> Result<u16, DeflateReadError> {
    self.dist_codepoint(sym)?.read_value(bit_src)
  }
}

impl Default for CodepointDecoder {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::deflate::bitsource::DeflateBitReader;

  #[test]
  fn tables_are_contiguous() {
    let cp = &*DEFAULT_CODEPOINTS;
    for w in cp.length_codepoints.windows(2).take(27) {
      assert_eq!(w[0].hi + 1, w[1].lo);
    }
    for w in cp.dist_codepoints.windows(2) {
      assert_eq!(w[0].hi + 1, w[1].lo);
    }
    assert_eq!(cp.dist_codepoints[29].hi, 32768);
    assert_eq!(cp.length_codepoints[27].hi, 258);
  }

  #[test]
  fn extra_bits_are_added() {
    // 3 extra bits of value 5 for length code 274 (43-50)
    let data = [0b0000_0101u8];
    let mut src = DeflateBitReader::new(&data[..]);
    assert_eq!(DEFAULT_CODEPOINTS.read_length(274, &mut src).unwrap(), 48);

    let data = [0xffu8, 0xff];
    let mut src = DeflateBitReader::new(&data[..]);
    assert_eq!(DEFAULT_CODEPOINTS.read_dist(29, &mut src).unwrap(), 32768);
  }

  #[test]
  fn length_258_has_no_extra_bits() {
    let data: [u8; 0] = [];
    let mut src = DeflateBitReader::new(&data[..]);
    assert_eq!(DEFAULT_CODEPOINTS.read_length(285, &mut src).unwrap(), 258);
  }

  #[test]
  fn reserved_codes() {
    let cp = &*DEFAULT_CODEPOINTS;
    assert!(matches!(
      cp.length_codepoint(286),
      Err(DeflateReadError::ReservedLengthCode(286))
    ));
    assert!(matches!(
      cp.length_codepoint(287),
      Err(DeflateReadError::ReservedLengthCode(287))
    ));
    assert!(matches!(
      cp.dist_codepoint(30),
      Err(DeflateReadError::ReservedDistCode(30))
    ));
    assert!(matches!(
      cp.dist_codepoint(31),
      Err(DeflateReadError::ReservedDistCode(31))
    ));
    assert_eq!(cp.length_codepoint(257).unwrap().lo, 3);
    assert_eq!(cp.dist_codepoint(0).unwrap().lo, 1);
  }
}
