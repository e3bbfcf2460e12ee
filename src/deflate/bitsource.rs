/*! Bit-level input for the decoder.

DEFLATE packs data elements starting from the least-significant bit of each
byte, except for Huffman codes, which are read one bit at a time from the root
of the tree. The [`BitSource`] trait captures the handful of operations the
decoder needs; [`DeflateBitReader`] provides them on top of `bitstream_io`.
*/

use std::io::{ErrorKind, Read};

use bitstream_io::{BitRead, BitReader, LittleEndian};

use super::decoder::DeflateReadError;

pub trait BitSource {
  /// Read one bit, returning `None` at a clean end of stream
  fn read_bit(&mut self) -> Result<Option<u8>, DeflateReadError>;

  /// Number of bits already consumed from the current byte, 0 through 7
  fn bit_position(&self) -> u8;

  /// Discard any bits left in the current byte, then read a full byte
  fn read_byte(&mut self) -> Result<u8, DeflateReadError>;

  /// Release the underlying source. Later reads report end of stream.
  fn close(&mut self);

  fn read_bit_no_eof(&mut self) -> Result<u8, DeflateReadError> {
    self
      .read_bit()?
      .ok_or(DeflateReadError::UnexpectedEndOfData)
  }

  /// Read an `nbits`-wide unsigned integer, least-significant bit first
  fn read_bits(&mut self, nbits: u32) -> Result<u32, DeflateReadError> {
    assert!(nbits <= 32, "Can't read {} bits into a u32", nbits);
    let mut out = 0u32;
    for i in 0..nbits {
      out |= u32::from(self.read_bit_no_eof()?) << i;
    }
    Ok(out)
  }
}

impl<B: BitSource + ?Sized> BitSource for &mut B {
  fn read_bit(&mut self) -> Result<Option<u8>, DeflateReadError> {
    (**self).read_bit()
  }

  fn bit_position(&self) -> u8 {
    (**self).bit_position()
  }

  fn read_byte(&mut self) -> Result<u8, DeflateReadError> {
    (**self).read_byte()
  }

  fn close(&mut self) {
    (**self).close()
  }

  fn read_bit_no_eof(&mut self) -> Result<u8, DeflateReadError> {
    (**self).read_bit_no_eof()
  }

  fn read_bits(&mut self, nbits: u32) -> Result<u32, DeflateReadError> {
    (**self).read_bits(nbits)
  }
}

/// Adapts a `bitstream_io::BitReader` to [`BitSource`], keeping track of the
/// position within the current byte.
pub struct DeflateBitReader<R: Read> {
  inner: Option<BitReader<R, LittleEndian>>,
  bit_pos: u8,
}

fn map_eof(e: std::io::Error) -> DeflateReadError {
  if e.kind() == ErrorKind::UnexpectedEof {
    DeflateReadError::UnexpectedEndOfData
  } else {
    DeflateReadError::IOError(e)
  }
}

impl<R: Read> DeflateBitReader<R> {
  pub fn new(src: R) -> Self {
    Self {
      inner: Some(BitReader::new(src)),
      bit_pos: 0,
    }
  }

  fn reader(&mut self) -> Result<&mut BitReader<R, LittleEndian>, DeflateReadError> {
    self
      .inner
      .as_mut()
      .ok_or(DeflateReadError::UnexpectedEndOfData)
  }
}

impl<R: Read> BitSource for DeflateBitReader<R> {
  fn read_bit(&mut self) -> Result<Option<u8>, DeflateReadError> {
    let reader = match self.inner.as_mut() {
      Some(r) => r,
      None => return Ok(None),
    };
    match reader.read_bit() {
      Ok(bit) => {
        self.bit_pos = (self.bit_pos + 1) % 8;
        Ok(Some(bit as u8))
      }
      Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(None),
      Err(e) => Err(DeflateReadError::IOError(e)),
    }
  }

  fn bit_position(&self) -> u8 {
    self.bit_pos
  }

  fn read_byte(&mut self) -> Result<u8, DeflateReadError> {
    let reader = self.reader()?;
    reader.byte_align();
    let b = reader.read::<u8>(8).map_err(map_eof)?;
    self.bit_pos = 0;
    Ok(b)
  }

  fn close(&mut self) {
    self.inner = None;
    self.bit_pos = 0;
  }

  fn read_bits(&mut self, nbits: u32) -> Result<u32, DeflateReadError> {
    if nbits == 0 {
      return Ok(0);
    }
    let reader = self.reader()?;
    let v = reader.read::<u32>(nbits).map_err(map_eof)?;
    self.bit_pos = ((u32::from(self.bit_pos) + nbits) % 8) as u8;
    Ok(v)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bits_come_lsb_first() {
    let data = [0b1010_0110u8];
    let mut src = DeflateBitReader::new(&data[..]);
    let bits: Vec<u8> = (0..8).map(|_| src.read_bit().unwrap().unwrap()).collect();
    assert_eq!(bits, vec![0, 1, 1, 0, 0, 1, 0, 1]);
    assert_eq!(src.read_bit().unwrap(), None);
    assert!(matches!(
      src.read_bit_no_eof(),
      Err(DeflateReadError::UnexpectedEndOfData)
    ));
  }

  #[test]
  fn multi_bit_reads() {
    let data = [0b1101_0110u8, 0b0000_0011];
    let mut src = DeflateBitReader::new(&data[..]);
    assert_eq!(src.read_bits(3).unwrap(), 0b110);
    assert_eq!(src.bit_position(), 3);
    assert_eq!(src.read_bits(7).unwrap(), 0b11_11010);
    assert_eq!(src.bit_position(), 2);
  }

  #[test]
  fn read_byte_discards_padding() {
    let data = [0xffu8, 0x42, 0x17];
    let mut src = DeflateBitReader::new(&data[..]);
    src.read_bit().unwrap();
    assert_eq!(src.bit_position(), 1);
    assert_eq!(src.read_byte().unwrap(), 0x42);
    assert_eq!(src.bit_position(), 0);
    assert_eq!(src.read_byte().unwrap(), 0x17);
    assert!(matches!(
      src.read_byte(),
      Err(DeflateReadError::UnexpectedEndOfData)
    ));
  }

  #[test]
  fn default_read_bits_matches_override() {
    struct Bits(Vec<u8>);
    impl BitSource for Bits {
      fn read_bit(&mut self) -> Result<Option<u8>, DeflateReadError> {
        Ok(if self.0.is_empty() { None } else { Some(self.0.remove(0)) })
      }
      fn bit_position(&self) -> u8 {
        0
      }
      fn read_byte(&mut self) -> Result<u8, DeflateReadError> {
        Err(DeflateReadError::UnexpectedEndOfData)
      }
      fn close(&mut self) {}
    }

    let data = [0b1011_0010u8];
    let mut a = DeflateBitReader::new(&data[..]);
    let mut b = Bits(vec![0, 1, 0, 0, 1, 1, 0, 1]);
    assert_eq!(a.read_bits(5).unwrap(), b.read_bits(5).unwrap());
    assert_eq!(a.read_bits(3).unwrap(), b.read_bits(3).unwrap());
    assert!(b.read_bits(1).is_err());
  }

  #[test]
  fn closed_reader_is_empty() {
    let data = [0xffu8];
    let mut src = DeflateBitReader::new(&data[..]);
    src.close();
    assert_eq!(src.read_bit().unwrap(), None);
  }
}
