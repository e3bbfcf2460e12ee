/*! The LZ77 sliding window used while inflating.

DEFLATE backreferences may point up to 32K bytes into the already-decoded
output, so the decoder only needs to remember that much history. The window is
a ring buffer: the write cursor wraps around and the oldest bytes are
overwritten.
*/

use crate::deflate::decoder::DeflateReadError;

/// A fixed-capacity ring buffer of the most recently decoded bytes.
#[derive(Debug, Clone)]
pub struct CircularDictionary {
  data: Vec<u8>,
  index: usize,
  // Some(size - 1) when size is a power of two
  mask: Option<usize>,
  written: u64,
}

impl CircularDictionary {
  pub fn new(size: usize) -> Result<Self, DeflateReadError> {
    if size == 0 {
      return Err(DeflateReadError::InvalidWindowSize(size));
    }
    let mask = if size.is_power_of_two() {
      Some(size - 1)
    } else {
      None
    };
    Ok(Self {
      data: vec![0u8; size],
      index: 0,
      mask,
      written: 0,
    })
  }

  pub fn capacity(&self) -> usize {
    self.data.len()
  }

  /// Total number of bytes that have passed through the window
  pub fn written(&self) -> u64 {
    self.written
  }

  #[inline]
  fn wrap(&self, i: usize) -> usize {
    match self.mask {
      Some(m) => i & m,
      None => i % self.data.len(),
    }
  }

  #[inline]
  pub fn append(&mut self, b: u8) {
    self.data[self.index] = b;
    self.index = self.wrap(self.index + 1);
    self.written += 1;
  }

  pub fn append_slice(&mut self, bytes: &[u8]) {
    for b in bytes {
      self.append(*b);
    }
  }

  /** Copy `len` bytes starting `dist` bytes back into `out`.

  Every copied byte is also appended to the window before the next one is
  read, so a run whose length exceeds its distance repeats the bytes it has
  just produced (`dist = 1` is a run of a single byte).

  Bytes that were never written read back as zero. */
  pub fn copy(&mut self, dist: usize, len: usize, out: &mut Vec<u8>) -> Result<(), DeflateReadError> {
    if dist < 1 || dist > self.data.len() {
      return Err(DeflateReadError::BackrefOutOfWindow(dist, self.data.len()));
    }
    out.reserve(len);
    let mut read_index = self.wrap(self.index + self.data.len() - dist);
    for _ in 0..len {
      let b = self.data[read_index];
      read_index = self.wrap(read_index + 1);
      out.push(b);
      self.append(b);
    }
    Ok(())
  }
}
