/*! Small slice helpers used when shuffling code-length tables around.

Unlike slicing, the copy functions never fail when asked for more elements than
the source holds: missing entries are filled with `T::default()`. */

/// Copy `source[from..to]` into a new vector of length `to - from`, padding
/// with default values past the end of `source`.
///
/// # Panics
///
/// Panics if `from > to`.
pub fn copy_of_range<T: Clone + Default>(source: &[T], from: usize, to: usize) -> Vec<T> {
  assert!(from <= to, "copy_of_range: from ({}) > to ({})", from, to);
  let mut out = Vec::with_capacity(to - from);
  if from < source.len() {
    let end = std::cmp::min(to, source.len());
    out.extend_from_slice(&source[from..end]);
  }
  out.resize(to - from, T::default());
  out
}

/// Copy the first `new_len` elements of `source`, truncating or padding as needed.
pub fn copy_of<T: Clone + Default>(source: &[T], new_len: usize) -> Vec<T> {
  copy_of_range(source, 0, new_len)
}

/// Set `dest[i0..i1]` to `value`. The range is clamped to the slice.
pub fn fill<T: Clone>(dest: &mut [T], i0: usize, i1: usize, value: T) {
  let end = std::cmp::min(i1, dest.len());
  if i0 >= end {
    return;
  }
  for x in dest[i0..end].iter_mut() {
    *x = value.clone();
  }
}
