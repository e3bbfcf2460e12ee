/*! A decompressor for raw DEFLATE (RFC 1951) streams.

The quickest way in is [`deflate::inflate_bytes`]. The Huffman code
construction in [`huff_tree`] and the history buffer in [`sliding_window`] are
usable on their own. */

pub mod arrays;
pub mod deflate;
pub mod huff_tree;
pub mod sliding_window;
