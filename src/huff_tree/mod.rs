/*! Huffman code trees as used by DEFLATE.

Huffman Trees in DEFLATE carry additional constraints:
 - Symbols with the same length are assigned codes in lexicographical order
 - Shorter codes lexicographically precede longer codes.

This makes it possible to specify a whole tree by simply listing the code
length of each symbol (see [`CanonicalCode`]). A [`CodeTree`] is the explicit
form of such a code: a binary tree whose leaves carry symbols, plus the
symbol-to-bits mapping derived from it.
*/

mod canonical;

pub use canonical::CanonicalCode;

use std::fmt;

use bit_vec::BitVec;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum HuffTreeError {
  #[error("Symbol {0} is out of range for an alphabet of {1} symbols")]
  SymbolOutOfRange(usize, usize),
  #[error("Symbol {0} appears more than once in the tree")]
  DuplicateSymbol(usize),
  #[error("No code for given symbol: {0}")]
  NoCode(usize),
  #[error("Code lengths do not form a complete prefix code (odd node count at length {0})")]
  OddNodeCount(u8),
  #[error("Code lengths do not form a complete prefix code ({0} nodes under the root)")]
  RootNotFull(usize),
  #[error("Leaf at depth {0} is deeper than any representable code length")]
  CodeTooLong(usize),
  #[error("Alphabet of {0} symbols is too large")]
  TooManySymbols(usize),
}

/// A node in a Huffman code tree. Leaves carry a symbol, internal nodes have
/// exactly two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  Leaf(u16),
  Internal(InternalNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalNode {
  pub left: Box<Node>,
  pub right: Box<Node>,
}

impl InternalNode {
  pub fn new(left: Node, right: Node) -> Self {
    Self {
      left: Box::new(left),
      right: Box::new(right),
    }
  }

  /// Follow one bit down the tree: 0 goes left, anything else goes right
  pub fn child(&self, bit: u8) -> &Node {
    if bit == 0 {
      &self.left
    } else {
      &self.right
    }
  }
}

/// A complete Huffman tree together with the code of every symbol it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTree {
  root: InternalNode,
  codes: Vec<Option<BitVec>>,
}

impl CodeTree {
  /// Build a tree over an alphabet of `symbol_limit` symbols. Fails if a leaf
  /// symbol is outside the alphabet or appears twice.
  pub fn new(root: InternalNode, symbol_limit: usize) -> Result<Self, HuffTreeError> {
    let mut codes = vec![None; symbol_limit];
    let mut prefix = BitVec::new();
    prefix.push(false);
    Self::gen_mapping(&root.left, &mut prefix, &mut codes)?;
    prefix.set(0, true);
    Self::gen_mapping(&root.right, &mut prefix, &mut codes)?;
    Ok(Self { root, codes })
  }

  /// Walk the tree, recording the path taken to every leaf
  fn gen_mapping(
    node: &Node,
    prefix: &mut BitVec,
    codes: &mut [Option<BitVec>],
  ) -> Result<(), HuffTreeError> {
    match node {
      Node::Leaf(sym) => {
        let sym = *sym as usize;
        match codes.get_mut(sym) {
          None => return Err(HuffTreeError::SymbolOutOfRange(sym, codes.len())),
          Some(Some(_)) => return Err(HuffTreeError::DuplicateSymbol(sym)),
          Some(slot) => *slot = Some(prefix.clone()),
        }
      }
      Node::Internal(inner) => {
        prefix.push(false);
        Self::gen_mapping(&inner.left, prefix, codes)?;
        let last = prefix.len() - 1;
        prefix.set(last, true);
        Self::gen_mapping(&inner.right, prefix, codes)?;
        prefix.pop();
      }
    }
    Ok(())
  }

  pub fn root(&self) -> &InternalNode {
    &self.root
  }

  pub fn symbol_limit(&self) -> usize {
    self.codes.len()
  }

  /// The bits of `symbol`'s code, in the order they appear in the stream
  pub fn get_code(&self, symbol: usize) -> Result<&BitVec, HuffTreeError> {
    match self.codes.get(symbol) {
      None => Err(HuffTreeError::SymbolOutOfRange(symbol, self.codes.len())),
      Some(None) => Err(HuffTreeError::NoCode(symbol)),
      Some(Some(code)) => Ok(code),
    }
  }
}

impl fmt::Display for CodeTree {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (sym, code) in self.codes.iter().enumerate() {
      if let Some(code) = code {
        write!(f, "{}: ", sym)?;
        for bit in code.iter() {
          write!(f, "{}", bit as u8)?;
        }
        writeln!(f)?;
      }
    }
    Ok(())
  }
}
