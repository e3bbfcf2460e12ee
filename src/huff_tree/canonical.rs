use std::convert::TryFrom;

use super::{CodeTree, HuffTreeError, InternalNode, Node};

/// A canonical Huffman code, stored as one code length per symbol. A length
/// of zero means the symbol does not appear in the code.
///
/// Completeness is only checked when converting to a tree: any set of lengths
/// can be stored here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalCode {
  code_lengths: Vec<u8>,
}

impl CanonicalCode {
  pub fn new(code_lengths: &[u8]) -> Result<Self, HuffTreeError> {
    if code_lengths.len() > usize::from(u16::MAX) + 1 {
      return Err(HuffTreeError::TooManySymbols(code_lengths.len()));
    }
    Ok(Self {
      code_lengths: code_lengths.to_vec(),
    })
  }

  /// Recover the code lengths of an existing tree over `symbol_limit` symbols
  pub fn from_tree(tree: &CodeTree, symbol_limit: usize) -> Result<Self, HuffTreeError> {
    let mut code_lengths = vec![0u8; symbol_limit];
    Self::build_code_lengths(&tree.root().left, 1, &mut code_lengths)?;
    Self::build_code_lengths(&tree.root().right, 1, &mut code_lengths)?;
    Ok(Self { code_lengths })
  }

  fn build_code_lengths(
    node: &Node,
    depth: usize,
    code_lengths: &mut [u8],
  ) -> Result<(), HuffTreeError> {
    match node {
      Node::Leaf(sym) => {
        let sym = *sym as usize;
        let limit = code_lengths.len();
        let slot = code_lengths
          .get_mut(sym)
          .ok_or(HuffTreeError::SymbolOutOfRange(sym, limit))?;
        if *slot != 0 {
          return Err(HuffTreeError::DuplicateSymbol(sym));
        }
        *slot = u8::try_from(depth).map_err(|_| HuffTreeError::CodeTooLong(depth))?;
      }
      Node::Internal(inner) => {
        Self::build_code_lengths(&inner.left, depth + 1, code_lengths)?;
        Self::build_code_lengths(&inner.right, depth + 1, code_lengths)?;
      }
    }
    Ok(())
  }

  pub fn symbol_limit(&self) -> usize {
    self.code_lengths.len()
  }

  pub fn get_code_length(&self, symbol: usize) -> Result<u8, HuffTreeError> {
    self
      .code_lengths
      .get(symbol)
      .copied()
      .ok_or(HuffTreeError::SymbolOutOfRange(symbol, self.code_lengths.len()))
  }

  pub fn code_lengths(&self) -> &[u8] {
    &self.code_lengths
  }

  /** Build the explicit tree for this code.

  Works bottom-up from the longest code length: at each level, the leaves for
  symbols of that length come first (in symbol order), followed by the nodes
  formed by pairing up everything from the level below. This is exactly the
  canonical code assignment of RFC 1951 3.2.2. */
  pub fn to_code_tree(&self) -> Result<CodeTree, HuffTreeError> {
    let max_len = self.code_lengths.iter().copied().max().unwrap_or(0);
    let mut nodes: Vec<Node> = Vec::new();

    for level in (1..=max_len).rev() {
      if nodes.len() % 2 != 0 {
        return Err(HuffTreeError::OddNodeCount(level));
      }
      let mut new_nodes = Vec::new();

      for (sym, len) in self.code_lengths.iter().enumerate() {
        if *len == level {
          // Guarded by the alphabet size check in new()
          new_nodes.push(Node::Leaf(sym as u16));
        }
      }

      let mut deeper = nodes.into_iter();
      while let (Some(left), Some(right)) = (deeper.next(), deeper.next()) {
        new_nodes.push(Node::Internal(InternalNode::new(left, right)));
      }
      nodes = new_nodes;
    }

    if nodes.len() != 2 {
      return Err(HuffTreeError::RootNotFull(nodes.len()));
    }
    let right = nodes.pop().ok_or(HuffTreeError::RootNotFull(0))?;
    let left = nodes.pop().ok_or(HuffTreeError::RootNotFull(1))?;
    CodeTree::new(InternalNode::new(left, right), self.code_lengths.len())
  }
}
