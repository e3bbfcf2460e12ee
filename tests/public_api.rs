use rawinflate::arrays;
use rawinflate::deflate::{decompress, DeflateBitReader, DeflateReadError};
use rawinflate::huff_tree::{CanonicalCode, HuffTreeError, Node};
use rawinflate::sliding_window::CircularDictionary;

#[test]
fn rfc_example_code() {
  // Section 3.2.2 of RFC 1951: ABCDEFGH with lengths (3, 3, 3, 3, 3, 2, 4, 4)
  let code = CanonicalCode::new(&[3, 3, 3, 3, 3, 2, 4, 4]).unwrap();
  let tree = code.to_code_tree().unwrap();
  let expected = ["010", "011", "100", "101", "110", "00", "1110", "1111"];
  for (sym, bits) in expected.iter().enumerate() {
    let code_str: String = tree
      .get_code(sym)
      .unwrap()
      .iter()
      .map(|b| if b { '1' } else { '0' })
      .collect();
    assert_eq!(&code_str, bits);
  }

  let back = CanonicalCode::from_tree(&tree, 8).unwrap();
  assert_eq!(back.code_lengths(), code.code_lengths());
}

#[test]
fn walk_the_tree_by_hand() {
  let tree = CanonicalCode::new(&[1, 2, 2]).unwrap().to_code_tree().unwrap();
  let mut node = tree.root().child(1);
  if let Node::Internal(inner) = node {
    node = inner.child(0);
  }
  assert!(matches!(node, Node::Leaf(1)));
}

#[test]
fn bad_lengths_are_reported() {
  assert_eq!(
    CanonicalCode::new(&[1, 1, 1]).unwrap().to_code_tree().unwrap_err(),
    HuffTreeError::RootNotFull(3)
  );
  assert!(CanonicalCode::new(&[1, 1]).unwrap().get_code_length(2).is_err());
}

#[test]
fn dictionary_echo_copy() {
  let mut dict = CircularDictionary::new(100).unwrap();
  dict.append_slice(b"ab");
  let mut out = b"ab".to_vec();
  dict.copy(2, 5, &mut out).unwrap();
  assert_eq!(out, b"abababa");
  assert_eq!(dict.written(), 7);
  assert!(dict.copy(101, 1, &mut out).is_err());
}

#[test]
fn array_helpers() {
  let src = [1u8, 2, 3];
  assert_eq!(arrays::copy_of_range(&src, 1, 5), vec![2, 3, 0, 0]);
  assert_eq!(arrays::copy_of(&src, 2), vec![1, 2]);
  let mut dest = [0u8; 4];
  arrays::fill(&mut dest, 1, 3, 9);
  assert_eq!(dest, [0, 9, 9, 0]);
}

#[test]
fn decompress_from_any_bit_source() {
  let data = [0xf3, 0x48, 0xcd, 0xc9, 0xc9, 0xe7, 0x02, 0x00u8];
  assert_eq!(decompress(DeflateBitReader::new(&data[..])).unwrap(), b"Hello\n");

  let err = decompress(DeflateBitReader::new(&data[..4])).unwrap_err();
  assert!(err.is_end_of_stream());
  assert!(matches!(err, DeflateReadError::UnexpectedEndOfData));
}
