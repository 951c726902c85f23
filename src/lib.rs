//! This crate exposes an ordered Binary Search Tree (BST) whose nodes know their parent.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and remove stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a value and
//! will sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Because of these invariants no two nodes hold equal values, so inserting a
//! value that's already present is rejected. Searching takes `O(height)` where
//! `height` is the longest path from the root `Node` to a leaf `Node`. This tree
//! never rebalances, so inserting values in sorted order gives a tree as tall as
//! it is large. Visiting the left subtree, then the subtree root, then the right
//! subtree yields the values sorted.
//!
//! ```
//! use ordered_tree::{Order, Tree, TreeError};
//!
//! let mut tree: Tree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
//!
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.node_count(), 7);
//! assert_eq!(tree.leaves_count(), 4);
//!
//! // The root has two children so it takes its in-order predecessor's value.
//! assert_eq!(tree.remove(&5), Ok(5));
//! assert_eq!(tree.root().map(|n| *n.value()), Some(4));
//! assert_eq!(tree.remove(&42), Err(TreeError::NotFound));
//!
//! let mut sorted = Vec::new();
//! tree.traverse(Order::In, |v| sorted.push(*v));
//! assert_eq!(sorted, [1, 3, 4, 7, 8, 9]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod error;
pub mod traversal;
pub mod tree;

pub use error::TreeError;
pub use traversal::Order;
pub use tree::{NodeRef, Tree};
