//! Depth-first traversals of a [`Tree`]. Values are handed to a visitor one at a time instead of
//! being collected, so callers decide what to do with them (collect, print, sum, ...).
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{Order, Tree};
//!
//! let tree: Tree<_> = [5, 3, 8, 1, 4].into_iter().collect();
//!
//! let mut pre = Vec::new();
//! tree.pre_order(|v| pre.push(*v));
//! assert_eq!(pre, [5, 3, 1, 4, 8]);
//!
//! let mut out = Vec::new();
//! tree.write_traversal(Order::In, &mut out).unwrap();
//! assert_eq!(out, b"1 3 4 5 8 ");
//! ```

use std::fmt;
use std::io::{self, Write};

use crate::tree::{NodeRef, Tree};

/// The order in which a traversal visits a node relative to its subtrees.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Order {
    /// The node, then its left subtree, then its right subtree.
    Pre,
    /// The left subtree, then the node, then the right subtree. This yields values sorted.
    In,
    /// The left subtree, then the right subtree, then the node.
    Post,
}

/// One pending unit of work for [`walk`].
enum Step<'a, T> {
    /// Push this node's subtrees and the node itself in traversal order.
    Expand(NodeRef<'a, T>),
    /// Hand this node to the visitor.
    Visit(NodeRef<'a, T>),
}

/// Visits every node below `root` (inclusive) in the given order. Uses an explicit stack rather
/// than recursion so degenerate trees can't overflow the call stack.
pub(crate) fn walk<'a, T>(
    root: Option<NodeRef<'a, T>>,
    order: Order,
    mut visit: impl FnMut(NodeRef<'a, T>),
) {
    let mut stack: Vec<_> = root.map(Step::Expand).into_iter().collect();
    while let Some(step) = stack.pop() {
        let node = match step {
            Step::Visit(node) => {
                visit(node);
                continue;
            }
            Step::Expand(node) => node,
        };

        // Pushed in reverse so they pop in traversal order.
        let right = node.right().map(Step::Expand);
        let left = node.left().map(Step::Expand);
        match order {
            Order::Pre => {
                stack.extend(right);
                stack.extend(left);
                stack.push(Step::Visit(node));
            }
            Order::In => {
                stack.extend(right);
                stack.push(Step::Visit(node));
                stack.extend(left);
            }
            Order::Post => {
                stack.push(Step::Visit(node));
                stack.extend(right);
                stack.extend(left);
            }
        }
    }
}

impl<T> Tree<T> {
    /// Calls `visit` once for every value in the tree, in the given order. The tree is never
    /// modified so this can be called as many times as needed.
    pub fn traverse<'a>(&'a self, order: Order, mut visit: impl FnMut(&'a T)) {
        walk(self.root(), order, |node| visit(node.value()));
    }

    /// Visits each node before either of its subtrees.
    pub fn pre_order<'a>(&'a self, visit: impl FnMut(&'a T)) {
        self.traverse(Order::Pre, visit);
    }

    /// Visits values in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// let mut values = Vec::new();
    /// tree.in_order(|v| values.push(*v));
    /// assert_eq!(values, [1, 3, 4, 5, 7, 8, 9]);
    /// ```
    pub fn in_order<'a>(&'a self, visit: impl FnMut(&'a T)) {
        self.traverse(Order::In, visit);
    }

    /// Visits each node after both of its subtrees.
    pub fn post_order<'a>(&'a self, visit: impl FnMut(&'a T)) {
        self.traverse(Order::Post, visit);
    }

    /// Writes every value to `sink` in the given order, each followed by a single space.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error reported by `sink`.
    pub fn write_traversal<W>(&self, order: Order, mut sink: W) -> io::Result<()>
    where
        T: fmt::Display,
        W: io::Write,
    {
        let mut result = Ok(());
        self.traverse(order, |value| {
            if result.is_ok() {
                result = write!(sink, "{value} ");
            }
        });
        result?;
        sink.flush()
    }
}
