//! An unbalanced BST whose nodes keep a pointer back to their parent. Children are owned through
//! their parent's links and the root is owned by the [`Tree`].
//!
//! # Examples
//!
//! ```
//! use ordered_tree::{Tree, TreeError};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.find(&1).is_none());
//! assert_eq!(tree.remove(&1), Err(TreeError::EmptyTree));
//!
//! assert!(tree.insert(1));
//! assert_eq!(tree.find(&1).map(|n| *n.value()), Some(1));
//!
//! // Inserting a value that's already present is rejected.
//! assert!(!tree.insert(1));
//! assert_eq!(tree.node_count(), 1);
//!
//! // Removing a node hands back its value.
//! assert_eq!(tree.remove(&1), Ok(1));
//! assert!(tree.find(&1).is_none());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ptr::NonNull;

use crate::error::TreeError;
use crate::traversal::{self, Order};

/// An ordered Binary Search Tree. This can be used for inserting, finding, and removing values.
/// It never rebalances itself so its shape depends entirely on insertion order.
pub struct Tree<T> {
    // This is a `Link` instead of an `Option<Box<Node>>` so that children can point back at the
    // root without the pointer breaking when the `Tree` moves.
    root: Link<T>,
}

// SAFETY: A `Tree` uniquely owns every node reachable from it, just like a `Box` would, so it's
// as thread safe as the values it holds.
unsafe impl<T: Send> Send for Tree<T> {}
unsafe impl<T: Sync> Sync for Tree<T> {}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let mut tree = Self::new();
        let Some(root) = self.root.node() else {
            return tree;
        };

        tree.root = Link::new_node(root.value.clone(), Link::NONE);
        let mut pending: Vec<_> = tree.root.0.map(|copy| (root, copy)).into_iter().collect();
        while let Some((source, mut copy)) = pending.pop() {
            // SAFETY: `copy` was just allocated by `Link::new_node` and is only reachable through
            // `tree`, which nothing else can see yet.
            let copy_node = unsafe { copy.as_mut() };
            if let Some(left) = source.left.node() {
                copy_node.left = Link::new_node(left.value.clone(), Link(Some(copy)));
                pending.extend(copy_node.left.0.map(|c| (left, c)));
            }
            if let Some(right) = source.right.node() {
                copy_node.right = Link::new_node(right.value.clone(), Link(Some(copy)));
                pending.extend(copy_node.right.0.map(|c| (right, c)));
            }
        }

        tree
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        self.in_order(|value| {
            set.entry(value);
        });
        set.finish()
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    /// Inserts every value in iteration order. Duplicates are skipped.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: Link::NONE }
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.0.is_none()
    }

    /// Returns a handle to the root node, if there is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree: Tree<_> = [2, 1, 3].into_iter().collect();
    /// let root = tree.root().unwrap();
    ///
    /// assert_eq!(root.value(), &2);
    /// assert_eq!(root.left().map(|n| *n.value()), Some(1));
    /// assert!(root.parent().is_none());
    /// ```
    pub fn root(&self) -> Option<NodeRef<'_, T>> {
        self.root.node().map(NodeRef)
    }

    /// Inserts the given value into the tree. Returns `false`, leaving the tree untouched, if an
    /// equal value is already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(tree.insert(2));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.node_count(), 2);
    /// ```
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        let Some(mut current) = self.root.0 else {
            self.root = Link::new_node(value, Link::NONE);
            log::trace!("placed new value at the root");
            return true;
        };

        loop {
            // SAFETY: `current` starts at the root and only ever follows child links of this tree,
            // so it's a live node. We hold `&mut self` so nothing else is looking at it.
            let node = unsafe { current.as_mut() };
            let slot = match value.cmp(&node.value) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => {
                    log::trace!("rejected duplicate value");
                    return false;
                }
            };

            if let Some(child) = slot.0 {
                current = child;
                continue;
            }

            *slot = Link::new_node(value, Link(Some(current)));
            log::trace!("placed new value in an empty child slot");

            if cfg!(debug_assertions) {
                if let Some(left) = node.left.node() {
                    assert!(node.value > left.value);
                }
                if let Some(right) = node.right.node() {
                    assert!(node.value < right.value);
                }
            }
            return true;
        }
    }

    /// Potentially finds the node holding a value equal to the given one. If no node matches,
    /// `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.find(&1).map(|n| *n.value()), Some(1));
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, value: &T) -> Option<NodeRef<'_, T>>
    where
        T: Ord,
    {
        // SAFETY: `find_ptr` only returns live nodes of this tree and `&self` keeps them alive
        // and unmodified for the returned lifetime.
        self.find_ptr(value).map(|ptr| NodeRef(unsafe { &*ptr.as_ptr() }))
    }

    /// Returns `true` if a value equal to the given one is in the tree.
    pub fn contains(&self, value: &T) -> bool
    where
        T: Ord,
    {
        self.find_ptr(value).is_some()
    }

    /// Removes the node holding a value equal to the given one and returns the stored value.
    ///
    /// A node with two children takes over the value of its in-order predecessor (the largest
    /// value in its left subtree) and the predecessor's node is removed instead.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyTree`] if the tree has no nodes and [`TreeError::NotFound`] if no node
    /// holds the value. The tree is unchanged in both cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Tree, TreeError};
    ///
    /// let mut tree: Tree<_> = [5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&5), Ok(5));
    /// assert_eq!(tree.root().map(|n| *n.value()), Some(3));
    /// assert_eq!(tree.remove(&42), Err(TreeError::NotFound));
    /// ```
    pub fn remove(&mut self, value: &T) -> Result<T, TreeError>
    where
        T: Ord,
    {
        if self.is_empty() {
            log::debug!("remove called on an empty tree");
            return Err(TreeError::EmptyTree);
        }
        let Some(mut target) = self.find_ptr(value) else {
            log::debug!("remove found no matching value");
            return Err(TreeError::NotFound);
        };

        // SAFETY: `target` is a live node of this tree and nothing else borrows it while we hold
        // `&mut self`.
        let (left, right) = unsafe { (target.as_ref().left.0, target.as_ref().right.0) };
        let removed = match (left, right) {
            (Some(left), Some(_)) => {
                // SAFETY: `left` is a live node of this tree. The predecessor is the rightmost
                // node of that subtree so it has no right child and `unlink` can splice it out.
                // Unlinking it at most rewrites `target.left`, so `target` stays valid.
                let predecessor = unsafe {
                    let predecessor = find_rightmost(left);
                    self.unlink(predecessor)
                };
                log::trace!("replacing removed value with its in-order predecessor");
                // SAFETY: As above, `target` is still attached and not otherwise borrowed.
                unsafe { std::mem::replace(&mut target.as_mut().value, predecessor.value) }
            }
            _ => {
                log::trace!("splicing out a node with at most one child");
                // SAFETY: `target` is live and has at most one child.
                let removed = unsafe { self.unlink(target) };
                removed.value
            }
        };

        Ok(removed)
    }

    /// Removes every node from the tree. Children are always freed before their parent and each
    /// owning link is cleared before the node behind it is freed.
    pub fn clear(&mut self) {
        let mut stack: Vec<_> = self.root.take().0.into_iter().collect();
        while let Some(mut ptr) = stack.pop() {
            // SAFETY: Every pointer on the stack was just detached from its owner (the root link
            // or its parent's child link), so we're the only ones who can reach it.
            let node = unsafe { ptr.as_mut() };
            let child = if node.left.0.is_some() {
                node.left.take()
            } else {
                node.right.take()
            };

            match child.0 {
                Some(child) => {
                    stack.push(ptr);
                    stack.push(child);
                }
                // SAFETY: The node has no children left and nothing links to it anymore. It was
                // allocated with `Box::new` in `Link::new_node`.
                None => drop(unsafe { Box::from_raw(ptr.as_ptr()) }),
            }
        }
    }

    /// The smallest value in the tree.
    pub fn min(&self) -> Option<&T> {
        let mut node = self.root.node()?;
        while let Some(left) = node.left.node() {
            node = left;
        }
        Some(&node.value)
    }

    /// The largest value in the tree.
    pub fn max(&self) -> Option<&T> {
        self.root().map(|root| root.rightmost().value())
    }

    /// The number of nodes in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 3].into_iter().collect();
    /// assert_eq!(tree.node_count(), 3);
    /// ```
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        traversal::walk(self.root(), Order::Pre, |_| count += 1);
        count
    }

    /// The number of nodes with no children.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1].into_iter().collect();
    /// assert_eq!(tree.leaves_count(), 2);
    /// ```
    pub fn leaves_count(&self) -> usize {
        let mut count = 0;
        traversal::walk(self.root(), Order::Pre, |node| {
            if node.is_leaf() {
                count += 1;
            }
        });
        count
    }

    /// The number of edges on the longest path from the root down to a leaf. An empty tree has a
    /// height of `-1` and a lone root a height of `0`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// tree.insert(1);
    /// assert_eq!(tree.height(), 0);
    ///
    /// tree.insert(2);
    /// tree.insert(3);
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn height(&self) -> isize {
        let mut height = -1;
        let mut stack: Vec<_> = self.root().map(|root| (root, 0)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left().map(|n| (n, depth + 1)));
            stack.extend(node.right().map(|n| (n, depth + 1)));
        }
        height
    }

    /// Walks down from the root looking for `value`. The returned pointer comes straight out of a
    /// `Link` so it's fine to write through while holding `&mut self`.
    fn find_ptr(&self, value: &T) -> Option<NonNull<Node<T>>>
    where
        T: Ord,
    {
        let mut current = self.root.0;
        while let Some(ptr) = current {
            // SAFETY: Non-empty links always point to live nodes of this tree.
            let node = unsafe { ptr.as_ref() };
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.0,
                Ordering::Equal => return Some(ptr),
                Ordering::Greater => node.right.0,
            };
        }
        None
    }

    /// Detaches the node from the tree, splicing its only child (if any) into its place, and
    /// hands back ownership of the detached node.
    ///
    /// # Safety
    ///
    /// `ptr` must be a live node of this tree with at most one child and there must be no
    /// outstanding references into the tree.
    unsafe fn unlink(&mut self, mut ptr: NonNull<Node<T>>) -> Box<Node<T>> {
        let node = ptr.as_mut();
        debug_assert!(node.left.0.is_none() || node.right.0.is_none());

        let mut child = if node.left.0.is_some() {
            node.left.take()
        } else {
            node.right.take()
        };
        let parent = node.parent.take();
        if let Some(child) = child.node_mut() {
            child.parent = parent;
        }
        *self.slot_of(ptr, parent) = child;

        Box::from_raw(ptr.as_ptr())
    }

    /// The link that owns `ptr`. That's the tree's root when `parent` is empty and one of the
    /// parent's child links otherwise.
    ///
    /// # Safety
    ///
    /// `parent` must be the parent of `ptr` in this tree.
    unsafe fn slot_of(&mut self, ptr: NonNull<Node<T>>, parent: Link<T>) -> &mut Link<T> {
        match parent.0 {
            None => &mut self.root,
            Some(mut parent) => {
                let parent = parent.as_mut();
                if parent.left.0 == Some(ptr) {
                    &mut parent.left
                } else {
                    debug_assert!(parent.right.0 == Some(ptr));
                    &mut parent.right
                }
            }
        }
    }
}

/// Follows right links from `start` until reaching a node without a right child. That's `start`
/// itself when it has no right child.
///
/// # Safety
///
/// `start` must be a live node.
unsafe fn find_rightmost<T>(mut start: NonNull<Node<T>>) -> NonNull<Node<T>> {
    while let Some(right) = start.as_ref().right.0 {
        start = right;
    }
    start
}

/// A possibly empty pointer to a `Node`. When it's part of a `Tree`, a non-empty `Link` always
/// points at a live node allocated in [`Link::new_node`].
struct Link<T>(Option<NonNull<Node<T>>>);

impl<T> Clone for Link<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for Link<T> {}

impl<T> Link<T> {
    const NONE: Self = Link(None);

    /// Allocates a childless node and returns a link to it.
    fn new_node(value: T, parent: Link<T>) -> Self {
        let node = Box::new(Node {
            value,
            left: Link::NONE,
            right: Link::NONE,
            parent,
        });
        Link(Some(NonNull::from(Box::leak(node))))
    }

    fn node(&self) -> Option<&Node<T>> {
        // SAFETY: If the link is not `None` then it points at a valid `Node`. Nodes are only
        // mutated through `&mut Tree` so a shared borrow of the link (and so of the tree it lives
        // in) can't alias a mutable one.
        unsafe { self.0.as_ref().map(|ptr| ptr.as_ref()) }
    }

    fn node_mut(&mut self) -> Option<&mut Node<T>> {
        // SAFETY: As in `node`, with the caller responsible for not holding another reference to
        // the same node.
        unsafe { self.0.as_mut().map(|ptr| ptr.as_mut()) }
    }

    fn take(&mut self) -> Self {
        Link(self.0.take())
    }
}

struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
    /// Never owns. Empty for the root.
    parent: Link<T>,
}

/// A read-only handle to a node inside a [`Tree`]. It borrows the tree, so the tree can't change
/// while the handle is alive. Two handles are equal when they refer to the same node.
pub struct NodeRef<'a, T>(&'a Node<T>);

impl<T> Clone for NodeRef<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T> Copy for NodeRef<'_, T> {}

impl<T> PartialEq for NodeRef<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}
impl<T> Eq for NodeRef<'_, T> {}

impl<T> fmt::Debug for NodeRef<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("value", &self.0.value)
            .field("left", &self.left().map(|n| n.value()))
            .field("right", &self.right().map(|n| n.value()))
            .finish()
    }
}

impl<'a, T> NodeRef<'a, T> {
    /// The value stored in this node.
    pub fn value(&self) -> &'a T {
        &self.0.value
    }

    /// The root of this node's left subtree.
    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.0.left.node().map(NodeRef)
    }

    /// The root of this node's right subtree.
    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.0.right.node().map(NodeRef)
    }

    /// The node whose left or right link holds this one. `None` for the root.
    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.0.parent.node().map(NodeRef)
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.0.left.0.is_none() && self.0.right.0.is_none()
    }

    /// Returns `true` if this node is the root of its tree.
    pub fn is_root(&self) -> bool {
        self.0.parent.0.is_none()
    }

    /// The node reached by following right links from this one until there are none. Within a
    /// left subtree that's the in-order predecessor of the subtree's parent.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree: Tree<_> = [5, 3, 8, 1, 4].into_iter().collect();
    /// let left = tree.root().and_then(|n| n.left()).unwrap();
    ///
    /// assert_eq!(left.rightmost().value(), &4);
    /// assert_eq!(left.left().unwrap().rightmost().value(), &1);
    /// ```
    pub fn rightmost(&self) -> NodeRef<'a, T> {
        let mut node = *self;
        while let Some(right) = node.right() {
            node = right;
        }
        node
    }
}
