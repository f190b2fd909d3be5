//! [`RangeTree`](struct.RangeTree.html) keeps a set of non-overlapping ranges inside a fixed
//! domain [begin, end) in a height balanced (AVL) binary search tree ordered by range start.
//!
//! Because stored ranges never overlap, ordering by start is also ordering by stop, so a single
//! descent decides whether a candidate collides with anything: a candidate that ends before a
//! node starts can only collide on the left, one that starts after the node stops can only
//! collide on the right.
//!
//! Rotations are local operations that take ownership of a subtree and hand back its new root;
//! insert and remove rebuild the links on the way back up the recursion. No node keeps a
//! reference to its parent.
//!
//! # Examples
//!
//! ```rust
//!    use rangetree::{Range, RangeStore, RangeTree};
//!
//!    let mut tree = RangeTree::new(0, 8000).unwrap();
//!    assert!(tree.insert(0, 9));
//!    assert!(tree.insert(10, 9));
//!    assert!(tree.insert(20, 9));
//!
//!    // the third insert rotated 10 up to the root
//!    assert_eq!(tree.root(), Some(Range::new(10, 9)));
//!    assert!(!tree.check(15, 10));
//!    assert_eq!(tree.find(25, 2), Some(Range::new(20, 9)));
//!    assert_eq!(tree.remove(12), Ok(Range::new(10, 9)));
//!    assert_eq!(tree.len(), 2);
//! ```
use crate::error::Error;
use crate::range::Range;
use crate::rangestore::{admit, bounds, RangeStore};
use log::{debug, trace};
use std::cmp;

type Link = Option<Box<Node>>;

#[derive(Debug, Clone)]
struct Node {
    range: Range,
    left: Link,
    right: Link,
    /// Height of the subtree rooted here, a leaf is 1
    height: usize,
}

impl Node {
    fn new(range: Range) -> Box<Node> {
        Box::new(Node {
            range,
            left: None,
            right: None,
            height: 1,
        })
    }
}

/// Primary object of the library. Owns every node; the bounds are fixed at construction.
#[derive(Debug, Clone)]
pub struct RangeTree {
    root: Link,
    len: usize,
    begin: i32,
    end: i32,
}

#[inline]
fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

#[inline]
fn update_height(node: &mut Node) {
    node.height = 1 + cmp::max(height(&node.left), height(&node.right));
}

#[inline]
fn balance_factor(node: &Node) -> isize {
    height(&node.left) as isize - height(&node.right) as isize
}

fn rotate_right(mut node: Box<Node>) -> Box<Node> {
    match node.left.take() {
        Some(mut pivot) => {
            node.left = pivot.right.take();
            update_height(&mut node);
            pivot.right = Some(node);
            update_height(&mut pivot);
            pivot
        }
        None => node,
    }
}

fn rotate_left(mut node: Box<Node>) -> Box<Node> {
    match node.right.take() {
        Some(mut pivot) => {
            node.right = pivot.left.take();
            update_height(&mut node);
            pivot.left = Some(node);
            update_height(&mut pivot);
            pivot
        }
        None => node,
    }
}

/// Restore the height of `node` and, if it is out of balance, rotate it back into shape.
/// Returns the root of the subtree, which may no longer be `node`.
fn rebalance(mut node: Box<Node>) -> Box<Node> {
    update_height(&mut node);
    let balance = balance_factor(&node);

    if balance > 1 {
        if node.left.as_ref().map_or(false, |left| balance_factor(left) < 0) {
            trace!("left-right rotation at {}", node.range);
            node.left = node.left.take().map(rotate_left);
        } else {
            trace!("right rotation at {}", node.range);
        }
        return rotate_right(node);
    }

    if balance < -1 {
        if node.right.as_ref().map_or(false, |right| balance_factor(right) > 0) {
            trace!("right-left rotation at {}", node.range);
            node.right = node.right.take().map(rotate_right);
        } else {
            trace!("left rotation at {}", node.range);
        }
        return rotate_left(node);
    }

    node
}

/// Place `range` by its start. The caller has already ruled out any overlap, so starts are unique.
fn insert_node(link: Link, range: Range) -> Box<Node> {
    match link {
        None => Node::new(range),
        Some(mut node) => {
            if range.start < node.range.start {
                node.left = Some(insert_node(node.left.take(), range));
            } else {
                node.right = Some(insert_node(node.right.take(), range));
            }
            rebalance(node)
        }
    }
}

/// Delete the node containing `position`, storing its range in `removed`.
fn remove_node(link: Link, position: i32, removed: &mut Option<Range>) -> Link {
    let mut node = link?;
    if node.range.contains(position) {
        *removed = Some(node.range);
        return match (node.left.take(), node.right.take()) {
            (None, None) => None,
            (Some(child), None) | (None, Some(child)) => Some(child),
            (Some(left), Some(right)) => {
                // Pull the replacement out of the taller side, the predecessor on ties
                if left.height >= right.height {
                    let (rest, predecessor) = remove_max(left);
                    node.range = predecessor;
                    node.left = rest;
                    node.right = Some(right);
                } else {
                    let (rest, successor) = remove_min(right);
                    node.range = successor;
                    node.left = Some(left);
                    node.right = rest;
                }
                Some(rebalance(node))
            }
        };
    }

    if position < node.range.start {
        node.left = remove_node(node.left.take(), position, removed);
    } else {
        node.right = remove_node(node.right.take(), position, removed);
    }
    Some(rebalance(node))
}

fn remove_min(mut node: Box<Node>) -> (Link, Range) {
    match node.left.take() {
        None => (node.right.take(), node.range),
        Some(left) => {
            let (rest, min) = remove_min(left);
            node.left = rest;
            (Some(rebalance(node)), min)
        }
    }
}

fn remove_max(mut node: Box<Node>) -> (Link, Range) {
    match node.right.take() {
        None => (node.left.take(), node.range),
        Some(right) => {
            let (rest, max) = remove_max(right);
            node.right = rest;
            (Some(rebalance(node)), max)
        }
    }
}

impl RangeTree {
    /// The range stored at the root, `None` for an empty tree. Rotations move the root, so
    /// this may change after any insert or remove.
    /// ```
    /// use rangetree::{Range, RangeStore, RangeTree};
    /// let mut tree = RangeTree::new(0, 8000).unwrap();
    /// assert_eq!(tree.root(), None);
    /// tree.insert(30, 9);
    /// tree.insert(10, 9);
    /// tree.insert(20, 9);
    /// assert_eq!(tree.root(), Some(Range::new(20, 9)));
    /// ```
    #[inline]
    pub fn root(&self) -> Option<Range> {
        self.root.as_ref().map(|node| node.range)
    }

    /// Height of the tree, 0 when empty
    #[inline]
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Release every stored range. The bounds are kept.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// First stored range found overlapping [start, stop)
    fn conflict(&self, start: i64, stop: i64) -> Option<&Range> {
        let mut current = &self.root;
        while let Some(node) = current {
            if node.range.overlap(start, stop) {
                return Some(&node.range);
            } else if stop <= i64::from(node.range.start) {
                current = &node.left;
            } else {
                current = &node.right;
            }
        }
        None
    }

    /// Stored range with the lowest start overlapping [start, stop)
    fn locate(&self, start: i64, stop: i64) -> Option<&Range> {
        let mut found = None;
        let mut current = &self.root;
        while let Some(node) = current {
            if node.range.overlap(start, stop) {
                found = Some(&node.range);
                current = &node.left;
            } else if stop <= i64::from(node.range.start) {
                current = &node.left;
            } else {
                current = &node.right;
            }
        }
        found
    }
}

impl<'a> RangeStore<'a> for RangeTree {
    type RangeIterator = IterRangeTree<'a>;

    /// Create an empty tree over the domain [begin, end).
    /// ```
    /// use rangetree::{Error, RangeStore, RangeTree};
    /// let tree = RangeTree::new(0, 8000).unwrap();
    /// assert_eq!((tree.begin(), tree.end()), (0, 8000));
    /// assert!(tree.is_empty());
    /// assert_eq!(RangeTree::new(10, 0).err(), Some(Error::InvalidBounds { begin: 10, end: 0 }));
    /// ```
    fn new(begin: i32, end: i32) -> Result<Self, Error> {
        bounds(begin, end)?;
        Ok(RangeTree {
            root: None,
            len: 0,
            begin,
            end,
        })
    }

    #[inline]
    fn begin(&self) -> i32 {
        self.begin
    }

    #[inline]
    fn end(&self) -> i32 {
        self.end
    }

    /// Get the number of ranges in the tree
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return an iterator over the ranges in ascending start order
    #[inline]
    fn iter(&'a self) -> IterRangeTree<'a> {
        IterRangeTree::new(&self.root)
    }

    /// Check if [start, start + length) lies inside the domain and overlaps nothing stored, in
    /// other words whether `insert` would accept it. Empty ranges are never admissible.
    /// ```
    /// use rangetree::{RangeStore, RangeTree};
    /// let mut tree = RangeTree::new(0, 8000).unwrap();
    /// tree.insert(100, 300);
    /// assert!(tree.check(50, 49));
    /// assert!(tree.check(401, 50));
    /// assert!(!tree.check(50, 100));
    /// assert!(!tree.check(390, 50));
    /// ```
    #[inline]
    fn check(&self, start: i32, length: u32) -> bool {
        match admit(self.begin, self.end, start, length) {
            Ok((start, stop)) => self.conflict(start, stop).is_none(),
            Err(_) => false,
        }
    }

    /// Find the stored range overlapping [position, position + length). A zero length is
    /// treated as the single position. When several ranges overlap, the lowest one is returned.
    /// ```
    /// use rangetree::{Range, RangeStore, RangeTree};
    /// let mut tree = RangeTree::new(0, 8000).unwrap();
    /// tree.insert(10, 9);
    /// tree.insert(20, 9);
    /// tree.insert(30, 9);
    /// assert_eq!(tree.find(33, 5), Some(Range::new(30, 9)));
    /// assert_eq!(tree.find(15, 10), Some(Range::new(10, 9)));
    /// assert_eq!(tree.find(40, 5), None);
    /// ```
    #[inline]
    fn find(&self, position: i32, length: u32) -> Option<Range> {
        let start = i64::from(position);
        let stop = start + i64::from(cmp::max(length, 1));
        self.locate(start, stop).copied()
    }

    /// Insert [start, start + length), rebalancing on the way back to the root. Fails without
    /// touching the tree if the range is empty or leaves the domain. On overlap the error names
    /// the lowest stored range in the way.
    /// ```
    /// use rangetree::{Error, Range, RangeStore, RangeTree};
    /// let mut tree = RangeTree::new(0, 8000).unwrap();
    /// assert_eq!(tree.try_insert(100, 300), Ok(()));
    /// assert_eq!(
    ///     tree.try_insert(390, 30),
    ///     Err(Error::Overlap { start: 390, length: 30, existing: Range::new(100, 300) })
    /// );
    /// assert_eq!(tree.try_insert(7800, 300), Err(Error::OutOfBounds { start: 7800, length: 300 }));
    /// assert_eq!(tree.len(), 1);
    /// ```
    fn try_insert(&mut self, start: i32, length: u32) -> Result<(), Error> {
        let result = admit(self.begin, self.end, start, length).and_then(|(lo, hi)| {
            match self.locate(lo, hi) {
                Some(existing) => Err(Error::Overlap {
                    start,
                    length,
                    existing: *existing,
                }),
                None => Ok(()),
            }
        });
        if let Err(e) = result {
            trace!("rejected insert: {}", e);
            return Err(e);
        }

        let range = Range::new(start, length);
        self.root = Some(insert_node(self.root.take(), range));
        self.len += 1;
        debug!("inserted {}, {} ranges stored", range, self.len);
        Ok(())
    }

    /// Remove the range containing `position` and return it.
    /// ```
    /// use rangetree::{Error, Range, RangeStore, RangeTree};
    /// let mut tree = RangeTree::new(0, 8000).unwrap();
    /// tree.insert(100, 4);
    /// assert_eq!(tree.remove(8001), Err(Error::InvalidPosition(8001)));
    /// assert_eq!(tree.remove(50), Err(Error::NotFound(50)));
    /// assert_eq!(tree.remove(102), Ok(Range::new(100, 4)));
    /// assert!(tree.is_empty());
    /// ```
    fn remove(&mut self, position: i32) -> Result<Range, Error> {
        if position < self.begin || position >= self.end {
            trace!("rejected remove: position {} outside domain", position);
            return Err(Error::InvalidPosition(position));
        }
        // A miss relinks the searched path unchanged
        let mut removed = None;
        self.root = remove_node(self.root.take(), position, &mut removed);
        match removed {
            Some(range) => {
                self.len -= 1;
                debug!("removed {}, {} ranges stored", range, self.len);
                Ok(range)
            }
            None => {
                trace!("rejected remove: nothing at {}", position);
                Err(Error::NotFound(position))
            }
        }
    }
}

/// In order iterator over a RangeTree
#[derive(Debug)]
pub struct IterRangeTree<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> IterRangeTree<'a> {
    fn new(root: &'a Link) -> Self {
        let mut iter = IterRangeTree { stack: Vec::new() };
        iter.push_left(root);
        iter
    }

    fn push_left(&mut self, mut link: &'a Link) {
        while let Some(node) = link {
            self.stack.push(&**node);
            link = &node.left;
        }
    }
}

impl<'a> Iterator for IterRangeTree<'a> {
    type Item = &'a Range;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(&node.right);
        Some(&node.range)
    }
}

impl<'a> IntoIterator for &'a RangeTree {
    type Item = &'a Range;
    type IntoIter = IterRangeTree<'a>;

    fn into_iter(self) -> IterRangeTree<'a> {
        self.iter()
    }
}
