use std::slice;

use smallvec::SmallVec;

use super::node::{OctreeNode, Slot};

/// Breadth-first walk over the nodes of a tree, yielding `(depth, node)`.
pub struct Nodes<'t, 'a, B> {
    current: Vec<&'t OctreeNode<'a, B>>,
    next: Vec<&'t OctreeNode<'a, B>>,
    current_index: usize,
    current_depth: usize,
}

impl<'t, 'a, B> Nodes<'t, 'a, B> {
    pub(crate) fn new(root: &'t OctreeNode<'a, B>) -> Self {
        Self {
            current: vec![root],
            next: Vec::new(),
            current_index: 0,
            current_depth: 0,
        }
    }
}

impl<'t, 'a, B> Iterator for Nodes<'t, 'a, B> {
    type Item = (usize, &'t OctreeNode<'a, B>);

    fn next(&mut self) -> Option<Self::Item> {
        while self.current_index >= self.current.len() {
            if self.next.is_empty() {
                return None;
            }
            self.current = std::mem::take(&mut self.next);
            self.current_index = 0;
            self.current_depth += 1;
        }

        let node = self.current[self.current_index];
        self.next.extend(node.children.iter().filter_map(|c| match c {
            Slot::Node(child) => Some(child.as_ref()),
            _ => None,
        }));
        self.current_index += 1;
        Some((self.current_depth, node))
    }
}

/// Depth-first walk over every body stored below a node.
pub struct Bodies<'t, 'a, B> {
    // one slot iterator per open level; trees rarely get deeper than this
    stack: SmallVec<[slice::Iter<'t, Slot<'a, B>>; 32]>,
}

impl<'t, 'a, B> Bodies<'t, 'a, B> {
    pub(crate) fn new(root: &'t OctreeNode<'a, B>) -> Self {
        let mut stack = SmallVec::new();
        stack.push(root.children.iter());
        Self { stack }
    }
}

impl<'t, 'a, B> Iterator for Bodies<'t, 'a, B> {
    type Item = &'a B;

    fn next(&mut self) -> Option<&'a B> {
        while let Some(level) = self.stack.last_mut() {
            match level.next() {
                Some(Slot::Body(body)) => return Some(*body),
                Some(Slot::Node(child)) => self.stack.push(child.children.iter()),
                Some(Slot::Empty) => {}
                None => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}
