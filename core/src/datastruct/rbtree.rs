use std::collections::VecDeque;
use std::fmt;

use super::render;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Colour {
    Black,
    Red,
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Colour::*;
        match self {
            Black => write!(f, "black"),
            Red => write!(f, "red"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Handle to a node stored in an [`RBTree`].
///
/// Handles are only valid until the next mutation of the tree that produced
/// them: a deleted node's slot is recycled by later insertions.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId(usize);

#[derive(Clone)]
struct NodeData<T> {
    colour: Colour,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    data: T,
}

impl<T> NodeData<T> {
    fn new(data: T) -> NodeData<T> {
        NodeData {
            colour: Colour::Red,
            parent: None,
            left: None,
            right: None,
            data,
        }
    }
}

/// Red-black tree over an index arena.
///
/// Equal values are kept: on insertion `value < node` descends left and
/// everything else descends right, so duplicates end up in the right subtree.
#[derive(Clone)]
pub struct RBTree<T> {
    nodes: Vec<Option<NodeData<T>>>,
    free: Vec<usize>,
    root: Option<NodeId>,
    len: usize,
}

impl<T> Default for RBTree<T> {
    fn default() -> Self {
        RBTree {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }
}

impl<T> RBTree<T>
where
    T: fmt::Debug + Ord,
{
    pub fn new() -> RBTree<T> {
        RBTree::default()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Drops every node at once; the arena keeps its capacity.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    /// Replaces the content of the tree with `data`, inserted back to front.
    pub fn build_tree(&mut self, data: &[T])
    where
        T: Clone,
    {
        debug!("build red-black tree from {} values", data.len());
        self.clear();
        for value in data.iter().rev() {
            self.insert(value.clone());
        }
    }

    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .map(|n| &n.data)
    }

    pub fn colour(&self, id: NodeId) -> Option<Colour> {
        self.nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .map(|n| n.colour)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    fn node(&self, id: NodeId) -> &NodeData<T> {
        self.nodes[id.0].as_ref().expect("live node")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut NodeData<T> {
        self.nodes[id.0].as_mut().expect("live node")
    }

    fn alloc(&mut self, data: T) -> NodeId {
        let node = Some(NodeData::new(data));
        self.len += 1;
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                NodeId(idx)
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) -> T {
        let node = self.nodes[id.0].take().expect("release live node");
        self.free.push(id.0);
        self.len -= 1;
        node.data
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).left
    }

    fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).right
    }

    fn set_parent(&mut self, id: NodeId, parent: Option<NodeId>) {
        self.node_mut(id).parent = parent;
    }

    fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left(id),
            Side::Right => self.right(id),
        }
    }

    fn set_child(&mut self, id: NodeId, side: Side, child: Option<NodeId>) {
        let node = self.node_mut(id);
        match side {
            Side::Left => node.left = child,
            Side::Right => node.right = child,
        }
    }

    /// Absent nodes are black.
    fn colour_of(&self, id: Option<NodeId>) -> Colour {
        id.map(|n| self.node(n).colour).unwrap_or(Colour::Black)
    }

    fn is_red(&self, id: NodeId) -> bool {
        self.node(id).colour == Colour::Red
    }

    fn set_colour(&mut self, id: NodeId, colour: Colour) {
        self.node_mut(id).colour = colour;
    }

    /// Moves `v` into the slot `u` occupies under its parent (or the root slot).
    fn transplant(&mut self, u: NodeId, v: Option<NodeId>) {
        let parent = self.parent(u);
        match parent {
            None => self.root = v,
            Some(p) if self.left(p) == Some(u) => self.set_child(p, Side::Left, v),
            Some(p) => self.set_child(p, Side::Right, v),
        }
        if let Some(v) = v {
            self.set_parent(v, parent);
        }
    }

    /// Rotates around `pivot` so that it moves down on `side`.
    fn rotate(&mut self, pivot: NodeId, side: Side) {
        let up = side.opposite();
        let new_parent = self.child(pivot, up).expect("rotation needs a child to lift");
        let inner = self.child(new_parent, side);
        self.set_child(pivot, up, inner);
        if let Some(inner) = inner {
            self.set_parent(inner, Some(pivot));
        }
        self.transplant(pivot, Some(new_parent));
        self.set_child(new_parent, side, Some(pivot));
        self.set_parent(pivot, Some(new_parent));
    }

    fn rotate_left(&mut self, pivot: NodeId) {
        trace!("rotate left: {:?}", self.node(pivot).data);
        self.rotate(pivot, Side::Left);
    }

    fn rotate_right(&mut self, pivot: NodeId) {
        trace!("rotate right: {:?}", self.node(pivot).data);
        self.rotate(pivot, Side::Right);
    }

    fn rotate_towards(&mut self, pivot: NodeId, side: Side) {
        match side {
            Side::Left => self.rotate_left(pivot),
            Side::Right => self.rotate_right(pivot),
        }
    }

    fn side_of(&self, child: NodeId, parent: NodeId) -> Side {
        if self.left(parent) == Some(child) {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn insert(&mut self, data: T) -> NodeId {
        trace!("insert {:?}", data);
        let mut parent = None;
        let mut side = Side::Left;
        let mut cursor = self.root;
        while let Some(n) = cursor {
            parent = Some(n);
            side = if data < self.node(n).data {
                Side::Left
            } else {
                Side::Right
            };
            cursor = self.child(n, side);
        }

        let node = self.alloc(data);
        self.set_parent(node, parent);
        match parent {
            Some(p) => self.set_child(p, side, Some(node)),
            None => self.root = Some(node),
        }
        self.fix_insert(node);
        node
    }

    fn fix_insert(&mut self, mut node: NodeId) {
        while Some(node) != self.root {
            let parent = match self.parent(node) {
                Some(p) if self.is_red(p) => p,
                _ => break,
            };
            let grandparent = self.parent(parent).expect("red node below the root");
            let side = self.side_of(parent, grandparent);

            match self.child(grandparent, side.opposite()) {
                Some(uncle) if self.is_red(uncle) => {
                    trace!("balance red uncle: {:?}", self.node(node).data);
                    self.set_colour(parent, Colour::Black);
                    self.set_colour(uncle, Colour::Black);
                    self.set_colour(grandparent, Colour::Red);
                    node = grandparent;
                }
                _ => {
                    trace!("balance black uncle: {:?}", self.node(node).data);
                    if self.child(parent, side.opposite()) == Some(node) {
                        node = parent;
                        self.rotate_towards(node, side);
                    }
                    let parent = self.parent(node).expect("rotated node keeps a parent");
                    self.set_colour(parent, Colour::Black);
                    self.set_colour(grandparent, Colour::Red);
                    self.rotate_towards(grandparent, side.opposite());
                }
            }
        }

        if let Some(root) = self.root {
            self.set_colour(root, Colour::Black);
        }
    }

    pub fn search(&self, data: &T) -> Option<NodeId> {
        trace!("search {:?}", data);
        let mut cursor = self.root;
        while let Some(n) = cursor {
            let value = &self.node(n).data;
            if data == value {
                return Some(n);
            }
            cursor = if data < value { self.left(n) } else { self.right(n) };
        }
        None
    }

    pub fn contains(&self, data: &T) -> bool {
        self.search(data).is_some()
    }

    fn leftmost(&self, mut node: NodeId) -> NodeId {
        while let Some(left) = self.left(node) {
            node = left;
        }
        node
    }

    /// Removes one node holding `data`. Returns `false` when there is none.
    pub fn delete_node(&mut self, data: &T) -> bool {
        let node = match self.search(data) {
            Some(n) => n,
            None => return false,
        };
        trace!("delete {:?}", data);

        let mut removed_colour = self.node(node).colour;
        let x;
        let x_parent;
        match (self.left(node), self.right(node)) {
            (None, right) => {
                x = right;
                x_parent = self.parent(node);
                self.transplant(node, right);
            }
            (left, None) => {
                x = left;
                x_parent = self.parent(node);
                self.transplant(node, left);
            }
            (Some(left), Some(right)) => {
                let successor = self.leftmost(right);
                removed_colour = self.node(successor).colour;
                x = self.right(successor);
                if self.parent(successor) == Some(node) {
                    x_parent = Some(successor);
                } else {
                    x_parent = self.parent(successor);
                    self.transplant(successor, x);
                    self.set_child(successor, Side::Right, Some(right));
                    self.set_parent(right, Some(successor));
                }
                self.transplant(node, Some(successor));
                self.set_child(successor, Side::Left, Some(left));
                self.set_parent(left, Some(successor));
                let colour = self.node(node).colour;
                self.set_colour(successor, colour);
            }
        }

        self.release(node);
        if removed_colour == Colour::Black {
            self.fix_delete(x, x_parent);
        }
        true
    }

    /// `x` carries an extra black. It may be absent, in which case `parent`
    /// locates the empty slot.
    fn fix_delete(&mut self, mut x: Option<NodeId>, mut parent: Option<NodeId>) {
        while x != self.root && self.colour_of(x) == Colour::Black {
            let p = match parent {
                Some(p) => p,
                None => break,
            };
            let side = if self.left(p) == x {
                Side::Left
            } else {
                Side::Right
            };
            let far_side = side.opposite();

            let mut sibling = self
                .child(p, far_side)
                .expect("a doubly black slot always has a sibling");
            if self.is_red(sibling) {
                trace!("fixup red sibling: {:?}", self.node(sibling).data);
                self.set_colour(sibling, Colour::Black);
                self.set_colour(p, Colour::Red);
                self.rotate_towards(p, side);
                sibling = self.child(p, far_side).expect("sibling after rotation");
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, far_side);
            if self.colour_of(near) == Colour::Black && self.colour_of(far) == Colour::Black {
                self.set_colour(sibling, Colour::Red);
                x = Some(p);
                parent = self.parent(p);
            } else {
                if self.colour_of(far) == Colour::Black {
                    if let Some(near) = near {
                        self.set_colour(near, Colour::Black);
                    }
                    self.set_colour(sibling, Colour::Red);
                    self.rotate_towards(sibling, far_side);
                    sibling = self.child(p, far_side).expect("sibling after rotation");
                }
                let colour = self.node(p).colour;
                self.set_colour(sibling, colour);
                self.set_colour(p, Colour::Black);
                if let Some(far) = self.child(sibling, far_side) {
                    self.set_colour(far, Colour::Black);
                }
                self.rotate_towards(p, side);
                x = self.root;
                parent = None;
            }
        }

        if let Some(x) = x {
            self.set_colour(x, Colour::Black);
        }
    }

    pub fn iter(&self) -> Iter<T> {
        let mut iter = Iter {
            tree: self,
            stack: Vec::new(),
        };
        iter.descend(self.root);
        iter
    }

    pub fn in_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    pub fn pre_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut res = Vec::with_capacity(self.len);
        let mut stack: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(n) = stack.pop() {
            res.push(self.node(n).data.clone());
            stack.extend(self.right(n));
            stack.extend(self.left(n));
        }
        res
    }

    pub fn post_order(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut pending: Vec<NodeId> = self.root.into_iter().collect();
        let mut visited = Vec::with_capacity(self.len);
        while let Some(n) = pending.pop() {
            visited.push(n);
            pending.extend(self.left(n));
            pending.extend(self.right(n));
        }
        visited
            .iter()
            .rev()
            .map(|n| self.node(*n).data.clone())
            .collect()
    }

    pub fn breadth_first(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut res = Vec::with_capacity(self.len);
        let mut queue: VecDeque<NodeId> = self.root.into_iter().collect();
        while let Some(n) = queue.pop_front() {
            res.push(self.node(n).data.clone());
            queue.extend(self.left(n));
            queue.extend(self.right(n));
        }
        res
    }

    fn children(&self, id: NodeId) -> (Option<NodeId>, Option<NodeId>) {
        let node = self.node(id);
        (node.left, node.right)
    }

    /// Number of nodes on each level, root first.
    pub fn level_widths(&self) -> Vec<usize> {
        render::level_widths(self.root, |n| self.children(n))
    }

    pub fn height(&self) -> usize {
        self.level_widths().len()
    }

    /// Sideways rendering, right subtree on top. Red nodes are marked with `*`.
    pub fn render(&self) -> String
    where
        T: fmt::Display,
    {
        render::sideways(
            self.root,
            |n| self.children(n),
            |n| {
                let node = self.node(n);
                match node.colour {
                    Colour::Red => format!("{}*", node.data),
                    Colour::Black => node.data.to_string(),
                }
            },
        )
    }

    pub fn dump_as_dot(&self) -> String {
        let mut lines = Vec::new();
        lines.push(String::from("graph Tree {"));

        let mut definitions = Vec::new();
        let mut links = Vec::new();
        let mut pending: Vec<NodeId> = self.root.into_iter().collect();
        while let Some(n) = pending.pop() {
            let node = self.node(n);
            definitions.push(format!(
                "    Node{} [label=\"{:?}\", color={}]",
                n.0, node.data, node.colour
            ));
            for (child, tag) in &[(node.left, "NullL"), (node.right, "NullR")] {
                match child {
                    Some(c) => {
                        links.push(format!("    Node{} -- Node{}", n.0, c.0));
                        pending.push(*c);
                    }
                    None => {
                        definitions.push(format!("    {}{} [shape=point]", tag, n.0));
                        links.push(format!("    Node{0} -- {1}{0}", n.0, tag));
                    }
                }
            }
        }

        lines.append(&mut definitions);
        lines.push(String::new());
        lines.append(&mut links);

        lines.push(String::from("}"));
        lines.push(String::new());
        lines.join("\n")
    }
}

impl<T> From<Vec<T>> for RBTree<T>
where
    T: fmt::Debug + Ord,
{
    /// Inserts the values back to front, the last one first.
    fn from(data: Vec<T>) -> RBTree<T> {
        let mut tree = RBTree::new();
        for value in data.into_iter().rev() {
            tree.insert(value);
        }
        tree
    }
}

/// In-order iterator driven by an explicit stack of pending ancestors.
pub struct Iter<'a, T> {
    tree: &'a RBTree<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> Iter<'a, T>
where
    T: fmt::Debug + Ord,
{
    fn descend(&mut self, mut cursor: Option<NodeId>) {
        while let Some(n) = cursor {
            self.stack.push(n);
            cursor = self.tree.left(n);
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T>
where
    T: fmt::Debug + Ord,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let n = self.stack.pop()?;
        self.descend(self.tree.right(n));
        let tree: &'a RBTree<T> = self.tree;
        Some(&tree.node(n).data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    #[derive(Debug)]
    enum InvalidReason<T> {
        RootIsRed,
        RedHasRedChild(T),
        InvalidDepth(T, usize, usize),
        BrokenParentLink(T),
        WrongLength(usize, usize),
    }

    fn black_height<T>(tree: &RBTree<T>, node: Option<NodeId>) -> Result<usize, InvalidReason<T>>
    where
        T: Clone + fmt::Debug + Ord,
    {
        let n = match node {
            Some(n) => n,
            None => return Ok(1),
        };
        let data = tree.node(n).data.clone();
        if tree.is_red(n)
            && (tree.colour_of(tree.left(n)) == Colour::Red
                || tree.colour_of(tree.right(n)) == Colour::Red)
        {
            return Err(InvalidReason::RedHasRedChild(data));
        }
        for child in tree.left(n).iter().chain(tree.right(n).iter()) {
            if tree.parent(*child) != Some(n) {
                return Err(InvalidReason::BrokenParentLink(tree.node(*child).data.clone()));
            }
        }
        let left = black_height(tree, tree.left(n))?;
        let right = black_height(tree, tree.right(n))?;
        if left != right {
            return Err(InvalidReason::InvalidDepth(data, left, right));
        }
        Ok(left + if tree.is_red(n) { 0 } else { 1 })
    }

    fn validate_tree<T>(tree: &RBTree<T>) -> Result<(), InvalidReason<T>>
    where
        T: Clone + fmt::Debug + Ord,
    {
        if tree.colour_of(tree.root) == Colour::Red {
            return Err(InvalidReason::RootIsRed);
        }
        if let Some(root) = tree.root {
            if tree.parent(root).is_some() {
                return Err(InvalidReason::BrokenParentLink(tree.node(root).data.clone()));
            }
        }
        black_height(tree, tree.root)?;
        let count = tree.iter().count();
        if count != tree.len() {
            return Err(InvalidReason::WrongLength(count, tree.len()));
        }
        Ok(())
    }

    macro_rules! assert_node {
        ($tree:expr, $node:expr, $data:expr) => {
            assert_eq!($tree.value($node.unwrap()), Some(&$data));
        };
        ($tree:expr, $node:expr, $data:expr, $colour:expr) => {
            assert_eq!($tree.value($node.unwrap()), Some(&$data));
            assert_eq!($tree.colour($node.unwrap()), Some($colour));
        };
    }

    fn tree_of(values: &[i64]) -> RBTree<i64> {
        let mut tree = RBTree::new();
        for v in values {
            tree.insert(*v);
        }
        tree
    }

    #[test]
    fn rotate_left_root() {
        let tree = tree_of(&[2, 11, 15]);

        let root = tree.root();
        assert_node!(tree, root, 11, Colour::Black);
        assert_node!(tree, tree.left(root.unwrap()), 2, Colour::Red);
        assert_node!(tree, tree.right(root.unwrap()), 15, Colour::Red);
    }

    #[test]
    fn rotate_left_parent() {
        let tree = tree_of(&[3, 6, 2, 11, 15]);

        let root = tree.root();
        assert_node!(tree, root, 3, Colour::Black);
        assert_node!(tree, tree.left(root.unwrap()), 2, Colour::Black);
        assert_node!(tree, tree.right(root.unwrap()), 11, Colour::Black);
        validate_tree(&tree).expect("validate tree");
    }

    #[test]
    fn rotate_right_root() {
        let tree = tree_of(&[11, 6, 2]);

        let root = tree.root();
        assert_node!(tree, root, 6, Colour::Black);
        assert_node!(tree, tree.left(root.unwrap()), 2, Colour::Red);
        assert_node!(tree, tree.right(root.unwrap()), 11, Colour::Red);
    }

    #[test]
    fn rotate_right_parent() {
        let tree = tree_of(&[11, 6, 15, 3, 2]);

        let root = tree.root();
        assert_node!(tree, root, 11, Colour::Black);
        assert_node!(tree, tree.left(root.unwrap()), 3, Colour::Black);
        assert_node!(tree, tree.right(root.unwrap()), 15, Colour::Black);
        validate_tree(&tree).expect("validate tree");
    }

    #[test]
    fn zig_zag_insert() {
        let tree = tree_of(&[10, 5, 7]);

        let root = tree.root();
        assert_node!(tree, root, 7, Colour::Black);
        assert_node!(tree, tree.left(root.unwrap()), 5, Colour::Red);
        assert_node!(tree, tree.right(root.unwrap()), 10, Colour::Red);
    }

    #[test]
    fn insert() {
        let tree = tree_of(&[2, 11, 6, 10, 26, 7, 18, 8, 13, 22]);

        validate_tree(&tree).expect("validate tree");
        assert_eq!(tree.in_order(), vec![2, 6, 7, 8, 10, 11, 13, 18, 22, 26]);
        assert_eq!(tree.len(), 10);
    }

    #[test]
    fn duplicates_go_right() {
        let mut tree = tree_of(&[5, 5, 5, 3]);

        validate_tree(&tree).expect("validate tree");
        assert_eq!(tree.in_order(), vec![3, 5, 5, 5]);
        assert!(tree.delete_node(&5));
        assert_eq!(tree.in_order(), vec![3, 5, 5]);
        validate_tree(&tree).expect("validate tree");
    }

    #[test]
    fn build_tree_inserts_in_reverse() {
        let mut tree = tree_of(&[100, 200]);
        tree.build_tree(&[5, 9, 1, 8]);

        let root = tree.root();
        assert_node!(tree, root, 8, Colour::Black);
        assert_eq!(tree.in_order(), vec![1, 5, 8, 9]);
        assert_eq!(tree.pre_order(), vec![8, 1, 5, 9]);
        assert_eq!(tree.post_order(), vec![5, 1, 9, 8]);
        assert_eq!(tree.breadth_first(), vec![8, 1, 9, 5]);
        assert_eq!(tree.level_widths(), vec![1, 2, 1]);
        assert_eq!(tree.height(), 3);

        let from_vec = RBTree::from(vec![5, 9, 1, 8]);
        assert_eq!(from_vec.pre_order(), tree.pre_order());
    }

    #[test]
    fn traversals_of_empty_tree() {
        let tree: RBTree<i64> = RBTree::new();
        assert!(tree.is_empty());
        assert!(tree.in_order().is_empty());
        assert!(tree.pre_order().is_empty());
        assert!(tree.post_order().is_empty());
        assert!(tree.breadth_first().is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.render(), "");
    }

    #[test]
    fn delete_pseudoleaves() {
        let mut tree = tree_of(&[50, 20, 60, 30, 40, 70, 80]);

        assert!(tree.delete_node(&20));
        assert_eq!(tree.in_order(), vec![30, 40, 50, 60, 70, 80]);
        validate_tree(&tree).expect("validate tree");

        assert!(tree.delete_node(&30));
        assert_eq!(tree.in_order(), vec![40, 50, 60, 70, 80]);
        validate_tree(&tree).expect("validate tree");

        assert!(tree.delete_node(&80));
        assert_eq!(tree.in_order(), vec![40, 50, 60, 70]);
        validate_tree(&tree).expect("validate tree");

        assert!(tree.delete_node(&70));
        validate_tree(&tree).expect("validate tree");
        assert_eq!(tree.in_order(), vec![40, 50, 60]);
    }

    #[test]
    fn delete_black_leaf() {
        let mut tree = tree_of(&[10, 5, 15, 8, 20]);
        tree.delete_node(&8);
        tree.delete_node(&20);
        // black leaf, leaves a doubly black empty slot
        assert!(tree.delete_node(&5));

        validate_tree(&tree).expect("validate tree");
        assert_eq!(tree.in_order(), vec![10, 15]);
    }

    #[test]
    fn delete() {
        let mut keep = Vec::new();
        let mut remove = Vec::new();
        for i in (1..30).step_by(3) {
            keep.push(i);
            remove.push(i + 2);
        }

        let mut tree = RBTree::new();
        for i in remove.iter().rev() {
            tree.insert(*i);
        }
        for i in &keep {
            tree.insert(*i);
        }
        for i in remove {
            assert!(tree.delete_node(&i));
            validate_tree(&tree).expect("validate tree");
        }

        assert_eq!(tree.in_order(), keep);
    }

    #[test]
    fn delete_missing() {
        let mut tree = tree_of(&[4, 2, 6]);
        let before = tree.pre_order();

        assert!(!tree.delete_node(&5));
        assert_eq!(tree.pre_order(), before);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn delete_everything() {
        let mut tree = tree_of(&[9, 3, 7, 1, 5]);
        for v in &[7, 1, 9, 5, 3] {
            assert!(tree.delete_node(v));
        }
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(!tree.delete_node(&7));
    }

    #[test]
    fn slots_are_recycled() {
        let mut tree = tree_of(&[1, 2, 3]);
        tree.delete_node(&2);
        tree.insert(4);
        assert_eq!(tree.nodes.len(), 3);
        assert_eq!(tree.in_order(), vec![1, 3, 4]);
    }

    #[test]
    fn find() {
        let mut tree = tree_of(&[2, 13, 22]);

        let found = tree.search(&13);
        assert_node!(tree, found, 13);
        assert_eq!(tree.search(&99), None);
        assert!(tree.contains(&22));

        tree.delete_node(&13);
        assert!(!tree.contains(&13));
    }

    #[test]
    fn clone() {
        let mut tree = tree_of(&[50, 20, 60, 30, 40, 70, 80]);
        let tree_bis = tree.clone();

        assert_eq!(tree.in_order(), tree_bis.in_order());

        tree.delete_node(&60);
        assert_eq!(tree.iter().count(), tree_bis.iter().count() - 1);
    }

    #[test]
    fn render_marks_red_nodes() {
        let tree = tree_of(&[2, 11, 15]);
        assert_eq!(tree.render(), "   .-->15*\n-->11\n   `-->2*\n");
    }

    #[test]
    fn dump_as_dot() {
        let tree = tree_of(&[2, 1]);
        let dot = tree.dump_as_dot();
        assert!(dot.starts_with("graph Tree {"));
        assert!(dot.contains("[label=\"2\", color=black]"));
        assert!(dot.contains("[label=\"1\", color=red]"));
    }

    #[test]
    fn random_insert_and_delete() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..20 {
            let size = rng.gen_range(1, 200);
            let mut values: Vec<i64> = (0..size).map(|_| rng.gen_range(-50, 50)).collect();

            let mut tree = RBTree::new();
            for v in &values {
                tree.insert(*v);
                validate_tree(&tree).expect("validate tree after insert");
            }
            let mut sorted = values.clone();
            sorted.sort();
            assert_eq!(tree.in_order(), sorted);

            values.shuffle(&mut rng);
            let (gone, kept) = values.split_at(values.len() / 2);
            for v in gone {
                assert!(tree.delete_node(v));
                validate_tree(&tree).expect("validate tree after delete");
            }
            let mut sorted = kept.to_vec();
            sorted.sort();
            assert_eq!(tree.in_order(), sorted);
            for v in gone {
                assert_eq!(tree.contains(v), kept.contains(v));
            }

            for v in kept {
                assert!(tree.delete_node(v));
            }
            assert!(tree.is_empty());
            validate_tree(&tree).expect("validate empty tree");
        }
    }
}
