mod binary_tree;
pub mod bracket;
mod rbtree;
pub mod render;

pub use binary_tree::BinaryTree;
pub use bracket::{validate, BracketError};
pub use rbtree::{Colour, Iter, NodeId, RBTree};
