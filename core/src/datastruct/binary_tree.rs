use super::bracket::{self, BracketError, Lexer, Token};
use super::render;

struct Node {
    value: i64,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn new(value: i64) -> Node {
        Node {
            value,
            left: None,
            right: None,
        }
    }

    fn children(&self) -> (Option<&Node>, Option<&Node>) {
        (self.left.as_ref().map(|n| &**n), self.right.as_ref().map(|n| &**n))
    }
}

/// A binary tree with exactly the shape written in bracket notation.
#[derive(Default)]
pub struct BinaryTree {
    root: Option<Box<Node>>,
}

impl BinaryTree {
    pub fn new() -> BinaryTree {
        BinaryTree::default()
    }

    /// Validates `text` and builds the tree it describes.
    pub fn parse(text: &str) -> Result<BinaryTree, BracketError> {
        bracket::validate(text)?;
        let mut tree = BinaryTree::new();
        tree.build(text);
        Ok(tree)
    }

    /// Replaces the tree with the one `text` describes. Invalid text leaves
    /// the current tree untouched.
    pub fn load(&mut self, text: &str) -> Result<(), BracketError> {
        bracket::validate(text)?;
        self.build(text);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Discards the current tree and builds a new one from `text`.
    ///
    /// The text is expected to have passed [`bracket::validate`]; tokens the
    /// validator would reject are skipped. When several top level nodes are
    /// written one after the other the last one becomes the root.
    pub fn build(&mut self, text: &str) {
        self.clear();
        let mut path: Vec<Box<Node>> = Vec::new();
        for lexeme in Lexer::new(text).filter_map(Result::ok) {
            match lexeme.token {
                Token::Open => {}
                Token::Value(value) => path.push(Box::new(Node::new(value))),
                Token::Close => {
                    if let Some(node) = path.pop() {
                        self.attach(&mut path, node);
                    }
                }
            }
        }
        while let Some(node) = path.pop() {
            self.attach(&mut path, node);
        }
        debug!("binary tree built with {} levels", self.height());
    }

    /// Hands a finished node to the open node below it on the path, or
    /// makes it the root.
    fn attach(&mut self, path: &mut [Box<Node>], node: Box<Node>) {
        match path.last_mut() {
            Some(parent) => {
                if parent.left.is_none() {
                    parent.left = Some(node);
                } else if parent.right.is_none() {
                    parent.right = Some(node);
                }
            }
            None => self.root = Some(node),
        }
    }

    /// Frees the nodes without recursing, so degenerate trees of any depth
    /// can be dropped.
    pub fn clear(&mut self) {
        let mut pending: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }

    pub fn post_order(&self) -> Vec<i64> {
        let mut pending: Vec<&Node> = self.root.as_ref().map(|n| &**n).into_iter().collect();
        let mut values = Vec::new();
        while let Some(node) = pending.pop() {
            values.push(node.value);
            let (left, right) = node.children();
            pending.extend(left);
            pending.extend(right);
        }
        values.reverse();
        values
    }

    pub fn level_widths(&self) -> Vec<usize> {
        render::level_widths(self.root.as_ref().map(|n| &**n), Node::children)
    }

    pub fn height(&self) -> usize {
        self.level_widths().len()
    }

    pub fn render(&self) -> String {
        render::sideways(self.root.as_ref().map(|n| &**n), Node::children, |n| {
            n.value.to_string()
        })
    }

    /// Writes the tree back in bracket notation, one space before each child.
    pub fn to_bracket_string(&self) -> String {
        enum Step<'a> {
            Open(&'a Node),
            Close,
        }

        let mut out = String::new();
        let mut steps: Vec<Step> = self
            .root
            .as_ref()
            .map(|n| Step::Open(&**n))
            .into_iter()
            .collect();
        while let Some(step) = steps.pop() {
            match step {
                Step::Open(node) => {
                    if !out.is_empty() {
                        out.push(' ');
                    }
                    out.push('(');
                    out.push_str(&node.value.to_string());
                    steps.push(Step::Close);
                    let (left, right) = node.children();
                    steps.extend(right.map(Step::Open));
                    steps.extend(left.map(Step::Open));
                }
                Step::Close => out.push(')'),
            }
        }
        out
    }
}

impl Drop for BinaryTree {
    fn drop(&mut self) {
        self.clear();
    }
}

impl Clone for BinaryTree {
    fn clone(&self) -> Self {
        let mut tree = BinaryTree::new();
        tree.build(&self.to_bracket_string());
        tree
    }
}

impl std::fmt::Debug for BinaryTree {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "BinaryTree {}", self.to_bracket_string())
    }
}

impl std::str::FromStr for BinaryTree {
    type Err = BracketError;

    fn from_str(s: &str) -> Result<BinaryTree, BracketError> {
        BinaryTree::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "(8 (9 (5)) (1))";
    const LARGE: &str = "(9 (6 (3 (1 (2)) (4 (5))) (8 (7))) (17 (16 (12 (11 (10)) (14 (13) (15)))) (20 (19 (18)) (21))))";

    #[test]
    fn post_order_of_small_tree() {
        let tree = BinaryTree::parse(SMALL).unwrap();
        assert_eq!(tree.post_order(), vec![5, 9, 1, 8]);
        assert_eq!(tree.level_widths(), vec![1, 2, 1]);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn post_order_of_large_tree() {
        let tree = BinaryTree::parse(LARGE).unwrap();
        assert_eq!(
            tree.post_order(),
            vec![2, 1, 5, 4, 3, 7, 8, 6, 10, 11, 13, 15, 14, 12, 16, 18, 19, 21, 20, 17, 9]
        );
    }

    #[test]
    fn round_trip() {
        for text in &[SMALL, LARGE, "(-1 (2 (-3) (4)))", "(0)"] {
            let tree = BinaryTree::parse(text).unwrap();
            assert_eq!(tree.to_bracket_string(), *text);
        }
    }

    #[test]
    fn single_child_is_left() {
        let tree = BinaryTree::parse("(1 (2))").unwrap();
        assert_eq!(tree.render(), "-->1\n   `-->2\n");
    }

    #[test]
    fn render() {
        let tree = BinaryTree::parse(SMALL).unwrap();
        assert_eq!(tree.render(), "   .-->1\n-->8\n   `-->9\n       `-->5\n");
    }

    #[test]
    fn build_replaces_previous_tree() {
        let mut tree = BinaryTree::parse(LARGE).unwrap();
        tree.build("(3 (4))");
        assert_eq!(tree.post_order(), vec![4, 3]);
        tree.build("");
        assert!(tree.is_empty());
        assert!(tree.post_order().is_empty());
    }

    #[test]
    fn last_top_level_node_wins() {
        let tree = BinaryTree::parse("(5) (6 (7))").unwrap();
        assert_eq!(tree.post_order(), vec![7, 6]);
    }

    #[test]
    fn invalid_text_keeps_tree() {
        let mut tree = BinaryTree::parse(SMALL).unwrap();
        assert_eq!(
            tree.load("((5))"),
            Err(BracketError::ConsecutiveOpen { pos: 1 })
        );
        assert_eq!(tree.post_order(), vec![5, 9, 1, 8]);

        tree.load("(2 (1) (3))").unwrap();
        assert_eq!(tree.post_order(), vec![1, 3, 2]);
    }

    #[test]
    fn deep_tree() {
        let depth = 100_000;
        let mut text = String::new();
        for i in 0..depth {
            text.push_str(&format!("({} ", i));
        }
        text.push_str(&")".repeat(depth));

        let tree: BinaryTree = text.parse().unwrap();
        assert_eq!(tree.height(), depth);
        assert_eq!(tree.post_order().first(), Some(&(depth as i64 - 1)));
    }
}
