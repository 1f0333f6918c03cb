//! Text layout shared by the binary and the red-black tree.
//!
//! Both helpers take the root and a `children` accessor instead of a tree
//! type, and walk the nodes with explicit stacks so deep trees are fine.

use std::collections::VecDeque;

/// Counts the nodes on each level, root level first.
pub fn level_widths<N, C>(root: Option<N>, children: C) -> Vec<usize>
where
    N: Copy,
    C: Fn(N) -> (Option<N>, Option<N>),
{
    let mut widths = Vec::new();
    let mut queue: VecDeque<N> = root.into_iter().collect();
    while !queue.is_empty() {
        let width = queue.len();
        widths.push(width);
        for _ in 0..width {
            if let Some(node) = queue.pop_front() {
                let (left, right) = children(node);
                queue.extend(left);
                queue.extend(right);
            }
        }
    }
    widths
}

/// Draws the tree rotated a quarter turn: the root sits on the left edge,
/// right children above their parent and left children below.
///
/// ```text
///    .-->1
/// -->8
///    `-->9
///        `-->5
/// ```
pub fn sideways<N, C, L>(root: Option<N>, children: C, label: L) -> String
where
    N: Copy,
    C: Fn(N) -> (Option<N>, Option<N>),
    L: Fn(N) -> String,
{
    struct Frame<N> {
        node: N,
        level: usize,
        is_right: bool,
        expanded: bool,
    }

    let mut out = String::new();
    let mut stack: Vec<Frame<N>> = root
        .map(|node| Frame {
            node,
            level: 0,
            is_right: false,
            expanded: false,
        })
        .into_iter()
        .collect();

    while let Some(frame) = stack.pop() {
        if frame.expanded {
            if frame.level == 0 {
                out.push_str("-->");
            } else {
                out.push_str("   ");
                for _ in 1..frame.level {
                    out.push_str("    ");
                }
                out.push_str(if frame.is_right { ".-->" } else { "`-->" });
            }
            out.push_str(&label(frame.node));
            out.push('\n');
            continue;
        }

        let (left, right) = children(frame.node);
        if let Some(node) = left {
            stack.push(Frame {
                node,
                level: frame.level + 1,
                is_right: false,
                expanded: false,
            });
        }
        stack.push(Frame {
            expanded: true,
            ..frame
        });
        if let Some(node) = right {
            stack.push(Frame {
                node,
                level: frame.level + 1,
                is_right: true,
                expanded: false,
            });
        }
    }
    out
}
