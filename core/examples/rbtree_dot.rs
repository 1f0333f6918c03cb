use arbor::datastruct::{BinaryTree, RBTree};

fn main() {
    let notation = std::env::args().nth(1).unwrap_or_else(|| {
        String::from("(9 (6 (3 (1 (2)) (4 (5))) (8 (7))) (17 (16 (12 (11 (10)) (14 (13) (15)))) (20 (19 (18)) (21))))")
    });
    let binary = match BinaryTree::parse(&notation) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("invalid notation: {}", e);
            std::process::exit(1);
        }
    };

    let mut tree = RBTree::new();
    tree.build_tree(&binary.post_order());
    print!("{}", tree.dump_as_dot());
}
