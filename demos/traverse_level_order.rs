use bstree::AvlTree;

fn print_levels(tree: &AvlTree<i32>) {
    println!("Breadth-first traversal:");
    for level in tree.traverse_breadth_first() {
        let keys: Vec<String> = level.iter().map(ToString::to_string).collect();
        println!("{}", keys.join(" "));
    }
}

fn main() {
    let mut tree = AvlTree::new();
    for key in [10, 20, 30, 40, 50, 25] {
        tree.insert(key);
    }
    println!("In-order traversal: {:?}", tree.traverse_in_order());
    print_levels(&tree);

    for key in [25, 40] {
        if let Err(err) = tree.delete(&key) {
            println!("Could not delete {}: {}", key, err);
        }
    }
    println!("In-order traversal after deletion: {:?}", tree.traverse_in_order());
    print_levels(&tree);

    if let Some(root) = tree.root() {
        println!("Root key: {}", root.key());
    }
}
