use bstree::{AvlTree, BinarySearchTree};

fn main() {
    let mut bst = BinarySearchTree::new();
    let mut avl = AvlTree::new();
    for key in 0..32 {
        bst.insert(key);
        avl.insert(key);
    }
    println!("height after ascending inserts: bst {}, avl {}", bst.height(), avl.height());

    match avl.search(&17) {
        Ok(node) => println!(
            "found {} (parent {:?}, balance {})",
            node.key(),
            node.parent().map(|parent| parent.key()),
            node.balance_factor()
        ),
        Err(err) => println!("search failed: {}", err),
    }
    if let Err(err) = avl.delete(&99) {
        println!("delete 99: {}", err);
    }

    for key in &avl {
        print!("{key} ");
    }
    println!();
}
