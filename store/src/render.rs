//! ASCII rendering of the tree for display.

use avl_inventory::{AvlTree, NodeRef};

/// One line per node, root first, children indented beneath their parent:
///
/// ```text
/// [2] Desk (H:2, B:0)
/// ├── L [1] Laptop (H:1, B:0)
/// └── R [3] Mouse (H:1, B:0)
/// ```
pub fn render(tree: &AvlTree) -> Vec<String> {
    let Some(root) = tree.root() else {
        return vec!["Tree is empty".to_string()];
    };

    let mut lines = Vec::with_capacity(tree.len());
    lines.push(label(root));
    render_children(root, "", &mut lines);
    lines
}

fn label(n: NodeRef<'_>) -> String {
    format!(
        "[{}] {} (H:{}, B:{})",
        n.id(),
        n.record().name,
        n.height(),
        n.balance()
    )
}

fn render_children(n: NodeRef<'_>, prefix: &str, lines: &mut Vec<String>) {
    let children: Vec<_> = [("L", n.left()), ("R", n.right())]
        .into_iter()
        .filter_map(|(side, child)| child.map(|c| (side, c)))
        .collect();

    let last = children.len().saturating_sub(1);
    for (i, (side, child)) in children.into_iter().enumerate() {
        let (branch, guide) = if i == last {
            ("└── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        lines.push(format!("{prefix}{branch}{side} {}", label(child)));
        render_children(child, &format!("{prefix}{guide}"), lines);
    }
}
