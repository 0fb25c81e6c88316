/*
Tree rendering for every composite structure in the crate.

The scene stores children as arena handles, so it is rendered through a borrowed
`Subtree` view; the catalogue and account trees own their children and render directly.
 */
use termtree::Tree;
use tracing::instrument;

use crate::domain::accounts::AccountComponent;
use crate::domain::catalog::Component;
use crate::domain::scene::{Graphic, NodeId, Scene};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

/// Borrowed view of the tree rooted at one scene node.
#[derive(Debug, Clone, Copy)]
pub struct Subtree<'a> {
    pub scene: &'a Scene,
    pub root: NodeId,
}

impl Scene {
    pub fn subtree(&self, root: NodeId) -> Subtree<'_> {
        Subtree { scene: self, root }
    }
}

fn scene_label(graphic: &Graphic) -> String {
    match graphic {
        Graphic::Leaf(shape) => shape.to_string(),
        Graphic::Composite { label: Some(label), .. } => format!("Composite({})", label),
        Graphic::Composite { label: None, .. } => "Composite".to_string(),
    }
}

impl TreeNodeConvert for Subtree<'_> {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        if let Some(node) = self.scene.get(self.root) {
            let mut tree = Tree::new(scene_label(&node.graphic));

            fn build_tree(scene: &Scene, node_idx: NodeId, parent_tree: &mut Tree<String>) {
                for &child_idx in scene.children(node_idx) {
                    if let Some(child) = scene.get(child_idx) {
                        let mut child_tree = Tree::new(scene_label(&child.graphic));
                        build_tree(scene, child_idx, &mut child_tree);
                        parent_tree.push(child_tree);
                    }
                }
            }

            build_tree(self.scene, self.root, &mut tree);
            tree
        } else {
            Tree::new("Empty scene".to_string())
        }
    }
}

impl TreeNodeConvert for Component {
    fn to_tree_string(&self) -> Tree<String> {
        let root = format!("{} ({})", self.name(), self.price());
        let leaves: Vec<_> = match self {
            Component::Part(_) => Vec::new(),
            Component::Assembly(assembly) => assembly
                .components
                .iter()
                .map(|c| c.to_tree_string())
                .collect(),
        };
        Tree::new(root).with_leaves(leaves)
    }
}

impl TreeNodeConvert for AccountComponent {
    fn to_tree_string(&self) -> Tree<String> {
        match self {
            AccountComponent::Bank(account) => {
                Tree::new(format!("Account {} (${})", account.number, account.balance))
            }
            AccountComponent::Customer(customer) => {
                let leaves: Vec<_> = customer
                    .accounts
                    .iter()
                    .map(|a| a.to_tree_string())
                    .collect();
                Tree::new(format!("{} (${})", customer.customer_name, customer.balance()))
                    .with_leaves(leaves)
            }
        }
    }
}
