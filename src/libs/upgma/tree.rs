/// NodeId is an index into the tree's node vector.
pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Sequence id, leaves only
    pub name: Option<String>,
    /// Half the linkage distance at which the node was formed; 0 for leaves
    pub height: f64,
}

impl Node {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// The rooted binary tree recorded by the clustering loop.
///
/// Leaves come first, in sequence order, so a leaf's id equals its sequence's matrix index.
/// Each merge appends one internal node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuideTree {
    nodes: Vec<Node>,
}

impl GuideTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_leaf(&mut self, name: impl Into<String>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            id,
            parent: None,
            children: Vec::new(),
            name: Some(name.into()),
            height: 0.0,
        });
        id
    }

    /// Create the parent of `left` and `right`.
    pub fn join(&mut self, left: NodeId, right: NodeId, height: f64) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            id,
            parent: None,
            children: vec![left, right],
            name: None,
            height,
        });
        self.nodes[left].parent = Some(id);
        self.nodes[right].parent = Some(id);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// The only node without a parent once clustering has finished.
    pub fn get_root(&self) -> Option<NodeId> {
        let mut roots = self.nodes.iter().filter(|n| n.parent.is_none());
        match (roots.next(), roots.next()) {
            (Some(root), None) => Some(root.id),
            _ => None,
        }
    }

    /// Leaf names below `id`, left to right.
    pub fn leaves(&self, id: NodeId) -> Vec<&str> {
        let node = &self.nodes[id];
        if node.is_leaf() {
            node.name.as_deref().into_iter().collect()
        } else {
            node.children
                .iter()
                .flat_map(|&child| self.leaves(child))
                .collect()
        }
    }

    /// Serialize to Newick. With `lengths`, each branch is the height difference between a
    /// node and its parent.
    ///
    /// ```
    /// use pmsa::libs::upgma::GuideTree;
    /// let mut tree = GuideTree::new();
    /// let a = tree.add_leaf("A");
    /// let b = tree.add_leaf("B");
    /// tree.join(a, b, 0.5);
    /// assert_eq!(tree.to_newick(false), "(A,B);");
    /// assert_eq!(tree.to_newick(true), "(A:0.5,B:0.5);");
    /// ```
    pub fn to_newick(&self, lengths: bool) -> String {
        match self.get_root() {
            Some(root) => {
                let mut s = self.to_newick_recursive(root, lengths);
                s.push(';');
                s
            }
            None => ";".to_string(),
        }
    }

    fn to_newick_recursive(&self, id: NodeId, lengths: bool) -> String {
        let node = &self.nodes[id];

        let mut node_info = String::new();
        if let Some(name) = &node.name {
            node_info.push_str(&quote_label(name));
        }
        if lengths {
            if let Some(parent) = node.parent {
                node_info.push_str(&format!(":{}", self.nodes[parent].height - node.height));
            }
        }

        if node.is_leaf() {
            node_info
        } else {
            let children: Vec<String> = node
                .children
                .iter()
                .map(|&child| self.to_newick_recursive(child, lengths))
                .collect();
            format!("({}){}", children.join(","), node_info)
        }
    }
}

fn quote_label(label: &str) -> String {
    let needs_quote = label.chars().any(|c| "(),:;[]' \t\n".contains(c));
    if needs_quote {
        // embedded quotes are doubled
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}
