//! Nested cluster containers.
//!
//! Clusters group node identifiers and other clusters. Identifiers are
//! unique across the whole tree: creating a cluster that already exists
//! anywhere is a no-op.

/// A member of a [`Cluster`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClusterMember {
    Node(String),
    Cluster(Cluster),
}

/// A named container of nodes and nested clusters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    id: String,
    members: Vec<ClusterMember>,
}

impl Cluster {
    fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            members: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Members in insertion order.
    pub fn members(&self) -> &[ClusterMember] {
        &self.members
    }

    /// Identifiers of the nodes directly inside this cluster.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.members.iter().filter_map(|member| match member {
            ClusterMember::Node(id) => Some(id.as_str()),
            ClusterMember::Cluster(_) => None,
        })
    }

    /// Clusters directly nested in this cluster.
    pub fn subclusters(&self) -> impl Iterator<Item = &Cluster> {
        self.members.iter().filter_map(|member| match member {
            ClusterMember::Cluster(cluster) => Some(cluster),
            ClusterMember::Node(_) => None,
        })
    }

    fn find(&self, id: &str) -> Option<&Cluster> {
        if self.id == id {
            return Some(self);
        }
        self.subclusters().find_map(|cluster| cluster.find(id))
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Cluster> {
        if self.id == id {
            return Some(self);
        }
        self.members.iter_mut().find_map(|member| match member {
            ClusterMember::Cluster(cluster) => cluster.find_mut(id),
            ClusterMember::Node(_) => None,
        })
    }
}

/// Forest of clusters built up during one animation step.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClusterTree {
    roots: Vec<Cluster>,
}

impl ClusterTree {
    pub fn roots(&self) -> &[Cluster] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Returns `true` if a cluster with this id exists at any depth.
    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn find(&self, id: &str) -> Option<&Cluster> {
        self.roots.iter().find_map(|cluster| cluster.find(id))
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut Cluster> {
        self.roots.iter_mut().find_map(|cluster| cluster.find_mut(id))
    }

    /// Creates a cluster at the root, or nested under `parent`.
    ///
    /// Does nothing when `id` already exists. An unknown parent is created at
    /// the root first.
    pub fn create(&mut self, id: &str, parent: Option<&str>) {
        if self.contains(id) {
            return;
        }

        let Some(parent) = parent.filter(|parent| *parent != id) else {
            self.roots.push(Cluster::new(id));
            return;
        };

        if !self.contains(parent) {
            self.roots.push(Cluster::new(parent));
        }
        if let Some(parent) = self.find_mut(parent) {
            parent.members.push(ClusterMember::Cluster(Cluster::new(id)));
        }
    }

    /// Appends a node to a cluster, creating the cluster at the root when it
    /// does not exist yet.
    pub fn add_node(&mut self, cluster: &str, node: &str) {
        let member = ClusterMember::Node(node.to_string());
        match self.find_mut(cluster) {
            Some(cluster) => cluster.members.push(member),
            None => {
                let mut root = Cluster::new(cluster);
                root.members.push(member);
                self.roots.push(root);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn collect_ids<'a>(cluster: &'a Cluster, ids: &mut Vec<&'a str>) {
        ids.push(cluster.id());
        for nested in cluster.subclusters() {
            collect_ids(nested, ids);
        }
    }

    #[test]
    fn test_create_root() {
        let mut tree = ClusterTree::default();
        tree.create("pkg", None);

        assert_eq!(tree.roots().len(), 1);
        assert_eq!(tree.roots()[0].id(), "pkg");
        assert!(tree.roots()[0].members().is_empty());
    }

    #[test]
    fn test_create_is_idempotent() {
        let mut tree = ClusterTree::default();
        tree.create("pkg", None);
        tree.create("sub", Some("pkg"));
        tree.create("sub", None);
        tree.create("pkg", Some("sub"));

        assert_eq!(tree.roots().len(), 1);
        let pkg = tree.find("pkg").expect("pkg exists");
        assert_eq!(pkg.subclusters().count(), 1);
    }

    #[test]
    fn test_create_nested() {
        let mut tree = ClusterTree::default();
        tree.create("outer", None);
        tree.create("inner", Some("outer"));
        tree.create("innermost", Some("inner"));

        let outer = &tree.roots()[0];
        let inner = outer.subclusters().next().expect("inner exists");
        assert_eq!(inner.id(), "inner");
        assert_eq!(
            inner.subclusters().map(Cluster::id).collect::<Vec<_>>(),
            vec!["innermost"]
        );
        assert!(tree.contains("innermost"));
    }

    #[test]
    fn test_create_with_unknown_parent() {
        let mut tree = ClusterTree::default();
        tree.create("child", Some("parent"));

        assert_eq!(tree.roots().len(), 1);
        assert_eq!(tree.roots()[0].id(), "parent");
        assert!(tree.roots()[0].subclusters().any(|c| c.id() == "child"));
    }

    #[test]
    fn test_create_self_parent_is_root() {
        let mut tree = ClusterTree::default();
        tree.create("loop", Some("loop"));

        assert_eq!(tree.roots().len(), 1);
        assert!(tree.roots()[0].members().is_empty());
    }

    #[test]
    fn test_add_node_existing_cluster() {
        let mut tree = ClusterTree::default();
        tree.create("outer", None);
        tree.create("inner", Some("outer"));
        tree.add_node("inner", "a");
        tree.add_node("outer", "b");

        let outer = tree.find("outer").expect("outer exists");
        assert_eq!(outer.node_ids().collect::<Vec<_>>(), vec!["b"]);
        let inner = tree.find("inner").expect("inner exists");
        assert_eq!(inner.node_ids().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_add_node_creates_missing_cluster() {
        let mut tree = ClusterTree::default();
        tree.add_node("pkg", "a");
        tree.add_node("pkg", "b");

        assert_eq!(tree.roots().len(), 1);
        assert_eq!(
            tree.roots()[0].node_ids().collect::<Vec<_>>(),
            vec!["a", "b"]
        );
    }

    fn cluster_id(n: u8) -> String {
        format!("c{n}")
    }

    proptest! {
        #[test]
        fn prop_create_is_idempotent(
            calls in prop::collection::vec((0u8..5, prop::option::of(0u8..5)), 0..20)
        ) {
            let mut tree = ClusterTree::default();
            let replay = |tree: &mut ClusterTree| {
                for (id, parent) in &calls {
                    tree.create(&cluster_id(*id), parent.map(cluster_id).as_deref());
                }
            };

            replay(&mut tree);
            let once = tree.clone();
            replay(&mut tree);
            prop_assert_eq!(&tree, &once);

            let mut ids = Vec::new();
            for root in tree.roots() {
                collect_ids(root, &mut ids);
            }
            let mut unique = ids.clone();
            unique.sort_unstable();
            unique.dedup();
            prop_assert_eq!(ids.len(), unique.len());
        }
    }
}
