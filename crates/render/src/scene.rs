use showroom_assets::Surface;
use showroom_common::{Aabb, ItemId, NodeId, Ray};
use showroom_picking::{Hit, SpatialQuery};

/// What a node is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Pure composition; has no geometry of its own.
    Group,
    /// An opaque box.
    Solid,
    /// A hotspot marker floating above an item.
    Marker,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub label: String,
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    /// World-space bounds; `None` for groups.
    pub bounds: Option<Aabb>,
    pub color: [f32; 4],
    /// Room-shell surface whose material overrides `color`.
    pub surface: Option<Surface>,
    /// Catalog back-reference.
    pub item: Option<ItemId>,
}

/// Flat scene graph of world-space boxes.
///
/// Nodes are never removed, so a [`NodeId`] is a stable index.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    children: Vec<Vec<NodeId>>,
    pickable: Vec<NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Nodes with geometry, in insertion order.
    pub fn solids(&self) -> impl Iterator<Item = (NodeId, &SceneNode, Aabb)> {
        self.nodes().filter_map(|(id, n)| n.bounds.map(|b| (id, n, b)))
    }

    pub fn pickable(&self) -> &[NodeId] {
        &self.pickable
    }

    pub fn add_group(&mut self, parent: Option<NodeId>, label: &str, item: Option<ItemId>) -> NodeId {
        self.push(SceneNode {
            label: label.into(),
            kind: NodeKind::Group,
            parent,
            bounds: None,
            color: [0.0; 4],
            surface: None,
            item,
        })
    }

    pub fn add_box(&mut self, parent: Option<NodeId>, label: &str, bounds: Aabb, color: [f32; 4]) -> NodeId {
        self.push(SceneNode {
            label: label.into(),
            kind: NodeKind::Solid,
            parent,
            bounds: Some(bounds),
            color,
            surface: None,
            item: None,
        })
    }

    pub fn add_surface(&mut self, label: &str, bounds: Aabb, surface: Surface) -> NodeId {
        let color = surface.builtin().base_color;
        let id = self.add_box(None, label, bounds, color);
        self.nodes[id.0 as usize].surface = Some(surface);
        id
    }

    /// Add a hotspot marker for `item` and register it as pickable.
    pub fn add_marker(&mut self, item: ItemId, bounds: Aabb, color: [f32; 4]) -> NodeId {
        let label = format!("{item} marker");
        let id = self.push(SceneNode {
            label,
            kind: NodeKind::Marker,
            parent: None,
            bounds: Some(bounds),
            color,
            surface: None,
            item: Some(item),
        });
        self.register_pickable(id);
        id
    }

    /// Make `node` and its descendants answer pick queries.
    pub fn register_pickable(&mut self, node: NodeId) {
        if (node.0 as usize) < self.nodes.len() && !self.pickable.contains(&node) {
            self.pickable.push(node);
        }
    }

    /// `node` followed by all of its descendants, depth first.
    pub fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            if let Some(kids) = self.children.get(n.0 as usize) {
                out.push(n);
                stack.extend(kids.iter().rev().copied());
            }
        }
        out
    }

    /// Union of every box in the subtree rooted at `node`.
    pub fn subtree_bounds(&self, node: NodeId) -> Option<Aabb> {
        self.subtree(node)
            .into_iter()
            .filter_map(|n| self.get(n).and_then(|s| s.bounds))
            .reduce(|a, b| a.union(&b))
    }

    /// The item owning `node`, through its ancestors.
    pub fn owning_item(&self, node: NodeId) -> Option<&ItemId> {
        let mut current = Some(node);
        while let Some(n) = current {
            let data = self.get(n)?;
            if let Some(item) = &data.item {
                return Some(item);
            }
            current = data.parent;
        }
        None
    }

    /// Parents always precede their children, so ancestor walks end.
    fn push(&mut self, mut node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        if let Some(parent) = node.parent {
            match self.children.get_mut(parent.0 as usize) {
                Some(kids) => kids.push(id),
                None => {
                    tracing::warn!(?parent, label = %node.label, "unknown parent, node added at root");
                    node.parent = None;
                }
            }
        }
        self.nodes.push(node);
        self.children.push(Vec::new());
        id
    }
}

impl SpatialQuery for SceneGraph {
    fn nearest_pickable(&self, ray: &Ray) -> Option<Hit> {
        self.pickable
            .iter()
            .flat_map(|root| self.subtree(*root))
            .filter_map(|node| {
                let bounds = self.get(node)?.bounds?;
                let distance = bounds.ray_distance(ray)?;
                Some(Hit { node, distance })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.get(node).and_then(|n| n.parent)
    }

    fn item_ref(&self, node: NodeId) -> Option<&ItemId> {
        self.get(node).and_then(|n| n.item.as_ref())
    }
}
