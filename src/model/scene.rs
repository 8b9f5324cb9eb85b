use glam::Vec3;

use super::ground::Ground;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// Flat disc lying parallel to the ground
    Marker { radius: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub position: Vec3,
}

/// The navigable ground plus transient nodes placed on it.
pub struct Scene {
    pub ground: Ground,
    nodes: Vec<(NodeId, Node)>,
    next_id: u32,
}

impl Scene {
    pub fn new(ground: Ground) -> Self {
        Self { ground, nodes: Vec::new(), next_id: 0 }
    }

    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push((id, node));
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|(n, _)| *n == id).map(|(_, node)| node)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|(n, _)| *n == id).map(|(_, node)| node)
    }

    /// Returns the removed node, or `None` if it was already gone.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let idx = self.nodes.iter().position(|(n, _)| *n == id)?;
        Some(self.nodes.remove(idx).1)
    }

    pub fn markers(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .map(|(_, node)| node)
            .filter(|node| matches!(node.kind, NodeKind::Marker { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ground::GroundPlane;

    #[test]
    fn nodes_add_move_remove() {
        let mut scene = Scene::new(Ground::Plane(GroundPlane { height: 0.0 }));
        let marker = Node { kind: NodeKind::Marker { radius: 0.2 }, position: Vec3::ZERO };
        let a = scene.add_node(marker);
        let b = scene.add_node(marker);
        assert_ne!(a, b);
        assert_eq!(scene.markers().count(), 2);

        scene.node_mut(b).unwrap().position = Vec3::X;
        assert_eq!(scene.node(b).unwrap().position, Vec3::X);

        assert!(scene.remove_node(a).is_some());
        assert!(scene.remove_node(a).is_none(), "double remove is harmless");
        assert!(scene.node(a).is_none());
        assert_eq!(scene.markers().count(), 1);
    }
}
