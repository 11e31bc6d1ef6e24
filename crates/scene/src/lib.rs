//! Component attachment tree for a single actor.
//!
//! Every node holds a pose relative to its parent. World poses are derived on
//! demand from the owning actor's transform, so the tree never caches state
//! that could drift from the world.
//!
//! # Invariants
//! - Exactly one root; every other node has a parent that existed when it was attached.
//! - Node names are unique within a tree.
//! - Iteration order is deterministic (BTreeMap).

mod spring_arm;

pub use spring_arm::SpringArm;

use aerofighters_common::Transform;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Index of a node within its [`SceneTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// A single attachment point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    pub parent: Option<NodeId>,
    pub local: Transform,
}

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("node {0:?} not found")]
    UnknownNode(NodeId),
    #[error("a node named {0:?} already exists")]
    DuplicateName(String),
}

/// Ownership tree of components attached to one actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneTree {
    nodes: BTreeMap<NodeId, SceneNode>,
    root: NodeId,
    next_id: u32,
}

impl SceneTree {
    /// Create a tree holding only a root node at the actor origin.
    pub fn new(root_name: impl Into<String>) -> Self {
        let root = NodeId(0);
        let mut nodes = BTreeMap::new();
        nodes.insert(
            root,
            SceneNode {
                name: root_name.into(),
                parent: None,
                local: Transform::default(),
            },
        );
        Self {
            nodes,
            root,
            next_id: 1,
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attach a new node under `parent`.
    pub fn attach(
        &mut self,
        name: impl Into<String>,
        parent: NodeId,
        local: Transform,
    ) -> Result<NodeId, SceneError> {
        let name = name.into();
        if !self.nodes.contains_key(&parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        if self.find(&name).is_some() {
            return Err(SceneError::DuplicateName(name));
        }
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(
            id,
            SceneNode {
                name,
                parent: Some(parent),
                local,
            },
        );
        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(&id)
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, n)| n.name == name)
            .map(|(id, _)| *id)
    }

    pub fn set_local(&mut self, id: NodeId, local: Transform) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(&id).ok_or(SceneError::UnknownNode(id))?;
        node.local = local;
        Ok(())
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes
            .iter()
            .filter(|(_, n)| n.parent == Some(id))
            .map(|(child, _)| *child)
            .collect()
    }

    /// Pose of `id` relative to the actor origin (root-to-node composition).
    pub fn component_transform(&self, id: NodeId) -> Option<Transform> {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let node = self.nodes.get(&current)?;
            chain.push(node.local);
            cursor = node.parent;
        }
        Some(
            chain
                .iter()
                .rev()
                .fold(Transform::default(), |acc, local| acc.mul_transform(local)),
        )
    }

    /// World pose of `id` given the owning actor's transform.
    pub fn world_transform(&self, id: NodeId, actor: &Transform) -> Option<Transform> {
        self.component_transform(id)
            .map(|relative| actor.mul_transform(&relative))
    }
}
