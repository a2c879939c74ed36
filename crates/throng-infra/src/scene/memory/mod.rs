// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! An in-memory host scene with an operation journal.

mod journal;
mod node;

pub use journal::*;
pub use node::*;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use throng_core::scene::{
    AttrPath, AttrValue, ConnectOptions, DuplicateOptions, ImportOptions, MeshDescription,
    NodeHandle, NodeKind, ReparentOptions, SceneError, SceneGraph, SceneResult,
};

/// The shading group every new scene starts with.
pub const DEFAULT_SHADING_GROUP: &str = "initialShadingGroup";

/// The default list nodes every new scene starts with.
pub const DEFAULT_LISTS: [&str; 3] = [
    ":defaultShaderList1",
    ":defaultTextureList1",
    ":defaultRenderUtilityList1",
];

/// A scene graph held entirely in memory.
///
/// Node names are unique: a name already in use gets a numeric suffix, as
/// hosts usually do. Connections copy the source values onto the destination
/// when they are made, so a connection followed by a disconnection leaves a
/// snapshot behind. New mesh shapes join the default shading group without a
/// journaled operation. Mesh files are not read from disk; they must be
/// registered with [`add_mesh_file`](MemoryScene::add_mesh_file) first.
#[derive(Debug)]
pub struct MemoryScene {
    nodes: HashMap<NodeHandle, SceneNode>,
    by_name: HashMap<String, NodeHandle>,
    connections: Vec<(AttrPath, AttrPath)>,
    files: HashMap<PathBuf, Vec<(String, MeshDescription)>>,
    journal: Vec<SceneOp>,
    failures: Vec<OpKind>,
    next_id: u64,
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryScene {
    /// Creates a scene holding only the default lists and shading group.
    pub fn new() -> Self {
        let mut scene = Self {
            nodes: HashMap::new(),
            by_name: HashMap::new(),
            connections: Vec::new(),
            files: HashMap::new(),
            journal: Vec::new(),
            failures: Vec::new(),
            next_id: 1,
        };
        for list in DEFAULT_LISTS {
            scene.insert(list, NodeKind::DefaultList);
        }
        scene.insert(DEFAULT_SHADING_GROUP, NodeKind::ShadingGroup);
        scene
    }

    /// Registers the objects of a mesh file, by object name.
    pub fn add_mesh_file(
        &mut self,
        path: impl Into<PathBuf>,
        objects: Vec<(String, MeshDescription)>,
    ) -> &mut Self {
        self.files.insert(path.into(), objects);
        self
    }

    /// Makes the next operation of the given kind fail with a backend error.
    pub fn fail_next(&mut self, kind: OpKind) {
        self.failures.push(kind);
    }

    /// Returns every operation received so far, in order.
    pub fn journal(&self) -> &[SceneOp] {
        &self.journal
    }

    /// Counts the journaled operations of one kind.
    pub fn count(&self, kind: OpKind) -> usize {
        self.count_where(|op| op.kind() == kind)
    }

    /// Counts the journaled operations matching a predicate.
    pub fn count_where(&self, predicate: impl Fn(&SceneOp) -> bool) -> usize {
        self.journal.iter().filter(|op| predicate(op)).count()
    }

    /// Forgets the journaled operations.
    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    /// Returns a node.
    pub fn get(&self, node: NodeHandle) -> Option<&SceneNode> {
        self.nodes.get(&node)
    }

    /// Returns `true` if the node exists.
    pub fn contains(&self, node: NodeHandle) -> bool {
        self.nodes.contains_key(&node)
    }

    /// Returns the number of nodes, default nodes included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the value of an attribute.
    pub fn attribute(&self, path: &AttrPath) -> Option<&AttrValue> {
        self.nodes.get(&path.node)?.attribute(&path.attr)
    }

    /// Returns `true` if `src` is connected to `dst`.
    pub fn is_connected(&self, src: &AttrPath, dst: &AttrPath) -> bool {
        self.connections.iter().any(|(s, d)| s == src && d == dst)
    }

    /// Returns every live connection.
    pub fn connections(&self) -> &[(AttrPath, AttrPath)] {
        &self.connections
    }

    /// Returns the shading group a node is a member of.
    pub fn shading_group_of(&self, node: NodeHandle) -> Option<NodeHandle> {
        self.nodes
            .iter()
            .find(|(_, n)| n.kind == NodeKind::ShadingGroup && n.members.contains(&node))
            .map(|(handle, _)| *handle)
    }

    fn insert(&mut self, base: &str, kind: NodeKind) -> NodeHandle {
        let handle = NodeHandle::new(self.next_id);
        self.next_id += 1;
        let name = self.unique_name(base);
        self.by_name.insert(name.clone(), handle);
        self.nodes.insert(handle, SceneNode::new(name, kind));
        handle
    }

    fn unique_name(&self, base: &str) -> String {
        if !self.by_name.contains_key(base) {
            return base.to_string();
        }
        let stem = base.trim_end_matches(|c: char| c.is_ascii_digit());
        (1..)
            .map(|n| format!("{stem}{n}"))
            .find(|name| !self.by_name.contains_key(name))
            .unwrap_or_else(|| format!("{stem}_"))
    }

    fn node(&self, node: &NodeHandle) -> SceneResult<&SceneNode> {
        self.nodes
            .get(node)
            .ok_or_else(|| SceneError::NodeNotFound(node.to_string()))
    }

    fn node_mut(&mut self, node: &NodeHandle) -> SceneResult<&mut SceneNode> {
        self.nodes
            .get_mut(node)
            .ok_or_else(|| SceneError::NodeNotFound(node.to_string()))
    }

    fn check(&mut self, kind: OpKind) -> SceneResult<()> {
        match self.failures.iter().position(|k| *k == kind) {
            Some(index) => {
                self.failures.remove(index);
                log::debug!("Injected failure consumed by {kind:?}");
                Err(SceneError::Backend(format!("injected failure in {kind:?}")))
            }
            None => Ok(()),
        }
    }

    fn link(&mut self, child: NodeHandle, parent: NodeHandle) {
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parents.push(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    fn unlink(&mut self, child: NodeHandle, parent: NodeHandle) {
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parents.retain(|p| *p != parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.retain(|c| *c != child);
        }
    }

    fn is_ancestor(&self, ancestor: NodeHandle, node: NodeHandle) -> bool {
        let mut stack = vec![node];
        let mut seen = HashSet::new();
        while let Some(current) = stack.pop() {
            if current == ancestor {
                return true;
            }
            if seen.insert(current) {
                if let Some(n) = self.nodes.get(&current) {
                    stack.extend(n.parents.iter().copied());
                }
            }
        }
        false
    }

    fn add_mesh_object(&mut self, name: &str, mesh: MeshDescription) -> NodeHandle {
        let transform = self.insert(name, NodeKind::Transform);
        let shape = self.insert(&format!("{name}Shape"), NodeKind::Mesh);
        if let Some(node) = self.nodes.get_mut(&shape) {
            node.mesh = Some(mesh);
        }
        self.link(shape, transform);
        if let Some(group) = self
            .by_name
            .get(DEFAULT_SHADING_GROUP)
            .and_then(|sg| self.nodes.get_mut(sg))
        {
            group.members.push(shape);
        }
        transform
    }

    fn copy_subtree(
        &mut self,
        source: NodeHandle,
        deep: bool,
        copies: &mut Vec<(NodeHandle, NodeHandle)>,
    ) -> SceneResult<NodeHandle> {
        let original = self.node(&source)?.clone();
        let copy = self.insert(&original.name, original.kind);
        if let Some(node) = self.nodes.get_mut(&copy) {
            node.attributes = original.attributes;
            node.mesh = original.mesh;
        }
        copies.push((source, copy));

        if deep {
            for child in original.children {
                let child_copy = self.copy_subtree(child, true, copies)?;
                self.link(child_copy, copy);
            }
        }
        Ok(copy)
    }

    fn delete_subtree(&mut self, node: NodeHandle) {
        let Some(removed) = self.nodes.get(&node).cloned() else {
            return;
        };
        for child in removed.children {
            let shared = self
                .nodes
                .get(&child)
                .is_some_and(|c| c.parents.len() > 1);
            if shared {
                self.unlink(child, node);
            } else {
                self.delete_subtree(child);
            }
        }
        for parent in removed.parents {
            self.unlink(node, parent);
        }

        self.nodes.remove(&node);
        self.by_name.remove(&removed.name);
        self.connections
            .retain(|(src, dst)| src.node != node && dst.node != node);
        for other in self.nodes.values_mut() {
            other.members.retain(|m| *m != node);
        }
    }

    fn copy_values(&mut self, src: &AttrPath, dst: &AttrPath) -> SceneResult<()> {
        let values: Vec<(String, AttrValue)> = self
            .node(&src.node)?
            .attributes
            .iter()
            .filter_map(|(name, value)| {
                let suffix = attr_suffix(name, &src.attr)?;
                Some((format!("{}{suffix}", dst.attr), value.clone()))
            })
            .collect();

        let target = self.node_mut(&dst.node)?;
        target
            .attributes
            .retain(|name, _| attr_suffix(name, &dst.attr).is_none());
        target.attributes.extend(values);
        Ok(())
    }
}

/// Returns what follows `prefix` in `name` if `name` is `prefix` itself or
/// one of its elements or children.
fn attr_suffix<'a>(name: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = name.strip_prefix(prefix)?;
    (rest.is_empty() || rest.starts_with('[') || rest.starts_with('.')).then_some(rest)
}

impl SceneGraph for MemoryScene {
    fn create_empty_group(&mut self, name: &str) -> SceneResult<NodeHandle> {
        self.check(OpKind::CreateGroup)?;
        let node = self.insert(name, NodeKind::Transform);
        self.journal.push(SceneOp::CreateGroup {
            node,
            name: name.to_string(),
        });
        Ok(node)
    }

    fn create_node(&mut self, kind: NodeKind, name: &str) -> SceneResult<NodeHandle> {
        self.check(OpKind::CreateNode)?;
        let node = self.insert(name, kind);
        self.journal.push(SceneOp::CreateNode { node, kind });
        Ok(node)
    }

    fn create_mesh(&mut self, name: &str, mesh: &MeshDescription) -> SceneResult<NodeHandle> {
        self.check(OpKind::CreateMesh)?;
        let node = self.add_mesh_object(name, mesh.clone());
        self.journal.push(SceneOp::CreateMesh {
            node,
            triangles: mesh.triangle_count(),
        });
        Ok(node)
    }

    fn import_mesh_file(
        &mut self,
        path: &Path,
        options: &ImportOptions,
    ) -> SceneResult<NodeHandle> {
        self.check(OpKind::Import)?;
        let mut objects = self.files.get(path).cloned().ok_or_else(|| {
            SceneError::Backend(format!("cannot read mesh file '{}'", path.display()))
        })?;

        if options.merge_objects && objects.len() > 1 {
            let mut merged = MeshDescription::default();
            for (_, mesh) in objects.drain(..) {
                let offset = merged.positions.len() as u32;
                merged.positions.extend(mesh.positions);
                merged.normals.extend(mesh.normals);
                merged.indices.extend(mesh.indices.iter().map(|i| i + offset));
            }
            objects.push((format!("{}Mesh", options.group_name), merged));
        }

        let group = self.insert(&options.group_name, NodeKind::Transform);
        log::debug!(
            "Importing {} objects from '{}'",
            objects.len(),
            path.display()
        );
        for (name, mesh) in objects {
            let transform = self.add_mesh_object(&name, mesh);
            self.link(transform, group);
        }
        self.journal.push(SceneOp::Import {
            path: path.to_path_buf(),
            group,
        });
        Ok(group)
    }

    fn duplicate(
        &mut self,
        node: &NodeHandle,
        options: DuplicateOptions,
    ) -> SceneResult<NodeHandle> {
        self.check(OpKind::Duplicate)?;
        let parent = self.node(node)?.parents.first().copied();

        let mut copies = Vec::new();
        let copy = self.copy_subtree(*node, !options.parent_only, &mut copies)?;
        if let Some(parent) = parent {
            self.link(copy, parent);
        }

        if options.full_copy {
            for (original, duplicate) in copies {
                let incoming: Vec<_> = self
                    .connections
                    .iter()
                    .filter(|(_, dst)| dst.node == original)
                    .map(|(src, dst)| (src.clone(), duplicate.attr(dst.attr.clone())))
                    .collect();
                self.connections.extend(incoming);
                for group in self.nodes.values_mut() {
                    if group.members.contains(&original) {
                        group.members.push(duplicate);
                    }
                }
            }
        }

        self.journal.push(SceneOp::Duplicate {
            source: *node,
            copy,
            options,
        });
        Ok(copy)
    }

    fn reparent(
        &mut self,
        node: &NodeHandle,
        parent: Option<&NodeHandle>,
        options: ReparentOptions,
    ) -> SceneResult<NodeHandle> {
        self.check(OpKind::Reparent)?;
        self.node(node)?;
        if let Some(parent) = parent {
            self.node(parent)?;
            if self.is_ancestor(*node, *parent) {
                return Err(SceneError::InvalidOperation(format!(
                    "cannot parent {node} under its own descendant {parent}"
                )));
            }
        }

        if options.add_object {
            let parent = parent.ok_or_else(|| {
                SceneError::InvalidOperation(format!("cannot instance {node} under the world"))
            })?;
            if self.node(node)?.parents.contains(parent) {
                return Err(SceneError::InvalidOperation(format!(
                    "{node} is already a child of {parent}"
                )));
            }
            self.link(*node, *parent);
        } else {
            let parents = self.node(node)?.parents.clone();
            for old in parents {
                self.unlink(*node, old);
            }
            if let Some(parent) = parent {
                self.link(*node, *parent);
            }
        }

        self.journal.push(SceneOp::Reparent {
            node: *node,
            parent: parent.copied(),
            options,
        });
        Ok(*node)
    }

    fn connect_attribute(
        &mut self,
        src: &AttrPath,
        dst: &AttrPath,
        options: ConnectOptions,
    ) -> SceneResult<()> {
        self.check(OpKind::Connect)?;
        self.node(&src.node)?;
        self.node(&dst.node)?;

        let dst = if options.next_available {
            let index = (0..)
                .find(|i| {
                    let element = format!("{}[{i}]", dst.attr);
                    !self
                        .connections
                        .iter()
                        .any(|(_, d)| d.node == dst.node && d.attr == element)
                })
                .unwrap_or_default();
            dst.node.attr(format!("{}[{index}]", dst.attr))
        } else {
            dst.clone()
        };

        if self.connections.iter().any(|(_, d)| *d == dst) {
            if !options.force {
                return Err(SceneError::InvalidOperation(format!(
                    "{dst} already has an incoming connection"
                )));
            }
            self.connections.retain(|(_, d)| *d != dst);
        }

        self.copy_values(src, &dst)?;
        self.connections.push((src.clone(), dst.clone()));
        self.journal.push(SceneOp::Connect {
            src: src.clone(),
            dst,
            options,
        });
        Ok(())
    }

    fn disconnect_attribute(&mut self, src: &AttrPath, dst: &AttrPath) -> SceneResult<()> {
        self.check(OpKind::Disconnect)?;
        let index = self
            .connections
            .iter()
            .position(|(s, d)| s == src && d == dst)
            .ok_or_else(|| {
                SceneError::InvalidOperation(format!("{src} is not connected to {dst}"))
            })?;
        self.connections.remove(index);
        self.journal.push(SceneOp::Disconnect {
            src: src.clone(),
            dst: dst.clone(),
        });
        Ok(())
    }

    fn set_attribute(&mut self, target: &AttrPath, value: AttrValue) -> SceneResult<()> {
        self.check(OpKind::SetAttribute)?;
        self.node_mut(&target.node)?
            .attributes
            .insert(target.attr.clone(), value);
        self.journal.push(SceneOp::SetAttribute {
            target: target.clone(),
        });
        Ok(())
    }

    fn rename(&mut self, node: &NodeHandle, new_name: &str) -> SceneResult<NodeHandle> {
        self.check(OpKind::Rename)?;
        let old = self.node(node)?.name.clone();
        self.by_name.remove(&old);
        let name = self.unique_name(new_name);
        self.by_name.insert(name.clone(), *node);
        self.node_mut(node)?.name = name.clone();
        self.journal.push(SceneOp::Rename { node: *node, name });
        Ok(*node)
    }

    fn delete(&mut self, node: &NodeHandle) -> SceneResult<()> {
        self.check(OpKind::Delete)?;
        self.node(node)?;
        self.delete_subtree(*node);
        self.journal.push(SceneOp::Delete { node: *node });
        Ok(())
    }

    fn list_children(&self, node: &NodeHandle) -> SceneResult<Vec<NodeHandle>> {
        Ok(self.node(node)?.children.clone())
    }

    fn list_descendants(
        &self,
        node: &NodeHandle,
        kind: Option<NodeKind>,
    ) -> SceneResult<Vec<NodeHandle>> {
        let mut stack: Vec<NodeHandle> = self.node(node)?.children.iter().rev().copied().collect();
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            let n = self.node(&current)?;
            if kind.map_or(true, |k| k == n.kind) {
                out.push(current);
            }
            stack.extend(n.children.iter().rev().copied());
        }
        Ok(out)
    }

    fn find_node(&self, name: &str) -> SceneResult<NodeHandle> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| SceneError::NodeNotFound(name.to_string()))
    }

    fn soften_edges(&mut self, mesh: &NodeHandle, angle: f32) -> SceneResult<()> {
        self.check(OpKind::SoftenEdges)?;
        let node = self.node_mut(mesh)?;
        if node.kind != NodeKind::Mesh {
            return Err(SceneError::InvalidOperation(format!(
                "{mesh} is not a mesh shape"
            )));
        }
        node.attributes
            .insert("softEdgeAngle".to_string(), AttrValue::Float(angle));
        self.journal.push(SceneOp::SoftenEdges { mesh: *mesh });
        Ok(())
    }

    fn split_mesh(
        &mut self,
        mesh: &NodeHandle,
        name: &str,
        vertices: &[usize],
    ) -> SceneResult<NodeHandle> {
        self.check(OpKind::SplitMesh)?;
        let source = self.node(mesh)?;
        let data = source
            .mesh
            .clone()
            .ok_or_else(|| SceneError::InvalidOperation(format!("{mesh} is not a mesh shape")))?;
        let transform = source.parents.first().copied();

        let selected: HashSet<usize> = vertices.iter().copied().collect();
        let mut kept = Vec::new();
        let mut chunk = MeshDescription::default();
        let mut remap: HashMap<u32, u32> = HashMap::new();
        for face in data.indices.chunks_exact(3) {
            if face.iter().any(|i| selected.contains(&(*i as usize))) {
                for index in face {
                    let mapped = *remap.entry(*index).or_insert_with(|| {
                        let i = *index as usize;
                        chunk.positions.push(data.positions[i]);
                        if let Some(normal) = data.normals.get(i) {
                            chunk.normals.push(*normal);
                        }
                        (chunk.positions.len() - 1) as u32
                    });
                    chunk.indices.push(mapped);
                }
            } else {
                kept.extend_from_slice(face);
            }
        }

        if let Some(source) = self.nodes.get_mut(mesh) {
            if let Some(data) = source.mesh.as_mut() {
                data.indices = kept;
            }
        }

        let new_transform = self.add_mesh_object(name, chunk);
        let grandparent = transform
            .and_then(|t| self.nodes.get(&t))
            .and_then(|t| t.parents.first().copied());
        if let Some(parent) = grandparent {
            self.link(new_transform, parent);
        }

        self.journal.push(SceneOp::SplitMesh {
            mesh: *mesh,
            chunk: new_transform,
        });
        Ok(new_transform)
    }

    fn assign_shading_group(
        &mut self,
        members: &[NodeHandle],
        group: &NodeHandle,
    ) -> SceneResult<()> {
        self.check(OpKind::AssignShadingGroup)?;
        if self.node(group)?.kind != NodeKind::ShadingGroup {
            return Err(SceneError::InvalidOperation(format!(
                "{group} is not a shading group"
            )));
        }
        for member in members {
            self.node(member)?;
        }

        for node in self.nodes.values_mut() {
            if node.kind == NodeKind::ShadingGroup {
                node.members.retain(|m| !members.contains(m));
            }
        }
        self.node_mut(group)?.members.extend_from_slice(members);

        self.journal.push(SceneOp::AssignShadingGroup {
            members: members.to_vec(),
            group: *group,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_nodes_exist() {
        let scene = MemoryScene::new();
        for list in DEFAULT_LISTS {
            assert!(scene.find_node(list).is_ok());
        }
        let sg = scene.find_node(DEFAULT_SHADING_GROUP).unwrap();
        assert_eq!(scene.get(sg).unwrap().kind, NodeKind::ShadingGroup);
        assert!(scene.journal().is_empty());
    }

    #[test]
    fn test_names_are_made_unique() {
        let mut scene = MemoryScene::new();
        let a = scene.create_empty_group("agent").unwrap();
        let b = scene.create_empty_group("agent").unwrap();
        let c = scene.create_empty_group("agent").unwrap();
        assert_eq!(scene.get(a).unwrap().name, "agent");
        assert_eq!(scene.get(b).unwrap().name, "agent1");
        assert_eq!(scene.get(c).unwrap().name, "agent2");
    }

    #[test]
    fn test_attr_suffix() {
        assert_eq!(attr_suffix("weightList", "weightList"), Some(""));
        assert_eq!(attr_suffix("weightList[3].weights[1]", "weightList"), Some("[3].weights[1]"));
        assert_eq!(attr_suffix("weightListExtra", "weightList"), None);
    }

    #[test]
    fn test_injected_failure_is_consumed() {
        let mut scene = MemoryScene::new();
        scene.fail_next(OpKind::CreateGroup);
        assert!(matches!(
            scene.create_empty_group("a"),
            Err(SceneError::Backend(_))
        ));
        assert!(scene.create_empty_group("a").is_ok());
        assert_eq!(scene.count(OpKind::CreateGroup), 1);
    }
}
