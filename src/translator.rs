//! Translator: scene tree → flat, bottom-up arrays for a shader.
//!
//! The tree is walked once, depth-first and preorder. Every node visited
//! gets the next index (starting at 1) and remembers its parent's index and
//! kind. Preorder puts each node before its whole subtree, so reversing the
//! visit list puts each node after its whole subtree: a children-before-
//! parents order that a shader can consume in a single forward loop, folding
//! each value into its parent's accumulator.
//!
//! The emitted [`LinearScene`] is a set of parallel arrays:
//!
//! ```text
//! indices          [u32]  1-based preorder index, bottom-up order
//! kind_ids         [u32]  NodeKind id
//! parent_indices   [u32]  0 for the root
//! parent_kind_ids  [u32]  Union for the root (implicit outer accumulator)
//! geometry_data    [f64]  concatenated payloads, rounded
//! payload_lengths  [u32]  floats per node in geometry_data
//! reduction_seeds  [f64]  N + 1 seeds addressed by index; slot 0 = outer
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::TranslatorConfig;
use crate::error::TranslateError;
use crate::math::{round_to, row_major};
use crate::node::{CombinatorOp, ModifierOp, Node, Primitive};

// ---------------------------------------------------------------------------
// Kind registry
// ---------------------------------------------------------------------------

/// Node kinds known to the shader, with their stable numeric ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum NodeKind {
    Sphere = 100,
    Box = 101,
    Torus = 102,
    Cylinder = 103,
    Lattice = 104,
    Union = 200,
    Intersection = 201,
    SmoothUnion = 202,
    Shell = 300,
}

impl NodeKind {
    pub const ALL: [NodeKind; 9] = [
        NodeKind::Sphere,
        NodeKind::Box,
        NodeKind::Torus,
        NodeKind::Cylinder,
        NodeKind::Lattice,
        NodeKind::Union,
        NodeKind::Intersection,
        NodeKind::SmoothUnion,
        NodeKind::Shell,
    ];

    pub fn id(self) -> u32 {
        self as u32
    }

    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Sphere => "Sphere",
            NodeKind::Box => "Box",
            NodeKind::Torus => "Torus",
            NodeKind::Cylinder => "Cylinder",
            NodeKind::Lattice => "Lattice",
            NodeKind::Union => "Union",
            NodeKind::Intersection => "Intersection",
            NodeKind::SmoothUnion => "Smooth Union",
            NodeKind::Shell => "Shell",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<CombinatorOp> for NodeKind {
    fn from(op: CombinatorOp) -> Self {
        match op {
            CombinatorOp::Union => NodeKind::Union,
            CombinatorOp::Intersection => NodeKind::Intersection,
            CombinatorOp::SmoothUnion { .. } => NodeKind::SmoothUnion,
        }
    }
}

/// Wire kind and raw (unrounded) payload of a node, or `None` when the node
/// has no shader encoding.
///
/// Frame-bearing primitives append their inverse frame matrix, row-major.
/// Box sizes are emitted as full edge lengths.
fn encode(node: &Node) -> Option<(NodeKind, Vec<f64>)> {
    let encoded = match node {
        Node::Primitive(primitive) => {
            let (kind, mut data) = match primitive {
                Primitive::Sphere { center, radius } => {
                    (NodeKind::Sphere, vec![center.x, center.y, center.z, *radius])
                }
                Primitive::Box { half_extents, radius, .. } => {
                    let size = half_extents * 2.0;
                    (NodeKind::Box, vec![size.x, size.y, size.z, *radius])
                }
                Primitive::Torus { major_radius, minor_radius, .. } => {
                    (NodeKind::Torus, vec![*major_radius, *minor_radius])
                }
                Primitive::Cylinder { radius, height, .. } => {
                    (NodeKind::Cylinder, vec![*height, *radius])
                }
                Primitive::Lattice(lattice) => (
                    NodeKind::Lattice,
                    vec![
                        lattice.ltype().index() as f64,
                        lattice.unit_cell(),
                        lattice.thickness(),
                    ],
                ),
            };
            if let Some(frame) = primitive.frame() {
                data.extend(row_major(&frame.inverse_matrix()));
            }
            (kind, data)
        }
        Node::Combinator(combinator) => match combinator.op() {
            CombinatorOp::Union => (NodeKind::Union, Vec::new()),
            CombinatorOp::Intersection => (NodeKind::Intersection, Vec::new()),
            CombinatorOp::SmoothUnion { k } => (NodeKind::SmoothUnion, vec![k]),
        },
        Node::Modifier(modifier) => match modifier.op() {
            ModifierOp::Shell { thickness, side } => (NodeKind::Shell, vec![thickness, side]),
            ModifierOp::MultiShell { .. }
            | ModifierOp::Twist { .. }
            | ModifierOp::Factor { .. }
            | ModifierOp::Sine { .. } => return None,
        },
    };
    Some(encoded)
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One linearized node.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearNode {
    pub index: u32,
    pub kind: NodeKind,
    /// 0 when this node is the root.
    pub parent_index: u32,
    pub parent_kind: NodeKind,
    /// 1 for the root, one more per level below it.
    pub depth_order: u32,
    pub reduction_seed: f64,
    /// Unrounded payload.
    pub geometry_data: Vec<f64>,
}

impl LinearNode {
    pub fn payload_length(&self) -> usize {
        self.geometry_data.len()
    }
}

/// The arrays sent to the shader. All per-node arrays are in bottom-up order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearScene {
    pub indices: Vec<u32>,
    pub kind_ids: Vec<u32>,
    pub parent_indices: Vec<u32>,
    pub parent_kind_ids: Vec<u32>,
    pub geometry_data: Vec<f64>,
    pub payload_lengths: Vec<u32>,
    pub reduction_seeds: Vec<f64>,
}

impl LinearScene {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Payload of the node at array position `position`.
    pub fn payload(&self, position: usize) -> Option<&[f64]> {
        let len = *self.payload_lengths.get(position)? as usize;
        let start: usize = self.payload_lengths[..position].iter().map(|&l| l as usize).sum();
        self.geometry_data.get(start..start + len)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

fn kind_name(id: u32) -> String {
    NodeKind::from_id(id).map_or_else(|| format!("#{id}"), |k| k.name().to_owned())
}

/// Per-node listing, for debugging.
impl fmt::Display for LinearScene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pos in 0..self.len() {
            let payload = self.payload(pos).unwrap_or_default();
            writeln!(
                f,
                "index: {}, id: {}, parent_index: {}, parent_id: {}",
                self.indices[pos],
                kind_name(self.kind_ids.get(pos).copied().unwrap_or_default()),
                self.parent_indices.get(pos).copied().unwrap_or_default(),
                kind_name(self.parent_kind_ids.get(pos).copied().unwrap_or_default()),
            )?;
            writeln!(f, "  data_count: {}", payload.len())?;
            writeln!(f, "  geometry_data: {payload:?}")?;
        }
        write!(f, "reduction_seeds: {:?}", self.reduction_seeds)
    }
}

// ---------------------------------------------------------------------------
// Translator
// ---------------------------------------------------------------------------

/// A linearized scene tree. Built once; rebuild for a changed tree.
#[derive(Clone, Debug)]
pub struct Translator {
    config: TranslatorConfig,
    nodes: Vec<LinearNode>,
    scene: LinearScene,
    diagnostics: Vec<TranslateError>,
}

impl Translator {
    /// Linearize `root` with the default configuration.
    ///
    /// Subtrees rooted at nodes without a shader encoding are logged,
    /// recorded in [`diagnostics`](Self::diagnostics), and left out; they
    /// consume no indices.
    pub fn new(root: &Node) -> Self {
        Self::with_config(root, TranslatorConfig::default())
    }

    pub fn with_config(root: &Node, config: TranslatorConfig) -> Self {
        let mut walk = Walk { config: &config, next_index: 1, visited: Vec::new(), diagnostics: Vec::new() };
        walk.visit(root, 0, NodeKind::Union, 1);
        let Walk { visited, diagnostics, .. } = walk;

        let scene = assemble(&visited, &config);
        let mut nodes = visited;
        nodes.reverse();

        log::debug!(
            "linearized {} nodes ({} floats, {} subtrees skipped)",
            nodes.len(),
            scene.geometry_data.len(),
            diagnostics.len(),
        );
        Self { config, nodes, scene, diagnostics }
    }

    /// Strict variant of [`new`](Self::new): fails on the first node without
    /// a shader encoding.
    pub fn try_new(root: &Node) -> Result<Self, TranslateError> {
        Self::try_with_config(root, TranslatorConfig::default())
    }

    pub fn try_with_config(root: &Node, config: TranslatorConfig) -> Result<Self, TranslateError> {
        let translator = Self::with_config(root, config);
        match translator.diagnostics.first() {
            Some(err) => Err(err.clone()),
            None => Ok(translator),
        }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Linearized records, bottom-up.
    pub fn nodes(&self) -> &[LinearNode] {
        &self.nodes
    }

    pub fn scene(&self) -> &LinearScene {
        &self.scene
    }

    pub fn into_scene(self) -> LinearScene {
        self.scene
    }

    /// Subtrees skipped because their root had no shader encoding.
    pub fn diagnostics(&self) -> &[TranslateError] {
        &self.diagnostics
    }
}

struct Walk<'a> {
    config: &'a TranslatorConfig,
    next_index: u32,
    visited: Vec<LinearNode>,
    diagnostics: Vec<TranslateError>,
}

impl Walk<'_> {
    fn visit(&mut self, node: &Node, parent_index: u32, parent_kind: NodeKind, depth_order: u32) {
        let Some((kind, geometry_data)) = encode(node) else {
            let err = TranslateError::UnknownNodeKind { name: node.name(), parent_index };
            log::warn!("{err}; subtree skipped");
            self.diagnostics.push(err);
            return;
        };

        let index = self.next_index;
        self.next_index += 1;
        log::debug!("visit {kind} index {index} parent {parent_index} order {depth_order}");

        self.visited.push(LinearNode {
            index,
            kind,
            parent_index,
            parent_kind,
            depth_order,
            reduction_seed: self.config.seed_for(kind),
            geometry_data,
        });

        for child in node.children() {
            self.visit(child, index, kind, depth_order + 1);
        }
    }
}

/// Build the shader arrays from the preorder visit list.
fn assemble(preorder: &[LinearNode], config: &TranslatorConfig) -> LinearScene {
    let n = preorder.len();
    let mut scene = LinearScene {
        indices: Vec::with_capacity(n),
        kind_ids: Vec::with_capacity(n),
        parent_indices: Vec::with_capacity(n),
        parent_kind_ids: Vec::with_capacity(n),
        geometry_data: Vec::new(),
        payload_lengths: Vec::with_capacity(n),
        reduction_seeds: Vec::with_capacity(n + 1),
    };

    for node in preorder.iter().rev() {
        scene.indices.push(node.index);
        scene.kind_ids.push(node.kind.id());
        scene.parent_indices.push(node.parent_index);
        scene.parent_kind_ids.push(node.parent_kind.id());
        scene
            .geometry_data
            .extend(node.geometry_data.iter().map(|&v| round_to(v, config.precision)));
        scene.payload_lengths.push(node.payload_length() as u32);
    }

    // Seeds are addressed by index: preorder already lists indices 1..=n.
    scene.reduction_seeds.push(config.union_seed);
    scene.reduction_seeds.extend(preorder.iter().map(|node| node.reduction_seed));
    scene
}
