//! Signed distance fields for volumetric CSG trees.
//!
//! Build a scene tree of primitives, combinators and modifiers with the
//! constructors on [`Node`], evaluate it point by point or in batches, and
//! flatten it with [`Translator`] into bottom-up arrays for a raymarching
//! shader.

pub mod builder;
pub mod config;
pub mod csg;
pub mod error;
pub mod frame;
pub mod grid;
pub mod lattice;
pub mod math;
pub mod modifiers;
pub mod node;
pub mod primitives;
pub mod translator;

pub use config::TranslatorConfig;
pub use error::{ConfigError, Error, FrameError, Result, SceneError, TranslateError};
pub use frame::Frame;
pub use grid::SampleGrid;
pub use lattice::{Lattice, LatticeType};
pub use node::{Combinator, CombinatorOp, Modifier, ModifierOp, Node, Primitive, Sdf};
pub use translator::{LinearNode, LinearScene, NodeKind, Translator};
