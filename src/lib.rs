#![warn(rust_2018_idioms)]

//! Trivalent graphs as rotation systems, with local rewrite
//! moves, an isomorphism test and canonical forms.

pub mod canonical;
pub mod census;
pub mod colour;
pub mod debug;
pub mod faces;
pub mod graph;
pub mod isomorphism;
pub mod moves;
pub mod parser;

pub use debug::{Error, InputError, InvariantViolation};
pub use graph::{Dart, Edge, EdgeId, EdgeSpec, Graph, Orientation, Side, VertexIndex};
pub use moves::{Move, MoveKind};
