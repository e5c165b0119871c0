//! Small undirected graphs and the named polymer topologies.
//!
//! Purpose
//! - `Graph` fixes a stable vertex order at construction; every matrix built
//!   downstream uses that order for rows and columns.
//! - `Topology` is the configuration object for one analysis run: a name, a
//!   description, and labelled edge groups (kept for the report).
//!
//! Code cross-refs: `laplacian::laplacian_matrices`, `factor::analyze`.

pub mod rand;
mod topology;
mod types;

pub use topology::{Topology, TopologyError};
pub use types::{Edge, Graph};

#[cfg(test)]
mod tests;
