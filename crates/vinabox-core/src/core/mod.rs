//! # Core Module
//!
//! Stateless building blocks for docking-box preparation: the atom record model, fixed-column
//! structure I/O, residue selection, box geometry and rigid recentering.
//!
//! - **Records** ([`models`]) - Borrowed atom records and residue identifiers
//! - **File I/O** ([`io`]) - PDB/PDBQT text, engine configuration files, score tables and
//!   receptor cleaning
//! - **Selection** ([`selection`]) - Picking the atoms of named residues
//! - **Geometry** ([`utils::geometry`]) - Padded bounding boxes and centroids
//! - **Recentering** ([`transform`]) - Moving a ligand onto a box center

pub mod io;
pub mod models;
pub mod selection;
pub mod transform;
pub mod utils;
