//! # vinabox Core Library
//!
//! Geometry and file plumbing for protein-ligand docking campaigns: find the atoms of a
//! binding site in a receptor, wrap them in a padded search box, move ligands onto the box
//! center, and collect the docking scores afterwards.
//!
//! Structure files are treated as fixed-column text. Only the coordinate columns are ever
//! rewritten, so every other byte of a file survives a run unchanged.
//!
//! ## Layers
//!
//! - **[`core`]** - Atom records, fixed-column I/O, residue selection and geometry. Stateless.
//! - **[`engine`]** - Workflow configuration, the shared error type, progress reporting and
//!   the traits through which external programs (structure preparation, format conversion,
//!   pose search) are called.
//! - **[`workflows`]** - One function per pipeline step, built from the two layers above.

pub mod core;
pub mod engine;
pub mod workflows;
