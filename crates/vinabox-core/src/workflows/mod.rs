//! # Workflows Module
//!
//! The entry points of the library. Each workflow takes a validated configuration from
//! [`engine::config`](crate::engine::config), runs one step of a docking campaign end to end,
//! and returns a report.
//!
//! - **Docking Box** ([`docking_box`]) - Residue selection, padded box and engine config file
//! - **Recentering** ([`recenter`]) - Moving a batch of ligands onto the box center
//! - **Batch Docking** ([`dock`]) - Running the pose searcher over a ligand directory
//! - **Summaries** ([`summarize`]) - Score table and top-ligand viewer script

pub mod dock;
pub mod docking_box;
pub mod recenter;
pub mod summarize;
