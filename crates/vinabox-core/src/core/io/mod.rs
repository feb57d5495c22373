//! Readers and writers for the text formats that flow through a docking run.
//!
//! Structure files are handled as fixed-column text so that untouched bytes survive a
//! read/modify/write cycle exactly. Engine configurations and score tables have their own
//! small formats.

pub mod cleaning;
pub mod pdbqt;
pub mod scores;
pub mod traits;
pub mod vina_config;
