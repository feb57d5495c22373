//! # Core Models Module
//!
//! Plain data types shared by every layer of vinabox.
//!
//! - [`atom`] - [`AtomRecord`](atom::AtomRecord), a borrowed view of one `ATOM`/`HETATM`
//!   line with its parsed identity and coordinates, and the [`RecordKind`](atom::RecordKind) tag.
//! - [`ids`] - [`ResidueKey`](ids::ResidueKey), the `(chain, residue number)` pair used
//!   to address residues, together with its `Chain:Number` text syntax.
//!
//! Nothing here interprets chemical bonding; a structure is a list of points labelled by
//! residue.

pub mod atom;
pub mod ids;
