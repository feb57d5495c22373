use crate::core::io::pdbqt::{PdbqtError, Structure};
use crate::core::utils::geometry::{centroid, translation_between};
use nalgebra::{Point3, Vector3};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Structure has no atom records with readable coordinates")]
    NoCentroid,
    #[error(transparent)]
    Rewrite(#[from] PdbqtError),
}

/// The outcome of moving a structure onto a target point.
#[derive(Debug, Clone, PartialEq)]
pub struct Recentered {
    /// The moved structure; only coordinate columns differ from the input.
    pub structure: Structure,
    /// The rigid translation that was applied to every atom.
    pub translation: Vector3<f64>,
    /// The centroid of the input atoms.
    pub original_centroid: Point3<f64>,
    /// The number of atom records that were moved.
    pub atom_count: usize,
}

/// Rigidly translates `structure` so that its atom centroid lands on `target`.
///
/// Every valid `ATOM`/`HETATM` record is moved by the same vector, which keeps all
/// interatomic distances. Non-atom lines (`REMARK`, `ROOT`, `BRANCH`, `TORSDOF`, ...) and
/// every column outside the coordinate fields are written back unchanged.
///
/// Because coordinates are written with three decimals, the centroid of the output
/// differs from `target` by at most 0.0005 Angstroms per axis.
///
/// # Errors
///
/// Returns [`TransformError::NoCentroid`] if the structure contains no usable atom records,
/// or [`TransformError::Rewrite`] if a moved coordinate no longer fits its column.
pub fn recenter(structure: &Structure, target: &Point3<f64>) -> Result<Recentered, TransformError> {
    let atoms: Vec<_> = structure.atoms().collect();
    let original_centroid =
        centroid(atoms.iter().map(|atom| atom.position)).ok_or(TransformError::NoCentroid)?;
    let translation = translation_between(&original_centroid, target);

    Ok(Recentered {
        structure: structure.translated(&atoms, &translation)?,
        translation,
        original_centroid,
        atom_count: atoms.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::pdbqt::COORDINATE_COLUMNS;
    use crate::core::io::pdbqt::fixtures::ligand_text;

    fn outside_coordinates(line: &str) -> (String, String) {
        let head = line.get(..COORDINATE_COLUMNS.start).unwrap_or(line).to_string();
        let tail = line.get(COORDINATE_COLUMNS.end..).unwrap_or("").to_string();
        (head, tail)
    }

    #[test]
    fn ligand_centered_at_origin_moves_to_target() {
        let structure = Structure::from_text(&ligand_text(&[
            [-1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 2.0, -2.0],
            [0.0, -2.0, 2.0],
        ]));
        let target = Point3::new(1.0, 2.0, 3.0);
        let result = recenter(&structure, &target).unwrap();

        assert_eq!(result.atom_count, 4);
        assert_eq!(result.original_centroid, Point3::origin());
        assert_eq!(result.translation, Vector3::new(1.0, 2.0, 3.0));

        let moved: Vec<_> = result.structure.atoms().map(|a| a.position).collect();
        assert_eq!(moved[0], Point3::new(0.0, 2.0, 3.0));
        assert_eq!(moved[3], Point3::new(1.0, 0.0, 5.0));

        let new_centroid = centroid(moved).unwrap();
        assert!((new_centroid - target).amax() <= 0.0005);
    }

    #[test]
    fn bytes_outside_coordinate_columns_are_untouched() {
        let structure = Structure::from_text(&ligand_text(&[[3.25, -7.5, 10.0], [4.0, 4.0, 4.0]]));
        let result = recenter(&structure, &Point3::new(-12.345, 0.5, 99.0)).unwrap();

        assert_eq!(structure.lines().len(), result.structure.lines().len());
        for (before, after) in structure.lines().iter().zip(result.structure.lines()) {
            assert_eq!(before.len(), after.len());
            assert_eq!(outside_coordinates(before), outside_coordinates(after));
        }
    }

    #[test]
    fn interatomic_offsets_survive_within_rounding() {
        let coords = [[0.1234, 5.0, -3.3], [2.2, 1.1, 0.0], [-4.0, 0.75, 8.125]];
        let structure = Structure::from_text(&ligand_text(&coords));
        let result = recenter(&structure, &Point3::new(7.77, -8.88, 9.99)).unwrap();

        let before: Vec<_> = structure.atoms().map(|a| a.position).collect();
        let after: Vec<_> = result.structure.atoms().map(|a| a.position).collect();
        let d_before = before[1] - before[0];
        let d_after = after[1] - after[0];
        assert!((d_before - d_after).amax() <= 0.001 + 1e-9);
    }

    #[test]
    fn structure_without_atoms_has_no_centroid() {
        let structure = Structure::from_text("REMARK empty\nROOT\nENDROOT\nTORSDOF 0\n");
        assert!(matches!(
            recenter(&structure, &Point3::origin()),
            Err(TransformError::NoCentroid)
        ));
    }

    #[test]
    fn overflowing_target_is_a_rewrite_error() {
        let structure = Structure::from_text(&ligand_text(&[[0.0, 0.0, 0.0]]));
        let result = recenter(&structure, &Point3::new(123456.0, 0.0, 0.0));
        assert!(matches!(result, Err(TransformError::Rewrite(_))));
    }
}
