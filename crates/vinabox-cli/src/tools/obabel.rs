use super::{require_output, run_tool, tool_name};
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::info;
use vinabox::core::io::cleaning::strip_torsion_tags;
use vinabox::engine::services::{FormatConverter, ServiceError, StructurePreparer};

/// Physiological pH used when protonating receptors.
const PROTONATION_PH: &str = "7.4";
const SPLIT_PREFIX: &str = "ligand_";

/// Open Babel, used for receptor protonation and ligand splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenBabel {
    program: PathBuf,
}

impl OpenBabel {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn io_error(&self, source: std::io::Error) -> ServiceError {
        ServiceError::Io {
            tool: tool_name(&self.program),
            source,
        }
    }
}

impl StructurePreparer for OpenBabel {
    /// Adds hydrogens at pH 7.4 with Gasteiger charges, then removes the ligand torsion
    /// tree records Open Babel emits, which a rigid receptor must not carry.
    fn prepare_structure(&self, input: &Path, output: &Path) -> Result<PathBuf, ServiceError> {
        run_tool(
            &self.program,
            Command::new(&self.program)
                .arg(input)
                .arg("-O")
                .arg(output)
                .args(["-xh", "-p", PROTONATION_PH, "--partialcharge", "gasteiger"]),
        )?;
        require_output(&self.program, output)?;

        let text = std::fs::read_to_string(output).map_err(|e| self.io_error(e))?;
        std::fs::write(output, strip_torsion_tags(&text)).map_err(|e| self.io_error(e))?;
        info!(path = %output.display(), "Receptor prepared.");
        Ok(output.to_path_buf())
    }
}

impl FormatConverter for OpenBabel {
    fn convert_format(
        &self,
        input: &Path,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, ServiceError> {
        std::fs::create_dir_all(output_dir).map_err(|e| self.io_error(e))?;
        let pattern = output_dir.join(format!("{SPLIT_PREFIX}.pdbqt"));
        run_tool(
            &self.program,
            Command::new(&self.program)
                .arg("-isdf")
                .arg(input)
                .arg("-O")
                .arg(&pattern)
                .arg("-m"),
        )?;

        let mut produced: Vec<PathBuf> = std::fs::read_dir(output_dir)
            .map_err(|e| self.io_error(e))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .is_some_and(|n| n.starts_with(SPLIT_PREFIX) && n.ends_with(".pdbqt"))
            })
            .collect();
        produced.sort();

        if produced.is_empty() {
            return Err(ServiceError::MissingOutput {
                tool: tool_name(&self.program),
                path: pattern,
            });
        }
        info!(ligands = produced.len(), dir = %output_dir.display(), "Ligands converted.");
        Ok(produced)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    /// Writes an executable shell script standing in for `obabel`.
    fn fake_obabel(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("obabel");
        std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[test]
    fn prepare_strips_torsion_records_from_the_output() {
        let dir = tempdir().unwrap();
        // Arguments: <input> -O <output> ...
        let program = fake_obabel(
            dir.path(),
            "printf 'ROOT\\nATOM      1  N   ALA A   1       0.000   0.000   0.000\\nENDROOT\\nTORSDOF 0\\n' > \"$3\"",
        );
        let input = dir.path().join("rec_clean.pdb");
        std::fs::write(&input, "END\n").unwrap();
        let output = dir.path().join("rec_prepped.pdbqt");

        let prepared = OpenBabel::new(&program)
            .prepare_structure(&input, &output)
            .unwrap();

        assert_eq!(prepared, output);
        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("ATOM      1"));
        assert!(!text.contains("ROOT") && !text.contains("TORSDOF"));
    }

    #[test]
    fn prepare_without_output_file_is_missing_output() {
        let dir = tempdir().unwrap();
        let program = fake_obabel(dir.path(), "exit 0");
        let err = OpenBabel::new(&program)
            .prepare_structure(&dir.path().join("in.pdb"), &dir.path().join("out.pdbqt"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::MissingOutput { ref tool, .. } if tool == "obabel"));
    }

    #[test]
    fn convert_returns_split_files_in_order() {
        let dir = tempdir().unwrap();
        let out_dir = dir.path().join("pdbqt_files");
        // Arguments: -isdf <input> -O <dir>/ligand_.pdbqt -m
        let program = fake_obabel(
            dir.path(),
            "d=$(dirname \"$4\"); for i in 2 1 3; do echo END > \"$d/ligand_$i.pdbqt\"; done; echo x > \"$d/notes.txt\"",
        );

        let produced = OpenBabel::new(&program)
            .convert_format(&dir.path().join("ligands.sdf"), &out_dir)
            .unwrap();

        let names: Vec<_> = produced
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["ligand_1.pdbqt", "ligand_2.pdbqt", "ligand_3.pdbqt"]);
    }

    #[test]
    fn convert_failure_carries_stderr() {
        let dir = tempdir().unwrap();
        let program = fake_obabel(dir.path(), "echo 'cannot read input' >&2; exit 1");
        let err = OpenBabel::new(&program)
            .convert_format(&dir.path().join("missing.sdf"), &dir.path().join("out"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Failed { ref stderr, .. } if stderr == "cannot read input"));
    }
}
