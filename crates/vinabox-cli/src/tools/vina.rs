use super::{require_output, run_tool};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;
use vinabox::engine::services::{PoseSearchRequest, PoseSearcher, ServiceError};

/// AutoDock Vina command-line driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vina {
    program: PathBuf,
    cpu: Option<usize>,
}

impl Vina {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            cpu: None,
        }
    }

    /// Caps the CPUs each search may use; Vina picks on its own otherwise.
    pub fn with_cpu(mut self, cpu: Option<usize>) -> Self {
        self.cpu = cpu;
        self
    }

    fn command(&self, request: &PoseSearchRequest<'_>) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("--receptor")
            .arg(request.receptor)
            .arg("--ligand")
            .arg(request.ligand)
            .arg("--config")
            .arg(request.config)
            .arg("--out")
            .arg(request.output);
        if let Some(cpu) = self.cpu {
            command.arg("--cpu").arg(cpu.to_string());
        }
        command
    }
}

impl Default for Vina {
    fn default() -> Self {
        Self::new("vina")
    }
}

impl PoseSearcher for Vina {
    fn search_poses(&self, request: &PoseSearchRequest<'_>) -> Result<PathBuf, ServiceError> {
        let output = run_tool(&self.program, &mut self.command(request))?;
        debug!("{}", String::from_utf8_lossy(&output.stdout));
        require_output(&self.program, request.output)?;
        Ok(request.output.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;
    use std::path::Path;

    fn request<'a>(output: &'a Path) -> PoseSearchRequest<'a> {
        PoseSearchRequest {
            receptor: Path::new("rec.pdbqt"),
            ligand: Path::new("lig.pdbqt"),
            config: Path::new("vina_config.txt"),
            output,
        }
    }

    #[test]
    fn command_lists_inputs_then_optional_cpu() {
        let out = Path::new("results/lig_out.pdbqt");
        let plain = Vina::default().command(&request(out));
        let args: Vec<&OsStr> = plain.get_args().collect();
        assert_eq!(
            args,
            [
                "--receptor",
                "rec.pdbqt",
                "--ligand",
                "lig.pdbqt",
                "--config",
                "vina_config.txt",
                "--out",
                "results/lig_out.pdbqt"
            ]
        );

        let capped = Vina::default().with_cpu(Some(4)).command(&request(out));
        let tail: Vec<&OsStr> = capped.get_args().skip(8).collect();
        assert_eq!(tail, ["--cpu", "4"]);
    }

    #[cfg(unix)]
    #[test]
    fn successful_exit_without_pose_file_is_missing_output() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("lig_out.pdbqt");
        let err = Vina::new("true").search_poses(&request(&out)).unwrap_err();
        assert!(matches!(err, ServiceError::MissingOutput { ref path, .. } if *path == out));
    }

    #[cfg(unix)]
    #[test]
    fn failing_search_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("lig_out.pdbqt");
        let err = Vina::new("false").search_poses(&request(&out)).unwrap_err();
        assert!(matches!(err, ServiceError::Failed { ref tool, .. } if tool == "false"));
    }
}
