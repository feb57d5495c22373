use std::io;
use std::path::{Path, PathBuf};

/// Lists the regular files in `dir` whose names end with `suffix`, sorted by path.
///
/// The listing is not recursive. Sorting keeps batch processing order stable across
/// platforms and runs.
pub fn list_files_with_suffix(dir: &Path, suffix: &str) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(suffix));
        if matches && entry.file_type()?.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn lists_only_matching_files_in_sorted_order() {
        let dir = tempdir().unwrap();
        for name in ["b.pdbqt", "a.pdbqt", "notes.txt", "c_out.pdbqt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("nested.pdbqt")).unwrap();

        let files = list_files_with_suffix(dir.path(), ".pdbqt").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.pdbqt", "b.pdbqt", "c_out.pdbqt"]);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = list_files_with_suffix(&dir.path().join("absent"), ".pdbqt");
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
    }
}
