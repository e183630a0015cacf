use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::record;

/// The text file backing one model: one entity per line, no header.
#[derive(Debug, Clone)]
pub struct FlatFile {
    path: PathBuf,
}

impl FlatFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FlatFile { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every line of the file. A file that does not exist yet reads as empty.
    pub fn read_lines(&self) -> io::Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents.lines().map(str::to_string).collect()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err),
        }
    }

    /// Replace the whole file. Lines are written to a sibling temporary file
    /// first and renamed over the original.
    pub fn write_lines(&self, lines: &[String]) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let mut contents = String::new();
        for line in lines {
            contents.push_str(line);
            contents.push('\n');
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("model"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Index of the first line whose leading field is exactly `id`.
    pub fn position(lines: &[String], id: &str) -> Option<usize> {
        lines.iter().position(|line| record::leading_id(line) == id)
    }

    /// Drop every line whose leading field is exactly `id`; returns how many.
    pub fn remove_all(lines: &mut Vec<String>, id: &str) -> usize {
        let before = lines.len();
        lines.retain(|line| record::leading_id(line) != id);
        before - lines.len()
    }
}
