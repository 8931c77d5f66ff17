//! Reading a file into lines and writing the buffer back.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::SaveMode;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FileError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Write { path, .. } => path,
        }
    }
}

/// Split file contents into lines, dropping trailing `\r` and `\n` bytes
/// from each.
pub fn split_lines(bytes: &[u8]) -> Vec<Vec<u8>> {
    if bytes.is_empty() {
        return Vec::new();
    }
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    body.split(|&b| b == b'\n')
        .map(|line| {
            let end = line
                .iter()
                .rposition(|&b| b != b'\r' && b != b'\n')
                .map_or(0, |idx| idx + 1);
            line[..end].to_vec()
        })
        .collect()
}

/// Read `path` as lines. A missing file yields `Ok(None)`.
pub fn read_lines(path: &Path) -> Result<Option<Vec<Vec<u8>>>, FileError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(split_lines(&bytes))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(FileError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Write `bytes` to `path`, returning the number of bytes written.
pub fn write_buffer(path: &Path, bytes: &[u8], mode: SaveMode) -> Result<usize, FileError> {
    let wrap = |source| FileError::Write {
        path: path.to_path_buf(),
        source,
    };
    match mode {
        SaveMode::InPlace => write_in_place(path, bytes).map_err(wrap)?,
        SaveMode::Atomic => write_atomic(path, bytes).map_err(wrap)?,
    }
    Ok(bytes.len())
}

fn write_in_place(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.read(true).write(true).create(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }
    let mut file = options.open(path)?;
    file.set_len(bytes.len() as u64)?;
    file.write_all(bytes)?;
    file.flush()
}

fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}
