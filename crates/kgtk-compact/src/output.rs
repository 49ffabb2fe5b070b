//! Output destinations for the CLI.
//!
//! File output goes to a temp file in the destination directory and is renamed
//! into place only on [`Output::commit`], so a failed run never leaves a
//! truncated file behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

pub(crate) enum Output {
    Stdout(io::Stdout),
    File { dest: PathBuf, tmp: NamedTempFile },
}

fn parent_dir_or_dot(path: &Path) -> &Path {
    // `Path::parent` is `Some("")` for bare file names.
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

impl Output {
    /// `-` selects stdout.
    pub(crate) fn create(path: &Path) -> io::Result<Self> {
        if path == Path::new("-") {
            return Ok(Output::Stdout(io::stdout()));
        }
        let dir = parent_dir_or_dot(path);
        fs::create_dir_all(dir)?;
        let tmp = NamedTempFile::new_in(dir)?;
        Ok(Output::File {
            dest: path.to_path_buf(),
            tmp,
        })
    }

    pub(crate) fn commit(self) -> io::Result<()> {
        match self {
            Output::Stdout(mut stdout) => stdout.flush(),
            Output::File { dest, mut tmp } => {
                tmp.flush()?;
                tmp.as_file().sync_all()?;
                tmp.persist(&dest).map_err(|err| err.error)?;
                log::debug!("wrote {}", dest.display());
                Ok(())
            }
        }
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(stdout) => stdout.write(buf),
            Output::File { tmp, .. } => tmp.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(stdout) => stdout.flush(),
            Output::File { tmp, .. } => tmp.flush(),
        }
    }
}
