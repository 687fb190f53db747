use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Where a stream of text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl InputSource {
    /// `-` stands for standard input.
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            InputSource::Stdin
        } else {
            InputSource::File(path.to_path_buf())
        }
    }

    /// Gzip is detected from the extension only, so piped gzip data has to be
    /// decompressed before it reaches stdin.
    pub fn is_gzipped(&self) -> bool {
        match self {
            InputSource::Stdin => false,
            InputSource::File(path) => path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("gz"))
                .unwrap_or(false),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

pub fn open_input(source: &InputSource) -> Result<Box<dyn BufRead>> {
    match source {
        InputSource::Stdin => Ok(Box::new(BufReader::new(std::io::stdin()))),
        InputSource::File(path) => {
            let file = File::open(path)
                .with_context(|| format!("Error opening file '{}'", path.display()))?;
            if source.is_gzipped() {
                log::debug!("Decompressing '{}' as gzip", path.display());
                Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
            } else {
                Ok(Box::new(BufReader::new(file)))
            }
        }
    }
}
