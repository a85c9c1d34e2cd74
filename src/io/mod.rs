pub mod bed;
pub mod fasta;
pub mod genes;
pub mod samples;

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Open `path` for buffered reading, naming the file on failure.
pub fn open_buffered(path: &Path, what: &str) -> Result<BufReader<File>> {
    let fh = File::open(path).with_context(|| format!("cannot open {} '{}'", what, path.display()))?;
    Ok(BufReader::new(fh))
}
