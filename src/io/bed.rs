use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// 五列 BED 记录：染色体、起点、终点（半开区间）、locus tag、基因名
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedRecord {
    pub chrom: String,
    pub begin: i64,
    pub end: i64,
    pub locus: String,
    pub gene_name: String,
}

pub fn write_bed_record<W: Write>(out: &mut W, rec: &BedRecord) -> Result<()> {
    writeln!(
        out,
        "{}\t{}\t{}\t{}\t{}",
        rec.chrom, rec.begin, rec.end, rec.locus, rec.gene_name
    )?;
    Ok(())
}

/// Path of the per-gene file, `<dir>/<locus>.bed`.
pub fn bed_path(dir: &Path, locus: &str) -> Result<PathBuf> {
    if locus.contains(|c: char| c == '/' || c == '\\') {
        bail!("locus tag '{}' contains a path separator and cannot be used as a file name", locus);
    }
    Ok(dir.join(format!("{}.bed", locus)))
}

/// Write `rec` to its own file in `dir`, replacing any previous file.
pub fn write_bed_file(dir: &Path, rec: &BedRecord) -> Result<PathBuf> {
    let path = bed_path(dir, &rec.locus)?;
    let fh = std::fs::File::create(&path)
        .with_context(|| format!("cannot create BED file '{}'", path.display()))?;
    let mut out = std::io::BufWriter::new(fh);
    write_bed_record(&mut out, rec)?;
    out.flush()
        .with_context(|| format!("cannot write BED file '{}'", path.display()))?;
    Ok(path)
}
