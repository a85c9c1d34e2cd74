use anyhow::{Context, Result};
use log::{debug, warn};
use std::io::BufRead;
use std::path::Path;

use crate::io::fasta::FastaReader;
use crate::util::dna::{self, Code};

/// One base of one sequence. `code` is `None` for N, never zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub sample: String,
    pub position: i64,
    pub base: u8,
    pub code: Option<Code>,
}

/// 解析过程中的计数，用于审计被静默归一化的输入
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub sequences: usize,
    pub records: usize,
    /// 非 A/C/G/T/N 字符被替换为 N 的次数
    pub normalized: usize,
    /// 第一个 header 之前的序列行（被丢弃）
    pub orphan_lines: usize,
}

impl ParseStats {
    pub fn report(&self, source: &str) {
        debug!(
            "{}: {} sequences, {} bases",
            source, self.sequences, self.records
        );
        if self.normalized > 0 {
            warn!(
                "{}: {} characters outside A/C/G/T/N were treated as N",
                source, self.normalized
            );
        }
        if self.orphan_lines > 0 {
            warn!(
                "{}: ignored {} sequence lines before the first header",
                source, self.orphan_lines
            );
        }
    }
}

/// Sample id of a FASTA header: the text before the first ':' and then
/// before the first '_'. `s12_2:100-330(+)` gives `s12`.
pub fn sample_id(header: &str) -> &str {
    let head = header.split(':').next().unwrap_or_default();
    head.split('_').next().unwrap_or_default()
}

/// Flatten every sequence into per-base records, positions 0-based.
pub fn parse_records<R: BufRead>(reader: R) -> Result<(Vec<Record>, ParseStats)> {
    let mut reader = FastaReader::new(reader);
    let mut records = Vec::new();
    let mut stats = ParseStats::default();

    while let Some(rec) = reader.next_record()? {
        stats.sequences += 1;
        let sample = sample_id(&rec.header);
        records.reserve(rec.seq.len());
        for (i, &c) in rec.seq.iter().enumerate() {
            let base = dna::normalize_base(c);
            if base == b'N' && c != b'N' {
                stats.normalized += 1;
            }
            records.push(Record {
                sample: sample.to_string(),
                position: i as i64,
                base,
                code: dna::to_code(base),
            });
        }
    }

    stats.records = records.len();
    stats.orphan_lines = reader.orphan_lines();
    Ok((records, stats))
}

pub fn read_records(path: &Path) -> Result<(Vec<Record>, ParseStats)> {
    let reader = crate::io::open_buffered(path, "FASTA file")?;
    parse_records(reader).with_context(|| format!("cannot read FASTA file '{}'", path.display()))
}
