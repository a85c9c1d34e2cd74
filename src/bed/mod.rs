//! 基因表 -> 每个基因一个 BED 文件。
//!
//! 区间与比对图使用同一个 [`Window`]：正链取基因起点两侧，负链取基因终点两侧。

use anyhow::{Context, Result};
use log::{info, warn};
use std::collections::HashSet;

use crate::config::BedOpt;
use crate::io::bed::{bed_path, write_bed_file, BedRecord};
use crate::io::genes::{read_genes_file, GeneRow};
use crate::util::window::Window;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Strand::Forward),
            "-" => Some(Strand::Reverse),
            _ => None,
        }
    }
}

/// Half-open flanking interval of a gene.
///
/// - forward: `[start - upstream, start + downstream)`
/// - reverse: `[end - downstream, end + upstream)`
pub fn flank_interval(strand: Strand, start: i64, end: i64, window: Window) -> (i64, i64) {
    let up = i64::from(window.upstream);
    let down = i64::from(window.downstream);
    match strand {
        Strand::Forward => (start - up, start + down),
        Strand::Reverse => (end - down, end + up),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BedSummary {
    /// Distinct BED files on disk after the run.
    pub written: usize,
    pub skipped: usize,
    /// Locus tags seen more than once; the later row replaced the file.
    pub collisions: usize,
}

/// BED record for one gene row, or `None` (with a warning) when the row
/// cannot produce an interval.
pub fn gene_to_bed(gene: &GeneRow, chrom: &str, window: Window) -> Option<BedRecord> {
    if gene.locus_tag.is_empty() {
        warn!("skipping gene '{}' without a locus tag", gene.gene_name);
        return None;
    }
    let Some(strand) = Strand::parse(&gene.strand) else {
        warn!("skipping {}: unknown strand '{}'", gene.locus_tag, gene.strand);
        return None;
    };

    // 截断的窗口会让坐标与比对图错位，整行跳过
    let (begin, end) = flank_interval(strand, gene.start, gene.end, window);
    if begin < 0 {
        warn!(
            "skipping {}: interval [{}, {}) starts before the chromosome",
            gene.locus_tag, begin, end
        );
        return None;
    }
    Some(BedRecord {
        chrom: chrom.to_string(),
        begin,
        end,
        locus: gene.locus_tag.clone(),
        gene_name: gene.gene_name.clone(),
    })
}

pub fn convert(opt: &BedOpt) -> Result<BedSummary> {
    let genes = read_genes_file(&opt.input)?;
    std::fs::create_dir_all(&opt.output_dir)
        .with_context(|| format!("cannot create output directory '{}'", opt.output_dir.display()))?;

    let mut summary = BedSummary::default();
    let mut seen: HashSet<String> = HashSet::new();
    for gene in &genes {
        let Some(rec) = gene_to_bed(gene, &opt.chromosome, opt.window) else {
            summary.skipped += 1;
            continue;
        };
        if !seen.insert(rec.locus.clone()) {
            summary.collisions += 1;
            warn!(
                "duplicate locus tag {}: {} is overwritten",
                rec.locus,
                bed_path(&opt.output_dir, &rec.locus)?.display()
            );
        }
        write_bed_file(&opt.output_dir, &rec)?;
    }
    summary.written = seen.len();

    info!(
        "{} genes: {} BED files written to {}, {} skipped, {} duplicate locus tags",
        genes.len(),
        summary.written,
        opt.output_dir.display(),
        summary.skipped,
        summary.collisions
    );
    Ok(summary)
}
