pub mod record;
pub mod remap;
pub mod select;
pub mod table;

pub use record::{parse_records, read_records, sample_id, ParseStats, Record};
pub use remap::{remap, PositionFilter};
pub use select::SampleSelection;
pub use table::{AlignmentTable, Collapse, Matrix, ParalogSentinel, COLLAPSED_BASE, COLLAPSED_CODE};

use anyhow::{bail, Result};
use log::info;
use std::path::PathBuf;

use crate::config::{PlotOpt, SampleSource};
use crate::io::samples::read_sample_file;
use crate::plot;

/// 解析样本来源：显式列表在这里读取文件
pub fn resolve_selection(source: &SampleSource) -> Result<SampleSelection> {
    Ok(match source {
        SampleSource::All => SampleSelection::All,
        SampleSource::File(path) => SampleSelection::Explicit(read_sample_file(path)?),
        SampleSource::Random { fraction, seed } => {
            SampleSelection::Random { fraction: *fraction, seed: *seed }
        }
    })
}

/// FASTA -> records -> relative coordinates -> table -> selected rows.
pub fn build_table(opt: &PlotOpt) -> Result<AlignmentTable> {
    let selection = resolve_selection(&opt.samples)?;

    let (records, stats) = read_records(&opt.input)?;
    stats.report(&opt.input.display().to_string());

    let records = remap(records, opt.window, opt.filter);
    if records.is_empty() {
        bail!("no sequence data to plot in '{}'", opt.input.display());
    }

    let table = AlignmentTable::build(records, &ParalogSentinel);
    info!(
        "alignment table: {} samples x {} positions ({}..={})",
        table.nrows(),
        table.ncols(),
        table.positions().first().copied().unwrap_or_default(),
        table.positions().last().copied().unwrap_or_default()
    );
    selection.apply(table)
}

/// Build the table and render it. Nothing is written unless both succeed.
pub fn plot_alignment(opt: &PlotOpt) -> Result<PathBuf> {
    let table = build_table(opt)?;
    let path = opt.output_path();
    plot::render_to_file(&table, opt.window, &opt.render, &path)?;
    Ok(path)
}
