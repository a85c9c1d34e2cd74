use anyhow::{bail, Result};
use log::debug;

use super::record::Record;
use crate::util::window::Window;

/// 相对坐标的闭区间过滤 `[start, stop]`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PositionFilter {
    pub start: i64,
    pub stop: i64,
}

impl PositionFilter {
    pub fn new(start: i64, stop: i64) -> Result<Self> {
        if start > stop {
            bail!("--start ({}) must not be greater than --stop ({})", start, stop);
        }
        Ok(Self { start, stop })
    }

    /// Both bounds or neither; a lone bound is rejected.
    pub fn from_bounds(start: Option<i64>, stop: Option<i64>) -> Result<Option<Self>> {
        match (start, stop) {
            (None, None) => Ok(None),
            (Some(start), Some(stop)) => Self::new(start, stop).map(Some),
            (Some(_), None) => bail!("--start requires --stop"),
            (None, Some(_)) => bail!("--stop requires --start"),
        }
    }

    #[inline]
    pub fn contains(&self, pos: i64) -> bool {
        self.start <= pos && pos <= self.stop
    }
}

/// Shift every record to gene-relative coordinates, then drop the ones
/// outside `filter`.
pub fn remap(mut records: Vec<Record>, window: Window, filter: Option<PositionFilter>) -> Vec<Record> {
    for rec in &mut records {
        rec.position = window.relative(rec.position);
    }
    if let Some(f) = filter {
        let before = records.len();
        records.retain(|r| f.contains(r.position));
        debug!(
            "position filter [{}, {}] kept {} of {} bases",
            f.start,
            f.stop,
            records.len(),
            before
        );
    }
    records
}
