use anyhow::{bail, Result};
use log::info;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use super::table::AlignmentTable;

/// 选择要绘制哪些样本（行）
#[derive(Debug, Clone, PartialEq)]
pub enum SampleSelection {
    /// 全部样本，按出现顺序
    All,
    /// 显式列表，输出严格按列表顺序；列表中的样本必须存在
    Explicit(Vec<String>),
    /// 按比例无放回随机抽样，`fraction` 取值 (0, 1]
    Random { fraction: f64, seed: u64 },
}

impl SampleSelection {
    pub fn apply(&self, table: AlignmentTable) -> Result<AlignmentTable> {
        let selected = match self {
            SampleSelection::All => table,
            SampleSelection::Explicit(ids) => {
                let mut rows = Vec::with_capacity(ids.len());
                for id in ids {
                    match table.sample_index(id) {
                        Some(r) => rows.push(r),
                        None => bail!("requested sample '{}' is not present in the alignment", id),
                    }
                }
                table.select_rows(&rows)
            }
            SampleSelection::Random { fraction, seed } => {
                let rows = random_rows(table.nrows(), *fraction, *seed);
                info!(
                    "randomly picked {} of {} samples (seed {})",
                    rows.len(),
                    table.nrows(),
                    seed
                );
                table.select_rows(&rows)
            }
        };
        if selected.nrows() == 0 {
            bail!("sample selection left no samples to plot");
        }
        Ok(selected)
    }
}

/// `round(fraction * n)` distinct row indices, returned in ascending order.
fn random_rows(n: usize, fraction: f64, seed: u64) -> Vec<usize> {
    let k = ((fraction * n as f64).round() as usize).min(n);
    let all: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows: Vec<usize> = all.choose_multiple(&mut rng, k).copied().collect();
    rows.sort_unstable();
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aln::record::parse_records;
    use crate::aln::table::ParalogSentinel;
    use std::io::Cursor;

    fn table() -> AlignmentTable {
        let fasta = ">s1\nAC\n>s2\nGT\n>s3\nCA\n>s4\nTT\n>s5\nGG\n>s6\nAA\n>s7\nCC\n>s8\nTG\n";
        let (recs, _) = parse_records(Cursor::new(fasta.as_bytes())).unwrap();
        AlignmentTable::build(recs, &ParalogSentinel)
    }

    #[test]
    fn all_keeps_encounter_order() {
        let t = SampleSelection::All.apply(table()).unwrap();
        assert_eq!(t.samples()[0], "s1");
        assert_eq!(t.nrows(), 8);
    }

    #[test]
    fn explicit_list_sets_exact_order() {
        let sel = SampleSelection::Explicit(vec!["s3".into(), "s1".into(), "s8".into()]);
        let t = sel.apply(table()).unwrap();
        assert_eq!(t.samples(), ["s3", "s1", "s8"]);
        assert_eq!(t.bases().row(0), [Some(b'C'), Some(b'A')]);
        assert_eq!(t.bases().row(1), [Some(b'A'), Some(b'C')]);
    }

    #[test]
    fn unknown_sample_is_fatal() {
        let sel = SampleSelection::Explicit(vec!["s1".into(), "nope".into()]);
        let err = sel.apply(table()).unwrap_err();
        assert!(err.to_string().contains("'nope'"));
    }

    #[test]
    fn random_is_reproducible_with_seed() {
        let sel = SampleSelection::Random { fraction: 0.5, seed: 7 };
        let a = sel.apply(table()).unwrap();
        let b = sel.apply(table()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.nrows(), 4);
        // each row still carries its own sample's bases
        let full = table();
        for (r, s) in a.samples().iter().enumerate() {
            let src = full.sample_index(s).unwrap();
            assert_eq!(a.bases().row(r), full.bases().row(src));
            assert_eq!(a.codes().row(r), full.codes().row(src));
        }
    }

    #[test]
    fn random_rows_are_distinct_and_sorted() {
        let rows = random_rows(100, 0.3, 42);
        assert_eq!(rows.len(), 30);
        assert!(rows.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(random_rows(10, 1.0, 1), (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn selection_that_leaves_nothing_is_an_error() {
        let sel = SampleSelection::Random { fraction: 0.01, seed: 3 };
        assert!(sel.apply(table()).is_err());
    }
}
