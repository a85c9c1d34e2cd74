use indexmap::IndexSet;
use std::collections::{BTreeSet, HashMap};

use super::record::Record;
use crate::util::dna::Code;

/// 旁系同源（同一样本同一位置多条记录）在数值矩阵中的哨兵值，超出 0..=3 正常范围
pub const COLLAPSED_CODE: Code = 99;
/// 旁系同源在碱基矩阵中的占位字符
pub const COLLAPSED_BASE: u8 = b'-';

/// 同一 (sample, position) 格子出现多个值时的合并策略
pub trait Collapse<T> {
    /// `values` is never empty.
    fn collapse(&self, values: &[T]) -> T;
}

/// 单值原样返回；多值一律返回哨兵，绝不挑选其中某一个旁系同源的碱基。
#[derive(Debug, Clone, Copy, Default)]
pub struct ParalogSentinel;

impl Collapse<Option<Code>> for ParalogSentinel {
    fn collapse(&self, values: &[Option<Code>]) -> Option<Code> {
        match values {
            [single] => *single,
            _ => Some(COLLAPSED_CODE),
        }
    }
}

impl Collapse<u8> for ParalogSentinel {
    fn collapse(&self, values: &[u8]) -> u8 {
        match values {
            [single] => *single,
            _ => COLLAPSED_BASE,
        }
    }
}

/// Row-major grid. `None` marks a cell with no record at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix<T> {
    ncols: usize,
    cells: Vec<Option<T>>,
}

impl<T: Copy> Matrix<T> {
    fn empty(nrows: usize, ncols: usize) -> Self {
        Self { ncols, cells: vec![None; nrows * ncols] }
    }

    fn set(&mut self, row: usize, col: usize, v: T) {
        self.cells[row * self.ncols + col] = Some(v);
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.cells[row * self.ncols + col]
    }

    pub fn row(&self, row: usize) -> &[Option<T>] {
        &self.cells[row * self.ncols..(row + 1) * self.ncols]
    }

    pub fn nrows(&self) -> usize {
        if self.ncols == 0 { 0 } else { self.cells.len() / self.ncols }
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    fn take_rows(&self, rows: &[usize]) -> Self {
        let mut cells = Vec::with_capacity(rows.len() * self.ncols);
        for &r in rows {
            cells.extend_from_slice(self.row(r));
        }
        Self { ncols: self.ncols, cells }
    }
}

/// 样本 × 相对坐标的两张平行矩阵。
///
/// - `codes`：数值编码；外层 `None` 表示该格无数据，内层 `None` 表示 N
/// - `bases`：碱基字母
///
/// 两张矩阵共用同一组行（样本）和列（坐标），缺失格位置也完全一致。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentTable {
    samples: Vec<String>,
    positions: Vec<i64>,
    codes: Matrix<Option<Code>>,
    bases: Matrix<u8>,
}

impl AlignmentTable {
    /// Pivot records into the two matrices. Rows follow sample encounter
    /// order, columns are the sorted union of positions.
    pub fn build<C>(records: Vec<Record>, collapse: &C) -> Self
    where
        C: Collapse<Option<Code>> + Collapse<u8>,
    {
        let mut samples: IndexSet<String> = IndexSet::new();
        let mut positions: BTreeSet<i64> = BTreeSet::new();
        let mut groups: HashMap<(usize, i64), (Vec<Option<Code>>, Vec<u8>)> = HashMap::new();

        for rec in records {
            let (row, _) = samples.insert_full(rec.sample);
            positions.insert(rec.position);
            let g = groups.entry((row, rec.position)).or_default();
            g.0.push(rec.code);
            g.1.push(rec.base);
        }

        let positions: Vec<i64> = positions.into_iter().collect();
        let col_of: HashMap<i64, usize> = positions.iter().enumerate().map(|(i, &p)| (p, i)).collect();

        let (nrows, ncols) = (samples.len(), positions.len());
        let mut codes = Matrix::empty(nrows, ncols);
        let mut bases = Matrix::empty(nrows, ncols);
        for ((row, pos), (cs, bs)) in groups {
            let col = col_of[&pos];
            codes.set(row, col, <C as Collapse<Option<Code>>>::collapse(collapse, &cs));
            bases.set(row, col, <C as Collapse<u8>>::collapse(collapse, &bs));
        }

        Self { samples: samples.into_iter().collect(), positions, codes, bases }
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn positions(&self) -> &[i64] {
        &self.positions
    }

    pub fn codes(&self) -> &Matrix<Option<Code>> {
        &self.codes
    }

    pub fn bases(&self) -> &Matrix<u8> {
        &self.bases
    }

    pub fn nrows(&self) -> usize {
        self.samples.len()
    }

    pub fn ncols(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty() || self.positions.is_empty()
    }

    pub fn sample_index(&self, sample: &str) -> Option<usize> {
        self.samples.iter().position(|s| s == sample)
    }

    pub fn column_of(&self, position: i64) -> Option<usize> {
        self.positions.binary_search(&position).ok()
    }

    /// Reindex both matrices to `rows`, in that order.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        Self {
            samples: rows.iter().map(|&r| self.samples[r].clone()).collect(),
            positions: self.positions.clone(),
            codes: self.codes.take_rows(rows),
            bases: self.bases.take_rows(rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aln::record::parse_records;
    use crate::aln::remap::remap;
    use crate::util::window::Window;
    use std::io::Cursor;

    fn table(fasta: &str, upstream: u32) -> AlignmentTable {
        let (recs, _) = parse_records(Cursor::new(fasta.as_bytes())).unwrap();
        let recs = remap(recs, Window::new(upstream, 30), None);
        AlignmentTable::build(recs, &ParalogSentinel)
    }

    fn assert_congruent(t: &AlignmentTable) {
        assert_eq!(t.codes().nrows(), t.nrows());
        assert_eq!(t.bases().nrows(), t.nrows());
        assert_eq!(t.codes().ncols(), t.ncols());
        assert_eq!(t.bases().ncols(), t.ncols());
        for r in 0..t.nrows() {
            for c in 0..t.ncols() {
                assert_eq!(t.codes().get(r, c).is_some(), t.bases().get(r, c).is_some());
            }
        }
    }

    #[test]
    fn paralogs_collapse_to_sentinel() {
        let t = table(">s1\nAGCTN\n>s1\nAGCGA\n", 0);
        assert_eq!(t.samples(), ["s1"]);
        let col = t.column_of(3).unwrap();
        assert_eq!(t.codes().get(0, col), Some(Some(COLLAPSED_CODE)));
        assert_eq!(t.bases().get(0, col), Some(COLLAPSED_BASE));
        // identical paralog bases still collapse
        let col0 = t.column_of(0).unwrap();
        assert_eq!(t.bases().get(0, col0), Some(COLLAPSED_BASE));
        assert_congruent(&t);
    }

    #[test]
    fn single_values_pass_through() {
        let t = table(">s1\nAGTCN\n", 2);
        assert_eq!(t.positions(), [-2, -1, 0, 1, 2]);
        let codes: Vec<_> = t.codes().row(0).to_vec();
        assert_eq!(codes, vec![Some(Some(0)), Some(Some(1)), Some(Some(2)), Some(Some(3)), Some(None)]);
        let bases: Vec<_> = t.bases().row(0).iter().map(|b| b.unwrap()).collect();
        assert_eq!(bases, b"AGTCN");
    }

    #[test]
    fn rows_in_encounter_order_with_missing_cells() {
        let t = table(">zeta\nAAAA\n>alpha_2\nCC\n>mid\nG\n", 0);
        assert_eq!(t.samples(), ["zeta", "alpha", "mid"]);
        assert_eq!(t.positions(), [0, 1, 2, 3]);
        assert_eq!(t.codes().get(1, 2), None);
        assert_eq!(t.bases().get(1, 2), None);
        assert_eq!(t.bases().get(2, 0), Some(b'G'));
        assert_congruent(&t);
    }

    #[test]
    fn custom_collapse_strategy() {
        struct First;
        impl Collapse<Option<Code>> for First {
            fn collapse(&self, v: &[Option<Code>]) -> Option<Code> {
                v[0]
            }
        }
        impl Collapse<u8> for First {
            fn collapse(&self, v: &[u8]) -> u8 {
                v[0]
            }
        }
        let (recs, _) = parse_records(Cursor::new(&b">s\nA\n>s\nC\n"[..])).unwrap();
        let t = AlignmentTable::build(recs, &First);
        assert_eq!(t.bases().get(0, 0), Some(b'A'));
    }

    #[test]
    fn select_rows_keeps_both_matrices_aligned() {
        let t = table(">a\nAC\n>b\nG\n>c\nTT\n", 0);
        let s = t.select_rows(&[2, 0]);
        assert_eq!(s.samples(), ["c", "a"]);
        assert_eq!(s.positions(), t.positions());
        assert_eq!(s.bases().get(0, 0), Some(b'T'));
        assert_eq!(s.codes().get(1, 1), Some(Some(3)));
        assert_congruent(&s);
    }

    #[test]
    fn empty_records_give_empty_table() {
        let t = AlignmentTable::build(Vec::new(), &ParalogSentinel);
        assert!(t.is_empty());
        assert_eq!(t.codes().nrows(), 0);
    }
}
