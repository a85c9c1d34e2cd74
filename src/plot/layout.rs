use anyhow::{bail, Result};

use crate::config::RenderOpt;
use crate::util::window::Window;

/// 横轴刻度：窗口内从 `-upstream` 起每隔 `spacing` 一个刻度，只保留实际存在的列。
/// 返回 (列号, 相对坐标)。
pub fn tick_columns(positions: &[i64], window: Window, spacing: u32) -> Vec<(usize, i64)> {
    let spacing = i64::from(spacing.max(1));
    positions
        .iter()
        .enumerate()
        .filter(|&(_, &p)| {
            p >= window.first() && p <= window.last() && (p - window.first()).rem_euclid(spacing) == 0
        })
        .map(|(i, &p)| (i, p))
        .collect()
}

/// Column holding relative position 0, if plotted.
pub fn gene_start_column(positions: &[i64]) -> Option<usize> {
    positions.binary_search(&0).ok()
}

/// Pixel geometry of the figure. The heatmap occupies
/// `[left, right) x [top, bottom)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub font: f64,
    pub pad: i32,
    pub tick_len: i32,
    nrows: usize,
    ncols: usize,
}

impl Layout {
    pub fn new(size: (u32, u32), nrows: usize, ncols: usize, opt: &RenderOpt, longest_label: usize) -> Result<Self> {
        let pt = opt.px_per_pt();
        let font = 10.0 * pt;
        let pad = (6.0 * pt).round() as i32;
        let tick_len = (4.0 * pt).round().max(1.0) as i32;

        let mut left = pad + (font * 1.6) as i32;
        if opt.print_samples {
            left += pad / 2 + (longest_label as f64 * font * 0.62) as i32;
        }
        let bottom_margin = pad + tick_len + (font * 1.4) as i32 + (font * 1.6) as i32;

        let layout = Self {
            left,
            top: pad,
            right: size.0 as i32 - pad,
            bottom: size.1 as i32 - bottom_margin,
            font,
            pad,
            tick_len,
            nrows,
            ncols,
        };
        if layout.right - layout.left < 1 || layout.bottom - layout.top < 1 {
            bail!(
                "figure of {}x{} pixels is too small for the axes; increase --width/--height or --dpi",
                size.0,
                size.1
            );
        }
        Ok(layout)
    }

    /// Left edge of `col`; `col == ncols` is the right edge of the heatmap.
    pub fn col_x(&self, col: usize) -> i32 {
        let w = f64::from(self.right - self.left);
        self.left + (col as f64 * w / self.ncols.max(1) as f64).round() as i32
    }

    /// Top edge of `row`; `row == nrows` is the bottom edge of the heatmap.
    pub fn row_y(&self, row: usize) -> i32 {
        let h = f64::from(self.bottom - self.top);
        self.top + (row as f64 * h / self.nrows.max(1) as f64).round() as i32
    }

    pub fn cell(&self, row: usize, col: usize) -> [(i32, i32); 2] {
        [(self.col_x(col), self.row_y(row)), (self.col_x(col + 1), self.row_y(row + 1))]
    }

    pub fn col_center(&self, col: usize) -> i32 {
        (self.col_x(col) + self.col_x(col + 1)) / 2
    }

    pub fn row_center(&self, row: usize) -> i32 {
        (self.row_y(row) + self.row_y(row + 1)) / 2
    }

    /// Font size for the base letters, shrunk to fit one cell.
    pub fn letter_size(&self) -> f64 {
        let cw = f64::from(self.right - self.left) / self.ncols.max(1) as f64;
        let ch = f64::from(self.bottom - self.top) / self.nrows.max(1) as f64;
        (cw.min(ch) * 0.7).min(self.font)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_every_spacing_from_window_start() {
        let positions: Vec<i64> = (-200..=30).collect();
        let ticks = tick_columns(&positions, Window::new(200, 30), 50);
        let labels: Vec<i64> = ticks.iter().map(|&(_, p)| p).collect();
        assert_eq!(labels, vec![-200, -150, -100, -50, 0]);
        assert_eq!(ticks[0].0, 0);
        assert_eq!(ticks[4].0, 200);
    }

    #[test]
    fn ticks_follow_filtered_columns() {
        let positions: Vec<i64> = (-60..=10).collect();
        let ticks = tick_columns(&positions, Window::new(200, 30), 50);
        assert_eq!(ticks, vec![(10, -50), (60, 0)]);
    }

    #[test]
    fn gene_start_marker_column() {
        assert_eq!(gene_start_column(&[-2, -1, 0, 1]), Some(2));
        assert_eq!(gene_start_column(&[-2, -1]), None);
    }

    #[test]
    fn cells_tile_the_heatmap() {
        let opt = RenderOpt { dpi: 72, ..RenderOpt::default() };
        let l = Layout::new(opt.pixel_size(), 3, 7, &opt, 0).unwrap();
        assert_eq!(l.col_x(0), l.left);
        assert_eq!(l.col_x(7), l.right);
        assert_eq!(l.row_y(3), l.bottom);
        for c in 0..7 {
            assert_eq!(l.cell(0, c)[1].0, l.cell(0, c + 1)[0].0);
        }
        assert!(l.letter_size() <= l.font);
    }

    #[test]
    fn sample_labels_widen_left_margin() {
        let mut opt = RenderOpt { dpi: 72, ..RenderOpt::default() };
        let plain = Layout::new(opt.pixel_size(), 3, 7, &opt, 12).unwrap();
        opt.print_samples = true;
        let labelled = Layout::new(opt.pixel_size(), 3, 7, &opt, 12).unwrap();
        assert!(labelled.left > plain.left);
    }

    #[test]
    fn tiny_figure_is_rejected() {
        let opt = RenderOpt { dpi: 72, width: 0.2, height: 0.2, ..RenderOpt::default() };
        assert!(Layout::new(opt.pixel_size(), 3, 7, &opt, 0).is_err());
    }
}
