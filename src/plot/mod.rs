//! 比对热图渲染（plotters）。
//!
//! 行 = 样本，列 = 相对基因起点的坐标；颜色按碱基编码，叠加碱基字母、横轴刻度、
//! 基因起点竖线、可选的样本名以及固定图例。

pub mod layout;
pub mod palette;

use anyhow::{anyhow, Context, Result};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::path::Path;

use crate::aln::AlignmentTable;
use crate::config::{ImageFormat, RenderOpt};
use crate::util::window::Window;
use layout::{gene_start_column, tick_columns, Layout};

const FONT: &str = "sans-serif";

fn draw_err<E: std::error::Error + Send + Sync>(e: DrawingAreaErrorKind<E>) -> anyhow::Error {
    anyhow!("drawing failed: {}", e)
}

fn text_style(size: f64, h: HPos, v: VPos) -> TextStyle<'static> {
    (FONT, size).into_font().color(&BLACK).pos(Pos::new(h, v))
}

/// Render `table` to `path`. The image goes to a temporary file in the
/// same directory first and is renamed into place only once drawing has
/// succeeded.
pub fn render_to_file(table: &AlignmentTable, window: Window, opt: &RenderOpt, path: &Path) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = tempfile::Builder::new()
        .prefix(".aln2img-")
        .suffix(&format!(".{}", opt.format.extension()))
        .tempfile_in(dir)
        .with_context(|| format!("cannot create output file in '{}'", dir.display()))?
        .into_temp_path();

    {
        let tmp_path: &Path = &tmp;
        let size = opt.pixel_size();
        match opt.format {
            ImageFormat::Png => {
                let root = BitMapBackend::new(tmp_path, size).into_drawing_area();
                draw_alignment(&root, table, window, opt)?;
                root.present().map_err(draw_err)?;
            }
            ImageFormat::Tiff => {
                let mut buf = vec![0u8; size.0 as usize * size.1 as usize * 3];
                {
                    let root = BitMapBackend::with_buffer(&mut buf, size).into_drawing_area();
                    draw_alignment(&root, table, window, opt)?;
                    root.present().map_err(draw_err)?;
                }
                write_tiff(&buf, size, tmp_path)?;
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(tmp_path, size).into_drawing_area();
                draw_alignment(&root, table, window, opt)?;
                root.present().map_err(draw_err)?;
            }
        }
    }

    tmp.persist(path)
        .map_err(|e| anyhow!("cannot write image '{}': {}", path.display(), e.error))?;
    Ok(())
}

/// Encode an RGB8 pixel buffer as TIFF.
fn write_tiff(buf: &[u8], (w, h): (u32, u32), path: &Path) -> Result<()> {
    image::save_buffer_with_format(path, buf, w, h, image::ColorType::Rgb8, image::ImageFormat::Tiff)
        .with_context(|| format!("cannot encode TIFF '{}'", path.display()))
}

pub fn draw_alignment<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &AlignmentTable,
    window: Window,
    opt: &RenderOpt,
) -> Result<()> {
    let longest = table.samples().iter().map(|s| s.chars().count()).max().unwrap_or(0);
    let l = Layout::new(root.dim_in_pixel(), table.nrows(), table.ncols(), opt, longest)?;
    let pt = opt.px_per_pt();

    root.fill(&WHITE).map_err(draw_err)?;

    // heatmap cells
    for row in 0..table.nrows() {
        for col in 0..table.ncols() {
            let color = palette::cell_color(table.codes().get(row, col));
            root.draw(&Rectangle::new(l.cell(row, col), color.filled()))
                .map_err(draw_err)?;
        }
    }

    if opt.show_bases {
        let size = l.letter_size();
        if size >= 1.0 {
            let style = text_style(size, HPos::Center, VPos::Center);
            for row in 0..table.nrows() {
                for col in 0..table.ncols() {
                    if let Some(b) = table.bases().get(row, col) {
                        root.draw(&Text::new(
                            char::from(b).to_string(),
                            (l.col_center(col), l.row_center(row)),
                            style.clone(),
                        ))
                        .map_err(draw_err)?;
                    }
                }
            }
        }
    }

    root.draw(&Rectangle::new([(l.left, l.top), (l.right, l.bottom)], BLACK.stroke_width(1)))
        .map_err(draw_err)?;

    // x ticks, labelled with the gene-relative coordinate
    let tick_style = text_style(l.font, HPos::Center, VPos::Top);
    for (col, pos) in tick_columns(table.positions(), window, opt.xticks) {
        let x = l.col_center(col);
        root.draw(&PathElement::new(vec![(x, l.bottom), (x, l.bottom + l.tick_len)], BLACK.stroke_width(1)))
            .map_err(draw_err)?;
        root.draw(&Text::new(pos.to_string(), (x, l.bottom + l.tick_len + l.pad / 2), tick_style.clone()))
            .map_err(draw_err)?;
    }

    if let Some(col) = gene_start_column(table.positions()) {
        let x = l.col_x(col);
        let width = (3.0 * pt).round().max(1.0) as u32;
        root.draw(&PathElement::new(vec![(x, l.top), (x, l.bottom)], BLACK.stroke_width(width)))
            .map_err(draw_err)?;
    }

    if opt.print_samples {
        let style = text_style(l.letter_size().max(1.0).min(l.font), HPos::Right, VPos::Center);
        for (row, sample) in table.samples().iter().enumerate() {
            root.draw(&Text::new(sample.as_str(), (l.left - l.pad / 2, l.row_center(row)), style.clone()))
                .map_err(draw_err)?;
        }
    }

    // axis titles
    let (_, h) = root.dim_in_pixel();
    root.draw(&Text::new(
        "position relative to gene start",
        ((l.left + l.right) / 2, h as i32 - l.pad / 2),
        text_style(l.font, HPos::Center, VPos::Bottom),
    ))
    .map_err(draw_err)?;
    root.draw(&Text::new(
        "samples",
        (l.pad / 2, (l.top + l.bottom) / 2),
        text_style(l.font, HPos::Center, VPos::Top).transform(FontTransform::Rotate270),
    ))
    .map_err(draw_err)?;

    draw_legend(root, &l)
}

/// Fixed "Nucleotides" legend in the upper right corner of the heatmap.
fn draw_legend<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, l: &Layout) -> Result<()> {
    let entries = palette::legend();
    let line = (l.font * 1.4) as i32;
    let swatch = (l.font * 0.9) as i32;
    let box_w = (l.font * 6.5) as i32;
    let box_h = line * (entries.len() as i32 + 1) + l.pad;
    let x1 = l.right - l.pad;
    let x0 = x1 - box_w;
    let y0 = l.top + l.pad;

    root.draw(&Rectangle::new([(x0, y0), (x1, y0 + box_h)], WHITE.filled()))
        .map_err(draw_err)?;
    root.draw(&Rectangle::new([(x0, y0), (x1, y0 + box_h)], BLACK.stroke_width(1)))
        .map_err(draw_err)?;
    root.draw(&Text::new(
        "Nucleotides",
        ((x0 + x1) / 2, y0 + l.pad / 2),
        text_style(l.font, HPos::Center, VPos::Top),
    ))
    .map_err(draw_err)?;

    let label_style = text_style(l.font, HPos::Left, VPos::Center);
    for (i, (label, color)) in entries.iter().enumerate() {
        let cy = y0 + l.pad / 2 + line * (i as i32 + 1) + line / 2;
        let sx = x0 + l.pad;
        let rect = [(sx, cy - swatch / 2), (sx + swatch * 2, cy + swatch / 2)];
        root.draw(&Rectangle::new(rect, color.filled())).map_err(draw_err)?;
        root.draw(&Rectangle::new(rect, BLACK.stroke_width(1))).map_err(draw_err)?;
        root.draw(&Text::new(*label, (sx + swatch * 2 + l.pad, cy), label_style.clone()))
            .map_err(draw_err)?;
    }
    Ok(())
}
