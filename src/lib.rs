//! # aln2img
//!
//! 两个小型基因组学工具：
//!
//! - **比对热图**：读取 FASTA（每条序列为某样本在基因起点附近的片段），按样本 ×
//!   相对坐标重排成两张平行矩阵（碱基编码 / 碱基字母），渲染为 PNG 或 SVG 热图。
//!   同一样本在同一位置出现多条序列（旁系同源）时，格子记为哨兵值而不是任选其一。
//! - **BED 区间**：读取基因位置表，按链方向计算上下游侧翼窗口，每个基因输出一个 BED 文件。
//!
//! 两者共用同一组上下游窗口长度（[`util::window`]），结果才可相互对照。
//!
//! ## 快速示例
//!
//! ```rust
//! use aln2img::aln::{parse_records, remap, AlignmentTable, ParalogSentinel, COLLAPSED_BASE};
//! use aln2img::util::window::Window;
//!
//! let fasta = ">s1\nAGCTN\n>s1\nAGCGA\n>s2_x:1-5\nAGCTT\n";
//! let (records, _stats) = parse_records(fasta.as_bytes()).unwrap();
//! let records = remap(records, Window::new(0, 30), None);
//! let table = AlignmentTable::build(records, &ParalogSentinel);
//!
//! assert_eq!(table.samples(), ["s1", "s2"]);
//! let col = table.column_of(3).unwrap();
//! assert_eq!(table.bases().get(0, col), Some(COLLAPSED_BASE));
//! assert_eq!(table.bases().get(1, col), Some(b'T'));
//! ```
//!
//! ## 模块说明
//!
//! - [`io`] — FASTA、样本列表、基因表读取与 BED 写出
//! - [`aln`] — 记录解析、坐标平移、透视成矩阵、样本选择
//! - [`plot`] — 热图渲染
//! - [`bed`] — 基因侧翼区间
//! - [`config`] — 命令行参数与校验
//! - [`util`] — 碱基编码、侧翼窗口

pub mod aln;
pub mod bed;
pub mod config;
pub mod io;
pub mod plot;
pub mod util;
