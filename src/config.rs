//! 命令行参数与校验后的运行选项。
//!
//! `PlotArgs` / `BedArgs` 由 clap 解析，`validate()` 把它们转换成库内部只接受的
//! `PlotOpt` / `BedOpt`：所有冲突与越界参数都在读取任何输入文件之前报错。

use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use log::info;
use std::path::PathBuf;

use crate::aln::remap::PositionFilter;
use crate::util::window::{Window, DEFAULT_DOWNSTREAM, DEFAULT_UPSTREAM};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ImageFormat {
    Png,
    Tiff,
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Tiff => "tiff",
            ImageFormat::Svg => "svg",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct PlotArgs {
    /// Input FASTA file
    pub input: PathBuf,
    /// Output name, without the file extension
    pub output: PathBuf,
    /// Only show a random proportion of the samples, in (0, 1]
    #[arg(long = "random-sample")]
    pub random_sample: Option<f64>,
    /// Seed for --random-sample (drawn at random and logged if omitted)
    #[arg(long)]
    pub seed: Option<u64>,
    /// File with one sample per line; samples are shown in file order
    #[arg(long)]
    pub samples: Option<PathBuf>,
    /// Number of bases upstream of gene start
    #[arg(long, default_value_t = DEFAULT_UPSTREAM)]
    pub upstream: u32,
    /// Number of bases downstream of gene start
    #[arg(long, default_value_t = DEFAULT_DOWNSTREAM)]
    pub downstream: u32,
    /// First relative position to plot (requires --stop)
    #[arg(long, allow_negative_numbers = true)]
    pub start: Option<i64>,
    /// Last relative position to plot (requires --start)
    #[arg(long, allow_negative_numbers = true)]
    pub stop: Option<i64>,
    /// Output format
    #[arg(long, value_enum, default_value_t = ImageFormat::Png)]
    pub format: ImageFormat,
    /// Output resolution (dots per inch)
    #[arg(long, default_value_t = 300)]
    pub dpi: u32,
    /// Spacing of the x axis ticks
    #[arg(long, default_value_t = 50)]
    pub xticks: u32,
    /// Write sample names on the y axis
    #[arg(long = "print-samples")]
    pub print_samples: bool,
    /// Do not draw the base letters
    #[arg(long = "hide-bases")]
    pub hide_bases: bool,
    /// Figure height in inches
    #[arg(long, default_value_t = 9.0)]
    pub height: f64,
    /// Figure width in inches
    #[arg(long, default_value_t = 10.0)]
    pub width: f64,
}

#[derive(Args, Debug, Clone)]
pub struct BedArgs {
    /// Tab-separated gene table (strand, start, end, gene_name, locus_tag)
    pub input: PathBuf,
    /// Directory for the per-gene BED files (created if absent)
    pub output_dir: PathBuf,
    /// Chromosome written in the first BED column
    #[arg(long, default_value = "NC_000913")]
    pub chromosome: String,
    /// Bases upstream of gene start
    #[arg(long, default_value_t = DEFAULT_UPSTREAM)]
    pub upstream: u32,
    /// Bases downstream of gene start
    #[arg(long, default_value_t = DEFAULT_DOWNSTREAM)]
    pub downstream: u32,
}

/// 样本来源；显式列表此时只记录路径，文件在流水线中读取
#[derive(Debug, Clone, PartialEq)]
pub enum SampleSource {
    All,
    File(PathBuf),
    Random { fraction: f64, seed: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOpt {
    pub format: ImageFormat,
    pub dpi: u32,
    /// inches
    pub width: f64,
    /// inches
    pub height: f64,
    pub xticks: u32,
    pub show_bases: bool,
    pub print_samples: bool,
}

impl RenderOpt {
    /// Canvas size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        ((self.width * dpi).round() as u32, (self.height * dpi).round() as u32)
    }

    /// Pixels per typographic point.
    pub fn px_per_pt(&self) -> f64 {
        f64::from(self.dpi) / 72.0
    }
}

impl Default for RenderOpt {
    fn default() -> Self {
        Self {
            format: ImageFormat::Png,
            dpi: 300,
            width: 10.0,
            height: 9.0,
            xticks: 50,
            show_bases: true,
            print_samples: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotOpt {
    pub input: PathBuf,
    pub output: PathBuf,
    pub samples: SampleSource,
    pub window: Window,
    pub filter: Option<PositionFilter>,
    pub render: RenderOpt,
}

impl PlotOpt {
    /// `<output>.<ext>`
    pub fn output_path(&self) -> PathBuf {
        let mut name = self.output.clone().into_os_string();
        name.push(".");
        name.push(self.render.format.extension());
        PathBuf::from(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedOpt {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub chromosome: String,
    pub window: Window,
}

impl PlotArgs {
    pub fn validate(self) -> Result<PlotOpt> {
        let samples = match (self.samples, self.random_sample) {
            (Some(_), Some(_)) => {
                bail!("only one of --samples and --random-sample may be used")
            }
            (Some(path), None) => SampleSource::File(path),
            (None, Some(fraction)) => {
                if !(fraction > 0.0 && fraction <= 1.0) {
                    bail!("--random-sample must be in (0, 1], got {}", fraction);
                }
                let seed = match self.seed {
                    Some(s) => s,
                    None => {
                        let s = rand::random::<u64>();
                        info!("no --seed given, using {}", s);
                        s
                    }
                };
                SampleSource::Random { fraction, seed }
            }
            (None, None) => {
                if self.seed.is_some() {
                    bail!("--seed only makes sense together with --random-sample");
                }
                SampleSource::All
            }
        };

        let filter = PositionFilter::from_bounds(self.start, self.stop)?;

        if self.xticks == 0 {
            bail!("--xticks must be greater than zero");
        }
        if self.dpi == 0 {
            bail!("--dpi must be greater than zero");
        }
        for (name, v) in [("--width", self.width), ("--height", self.height)] {
            if !(v.is_finite() && v > 0.0) {
                bail!("{} must be a positive number of inches, got {}", name, v);
            }
        }

        let render = RenderOpt {
            format: self.format,
            dpi: self.dpi,
            width: self.width,
            height: self.height,
            xticks: self.xticks,
            show_bases: !self.hide_bases,
            print_samples: self.print_samples,
        };
        let (w, h) = render.pixel_size();
        if w == 0 || h == 0 {
            bail!("figure of {}x{} inches at {} dpi has no pixels", self.width, self.height, self.dpi);
        }

        Ok(PlotOpt {
            input: self.input,
            output: self.output,
            samples,
            window: Window::new(self.upstream, self.downstream),
            filter,
            render,
        })
    }
}

impl BedArgs {
    pub fn validate(self) -> Result<BedOpt> {
        if self.chromosome.trim().is_empty() {
            bail!("--chromosome must not be empty");
        }
        Ok(BedOpt {
            input: self.input,
            output_dir: self.output_dir,
            chromosome: self.chromosome,
            window: Window::new(self.upstream, self.downstream),
        })
    }
}
