use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use aln2img::config::{BedArgs, PlotArgs};
use aln2img::{aln, bed};

#[derive(Parser, Debug)]
#[command(
    name = "aln2img",
    author,
    version,
    about = "Plot a sequence 'alignment' a-la panfeed, and build the matching BED windows",
    arg_required_else_help = true
)]
struct Cli {
    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a nucleotide heatmap from a FASTA file
    Plot(PlotArgs),
    /// Write one BED file per gene from a gene position table
    Bed(BedArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    match cli.command {
        Commands::Plot(args) => run_plot(args),
        Commands::Bed(args) => run_bed(args),
    }
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run_plot(args: PlotArgs) -> Result<()> {
    let opt = args.validate()?;
    let path = aln::plot_alignment(&opt)?;
    println!("plot saved: {}", path.display());
    Ok(())
}

fn run_bed(args: BedArgs) -> Result<()> {
    let opt = args.validate()?;
    let summary = bed::convert(&opt)?;
    println!("BED files written: {}", summary.written);
    if summary.skipped > 0 {
        println!("genes skipped: {}", summary.skipped);
    }
    if summary.collisions > 0 {
        println!("duplicate locus tags overwritten: {}", summary.collisions);
    }
    Ok(())
}
