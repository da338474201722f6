//! NuXsec CLI

mod warping;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nx_hist::HistFile;
use nx_render::config::RenderConfig;
use nx_tables::AnalysisConfig;

#[derive(Parser)]
#[command(name = "nuxsec")]
#[command(about = "NuXsec - cross-section publication artifacts")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the covariance-matrix LaTeX document
    Tables {
        /// Input histogram bundle (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output .tex path
        #[arg(short, long, default_value = "CovarianceTables.tex")]
        output: PathBuf,

        /// Analysis configuration (JSON). Defaults to the built-in
        /// charged-pion configuration.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Render one warping-study scenario
    Warping {
        /// Input histogram bundle (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for rendered images
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Variable key (e.g. mixtpi)
        #[arg(long)]
        variable: String,

        /// Warp scenario key (e.g. NOMINAL)
        #[arg(long)]
        warp: String,

        /// Playlist identifier used in the output file name
        #[arg(long)]
        plist: String,

        /// Date code used in the output file name
        #[arg(long)]
        date: String,

        /// Analysis configuration (JSON). Defaults to the built-in
        /// charged-pion configuration.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Also write a PNG (requires the `png` build feature)
        #[arg(long)]
        png: bool,

        /// PNG resolution
        #[arg(long, default_value = "300")]
        dpi: u32,
    },

    /// List the named objects in a bundle
    Keys {
        /// Input histogram bundle (JSON)
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Tables { input, output, config } => {
            cmd_tables(&input, &output, config.as_ref())
        }
        Commands::Warping { input, out_dir, variable, warp, plist, date, config, png, dpi } => {
            cmd_warping(&input, &out_dir, &variable, &warp, &plist, &date, config.as_ref(), png, dpi)
        }
        Commands::Keys { input } => cmd_keys(&input),
        Commands::Version => {
            println!("nuxsec {}", nx_core::VERSION);
            Ok(())
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<AnalysisConfig> {
    match path {
        Some(p) => AnalysisConfig::from_json_file(p)
            .with_context(|| format!("loading configuration {}", p.display())),
        None => Ok(AnalysisConfig::charged_pion()),
    }
}

fn open_bundle(input: &PathBuf) -> Result<HistFile> {
    HistFile::open(input).with_context(|| format!("opening bundle {}", input.display()))
}

fn cmd_tables(input: &PathBuf, output: &PathBuf, config: Option<&PathBuf>) -> Result<()> {
    let cfg = load_config(config)?;
    let file = open_bundle(input)?;
    let doc = nx_tables::covariance_tables_document(&file, &cfg)?;
    fs::write(output, doc).with_context(|| format!("writing {}", output.display()))?;
    tracing::info!(path = %output.display(), "wrote covariance tables");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_warping(
    input: &PathBuf,
    out_dir: &PathBuf,
    variable: &str,
    warp: &str,
    plist: &str,
    date: &str,
    config: Option<&PathBuf>,
    png: bool,
    dpi: u32,
) -> Result<()> {
    let cfg = load_config(config)?;
    let file = open_bundle(input)?;
    let artifact = warping::build_artifact(&file, &cfg, variable, warp)?;

    let svg = nx_render::plots::warping::render(&artifact, &RenderConfig::default())?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;
    let svg_path = out_dir.join(warping::output_file_name(plist, date, variable, warp, "svg"));
    nx_render::output::svg::save_svg(&svg, &svg_path)?;
    tracing::info!(path = %svg_path.display(), "wrote warping plot");

    if png {
        #[cfg(feature = "png")]
        {
            let bytes = nx_render::output::png::svg_to_png(&svg, dpi)?;
            let png_path =
                out_dir.join(warping::output_file_name(plist, date, variable, warp, "png"));
            fs::write(&png_path, bytes)
                .with_context(|| format!("writing {}", png_path.display()))?;
            tracing::info!(path = %png_path.display(), "wrote warping plot");
        }
        #[cfg(not(feature = "png"))]
        {
            let _ = dpi;
            anyhow::bail!("PNG output requires building with `--features png`");
        }
    }

    Ok(())
}

fn cmd_keys(input: &PathBuf) -> Result<()> {
    let file = open_bundle(input)?;
    for key in file.list_keys() {
        println!("{:<6} {}", key.kind, key.name);
    }
    Ok(())
}
