//! Pedigree Chart CLI
//!
//! Usage:
//!   pedigree-chart [OPTIONS] <REGISTRY> <ROOT>
//!
//! Options:
//!   -g, --generations <N>     Generations to show, the subject included (1-5)
//!   -s, --stylesheet <FILE>   Stylesheet with the highlight palette (TOML format)
//!   --width <W>               Content box width
//!   --height <H>              Content box height
//!   --geometry                Append slot rectangles and connectors
//!   --lint                    Print record warnings to stderr
//!   -h, --help                Print help

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use pedigree_chart::registry::lint;
use pedigree_chart::report::{render_report, ReportConfig};
use pedigree_chart::{
    build_pedigree, BoundingBox, MemoryRepository, PedigreeConfig, Stylesheet,
};

#[derive(Parser)]
#[command(name = "pedigree-chart")]
#[command(about = "Ancestry charts with common-ancestor highlighting")]
struct Cli {
    /// Registry file with [[individual]] records (TOML format)
    registry: PathBuf,

    /// Subject id or ring number
    root: String,

    /// Generations to show, the subject included
    #[arg(short, long, default_value_t = 5)]
    generations: u8,

    /// Stylesheet file for the highlight palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Content box width
    #[arg(long, default_value_t = 1000.0)]
    width: f64,

    /// Content box height
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Append columns, slot rectangles and connector polylines
    #[arg(long)]
    geometry: bool,

    /// Print record warnings to stderr before building
    #[arg(long)]
    lint: bool,
}

fn main() {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let repo = load_registry(&cli.registry);

    if cli.lint {
        for warning in lint::check(&repo) {
            eprintln!("warning: {}", warning);
        }
    }

    // Load stylesheet
    let stylesheet = match &cli.stylesheet {
        Some(path) => match Stylesheet::from_file(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Stylesheet::default(),
    };
    let palette = match stylesheet.palette() {
        Ok(palette) => palette,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let Some(root) = repo.resolve(&cli.root) else {
        eprintln!("Error: no individual with id or ring '{}'", cli.root);
        std::process::exit(1);
    };

    let config = PedigreeConfig::new()
        .with_max_generations(cli.generations)
        .with_palette(palette);
    let content = BoundingBox::new(0.0, 0.0, cli.width, cli.height);

    match build_pedigree(&repo, root, &content, &config) {
        Ok(result) => {
            let report = render_report(&result, ReportConfig::new().with_geometry(cli.geometry));
            print!("{}", report);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn load_registry(path: &Path) -> MemoryRepository {
    let source = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            std::process::exit(1);
        }
    };

    match MemoryRepository::from_toml_str(&source) {
        Ok(repo) => repo,
        Err(e) => {
            let filename = path.display().to_string();
            eprintln!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    }
}

