//! Jinx CLI
//!
//! Usage:
//!   jinx [OPTIONS] <FILE>
//!
//! Options:
//!   -m, --manifest <FILE>  Manifest mapping component kinds to templates
//!   -v, --verbose          Log resolution and render steps to stderr
//!   -h, --help             Print help

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use jinx::{from_toml, Engine, GenericComponent, Registry};

#[derive(Parser)]
#[command(name = "jinx")]
#[command(about = "Render a server-side UI component described in TOML")]
struct Cli {
    /// Component data file (TOML)
    input: PathBuf,

    /// Manifest mapping component kinds to templates
    #[arg(short, long, default_value = "jinx.toml")]
    manifest: PathBuf,

    /// Log resolution and render steps to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let engine = match Engine::load(&cli.manifest) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error loading manifest '{}': {}", cli.manifest.display(), e);
            std::process::exit(1);
        }
    };

    let source = match fs::read_to_string(&cli.input) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", cli.input.display(), e);
            std::process::exit(1);
        }
    };

    let component: GenericComponent = match from_toml(&source) {
        Ok(component) => component,
        Err(e) => {
            eprintln!("Error in '{}': {}", cli.input.display(), e);
            std::process::exit(1);
        }
    };

    let mut registry = Registry::new();
    let component = component.register_all(&mut registry);

    match engine.render(&registry, &component) {
        Ok(html) => {
            println!("{}", html);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
