use anyhow::Result;
use clap::{Parser, Subcommand};
use seqglow::filter::{self, HighlightArgs};
use seqglow::highlighting::palette;
use shadow_rs::shadow;

shadow!(build);

#[derive(Debug, Parser)]
#[command(
    name = "seqglow",
    version,
    long_version = build::CLAP_LONG_VERSION,
    about = "Color fixed strings (adaptors, primers, barcodes) in text streamed through stdin or files.",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    highlight: HighlightArgs,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show every color name in normal and bold rendering.
    Colors,
}

fn main() -> Result<()> {
    // Default filter is "warn" if RUST_LOG is not set, so stderr stays quiet in pipelines.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Colors) => {
            print!("{}", palette());
            Ok(())
        }
        None => filter::run(&cli.highlight),
    }
}
