use std::path::PathBuf;

use clap::{CommandFactory, Parser};

/// Resolve the bold, regular and light fonts used to render a poster
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(version, about)]
pub struct Args {
    /// Font family to fetch from the font catalog e.g. "Noto Sans JP"
    #[arg(short = 'f', long = "font-family", value_name = "NAME")]
    pub font_family: Option<String>,

    /// A single font file or a directory of weighted font files
    #[arg(short = 'p', long = "font-path", value_name = "PATH")]
    pub font_path: Option<String>,

    /// Configuration file to use
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Never reach out to the font catalog
    #[arg(long = "offline")]
    pub offline: bool,
}

pub fn command() -> clap::Command {
    Args::command()
}
