pub use clap::Parser;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "objfs")]
#[command(about = "Browse and edit an object store bucket as a filesystem")]
pub struct Args {
    /// Path to the objfs config directory (defaults to ~/.objfs)
    #[arg(long, global = true)]
    pub config_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: crate::Command,
}
