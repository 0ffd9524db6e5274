//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;

/// Cloudinaryのランダム画像をXに投稿するCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "picpost")]
#[command(
    about = "Post a random Cloudinary image to X and mark it as posted (no flags: one normal run)",
    long_about = None
)]
pub struct Args {
    /// Dry run mode - select and download only, don't upload, post or rename
    #[arg(long)]
    pub dry_run: bool,

    /// Settings file path (missing file means defaults)
    #[arg(short, long, default_value = "./picpost.json")]
    pub config: String,
}
