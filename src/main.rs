//! Picpost - Random Image Poster
//!
//! Cloudinary のランダム画像を X に投稿

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;
use log::error;

use picpost::adapter::config::Config;
use picpost::driver::{Args, PostImageWorkflow};

async fn run(args: Args) -> Result<()> {
    // Load configuration (settings file + credentials from environment)
    let config = Config::load(&args.config)?;

    // Create workflow with injected dependencies
    let workflow = PostImageWorkflow::new(config)?;

    workflow.execute(args.dry_run).await?;
    Ok(())
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() {
    env_logger::init();

    let args = Args::parse();

    // 失敗しても終了コードは変えない（外部のタイマーから呼ばれる前提）
    if let Err(e) = run(args).await {
        error!("{:#}", e);
        eprintln!("❌ Failed to start: {:#}", e);
    }
}
