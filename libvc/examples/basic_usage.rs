//! Basic usage example for the libvc library.
//!
//! Lists the tags of a quay.io image, newest first.
//!
//! Run with: cargo run --example basic_usage -- quay.io/jetstack/cert-manager-controller

use libvc::{ClientSet, Config, Context};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let image = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "quay.io/jetstack/cert-manager-controller".to_string());

    let clients = ClientSet::from_config(&Config::default())?;
    let ctx = Context::with_timeout(Duration::from_secs(30));

    let mut tags = match clients.tags(&ctx, &image).await {
        Ok(tags) => tags,
        Err(e) => {
            eprintln!("✗ Failed to list tags for {}: {}", image, e);
            return Ok(());
        }
    };

    tags.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    println!("✓ Found {} tags for {}:\n", tags.len(), image);
    for tag in tags.iter().take(10) {
        println!("  {:<30} {} {}", tag.tag, tag.sha, tag.timestamp.to_rfc3339());
    }
    if tags.len() > 10 {
        println!("  ... and {} more", tags.len() - 10);
    }

    Ok(())
}
