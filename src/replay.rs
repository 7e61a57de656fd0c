//! Local replay of recorded stream data.
//!
//! A replay file holds one record per line; blank lines are ignored.

use anyhow::{Context, Result};
use std::path::Path;

/// Reads the records of a replay file in file order.
pub async fn read_records(path: &Path) -> Result<Vec<Vec<u8>>> {
    let contents = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read replay file {}", path.display()))?;

    Ok(split_records(&contents))
}

fn split_records(contents: &[u8]) -> Vec<Vec<u8>> {
    contents
        .split(|byte| *byte == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.iter().all(u8::is_ascii_whitespace))
        .map(<[u8]>::to_vec)
        .collect()
}
