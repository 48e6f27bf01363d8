// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reading the tail of the bot's log file.

use std::io::{ErrorKind, SeekFrom};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Bytes read per step when scanning backwards from the end of the file.
const CHUNK_SIZE: u64 = 8 * 1024;

/// Last `count` lines of the file at `path`, oldest first.
///
/// The file is read backwards from its end, so only the tail is held in
/// memory. Returns `Ok(None)` when the file does not exist. Invalid UTF-8 is
/// replaced rather than rejected, since log files are not ours to police.
pub async fn tail_lines(path: &Path, count: usize) -> std::io::Result<Option<Vec<String>>> {
    let mut file = match File::open(path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e),
    };

    let mut pos = file.metadata().await?.len();
    let mut tail: Vec<u8> = Vec::new();

    // More than `count` newlines guarantees `count` complete lines after the
    // first (possibly partial) one.
    while pos > 0 && newlines(&tail) <= count {
        let step = CHUNK_SIZE.min(pos);
        pos -= step;

        let mut chunk = vec![0; step as usize];
        file.seek(SeekFrom::Start(pos)).await?;
        file.read_exact(&mut chunk).await?;
        chunk.extend_from_slice(&tail);
        tail = chunk;
    }

    let text = String::from_utf8_lossy(&tail);
    let mut lines: Vec<&str> = text.lines().collect();
    if pos > 0 && !lines.is_empty() {
        lines.remove(0);
    }
    let start = lines.len().saturating_sub(count);

    Ok(Some(lines[start..].iter().map(|l| l.to_string()).collect()))
}

fn newlines(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}
