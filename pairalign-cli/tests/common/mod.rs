#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

pub fn pairalign_cmd() -> Command {
    let mut cmd = Command::cargo_bin("pairalign").unwrap();
    cmd.env_remove("RUST_LOG")
        .env_remove("PAIRALIGN_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Scratch directory for sequence and config files
pub struct TestEnvironment {
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn create_file(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content)?;
        Ok(path)
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }
}

/// Sequence file with a header line and the sequence wrapped at `width`
pub fn create_sequence_file_content(header: &str, sequence: &str, width: usize) -> String {
    let mut content = format!(">{}\n", header);
    for chunk in sequence.as_bytes().chunks(width) {
        content.push_str(&String::from_utf8_lossy(chunk));
        content.push('\n');
    }
    content
}
