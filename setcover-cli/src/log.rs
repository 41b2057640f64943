//! Plain-text run log (SPEC_FULL.md §10): a small sink written to
//! `--log`, or stderr when `--log-to-stderr` is set, gated by
//! `--verbosity-level`. Mirrors the teacher CLI's preference for plain
//! writes over a tracing framework (`problemreductions-cli/src/output.rs`).

use std::fs::File;
use std::io::Write;
use std::path::Path;

pub struct Log {
    file: Option<File>,
    to_stderr: bool,
    verbosity_level: u8,
}

impl Log {
    pub fn open(path: Option<&Path>, to_stderr: bool, verbosity_level: u8) -> anyhow::Result<Self> {
        let file = path.map(File::create).transpose()?;
        Ok(Self { file, to_stderr, verbosity_level })
    }

    /// Write `message` if `level` is at or below the configured verbosity.
    pub fn line(&mut self, level: u8, message: &str) {
        if level > self.verbosity_level {
            return;
        }
        if self.to_stderr {
            eprintln!("{message}");
        }
        if let Some(file) = &mut self.file {
            let _ = writeln!(file, "{message}");
        }
    }
}
