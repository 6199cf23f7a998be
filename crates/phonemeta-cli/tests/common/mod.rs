#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

/// Empty configuration file so the user's global config never leaks into tests.
fn default_config() -> &'static Path {
    static CONFIG: OnceLock<(TempDir, PathBuf)> = OnceLock::new();
    let (_, path) = CONFIG.get_or_init(|| {
        let dir = tempfile::tempdir().expect("failed to create config dir for tests");
        let path = dir.path().join("global.toml");
        std::fs::write(&path, "").expect("failed to write test config");
        (dir, path)
    });
    path
}

/// Create a configured `phonemeta` command suitable for integration tests.
#[allow(dead_code)]
pub fn phonemeta_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("phonemeta"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env("PHONEMETA_CONFIG", default_config());
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Write an already-serialized metadata payload into `dir`.
#[allow(dead_code)]
pub fn write_payload(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
