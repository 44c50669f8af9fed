use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::{Path, PathBuf};

#[fixture]
pub fn workbench_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

pub fn store_path(dir: &TempDir) -> PathBuf {
    dir.path().join(".revfilter").join("filters.json")
}

pub fn run_revfilter_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("revfilter").expect("Failed to find revfilter binary");
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("REVFILTER_STORE");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}
