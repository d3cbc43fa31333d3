use std::path::PathBuf;
use std::process::Command;

/// Short commit id, suffixed with `-dirty` when the tree has local changes.
fn describe_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=10"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let described = String::from_utf8(output.stdout).ok()?;
    let described = described.trim();
    (!described.is_empty()).then(|| described.to_string())
}

fn main() {
    let build_hash = describe_commit().unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=BUILD_HASH={build_hash}");

    let manifest_dir = PathBuf::from(std::env::var_os("CARGO_MANIFEST_DIR").unwrap_or_default());
    let git_dir = manifest_dir.join("../../.git");
    for tracked in ["HEAD", "index"] {
        println!("cargo:rerun-if-changed={}", git_dir.join(tracked).display());
    }
}
