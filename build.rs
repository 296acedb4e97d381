//! Stamps the binary with build provenance.
//!
//! `PORTAL_BUILD_TIMESTAMP` and `PORTAL_GIT_COMMIT` feed the CLI's
//! `--version` output so a deployed portal can be traced back to a commit.
//! Builds from a source tarball have no git metadata and stamp "unknown".

use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
    println!("cargo:rustc-env=PORTAL_BUILD_TIMESTAMP={timestamp}");

    let commit = git_short_hash().unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=PORTAL_GIT_COMMIT={commit}");
}

fn git_short_hash() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())?;
    String::from_utf8(output.stdout)
        .ok()
        .map(|s| s.trim().to_string())
}
