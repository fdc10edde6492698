use cargo_lock::Lockfile;
use serde::Serialize;
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

/// One locked dependency, as read back by `--show-build-info`.
#[derive(Serialize)]
struct DepInfo {
    name: String,
    version: String,
    checksum: Option<String>,
    source: Option<String>,
}

fn git_hash() -> String {
    match Command::new("git").args(["rev-parse", "HEAD"]).output() {
        Ok(o) if o.status.success() => String::from_utf8_lossy(&o.stdout).trim().to_string(),
        _ => "unknown".to_string(),
    }
}

fn locked_dependencies(manifest_dir: &str) -> Vec<DepInfo> {
    let lock_path = Path::new(manifest_dir).join("Cargo.lock");
    let Ok(lockfile) = Lockfile::load(lock_path) else {
        // Building as a dependency: no lock file of our own.
        return Vec::new();
    };

    lockfile
        .packages
        .into_iter()
        .map(|pkg| DepInfo {
            name: pkg.name.as_str().to_string(),
            version: pkg.version.to_string(),
            checksum: pkg.checksum.map(|c| c.to_string()),
            source: pkg.source.map(|s| s.to_string()),
        })
        .collect()
}

fn main() {
    println!("cargo:rustc-env=MOONCALC_GIT_HASH={}", git_hash());
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=Cargo.lock");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let deps = locked_dependencies(&manifest_dir);
    let json = serde_json::to_string(&deps).expect("Failed to serialize deps");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let dest_path = Path::new(&out_dir).join("deps_info.json");
    fs::write(&dest_path, json).expect("Failed to write dependency info");
    println!("cargo:rustc-env=MOONCALC_DEPS_INFO_PATH={}", dest_path.display());
}
