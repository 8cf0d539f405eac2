use std::path::{Path, PathBuf};
use std::process::Command;

/// Exposes `SEMESTER_BUILD_SHA` for `--version`. A value already set in the
/// build environment (release tarballs have no `.git`) wins over git.
fn main() {
    println!("cargo:rerun-if-env-changed=SEMESTER_BUILD_SHA");

    let workspace = workspace_root();
    let head = workspace.join(".git").join("HEAD");
    if head.exists() {
        println!("cargo:rerun-if-changed={}", head.display());
    }

    let sha = std::env::var("SEMESTER_BUILD_SHA")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| git_describe(&workspace))
        .unwrap_or_else(|| "unknown".into());

    println!("cargo:rustc-env=SEMESTER_BUILD_SHA={sha}");
}

fn workspace_root() -> PathBuf {
    let manifest = std::env::var_os("CARGO_MANIFEST_DIR").map(PathBuf::from);
    match manifest.as_deref().and_then(Path::parent) {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(".."),
    }
}

/// Short commit id, suffixed `-dirty` when the tree has local edits.
fn git_describe(dir: &Path) -> Option<String> {
    let out = Command::new("git")
        .current_dir(dir)
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let s = String::from_utf8(out.stdout).ok()?;
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}
