use std::process::Command;

/// `VERSIONEER_VERSION` is the package version on a commit tagged `v<version>`,
/// otherwise the version plus the short commit id as build metadata.
fn main() {
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs/tags");

    let version = env!("CARGO_PKG_VERSION");
    let release_tag = format!("v{version}");

    let version_string = match git(&["rev-parse", "--short", "HEAD"]) {
        None => version.to_owned(),
        Some(_) if head_tags().iter().any(|tag| *tag == release_tag) => version.to_owned(),
        Some(short_id) => format!("{version}+{short_id}"),
    };

    println!("cargo:rustc-env=VERSIONEER_VERSION={version_string}");
}

fn head_tags() -> Vec<String> {
    git(&["tag", "--points-at", "HEAD"])
        .map(|out| out.lines().map(|line| line.trim().to_owned()).collect())
        .unwrap_or_default()
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_owned())
}
