use std::process::Command;

/// Run a git command and return its trimmed stdout, or "unknown" outside a checkout.
fn git_output(args: &[&str]) -> String {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");

    // Embedded so the startup banner can report which revision rendered an image
    println!("cargo:rustc-env=GIT_HASH={}", git_output(&["rev-parse", "--short", "HEAD"]));
    println!("cargo:rustc-env=GIT_DATE={}", git_output(&["log", "-1", "--format=%ci"]));
}
