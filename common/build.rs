// Computes the build version from the crate version and the current git commit
// and exposes it to the crate as BUILD_VERSION (used in generated script banners).

use std::process::Command;

fn main() {
    let commit_hash = if let Some(hash) = option_env!("THG_COMMIT_HASH") {
        hash.get(0..7).unwrap_or(hash).to_string()
    } else {
        // Fall back to "unknown" when git is missing or the tree is not a repository
        match Command::new("git").args(["rev-parse", "--short", "HEAD"]).output() {
            Ok(output) if output.status.success() => {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            }
            _ => "unknown".to_string(),
        }
    };

    let build_version = format!("{}-{}", env!("CARGO_PKG_VERSION"), commit_hash);
    println!("cargo:rerun-if-env-changed=THG_COMMIT_HASH");
    println!("cargo:rustc-env=BUILD_VERSION={build_version}");
}
