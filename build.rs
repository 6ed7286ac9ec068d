use std::process::Command;

fn main() {
    // short commit hash, shown by `crossgrid --version` and the wasm debug report
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output();

    let hash = match output {
        Ok(output) if output.status.success() => {
            String::from_utf8(output.stdout)
                .unwrap_or_else(|_| "unknown".to_string())
                .trim()
                .to_string()
        }
        _ => "unknown".to_string(),
    };

    println!("cargo:rustc-env=GIT_HASH={hash}");

    // a new checkout or commit changes HEAD
    println!("cargo:rerun-if-changed=.git/HEAD");
}
