use std::process::Command;
fn main() {
    let output = Command::new("git").args(["rev-parse", "--short", "HEAD"]).output();
    if let Ok(output) = output {
        if let Ok(hash) = String::from_utf8(output.stdout) {
            let hash = hash.trim();
            if !hash.is_empty() {
                println!("cargo:rustc-env=CARGO_PKG_VERSION={} {}", env!("CARGO_PKG_VERSION"), hash);
            }
        }
    }
}
