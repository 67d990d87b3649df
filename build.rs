use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=ELEMENT_DEFS_DIR_HINT");

    if let Ok(raw_hint) = env::var("ELEMENT_DEFS_DIR_HINT") {
        let candidate = PathBuf::from(raw_hint);
        let canonical = candidate.canonicalize().unwrap_or(candidate);

        println!(
            "cargo:rustc-env=ELEMENT_DEFS_DIR_HINT={}",
            canonical.display()
        );
    }
}
