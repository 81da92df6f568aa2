use std::env;
use std::path::PathBuf;

const DATA_DIR_VAR: &str = "OSCAL_CATALOG_DATA_DIR";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed={DATA_DIR_VAR}");

    let candidate = match env::var(DATA_DIR_VAR) {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir.trim()),
        _ => match env::var("CARGO_MANIFEST_DIR") {
            Ok(manifest) => PathBuf::from(manifest).join("data").join("catalogs"),
            Err(_) => return,
        },
    };

    // Only an existing directory is baked in; otherwise the config default
    // stays relative.
    if let Ok(bundled) = candidate.canonicalize() {
        if bundled.is_dir() {
            println!(
                "cargo:rustc-env=OSCAL_CATALOG_BUNDLED_DIR={}",
                bundled.display()
            );
        }
    }
}
