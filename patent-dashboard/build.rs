//! Build script for patent-dashboard.
//!
//! Copies the patent count and cluster label CSV files to OUT_DIR so they
//! can be embedded via `include_str!` at compile time. A missing file is
//! replaced by an empty placeholder; the loader rejects empty input at
//! startup, so the app reports the missing table instead of rendering.

use std::env;
use std::fs;
use std::path::Path;

fn main() {
    let out_dir = env::var("OUT_DIR").unwrap();

    let files = vec![
        ("../fixtures/patent_counts.csv", "patent_counts.csv"),
        ("../fixtures/cluster_labels.csv", "cluster_labels.csv"),
    ];

    for (src_path, dest_name) in &files {
        let src = Path::new(src_path);
        let dest = Path::new(&out_dir).join(dest_name);
        if src.exists() {
            fs::copy(src, &dest).unwrap_or_else(|e| {
                panic!("Failed to copy {} to {}: {}", src_path, dest.display(), e);
            });
        } else {
            fs::write(&dest, "").unwrap();
            println!(
                "cargo:warning=Fixture file {} not found, using empty placeholder",
                src_path
            );
        }
        println!("cargo:rerun-if-changed={}", src_path);
    }

    println!("cargo:rerun-if-changed=build.rs");
}
