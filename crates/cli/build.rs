//! Build script for the chatcmd CLI binary.
//!
//! Embeds the bundled command table into the binary so that `chatcmd parse`
//! and `chatcmd help` work without a `--table` flag.
//!
//! Table resolution order:
//!   1. `../../data/commands.jsonc`: workspace copy
//!   2. `data/commands.jsonc`: in-crate copy (works from a crates.io tarball)
//!
//! If neither exists the binary is built without a table; `parse` and `help`
//! will require `--table <PATH>` at runtime.

use std::path::Path;

fn main() {
    // Declare the custom cfg so cargo check-cfg doesn't warn.
    println!("cargo::rustc-check-cfg=cfg(has_embedded_table)");

    let workspace = Path::new("../../data/commands.jsonc");
    let in_crate = Path::new("data/commands.jsonc");

    println!("cargo:rerun-if-changed=../../data/commands.jsonc");
    println!("cargo:rerun-if-changed=data/commands.jsonc");

    let table_path = if workspace.exists() {
        workspace
    } else if in_crate.exists() {
        in_crate
    } else {
        return;
    };

    println!("cargo:rustc-cfg=has_embedded_table");

    // Copy into OUT_DIR so include_str! has a stable, absolute path.
    let out_dir = std::env::var("OUT_DIR").expect("OUT_DIR not set");
    let dest = Path::new(&out_dir).join("commands.jsonc");
    std::fs::copy(table_path, &dest).expect("failed to copy commands.jsonc to OUT_DIR");
}
