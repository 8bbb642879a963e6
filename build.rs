//! Build script for musicard.
//!
//! Copies the `.env.example` configuration template and the sample song list
//! into the user's local data directory so the binary finds them in the
//! locations it expects after installation.

use std::{env, fs, path::PathBuf};

/// Copies configuration and list templates next to the runtime data.
///
/// # File Operations
///
/// - `.env.example` → `<data_local_dir>/musicard/.env.example`
/// - `lists/*.txt` → `<data_local_dir>/musicard/lists/` (existing lists are
///   never overwritten)
///
/// Missing templates produce a `cargo:warning` instead of failing the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");
    println!("cargo:rerun-if-changed=lists");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("musicard");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    let lists_src = manifest_dir.join("lists");
    if lists_src.is_dir() {
        let lists_out = out_dir.join("lists");
        fs::create_dir_all(&lists_out)?;
        for entry in fs::read_dir(&lists_src)? {
            let path = entry?.path();
            let Some(name) = path.file_name() else {
                continue;
            };
            let target = lists_out.join(name);
            if path.is_file() && !target.exists() {
                fs::copy(&path, target)?;
            }
        }
    }

    Ok(())
}
