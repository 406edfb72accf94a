//! Forwards build-time overrides of the compiled-in environment records.
//!
//! Values come from the process environment first, then from a `.env` file in
//! the crate or workspace root. They are read in `src/profiles.rs` through
//! `option_env!`.

use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

const BUILD_KEYS: &[&str] = &[
    "COFFEESHOP_BUILD_API_SERVER_URL",
    "COFFEESHOP_BUILD_AUTH_DOMAIN_PREFIX",
    "COFFEESHOP_BUILD_AUTH_AUDIENCE",
    "COFFEESHOP_BUILD_AUTH_CLIENT_ID",
    "COFFEESHOP_BUILD_AUTH_CALLBACK_URL",
];

fn dotenv_values() -> HashMap<String, String> {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap_or_default());
    let candidates = [
        manifest_dir.join(".env"),
        manifest_dir.join("../../.env"),
    ];

    // Watch both locations, so a .env created later still triggers a rebuild.
    for path in &candidates {
        println!("cargo:rerun-if-changed={}", path.display());
    }

    candidates
        .iter()
        .filter(|path| path.is_file())
        .find_map(|path| dotenvy::from_path_iter(path).ok())
        .map(|iter| iter.filter_map(Result::ok).collect())
        .unwrap_or_default()
}

fn main() {
    let from_file = dotenv_values();

    for key in BUILD_KEYS {
        println!("cargo:rerun-if-env-changed={key}");

        // Process environment already reaches option_env!, only forward the file.
        if env::var(key).is_ok() {
            continue;
        }
        if let Some(value) = from_file.get(*key).filter(|v| !v.trim().is_empty()) {
            println!("cargo:rustc-env={key}={value}");
        }
    }
}
