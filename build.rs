//! Build script for injecting version information at compile time.
//!
//! When building for a release, the VERSION environment variable is set and
//! will be used. Otherwise the usage text falls back to Cargo's package version.

fn main() {
    // Rerun build script if the release version changes
    println!("cargo:rerun-if-env-changed=VERSION");

    if let Ok(version) = std::env::var("VERSION") {
        println!("cargo:rustc-env=APP_VERSION={}", version);
    }
}
