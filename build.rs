// build.rs - Build-time version injection for embark.
//
// Release pipelines stamp the binary by setting `EMBARK_VERSION` in the build
// environment. The value is forwarded to the crate as `EMBARK_BUILD_VERSION`
// (read with `env!` in config.rs). When unset, the Cargo package version is used.
fn main() {
    println!("cargo:rerun-if-env-changed=EMBARK_VERSION");

    let version = std::env::var("EMBARK_VERSION")
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| std::env::var("CARGO_PKG_VERSION").unwrap_or_default());

    println!("cargo:rustc-env=EMBARK_BUILD_VERSION={}", version);
}
