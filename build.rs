use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds (library + tests) need no linker script.
    if env::var_os("CARGO_FEATURE_LPC17XX").is_none() {
        return;
    }

    // Place memory.x where cortex-m-rt's link.x can find it.
    let out = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    if let Err(e) = fs::copy("memory.x", out.join("memory.x")) {
        println!("cargo:warning=memory.x copy failed: {e}");
        return;
    }
    println!("cargo:rustc-link-search={}", out.display());
}
