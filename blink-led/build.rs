use std::env;
use std::path::PathBuf;

fn main() {
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let layout = manifest_dir.join("layout.ld");

    // Only bare-metal images need the load address; host builds keep the
    // default linker script.
    if env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("none") {
        println!("cargo:rustc-link-search={}", manifest_dir.display());
        println!("cargo:rustc-link-arg-bins=-T{}", layout.display());
    }
    println!("cargo:rerun-if-changed={}", layout.display());
}
