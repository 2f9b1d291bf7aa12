use std::env;

fn main() {
    let version = env::var("IMAGE_BATCH_VERSION")
        .unwrap_or_else(|_| env::var("CARGO_PKG_VERSION").unwrap_or_default());
    println!("cargo:rerun-if-env-changed=IMAGE_BATCH_VERSION");
    println!("cargo:rustc-env=IMAGE_BATCH_VERSION={version}");
}
