fn main() {
    let target = std::env::var("TARGET").unwrap_or_else(|_| "unknown-unknown-unknown".to_string());
    println!("cargo:rustc-env=WIDCFG_BUILD_TARGET={target}");
    println!("cargo:rerun-if-env-changed=TARGET");
}
