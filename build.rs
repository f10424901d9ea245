#![allow(clippy::print_stdout)]

fn main() {
    println!("cargo:rerun-if-env-changed=WIFI_SSID");
    println!("cargo:rerun-if-env-changed=WIFI_PASSWORD");
    println!("cargo:rerun-if-env-changed=MASTER_URL");

    let version = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let stamp = chrono::Utc::now().format("%Y%m%d%H%M");
    println!("cargo:rustc-env=BUILD_VERSION={version}+{stamp}");
}
