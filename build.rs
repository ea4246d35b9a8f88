use std::env;

fn main() {
    let target = env::var("TARGET").unwrap_or_default();
    let profile = env::var("PROFILE").unwrap_or_default();

    // Host builds only carry the portable core and its tests
    if !target.contains("avr") {
        return;
    }

    println!("cargo:rustc-link-arg=-mmcu=atmega328p");

    let variant = if env::var("CARGO_FEATURE_FRAMEWORK").is_ok() {
        "framework"
    } else {
        "self-test"
    };
    println!("cargo:warning=Building {variant} image for ATmega328P at 8MHz ({profile})");

    println!("cargo:rerun-if-changed=build.rs");
}
