fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Device builds need the ESP-IDF environment exported to rustc; host
    // builds (tests, simulation) have nothing to generate.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
