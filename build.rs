fn main() {
    println!("cargo:rerun-if-env-changed=MORSE_BEACON_CONFIG");

    // Host test builds leave `espidf` off and never touch the IDF toolchain.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
