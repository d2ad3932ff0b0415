fn main() {
    // ESP-IDF environment is only needed when building the firmware
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
