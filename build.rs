use std::fs;

fn main() {
    let version_file = fs::read_to_string("VERSION")
        .expect("VERSION file not found - run: echo '0.1.0' > VERSION");

    let version = version_file.trim();
    let cargo_version = env!("CARGO_PKG_VERSION");

    if version != cargo_version {
        panic!(
            "\n\n\
            VERSION MISMATCH!\n\
            VERSION file: {}\n\
            Cargo.toml:   {}\n\n",
            version, cargo_version
        );
    }

    // The default payment-type catalog is compiled in with include_str!.
    if fs::metadata("data/payment_types.json").is_err() {
        panic!("data/payment_types.json is missing; the embedded catalog cannot be built");
    }

    println!("cargo:rerun-if-changed=VERSION");
    println!("cargo:rerun-if-changed=data/payment_types.json");
}
