fn main() {
    if let Err(err) = contrascan::run() {
        eprintln!("contrascan error: {err:#}");
        std::process::exit(1);
    }
}
