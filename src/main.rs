fn main() {
    if let Err(err) = narrative_layout::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
