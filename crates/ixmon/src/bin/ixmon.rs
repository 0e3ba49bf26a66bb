fn main() {
    if let Err(err) = ixmon::run() {
        eprintln!("{}", ixmon::format_error(&err));
        std::process::exit(1);
    }
}
