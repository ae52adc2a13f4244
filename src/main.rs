fn main() {
    if let Err(err) = report_mapper::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
