fn main() {
    if let Err(err) = sku_tally::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
