fn main() {
    if let Err(e) = brewcalc_rs::adapters::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
