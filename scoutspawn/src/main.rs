fn main() {
    match scoutspawn::run_cli() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}
