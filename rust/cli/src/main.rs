fn main() {
    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    let code = cardlang_cli::run(std::env::args(), &mut out, &mut err);
    std::process::exit(code);
}
