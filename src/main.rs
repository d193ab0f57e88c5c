use hitch::ui::output;

fn main() {
    if let Err(err) = hitch::cli::run() {
        output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
