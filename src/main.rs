use relnotes::ui::output;

fn main() {
    if let Err(err) = relnotes::cli::run() {
        output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
