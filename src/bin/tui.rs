use anyhow::Result;
use std::env;
use taskline::cli;

fn main() -> Result<()> {
    let args = match cli::parse_args(env::args().skip(1)) {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("{}", msg);
            cli::print_help("taskline-tui");
            std::process::exit(2);
        }
    };
    if args.help {
        cli::print_help("taskline-tui");
        return Ok(());
    }

    let (config, controller) = match cli::bootstrap(&args) {
        Ok(started) => started,
        Err(e) => {
            eprintln!("Error loading configuration:\n{:#}", e);
            std::process::exit(1);
        }
    };

    taskline::tui::run(&config, controller)
}
