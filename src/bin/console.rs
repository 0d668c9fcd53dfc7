// File: ./src/bin/console.rs
// Line-mode shell: one command per stdin line, one reply per command.
use anyhow::Result;
use std::env;
use std::io::{self, Write};
use taskline::cli::{self, CliArgs};

const WELCOME: &str = "Hello! Taskline here. What do you need to get done?";

fn main() -> Result<()> {
    let args: CliArgs = match cli::parse_args(env::args().skip(1)) {
        Ok(a) => a,
        Err(msg) => {
            eprintln!("{}", msg);
            cli::print_help("taskline");
            std::process::exit(2);
        }
    };
    if args.help {
        cli::print_help("taskline");
        return Ok(());
    }

    let (config, mut controller) = match cli::bootstrap(&args) {
        Ok(started) => started,
        Err(e) => {
            eprintln!("Error loading configuration:\n{:#}", e);
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    if config.show_welcome {
        writeln!(stdout, "{}", WELCOME)?;
    }

    let mut reader = stdin.lock();
    while let Some(input) = cli::read_input_line(&mut reader)? {
        let response = controller.process(&input);
        writeln!(stdout, "{}", response.text)?;
        stdout.flush()?;
        if response.exit {
            break;
        }
    }
    log::info!("Session ended");
    Ok(())
}
