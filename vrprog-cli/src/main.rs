use clap::Parser as ClapParser;
use log::debug;
use vrprog::prelude::*;
use vrprog_cli::{
    cli::{Arguments, Command},
    commands::{build_arity, decode, linearize, load_arity, write_output},
    error::{CliError, CliResult},
    logger::StderrLogger,
};

fn run(command: Command) -> CliResult<()> {
    match command {
        Command::Linearize {
            mode,
            inputs,
            output,
        } => {
            let linearized = linearize(&inputs, mode)?;
            debug!("Rendered {} program(s)", linearized.lines.len());
            write_output(output.as_deref(), &linearized.lines.join("\n"))
        }
        Command::Arity {
            inputs,
            policy,
            output,
        } => {
            let policy = match policy {
                Some(path) => ArityPolicy::load_from_toml(&path)?,
                None => ArityPolicy::default(),
            };
            let table = build_arity(&inputs, &policy)?;
            let json = serde_json::to_string_pretty(&table).map_err(CliError::Serialize)?;
            write_output(output.as_deref(), &json)
        }
        Command::Decode {
            mode,
            arity,
            program,
        } => {
            let arity = load_arity(&arity)?;
            let list = decode(&program, mode, &arity)?;
            let json = serde_json::to_string_pretty(&list).map_err(CliError::Serialize)?;
            write_output(None, &json)
        }
    }
}

fn main() {
    let args = Arguments::parse();

    if let Err(error) = StderrLogger::init(StderrLogger::level_for_verbosity(args.verbose)) {
        eprintln!("Failed to install logger: {error}");
    }

    if let Err(error) = run(args.command) {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
