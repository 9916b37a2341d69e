//! Command line tool to inspect dimensions and convert quantities between units of measurement.
//!
//! Commands:
//!
//! - `<value> <from> <to>` converts a quantity, e.g. `1.5 m ft` or `100 °C °F`. Use
//!   `<value> <from> to <to>` for longer expressions, e.g. `60 mile / hour to m / s`.
//! - `dim <units>` shows the dimension of a units expression, e.g. `dim kg m / s^2`.
//! - `units <units>` shows how units are defined, e.g. `units kWh`.
//! - `prefixes` lists the available prefixes.
//!
//! By default the built-in SI system is used. Pass the path of a definition file to use that
//! system instead. Set `RUST_LOG` to see what the loader is doing.

mod error;

use error::Error;
use measure_system::{si, MeasurementSystem, SI_DEFINITIONS};
use measure_units::Quantity;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs, io::{self, BufRead, IsTerminal}, process::ExitCode, sync::Arc};
use tracing::{debug, info};

/// Splits a conversion into its value, source units, and target units.
fn split_conversion(input: &str) -> Result<(&str, &str, &str), Error> {
    let (value, rest) = input.trim().split_once(char::is_whitespace).ok_or(Error::Args)?;
    if let Some((from, to)) = rest.split_once(" to ") {
        return Ok((value, from.trim(), to.trim()));
    }

    match rest.split_whitespace().collect::<Vec<_>>()[..] {
        [from, to] => Ok((value, from, to)),
        _ => Err(Error::Args),
    }
}

/// Converts a quantity between units.
fn convert(input: &str, system: &MeasurementSystem) -> Result<(), Error> {
    let (value, from, to) = split_conversion(input)?;
    let value = value.parse::<f64>()?;
    let from = system.parse_units(from).map_err(|err| Error::source(err, from))?;
    let to = system.parse_units(to).map_err(|err| Error::source(err, to))?;

    let quantity = Quantity::new(value, from);
    let converted = quantity.convert(&to)?;
    println!("{} = {}", quantity, converted);
    Ok(())
}

/// Prints the dimension of a units expression, and other dimensions with the same components.
fn dimension(input: &str, system: &MeasurementSystem) -> Result<(), Error> {
    let units = system.parse_units(input).map_err(|err| Error::source(err, input))?;
    let dimension = units.dimension();
    println!("{}", dimension);

    let similar = system.dimensions_like(&units)
        .into_iter()
        .filter(|other| other.name() != dimension.name())
        .map(|other| other.name())
        .collect::<Vec<_>>();
    if !similar.is_empty() {
        println!("same shape as: {}", similar.join(", "));
    }
    Ok(())
}

/// Prints how units are defined.
fn units(input: &str, system: &MeasurementSystem) -> Result<(), Error> {
    let units = system.parse_units(input).map_err(|err| Error::source(err, input))?;
    match units.abbreviation() {
        Some(abbreviation) => println!("{} ({})", units.name(), abbreviation),
        None => println!("{}", units.name()),
    }
    println!("  dimension: {}", units.dimension().name());
    match units.offset_from_parent() {
        Some(offset) => println!(
            "  1 {} = (x + {}) * {} {}",
            units.symbol(),
            offset.offset(),
            offset.scale(),
            offset.parent(),
        ),
        None => println!("  factor: {}", units.factor()),
    }
    Ok(())
}

/// Runs a single command.
fn run(input: &str, system: &MeasurementSystem) -> Result<(), Error> {
    let input = input.trim();
    let (command, rest) = input.split_once(char::is_whitespace).unwrap_or((input, ""));
    debug!(command, "running command");
    match command {
        "dim" => dimension(rest, system),
        "units" => units(rest, system),
        "prefixes" => {
            for prefix in system.prefixes() {
                println!("{} = {}", prefix, prefix.factor());
            }
            Ok(())
        },
        _ => convert(input, system),
    }
}

/// Loads the system to use: the definition file at `path`, or SI if there is none.
fn load_system(path: Option<String>) -> Result<Arc<MeasurementSystem>, ExitCode> {
    let (src_id, source, result) = match path {
        Some(path) => {
            let source = fs::read_to_string(&path).map_err(|err| {
                eprintln!("could not read `{}`: {}", path, err);
                ExitCode::FAILURE
            })?;
            let result = MeasurementSystem::load(&source).map(|system| Arc::new(system.with_name(path.clone())));
            (path, source, result)
        },
        None => ("si.txt".to_owned(), SI_DEFINITIONS.to_owned(), si()),
    };

    result.map_err(|errors| {
        for error in &errors {
            if let Err(err) = error.report_to_stderr(&src_id, &source) {
                eprintln!("{}", err);
            }
        }
        ExitCode::FAILURE
    })
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let system = match load_system(std::env::args().nth(1)) {
        Ok(system) => system,
        Err(code) => return code,
    };
    info!(name = system.name(), "loaded measurement system");

    if !io::stdin().is_terminal() {
        // run each line of stdin as a command
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                return ExitCode::FAILURE;
            };
            if line.trim().is_empty() {
                continue;
            }
            if let Err(err) = run(&line, &system) {
                err.report();
            }
        }
        return ExitCode::SUCCESS;
    }

    // run the repl / interactive mode
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        },
    };

    fn process_line(rl: &mut DefaultEditor, system: &MeasurementSystem) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;
        if let Err(err) = run(&input, system) {
            err.report();
        }
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, &system) {
            match err {
                ReadlineError::Eof | ReadlineError::Interrupted => (),
                _ => eprintln!("{}", err),
            }
            break;
        }
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_short_conversion() {
        assert_eq!(split_conversion("1.5 m ft").unwrap(), ("1.5", "m", "ft"));
        assert_eq!(split_conversion("  100 °C  °F ").unwrap(), ("100", "°C", "°F"));
    }

    #[test]
    fn split_long_conversion() {
        assert_eq!(
            split_conversion("60 mile / hour to m / s").unwrap(),
            ("60", "mile / hour", "m / s"),
        );
    }

    #[test]
    fn split_invalid_conversion() {
        assert!(split_conversion("1.5").is_err());
        assert!(split_conversion("1.5 m").is_err());
        assert!(split_conversion("1.5 m ft in").is_err());
    }

    #[test]
    fn run_commands() {
        let system = si().unwrap();
        assert!(run("100 °C °F", &system).is_ok());
        assert!(run("60 mile / hour to km / h", &system).is_ok());
        assert!(run("dim kg m / s^2", &system).is_ok());
        assert!(run("units kWh", &system).is_ok());
        assert!(matches!(run("1 m s", &system), Err(Error::Conversion(_))));
        assert!(matches!(run("one m ft", &system), Err(Error::Float(_))));
        assert!(matches!(run("dim furlong", &system), Err(Error::Source { .. })));
    }
}
