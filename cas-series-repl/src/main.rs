mod error;
mod request;

use cas_error::Error;
use cas_series::series::{useries, PowerSeries};
use env_logger::{Builder, Env};
use log::debug;
use request::parse_request;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{fs::File, io::{self, BufReader, IsTerminal, Read}};

/// Parses the given input and expands it with the fast series path.
fn parse_expand(input: &str) -> Result<PowerSeries, Error> {
    let request = parse_request(input)?;
    debug!("expanding `{}` about {} to order {}", request.expr, request.relation, request.order);
    useries(&request.expr, &request.relation, request.order)
        .map_err(|err| Error::new(vec![request.span.clone()], err))
}

/// Expands every nonempty line of the input, printing the series or the failure.
fn expand_lines(input: &str) {
    for line in input.lines().filter(|line| !line.trim().is_empty()) {
        expand(line);
    }
}

/// Expands a single line of input, printing the series or the failure.
fn expand(input: &str) {
    match parse_expand(input) {
        Ok(series) => println!("{}", series),
        Err(err) => err.report_to_stderr(input),
    }
}

fn main() -> io::Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();

    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // expand every line of the source file
        let mut file = BufReader::new(File::open(filename)?);
        let mut input = String::new();
        file.read_to_string(&mut input)?;

        expand_lines(&input);
    } else if !io::stdin().is_terminal() {
        // read lines from stdin
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;

        expand_lines(&input);
    } else {
        // run the repl / interactive mode
        let mut rl = DefaultEditor::new().map_err(io::Error::other)?;

        fn process_line(rl: &mut DefaultEditor) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            expand(&input);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }

    Ok(())
}
