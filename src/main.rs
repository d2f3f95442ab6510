mod completer;
mod io;

use clap::{Arg, ArgMatches, Command};
use completer::EnvHelper;
use io::{LineReader, ReplInput};
use minilisp::errors::*;
use minilisp::{Interpreter, Pretty, Reader, Token, Value};
use std::fs;
use std::process;
use tracing_subscriber::EnvFilter;

/// What to show besides the result of each form.
struct Config {
    show_tokens: bool,
    show_ast: bool,
    pretty: bool,
    keep_going: bool,
}

impl Config {
    fn from_matches(matches: &ArgMatches) -> Self {
        Config {
            show_tokens: matches.is_present("tokens"),
            show_ast: matches.is_present("ast"),
            pretty: matches.is_present("pretty"),
            keep_going: matches.is_present("keep-going"),
        }
    }
}

fn main() {
    let matches = Command::new("minilisp")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A minimal Lisp interpreter")
        .arg(
            Arg::new("FILE")
                .help("Evaluate all forms in this file")
                .conflicts_with("eval"),
        )
        .arg(
            Arg::new("eval")
                .short('e')
                .long("eval")
                .takes_value(true)
                .value_name("EXPR")
                .help("Evaluate the given source text"),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .help("Print each token tree before building it"),
        )
        .arg(
            Arg::new("ast")
                .long("ast")
                .help("Print each syntax tree before evaluating it"),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .help("Print results in the indented multi-line form"),
        )
        .arg(
            Arg::new("keep-going")
                .short('k')
                .long("keep-going")
                .help("Report errors and continue with the next form"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .multiple_occurrences(true)
                .help("Raise log verbosity (-v debug, -vv trace)"),
        )
        .get_matches();

    init_logging(matches.occurrences_of("verbose"));

    let config = Config::from_matches(&matches);
    let mut interp = Interpreter::new();

    let ok = if let Some(src) = matches.value_of("eval") {
        run_source(&interp, src, &config)
    } else if let Some(path) = matches.value_of("FILE") {
        match fs::read_to_string(path) {
            Ok(src) => run_source(&interp, &src, &config),
            Err(e) => {
                report_error(&e.into());
                false
            }
        }
    } else {
        repl(&mut interp, &config);
        true
    };

    if !ok {
        process::exit(1);
    }
}

fn init_logging(verbosity: u64) {
    let default = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Evaluate every form in `src`; returns false if any of them failed.
fn run_source(interp: &Interpreter, src: &str, config: &Config) -> bool {
    let mut ok = true;
    for token in Reader::new(src) {
        match process(interp, token, config) {
            Ok(value) => print_value(&value, config),
            Err(e) => {
                report_error(&e);
                ok = false;
                if !config.keep_going {
                    break;
                }
            }
        }
    }
    ok
}

fn process(interp: &Interpreter, token: Result<Token>, config: &Config) -> Result<Value> {
    let token = token?;
    if config.show_tokens {
        print!("{}", token.pretty_print());
    }
    let ast = interp.build(&token)?;
    if config.show_ast {
        print!("{}", ast.pretty_print());
    }
    interp.eval_ast(&ast)
}

fn print_value(value: &Value, config: &Config) {
    if config.pretty {
        print!("{}", value.pretty_print());
    } else {
        println!("{}", value);
    }
}

fn repl(interp: &mut Interpreter, config: &Config) {
    let config = Config {
        keep_going: true,
        ..*config
    };
    let mut input = ReplInput::new(EnvHelper::new(
        interp.env().downgrade(),
        interp.operators(),
    ));
    let mut buffer = String::new();

    loop {
        let prompt = if buffer.is_empty() { ">> " } else { ".. " };
        let line = match input.read_line(prompt) {
            Ok(line) => line,
            Err(e) => match e.kind() {
                ErrorKind::Readline(rustyline::error::ReadlineError::Eof) => break,
                ErrorKind::Readline(rustyline::error::ReadlineError::Interrupted) => {
                    buffer.clear();
                    continue;
                }
                _ => {
                    report_error(&e);
                    break;
                }
            },
        };

        if buffer.is_empty() {
            match line.trim() {
                ":quit" => break,
                ":env" => {
                    print_env(interp);
                    continue;
                }
                ":reset" => {
                    interp.reset();
                    input.set_helper(EnvHelper::new(
                        interp.env().downgrade(),
                        interp.operators(),
                    ));
                    continue;
                }
                _ => {}
            }
        }

        buffer.push_str(&line);
        match minilisp::reader::read_all(&buffer) {
            Err(ref e) if e.is_incomplete_input() => continue,
            _ => {}
        }

        run_source(interp, &buffer, &config);
        buffer.clear();
    }
}

fn print_env(interp: &Interpreter) {
    let env = interp.env().borrow();
    for (name, entry) in env.items() {
        println!("{}: {}", name, entry.short_repr());
    }
}

fn report_error(e: &Error) {
    eprintln!("{}", e);
}
