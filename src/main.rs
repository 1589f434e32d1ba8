//! emlisp command-line entry point
//!
//! With no arguments, runs an interactive REPL. With arguments, treats the
//! first as a script path, binds the rest to `*ARGV*`, and runs the script.

use std::env;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use emlisp::{Error, Interpreter};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let mut args = env::args().skip(1);
    let interp = Interpreter::new()
        .map_err(|e| anyhow::anyhow!(e.to_string()))
        .context("interpreter startup failed")?;

    match args.next() {
        Some(path) => {
            interp.set_argv(args);
            interp
                .load_file(&path)
                .map_err(|e| anyhow::anyhow!(e.to_string()))
                .with_context(|| format!("while running {}", path))?;
            Ok(())
        }
        None => repl(&interp),
    }
}

fn repl(interp: &Interpreter) -> anyhow::Result<()> {
    println!("emlisp {}", emlisp::VERSION);
    let stdin = io::stdin();

    loop {
        print!("user> ");
        io::stdout().flush().context("flushing prompt")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("reading input")?;
        if read == 0 {
            // EOF (Ctrl-D)
            println!();
            return Ok(());
        }

        match interp.rep(&line) {
            Ok(output) => println!("{}", output),
            // Empty lines and comment-only lines are not errors
            Err(Error::BlankInput) => {}
            Err(err) => eprintln!("error: {}", err),
        }
    }
}
