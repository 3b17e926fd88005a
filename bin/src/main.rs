use std::{
    io::{stderr, stdin, stdout, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;

use errors::{Report, Reporter, SyntaxErrors};
use interpreter::Interpreter;
use parser::printer::Rpn;

#[derive(clap::Parser)]
#[command(about = "Evaluate Lox expressions")]
struct Args {
    /// File holding a single expression. Starts a REPL when omitted.
    file: Option<PathBuf>,

    /// Print the parsed expression in prefix form instead of evaluating it
    #[arg(long, conflicts_with = "rpn")]
    ast: bool,

    /// Print the parsed expression in reverse Polish notation instead of evaluating it
    #[arg(long)]
    rpn: bool,
}

fn run_file(args: &Args, path: &PathBuf, reporter: &mut impl Report) -> anyhow::Result<ExitCode> {
    log::debug!("Running {}", path.display());
    run(args, &std::fs::read_to_string(path)?, reporter)?;

    Ok(if reporter.had_error() {
        ExitCode::from(65)
    } else if reporter.had_runtime_error() {
        ExitCode::from(70)
    } else {
        ExitCode::SUCCESS
    })
}

fn run_prompt(args: &Args, reporter: &mut impl Report) -> anyhow::Result<ExitCode> {
    loop {
        print!("> ");
        stdout().flush()?;
        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            return Ok(ExitCode::SUCCESS);
        }
        reporter.reset();
        run(args, &line, reporter)?;
    }
}

fn run(args: &Args, source: &str, reporter: &mut impl Report) -> anyhow::Result<()> {
    if args.ast || args.rpn {
        return print_tree(args, source, reporter);
    }

    if let Some(value) = Interpreter::new().run(source, reporter) {
        println!("{}", value);
    }
    Ok(())
}

fn print_tree(args: &Args, source: &str, reporter: &mut impl Report) -> anyhow::Result<()> {
    match parser::parse_source(source) {
        Ok(expr) if args.rpn => println!("{}", Rpn(&expr)),
        Ok(expr) => println!("{}", expr),
        Err(SyntaxErrors(errors)) => errors.iter().for_each(|e| reporter.syntax_error(e)),
    }
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let args = Args::parse();

    let mut reporter = Reporter::new(stderr());

    match &args.file {
        Some(file) => run_file(&args, file, &mut reporter),
        None => run_prompt(&args, &mut reporter),
    }
}
