use clap::{Args, Parser, Subcommand};
use climb::repl::list_operators;
use climb::{build_table, render_snippet, selftest, OperatorDef, ReplSession};
use climb_parser::{ExpressionEvaluator, OperatorTable, ParserConfig};
use log::LevelFilter;

#[derive(Debug, Parser)]
#[command(
    name = "climb",
    version,
    about = "Evaluate integer arithmetic with user-defined operator tiers",
    long_about = "climb evaluates expressions over non-negative integers with + - * / and\n\
        parentheses. Extra left-associative operators can be slotted in one tier\n\
        above any existing operator.\n\n\
        EXAMPLES:\n\
        \n  climb eval '2+2*2'                         Evaluate an expression\n\
        \n  climb eval --op '^=pow@*' '2*3^2'          Add power above '*'\n\
        \n  climb ops --op '@=max@+'                   Show the operator tiers\n\
        \n  climb repl                                 Start interactive REPL"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Deepest allowed parenthesis nesting
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Evaluate one or more expressions
    Eval(EvalArgs),

    /// List the operator table grouped by priority
    Ops(OperatorArgs),

    /// Run the built-in reference expressions
    Selftest,

    /// Start an interactive Read-Eval-Print Loop
    Repl(OperatorArgs),
}

#[derive(Debug, Args)]
struct OperatorArgs {
    /// Extra operator as SYMBOL=FUNCTION@AFTER, e.g. '^=pow@*' (repeatable)
    #[arg(long = "op", value_name = "DEF")]
    ops: Vec<OperatorDef>,
}

#[derive(Debug, Args)]
struct EvalArgs {
    #[command(flatten)]
    operators: OperatorArgs,

    /// Expressions to evaluate
    #[arg(required = true)]
    expressions: Vec<String>,
}

fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn load_table(args: &OperatorArgs) -> Result<OperatorTable, i32> {
    build_table(&args.ops).map_err(|e| {
        eprintln!("error: {e}");
        2
    })
}

fn run_eval(args: &EvalArgs, config: ParserConfig) -> i32 {
    let table = match load_table(&args.operators) {
        Ok(t) => t,
        Err(rc) => return rc,
    };
    for source in &args.expressions {
        let mut evaluator =
            ExpressionEvaluator::with_table(source, table.clone()).with_config(config);
        match evaluator.parse() {
            Ok(value) => println!("{source} = {value}"),
            Err(err) => {
                eprintln!("{}", render_snippet(source, &err));
                return 1;
            }
        }
    }
    0
}

fn run_ops(args: &OperatorArgs) -> i32 {
    match load_table(args) {
        Ok(table) => {
            for line in list_operators(&table) {
                println!("{line}");
            }
            0
        }
        Err(rc) => rc,
    }
}

fn run_selftest() -> i32 {
    match selftest::run() {
        Ok(count) => {
            log::info!("{count} reference expressions evaluated");
            println!("tests were passed");
            0
        }
        Err(e) => {
            eprintln!("error: selftest failed: {e}");
            1
        }
    }
}

fn run_repl(args: &OperatorArgs, config: ParserConfig) -> i32 {
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    let table = match load_table(args) {
        Ok(t) => t,
        Err(rc) => return rc,
    };
    let mut rl = match DefaultEditor::new() {
        Ok(e) => e,
        Err(e) => {
            eprintln!("error: failed to initialize repl: {e}");
            return 2;
        }
    };

    let mut session = ReplSession::new(table, config);
    loop {
        match rl.readline(session.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = rl.add_history_entry(trimmed);
                }
                let (out, exit) = session.handle_line(&line);
                for l in out {
                    println!("{l}");
                }
                if exit {
                    return 0;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return 0,
            Err(e) => {
                eprintln!("error: repl failed: {e}");
                return 2;
            }
        }
    }
}

fn run_cli() -> i32 {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let mut config = ParserConfig::default();
    if let Some(depth) = cli.max_depth {
        config.max_nesting_depth = depth;
    }

    match cli.command.unwrap_or(Command::Repl(OperatorArgs { ops: Vec::new() })) {
        Command::Eval(args) => run_eval(&args, config),
        Command::Ops(args) => run_ops(&args),
        Command::Selftest => run_selftest(),
        Command::Repl(args) => run_repl(&args, config),
    }
}

fn main() {
    std::process::exit(run_cli());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_verbose_flag() {
        let cli = Cli::try_parse_from(["climb", "-vvv", "selftest"]).unwrap();
        assert_eq!(cli.verbose, 3, "verbose count should be 3 for -vvv");
        assert!(matches!(cli.command, Some(Command::Selftest)));
    }

    #[test]
    fn cli_parses_repeated_operator_definitions() {
        let cli = Cli::try_parse_from([
            "climb", "eval", "--op", "^=pow@*", "--op", "@=max@+", "2*3^2", "9@2*3",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Eval(args)) => {
                assert_eq!(args.operators.ops.len(), 2);
                assert_eq!(args.operators.ops[0].to_string(), "^=pow@*");
                assert_eq!(args.expressions, vec!["2*3^2", "9@2*3"]);
            }
            other => panic!("Expected eval command, got {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_bad_operator_definition() {
        assert!(Cli::try_parse_from(["climb", "ops", "--op", "^pow"]).is_err());
        assert!(Cli::try_parse_from(["climb", "ops", "--op", "^=tetrate@*"]).is_err());
    }

    #[test]
    fn cli_defaults_to_repl() {
        let cli = Cli::try_parse_from(["climb"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_max_depth() {
        let cli = Cli::try_parse_from(["climb", "--max-depth", "8", "selftest"]).unwrap();
        assert_eq!(cli.max_depth, Some(8));
    }

    #[test]
    fn eval_exit_codes() {
        let config = ParserConfig::default();
        let ok = EvalArgs {
            operators: OperatorArgs { ops: Vec::new() },
            expressions: vec!["1+1".to_string()],
        };
        assert_eq!(run_eval(&ok, config), 0);
        let bad = EvalArgs {
            operators: OperatorArgs { ops: Vec::new() },
            expressions: vec!["1+".to_string()],
        };
        assert_eq!(run_eval(&bad, config), 1);
    }
}
