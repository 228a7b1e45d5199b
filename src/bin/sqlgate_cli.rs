//!
//! sqlgate CLI binary
//! ------------------
//! Command-line tool and interactive interpreter for parsing extended-SQL
//! programs, either in-process or against a running sqlgate server. In REPL
//! mode, statements accumulate until a line ends with `;` and are then parsed
//! as one program.

use std::env;
use std::io::Read;
use std::path::Path;

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use sqlgate::cli::connectivity::RemoteSession;
use sqlgate::cli::{parse_file, render_result};
use sqlgate::dialect::DialectRegistry;
use sqlgate::program::{parse_program, ParseResult};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} --query \"<SQL>\" [--dialect <name>] [--connect <url>] [--json]\n  {program} -q \"<SQL>\"            # same as --query\n  {program} --input FILE [--output FILE] [--dialect <name>]   # batch mode, JSON out\n  {program} --repl [--dialect <name>] [--connect <url>]       # interactive interpreter\n  {program}                        # reads the program from stdin\n\nFlags:\n  --dialect <name>         Dialect to parse with (default: generic)\n  --connect <url>          Parse against a running sqlgate server (http/https)\n  --input FILE             Read the SQL program from FILE, emit JSON\n  --output FILE            With --input: write JSON to FILE instead of stdout\n  --json                   Print raw JSON instead of the readable rendering\n  --repl                   Start interactive mode\n  -q, --query <SQL>        Parse a one-shot program (from arg); if omitted, reads stdin\n  -h, --help               Show this help\n\nInteractive commands:\n  dialect <name>           switch dialect\n  connect <url>            parse against a remote server from now on\n  disconnect               go back to in-process parsing\n  dialects                 list known dialects\n  help                     show this help\n  quit | exit              exit the interpreter\n  <SQL terminated by ;>    parse a program (may span multiple lines)\n\nExamples:\n  {program} --query \"select 1; select 1 to train;\"\n  {program} --dialect hive -q \"select * from `db`.`t` to predict churn\"\n  {program} --input program.sql --output result.json\n  {program} --repl --connect http://127.0.0.1:7979"
    );
}

enum Backend {
    Local(DialectRegistry),
    Remote(RemoteSession),
}

impl Backend {
    fn parse(&self, dialect: &str, sql: &str) -> Result<ParseResult> {
        match self {
            Backend::Local(registry) => Ok(parse_program(registry, dialect, sql)?),
            Backend::Remote(session) => session.parse(dialect, sql),
        }
    }

    fn dialects(&self) -> Result<Vec<String>> {
        match self {
            Backend::Local(registry) => Ok(registry.dialects()),
            Backend::Remote(session) => session.dialects(),
        }
    }
}

fn print_result(result: &ParseResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", render_result(result));
    }
    Ok(())
}

fn run_repl(mut backend: Backend, mut dialect: String, json: bool) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut buffer = String::new();
    loop {
        let prompt = if buffer.is_empty() { "sqlgate> " } else { "    ...> " };
        let line = match rl.readline(prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                buffer.clear();
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };

        let trimmed = line.trim();
        if buffer.is_empty() {
            match trimmed {
                "" => continue,
                "quit" | "exit" => break,
                "help" => {
                    print_usage("sqlgate_cli");
                    continue;
                }
                "dialects" => {
                    match backend.dialects() {
                        Ok(names) => println!("{}", names.join(", ")),
                        Err(e) => eprintln!("error: {:#}", e),
                    }
                    continue;
                }
                "disconnect" => {
                    backend = Backend::Local(DialectRegistry::with_builtins());
                    println!("parsing in-process");
                    continue;
                }
                _ => {}
            }
            if let Some(rest) = trimmed.strip_prefix("dialect ") {
                dialect = rest.trim().to_string();
                println!("dialect set to {}", dialect);
                continue;
            }
            if let Some(rest) = trimmed.strip_prefix("connect ") {
                match RemoteSession::connect(rest.trim()) {
                    Ok(session) => {
                        println!("connected to {}", session.base_url());
                        backend = Backend::Remote(session);
                    }
                    Err(e) => eprintln!("connect failed: {:#}", e),
                }
                continue;
            }
        }

        rl.add_history_entry(&line).ok();
        buffer.push_str(&line);
        buffer.push('\n');
        if !trimmed.ends_with(';') {
            continue;
        }
        let program = std::mem::take(&mut buffer);
        match backend.parse(&dialect, &program) {
            Ok(result) => print_result(&result, json)?,
            Err(e) => eprintln!("error: {:#}", e),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize tracing subscriber so parse errors are visible on the command line
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let mut args: Vec<String> = env::args().collect();
    let program = args.remove(0);

    let mut dialect: String = "generic".to_string();
    let mut query: Option<String> = None;
    let mut input: Option<String> = None;
    let mut output: Option<String> = None;
    let mut connect_url: Option<String> = None;
    let mut repl: bool = false;
    let mut json: bool = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--dialect" => {
                if i + 1 >= args.len() { eprintln!("--dialect requires a value"); print_usage(&program); std::process::exit(2); }
                dialect = args[i + 1].clone();
                i += 2; continue;
            }
            "--connect" => {
                if i + 1 >= args.len() { eprintln!("--connect requires a URL"); print_usage(&program); std::process::exit(2); }
                connect_url = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--input" => {
                if i + 1 >= args.len() { eprintln!("--input requires a value"); print_usage(&program); std::process::exit(2); }
                input = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--output" => {
                if i + 1 >= args.len() { eprintln!("--output requires a value"); print_usage(&program); std::process::exit(2); }
                output = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--query" | "-q" => {
                if i + 1 >= args.len() { eprintln!("--query requires a value"); print_usage(&program); std::process::exit(2); }
                query = Some(args[i + 1].clone());
                i += 2; continue;
            }
            "--repl" => { repl = true; i += 1; continue; }
            "--json" => { json = true; i += 1; continue; }
            "-h" | "--help" => {
                print_usage(&program);
                return Ok(());
            }
            unk => {
                // Allow passing the program without a flag as a single arg
                if query.is_none() { query = Some(unk.to_string()); i += 1; continue; }
                eprintln!("Unrecognized argument: {}", unk);
                print_usage(&program);
                std::process::exit(2);
            }
        }
    }

    // Batch mode: file in, JSON out. Always parses in-process.
    if let Some(input) = input {
        let registry = DialectRegistry::with_builtins();
        let out_path = output.as_deref().map(Path::new);
        parse_file(&registry, &dialect, Path::new(&input), out_path)?;
        return Ok(());
    }

    let backend = match &connect_url {
        Some(url) => Backend::Remote(RemoteSession::connect(url)?),
        None => Backend::Local(DialectRegistry::with_builtins()),
    };

    if repl {
        return run_repl(backend, dialect, json);
    }

    let sql = match query {
        Some(q) => q,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let result = backend.parse(&dialect, &sql)?;
    print_result(&result, json)
}
