//! contcalc - CPS calculator CLI
use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use contcalc::{evaluate, parse_program, PrimitiveTable};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_usage() {
    eprintln!("contcalc v{}", VERSION);
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    contcalc [OPTIONS] <INPUT>");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    -h, --help           Print this help message");
    eprintln!("    -v, --version        Print version information");
    eprintln!("    -o, --output <FILE>  Write output to FILE (default: stdout)");
    eprintln!("    --sexpr              Print S-expressions instead of evaluating");
    eprintln!("    --repl               Start interactive REPL");
    eprintln!("    --eval               Evaluate and print results (default)");
    eprintln!("    --debug              Enable debug logging");
    eprintln!();
    eprintln!("ARGUMENTS:");
    eprintln!("    <INPUT>              Input file (use '-' for stdin)");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("    contcalc input.calc");
    eprintln!("    contcalc --repl");
    eprintln!("    contcalc --sexpr input.calc");
    eprintln!("    echo '(+ 1 2)' | contcalc -");
}

fn print_version() {
    println!("contcalc {}", VERSION);
}

struct Options {
    input: Option<String>,
    output: Option<String>,
    show_sexpr: bool,
    repl_mode: bool,
    debug: bool,
}

fn parse_args() -> Result<Options, String> {
    let args: Vec<String> = env::args().collect();

    let mut input = None;
    let mut output = None;
    let mut show_sexpr = false;
    let mut repl_mode = false;
    let mut debug = false;
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_usage();
                process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                process::exit(0);
            }
            "-o" | "--output" => {
                i += 1;
                if i >= args.len() {
                    return Err("Missing output file after -o".to_string());
                }
                output = Some(args[i].clone());
            }
            "--sexpr" => {
                show_sexpr = true;
            }
            "--repl" => {
                repl_mode = true;
            }
            "--eval" => {
                // Default mode, no-op
            }
            "--debug" => {
                debug = true;
            }
            arg if arg.starts_with('-') && arg != "-" => {
                return Err(format!("Unknown option: {}", arg));
            }
            arg => {
                if input.is_some() {
                    return Err("Multiple input files specified".to_string());
                }
                input = Some(arg.to_string());
            }
        }
        i += 1;
    }

    Ok(Options {
        input,
        output,
        show_sexpr,
        repl_mode,
        debug,
    })
}

fn read_input(input: &str) -> Result<String, String> {
    if input == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("Failed to read from stdin: {}", e))?;
        Ok(buffer)
    } else {
        let path = Path::new(input);
        if !path.exists() {
            return Err(format!("Input file not found: {}", input));
        }
        fs::read_to_string(path).map_err(|e| format!("Failed to read file '{}': {}", input, e))
    }
}

fn write_output(output: Option<&str>, content: &str) -> Result<(), String> {
    match output {
        Some(path) => {
            let mut file = fs::File::create(path)
                .map_err(|e| format!("Failed to create output file '{}': {}", path, e))?;
            file.write_all(content.as_bytes())
                .map_err(|e| format!("Failed to write to output file '{}': {}", path, e))?;
            Ok(())
        }
        None => {
            print!("{}", content);
            Ok(())
        }
    }
}

fn eval_source(source: &str, options: &Options) -> Result<String, String> {
    let exprs = parse_program(source).map_err(|e| format!("Parse error: {}", e))?;

    if options.show_sexpr {
        let mut output = String::new();
        for expr in &exprs {
            output.push_str(&format!("{}\n", expr));
        }
        return Ok(output);
    }

    let table = PrimitiveTable::with_standard_ops();
    let mut output = String::new();
    for expr in &exprs {
        evaluate(expr, &table, |n| output.push_str(&format!("{}\n", n)))
            .map_err(|e| format!("Evaluation error: {}", e))?;
    }

    Ok(output)
}

fn history_path() -> Option<PathBuf> {
    let dir = dirs::data_dir()?.join("contcalc");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join("history.txt"))
}

fn run_repl() {
    println!("contcalc REPL v{}", VERSION);
    println!("Enter expressions like (+ 1 2). Type 'exit' or Ctrl-D to quit.\n");

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to start line editor: {}", e);
            process::exit(1);
        }
    };
    let history = history_path();
    if let Some(path) = &history {
        let _ = rl.load_history(path);
    }

    let table = PrimitiveTable::with_standard_ops();
    let mut line_num = 1;

    loop {
        match rl.readline(&format!("calc[{}]> ", line_num)) {
            Ok(line) => {
                let input = line.trim();

                if input == "exit" || input == "quit" {
                    println!("Goodbye!");
                    break;
                }

                if input.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(input);

                match parse_program(input) {
                    Ok(exprs) => {
                        for expr in &exprs {
                            if let Err(e) = evaluate(expr, &table, |n| println!("{}", n)) {
                                eprintln!("Error: {}", e);
                            }
                        }
                    }
                    Err(e) => {
                        eprintln!("Error: {}", e);
                    }
                }

                line_num += 1;
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => {
                eprintln!("Readline error: {}", e);
                break;
            }
        }
    }

    if let Some(path) = &history {
        let _ = rl.save_history(path);
    }
}

fn init_tracing(debug: bool) {
    let level = if debug {
        tracing::Level::TRACE
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let options = match parse_args() {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    init_tracing(options.debug);

    if options.repl_mode {
        run_repl();
        return;
    }

    let input = match &options.input {
        Some(input) => input.clone(),
        None => {
            eprintln!("Error: No input specified");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    let source = match read_input(&input) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match eval_source(&source, &options) {
        Ok(output) => {
            if let Err(e) = write_output(options.output.as_deref(), &output) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
