// main.rs - Interactive REPL and batch harness

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::env;
use std::fs;
use std::process::ExitCode;

use swage::compiler::{disassemble, Compiler};
use swage::errors::ForthError;
use swage::interpreter;
use swage::value::Value;
use swage::vocabulary::Vocabulary;

/// One interpreter session: a vocabulary that accumulates definitions and a
/// value stack threaded through every evaluated chunk.
struct Session {
    vocab: Vocabulary,
    stack: Vec<Value>,
}

impl Session {
    fn new() -> Session {
        Session {
            vocab: Vocabulary::new(),
            stack: Vec::new(),
        }
    }

    /// Evaluates one chunk: either a `: name ... ;` definition or an
    /// expression run against the session stack.
    fn eval(&mut self, chunk: &str) -> Result<(), ForthError> {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            return Ok(());
        }

        if let Some(rest) = chunk.strip_prefix(':') {
            let rest = rest.trim_start();
            let (name, body) = match rest.split_once(char::is_whitespace) {
                Some(pair) => pair,
                None => return Err(ForthError::UnbalancedControl),
            };
            let body = match body.trim_end().strip_suffix(';') {
                Some(b) => b,
                None => return Err(ForthError::UnbalancedControl),
            };
            let mut compiler = Compiler::new_named(name, &mut self.vocab);
            compiler.parse_with_params(body)?;
            compiler.finish()?;
            Ok(())
        } else {
            let mut compiler = Compiler::new(&mut self.vocab);
            compiler.set_max_inputs(self.stack.len());
            compiler.parse_with_params(chunk)?;
            let word = compiler.finish()?;
            interpreter::run_with_stack(&word, &mut self.stack)
        }
    }
}

fn main() -> ExitCode {
    let mut session = Session::new();
    let args: Vec<String> = env::args().skip(1).collect();

    if !args.is_empty() {
        for path in &args {
            if let Err(code) = run_file(&mut session, path) {
                return ExitCode::from(code);
            }
        }
        if !session.stack.is_empty() {
            println!("{}", show_stack(&session.stack));
        }
        return ExitCode::SUCCESS;
    }

    repl(&mut session)
}

/// Evaluates a source file line by line, accumulating multi-line
/// definitions, and reports the first error together with its exit code.
fn run_file(session: &mut Session, path: &str) -> Result<(), u8> {
    let source = fs::read_to_string(path).map_err(|e| {
        eprintln!("swage: {}: {}", path, e);
        1u8
    })?;

    let mut in_definition = false;
    let mut pending = String::new();
    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if in_definition {
            pending.push(' ');
            pending.push_str(line);
            if line.contains(';') {
                in_definition = false;
                eval_chunk(session, &pending)?;
                pending.clear();
            }
        } else if line.starts_with(':') && !line.contains(';') {
            in_definition = true;
            pending = line.to_string();
        } else {
            eval_chunk(session, line)?;
        }
    }
    if in_definition {
        eprintln!("swage: {}: unterminated definition", path);
        return Err(1);
    }
    Ok(())
}

fn eval_chunk(session: &mut Session, chunk: &str) -> Result<(), u8> {
    session.eval(chunk).map_err(|e| {
        eprintln!("swage: {}", e);
        e.exit_code()
    })
}

fn repl(session: &mut Session) -> ExitCode {
    println!("Swage v{}", env!("CARGO_PKG_VERSION"));
    println!("Type .help for help, .quit to exit");
    println!();

    let mut rl = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("swage: cannot open terminal: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let history_file = dirs::home_dir().map(|mut p| {
        p.push(".swage_history");
        p
    });
    if let Some(ref path) = history_file {
        let _ = rl.load_history(path);
    }

    let mut in_definition = false;
    let mut pending = String::new();

    loop {
        let prompt = if in_definition { "... " } else { "> " };
        let readline = rl.readline(prompt);

        match readline {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(input);

                if input.starts_with('.') {
                    match dot_command(session, input) {
                        DotOutcome::Handled => continue,
                        DotOutcome::Quit => break,
                    }
                }

                // Accumulate definitions until the closing semicolon.
                if in_definition {
                    pending.push(' ');
                    pending.push_str(input);
                    if !input.contains(';') {
                        continue;
                    }
                    in_definition = false;
                } else if input.starts_with(':') && !input.contains(';') {
                    in_definition = true;
                    pending = input.to_string();
                    continue;
                } else {
                    pending = input.to_string();
                }

                match session.eval(&pending) {
                    Ok(()) => {
                        if session.stack.is_empty() {
                            println!(" ok");
                        } else {
                            println!(" ok  {}", show_stack(&session.stack));
                        }
                    }
                    Err(e) => println!(" {}", e),
                }
                pending.clear();
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                in_definition = false;
                pending.clear();
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!();
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    if let Some(ref path) = history_file {
        let _ = rl.save_history(path);
    }

    ExitCode::SUCCESS
}

enum DotOutcome {
    Handled,
    Quit,
}

fn dot_command(session: &mut Session, input: &str) -> DotOutcome {
    let mut parts = input.split_whitespace();
    let cmd = parts.next().unwrap_or("");
    match cmd {
        ".quit" | ".exit" | ".q" => return DotOutcome::Quit,
        ".help" | ".h" => print_help(),
        ".words" | ".w" => print_words(session),
        ".stack" | ".s" => println!("{}", show_stack(&session.stack)),
        ".clear" => session.stack.clear(),
        ".see" => match parts.next() {
            Some(name) => print_word(session, name),
            None => println!("Usage: .see WORD"),
        },
        _ => {
            println!("Unknown command: {}", cmd);
            println!("Type .help for help");
        }
    }
    DotOutcome::Handled
}

fn print_help() {
    println!("Swage REPL commands:");
    println!("  .help, .h      Show this help");
    println!("  .words, .w     List all defined words");
    println!("  .stack, .s     Show the value stack");
    println!("  .clear         Clear the value stack");
    println!("  .see WORD      Show a word's stack effect and body");
    println!("  .quit, .q      Exit");
    println!();
    println!("Syntax:");
    println!("  Numbers:       123, -4, 0.75, 1e3");
    println!("  Strings:       \"double quoted, no escapes\"");
    println!("  Words:         DUP SWAP DROP OVER ROT + - * / MOD ...");
    println!("  Define:        : SQUARE DUP * ;");
    println!("  Conditionals:  IF ... THEN, IF ... ELSE ... THEN");
    println!("  Loops:         BEGIN ... UNTIL, BEGIN ... WHILE ... REPEAT");
}

fn print_words(session: &Session) {
    let mut names: Vec<&str> = session.vocab.iter().filter_map(|w| w.name()).collect();
    names.sort_unstable();
    println!("Defined words ({}):", names.len());
    for (i, name) in names.iter().enumerate() {
        print!("{:12}", name);
        if (i + 1) % 6 == 0 {
            println!();
        }
    }
    if names.len() % 6 != 0 {
        println!();
    }
}

fn print_word(session: &Session, name: &str) {
    let word = match session.vocab.lookup(name) {
        Some(w) => w,
        None => {
            println!("Unknown word: {}", name);
            return;
        }
    };
    print!("{} {}", name, word.effect());
    if word.is_native() {
        println!("  native");
        return;
    }
    match disassemble(word, &session.vocab) {
        Ok(refs) => {
            print!("  : {}", name);
            for r in &refs {
                print!(" {}", r);
            }
            println!(" ;");
        }
        Err(e) => println!("  {}", e),
    }
}

fn show_stack(stack: &[Value]) -> String {
    let mut out = format!("<{}>", stack.len());
    for v in stack {
        out.push(' ');
        out.push_str(&v.to_string());
    }
    out
}
