// TinyC frontend CLI: parse a source file and print its AST as JSON.

use clap::Parser as ClapParser;
use std::fs;
use std::process;

use tinyc::{dump, json, Lexer, Parser};

#[derive(ClapParser, Debug)]
#[command(version, about = "TinyC frontend: tokenize and parse TinyC source", long_about = None)]
struct Args {
    /// TinyC source file
    input: String,

    /// Print the token stream instead of parsing
    #[arg(short, long)]
    tokens: bool,

    /// Print a human-readable AST dump instead of JSON
    #[arg(short, long)]
    dump: bool,
}

fn main() {
    let args = Args::parse();

    let source = match fs::read_to_string(&args.input) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read '{}': {}", args.input, err);
            process::exit(1);
        }
    };

    let mut lexer = Lexer::with_filename(&source, &args.input);

    if args.tokens {
        match lexer.tokenize() {
            Ok(tokens) => {
                for token in &tokens {
                    println!("{} at {}", token, token.location);
                }
            }
            Err(err) => {
                eprintln!("lexer error: {}", err);
                process::exit(1);
            }
        }
        return;
    }

    let program = Parser::new(lexer).and_then(|mut parser| parser.parse_program());
    match program {
        Ok(program) => {
            if args.dump {
                print!("{}", dump::dump_program(&program));
            } else {
                println!("{}", json::to_string_pretty(&program));
            }
        }
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    }
}
