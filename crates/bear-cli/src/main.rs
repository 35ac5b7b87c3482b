mod hints;

use std::fs;
use std::path::Path;

use owo_colors::OwoColorize;

use bear_codegen::CodeGenerator;
use bear_lexer::Lexer;
use bear_parser::Parser;
use bear_syntax::error::Error;

fn render_error(kind: &str, source: &str, err: &Error) {
    eprintln!("{}: {}", kind.red().bold(), err.msg.red());
    if let (Some(line), Some(col)) = (err.line, err.col) {
        if let Some(src_line) = source.lines().nth(line - 1) {
            eprintln!("  {}", src_line.bright_black());
            let mut marker = String::new();
            if col > 1 {
                marker.push_str(&" ".repeat(col - 1));
            }
            marker.push('^');
            eprintln!("  {}", marker.red());
        } else {
            eprintln!("  at {}:{}", line, col);
        }
    }
    hints::provide_error_hint(&err.msg);
}

fn parse_output(args: &[String]) -> Option<String> {
    let mut i = 1usize;
    while i + 1 < args.len() {
        if args[i] == "--output" || args[i] == "-o" {
            return Some(args[i + 1].clone());
        }
        i += 1;
    }
    None
}

fn parse_path(args: &[String]) -> Option<&str> {
    let mut i = 1usize;
    while i < args.len() {
        match args[i].as_str() {
            "--output" | "-o" => {
                i += 2;
            }
            s if s.starts_with('-') => {
                i += 1;
            }
            _ => {
                return Some(args[i].as_str());
            }
        }
    }
    None
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let path = match parse_path(&args) {
        Some(p) => p,
        None => {
            eprintln!("Usage: bear-cli <file.bear> [-o <file.cpp>]");
            std::process::exit(2);
        }
    };
    if !Path::new(path).exists() {
        eprintln!(
            "{}: {}",
            "error".red().bold(),
            format!("File not found: {}", path).red()
        );
        std::process::exit(1);
    }
    let src = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!(
                "{}: {}",
                "error".red().bold(),
                format!("Failed to read {}: {}", path, e).red()
            );
            std::process::exit(1);
        }
    };

    let mut lexer = Lexer::new(&src);
    let tokens = match lexer.tokenize() {
        Ok(t) => t,
        Err(e) => {
            render_error("Lex error", &src, &e);
            std::process::exit(1);
        }
    };

    let mut parser = Parser::new(tokens);
    let program = match parser.parse_program() {
        Ok(p) => p,
        Err(e) => {
            render_error("Parse error", &src, &e);
            std::process::exit(1);
        }
    };

    let cpp = CodeGenerator::new().generate(&program);

    match parse_output(&args) {
        Some(out_path) => {
            if let Err(e) = fs::write(&out_path, cpp) {
                eprintln!(
                    "{}: {}",
                    "error".red().bold(),
                    format!("Failed to write {}: {}", out_path, e).red()
                );
                std::process::exit(1);
            }
        }
        None => print!("{}", cpp),
    }
}
