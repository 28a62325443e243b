//! Clusie CLI — execute and disassemble flat bytecode programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Input/decode error
//! - 3: Runtime error

mod commands;

use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => commands::run(&args[2..]),
        "disassemble" => commands::disassemble(&args[2..]),
        "--help" | "-h" | "help" => {
            print_usage();
            process::exit(0);
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            print_usage();
            process::exit(1);
        }
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

fn print_usage() {
    eprintln!("Usage: clusie <command> [args]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <prog.clb> [--read WIDTH@OFFSET]...   Execute, then print stack slots");
    eprintln!("  disassemble <prog.clb>                    Disassemble binary to text");
    eprintln!();
    eprintln!("WIDTH is one of u8, u16, u32, u64; OFFSET is a byte offset, e.g. u32@4");
}
