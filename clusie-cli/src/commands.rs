//! CLI command implementations.

use std::fs;

/// A `--read WIDTH@OFFSET` slot inspection request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadSpec {
    pub width: Width,
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    U8,
    U16,
    U32,
    U64,
}

/// Parse `u32@4` style inspection specs.
pub fn parse_read_spec(spec: &str) -> Result<ReadSpec, String> {
    let (width, offset) = spec
        .split_once('@')
        .ok_or_else(|| format!("bad read spec '{spec}': expected WIDTH@OFFSET"))?;

    let width = match width {
        "u8" => Width::U8,
        "u16" => Width::U16,
        "u32" => Width::U32,
        "u64" => Width::U64,
        other => return Err(format!("bad read spec '{spec}': unknown width '{other}'")),
    };

    let offset = offset
        .parse::<usize>()
        .map_err(|_| format!("bad read spec '{spec}': offset must be a number"))?;

    Ok(ReadSpec { width, offset })
}

/// Execute a .clb binary program, then print the requested stack slots.
pub fn run(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: run requires an input file");
        eprintln!("Usage: clusie run <prog.clb> [--read WIDTH@OFFSET]...");
        return Err(1);
    }

    let input = &args[0];
    let code = read_binary(input)?;

    let mut reads = Vec::new();
    let mut rest = &args[1..];
    while !rest.is_empty() {
        if rest[0] != "--read" || rest.len() < 2 {
            eprintln!("error: unexpected argument '{}'", rest[0]);
            return Err(1);
        }
        let spec = parse_read_spec(&rest[1]).map_err(|e| {
            eprintln!("error: {e}");
            1
        })?;
        reads.push(spec);
        rest = &rest[2..];
    }

    let vm = clusie_vm::run(&code).map_err(|e| {
        eprintln!("runtime error: {e}");
        3
    })?;

    for spec in reads {
        let value = match spec.width {
            Width::U8 => vm.read_stack::<u8>(spec.offset).map(u64::from),
            Width::U16 => vm.read_stack::<u16>(spec.offset).map(u64::from),
            Width::U32 => vm.read_stack::<u32>(spec.offset).map(u64::from),
            Width::U64 => vm.read_stack::<u64>(spec.offset),
        };
        match value {
            Ok(v) => println!("{v}"),
            Err(e) => {
                eprintln!("error: {e}");
                return Err(1);
            }
        }
    }

    Ok(())
}

/// Disassemble a .clb binary to text.
pub fn disassemble(args: &[String]) -> Result<(), i32> {
    if args.is_empty() {
        eprintln!("error: disassemble requires an input file");
        eprintln!("Usage: clusie disassemble <prog.clb>");
        return Err(1);
    }

    let input = &args[0];
    let code = read_binary(input)?;

    let text = clusie_common::disassemble(&code).map_err(|e| {
        eprintln!("error: {e}");
        1
    })?;
    print!("{text}");
    Ok(())
}

fn read_binary(path: &str) -> Result<Vec<u8>, i32> {
    fs::read(path).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        1
    })
}
