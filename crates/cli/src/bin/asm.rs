//! The assembler front end: source file in, `.l0` object out.

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::{Arg, ArgAction, Command};

use stm8tools::asm::Assembler;
use stm8tools::{l0, util};

fn main() {
    let matches = Command::new("asm")
        .about("Assembler for the STM8 microcontroller family")
        .arg(
            Arg::new("info")
                .short('I')
                .long("info")
                .action(ArgAction::SetTrue)
                .help("Print assembled symbols, relocations and sections"),
        )
        .arg(
            Arg::new("noprint")
                .short('p')
                .long("noprint")
                .action(ArgAction::SetTrue)
                .help("Suppress \".print\" directives"),
        )
        .arg(
            Arg::new("define")
                .short('D')
                .value_name("NAME=VALUE")
                .action(ArgAction::Append)
                .help("Define a constant symbol before assembly"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .value_name("PATH")
                .help("Object file path (defaults to the input with a .l0 extension)"),
        )
        .arg(
            Arg::new("input")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .help("The source file to assemble"),
        )
        .get_matches();

    let input: &PathBuf = matches.get_one("input").unwrap();
    let output = match matches.get_one::<String>("output") {
        Some(path) => PathBuf::from(path),
        None => default_output(input),
    };

    let mut assembler = Assembler::new();
    assembler.noprint = matches.get_flag("noprint");

    if let Some(defines) = matches.get_many::<String>("define") {
        for define in defines {
            if let Err(err) = apply_define(&mut assembler, define) {
                eprintln!("{}", err);
                process::exit(1);
            }
        }
    }

    if let Err(err) = assembler.assemble(input) {
        eprintln!("{}", err);
        eprintln!("error in file \"{}\"", input.display());
        process::exit(1);
    }

    if matches.get_flag("info") {
        assembler.print_result();
    }

    if !assembler.has_output() {
        eprintln!("no output data");
        process::exit(1);
    }

    let bytes = match l0::write(
        &assembler.symbols,
        &assembler.relocations,
        &assembler.sections,
    ) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };
    if let Err(err) = fs::write(&output, bytes) {
        eprintln!("failed to write \"{}\": {}", output.display(), err);
        process::exit(1);
    }
}

fn apply_define(assembler: &mut Assembler, define: &str) -> stm8tools::Result<()> {
    let (name, value) = split_define(define)?;
    assembler.define(name, value)
}

fn split_define(define: &str) -> stm8tools::Result<(&str, i64)> {
    match define.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name, util::parse_number(value)?)),
        _ => Err(stm8tools::Error::new(format!(
            "-D expects NAME=VALUE, got \"{}\"",
            define
        ))),
    }
}

/// Replace the input's last extension with `.l0`; the search for the dot
/// does not cross a directory separator.
fn default_output(input: &Path) -> PathBuf {
    input.with_extension("l0")
}
