//! The linker front end: `.l0` objects plus a script in, S-records out.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::{env, fs, process};

use clap::{Arg, ArgAction, Command};

use stm8tools::link::Linker;
use stm8tools::{srec, util};

fn main() {
    // clap has no two-letter short options; accept the traditional -MD
    // spelling.
    let args = env::args().map(|arg| if arg == "-MD" { "--MD".into() } else { arg });

    let matches = Command::new("lkr")
        .about("Linker for the STM8 microcontroller family")
        .arg(
            Arg::new("noprint")
                .short('p')
                .long("noprint")
                .action(ArgAction::SetTrue)
                .help("Suppress \".print\" directives"),
        )
        .arg(
            Arg::new("map")
                .short('M')
                .action(ArgAction::SetTrue)
                .help("Print the link map"),
        )
        .arg(
            Arg::new("map-data")
                .long("MD")
                .action(ArgAction::SetTrue)
                .help("Print the link map with section data"),
        )
        .arg(
            Arg::new("define")
                .short('D')
                .value_name("NAME=VALUE")
                .action(ArgAction::Append)
                .help("Define a symbol passed to the linker script"),
        )
        .arg(
            Arg::new("script")
                .long("script")
                .required(true)
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Linker script"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .value_name("PATH")
                .help("Output file (S19 format)"),
        )
        .arg(
            Arg::new("s19head")
                .long("s19head")
                .value_name("STRING")
                .help("Payload of the S0 header record"),
        )
        .arg(
            Arg::new("objects")
                .required(true)
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(PathBuf))
                .help("The object files to link"),
        )
        .get_matches_from(args);

    let mut linker = Linker::new();
    linker.noprint = matches.get_flag("noprint");

    if let Some(defines) = matches.get_many::<String>("define") {
        for define in defines {
            if let Err(err) = apply_define(&mut linker, define) {
                eprintln!("{}", err);
                process::exit(1);
            }
        }
    }

    for path in matches.get_many::<PathBuf>("objects").unwrap() {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(err) => {
                eprintln!("failed to open \"{}\": {}", path.display(), err);
                process::exit(1);
            }
        };
        let data = match unsafe { memmap2::Mmap::map(&file) } {
            Ok(mmap) => mmap,
            Err(err) => {
                eprintln!("failed to map \"{}\": {}", path.display(), err);
                process::exit(1);
            }
        };
        if let Err(err) = linker.load(path, &data) {
            eprintln!("{}", err);
            process::exit(1);
        }
    }

    let script: &PathBuf = matches.get_one("script").unwrap();
    if let Err(err) = linker.link(script) {
        eprintln!("{}", err);
        process::exit(1);
    }

    if let Some(output) = matches.get_one::<String>("output") {
        let map = match linker.memory_map().and_then(srec::MemData::pack) {
            Ok(map) => map,
            Err(err) => {
                eprintln!("{}", err);
                process::exit(1);
            }
        };

        let file = match fs::File::create(output) {
            Ok(file) => file,
            Err(err) => {
                eprintln!("failed to create \"{}\": {}", output, err);
                process::exit(1);
            }
        };
        let mut writer = BufWriter::new(file);
        let header = matches.get_one::<String>("s19head").map(String::as_str);
        if let Err(err) = srec::write(&mut writer, &map, header) {
            eprintln!("failed to write \"{}\": {}", output, err);
            process::exit(1);
        }
    }

    if matches.get_flag("map") || matches.get_flag("map-data") {
        linker.print_map(matches.get_flag("map-data"));
    }
}

fn apply_define(linker: &mut Linker, define: &str) -> stm8tools::Result<()> {
    match define.split_once('=') {
        Some((name, value)) if !name.is_empty() => linker.define(name, util::parse_number(value)?),
        _ => Err(stm8tools::Error::new(format!(
            "-D expects NAME=VALUE, got \"{}\"",
            define
        ))),
    }
}
