
#[macro_use] extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;
extern crate slotasm;

use clap::{Arg, ArgMatches, App};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use slotasm::assembler::{self, encoder, Catalog};

use std::fs;
use std::path::{Path, PathBuf};

/// Extension of source documents.
const SOURCE_EXTENSION: &str = "asm";
/// Extension of assembled output.
const OBJECT_EXTENSION: &str = "obj";

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    debug!("Arguments:\n\tVerbosity: {}\n\tInstructions: {}\n\tOutfile: {}\n\tInfile: {}",
        verbosity_filter(args.occurrences_of("verbose")),
        args.is_present("instructions"),
        args.value_of("output").unwrap_or("None"),
        args.value_of("INPUT").unwrap_or("None")
    );

    if args.is_present("instructions") {
        print_catalog(Catalog::standard());
        return;
    }

    let ipath = match args.value_of("INPUT") {
        Some(ifile) => Path::new(ifile),
        None => {
            error!("fatal: no input file given");
            std::process::exit(1);
        }
    };

    if ipath.extension().and_then(|ext| ext.to_str()) != Some(SOURCE_EXTENSION) {
        error!("fatal: input file `{}` must have the .{} extension", ipath.display(), SOURCE_EXTENSION);
        std::process::exit(1);
    }

    let document = match fs::read_to_string(ipath) {
        Err(err) => {
            error!("fatal: unable to read input file `{}`: {}", ipath.display(), err);
            std::process::exit(1);
        },
        Ok(text) => text,
    };

    let program = match assembler::assemble(&document) {
        Err(err) => {
            match err.section() {
                Some(section) => error!("{}: {} ({} section)", ipath.display(), err, section),
                None => error!("{}: {}", ipath.display(), err),
            }
            std::process::exit(2);
        },
        Ok(program) => program,
    };

    if args.is_present("print-debug") {
        print_listing(&program);
    }

    let opath: PathBuf = match args.value_of("output") {
        Some(filename) => PathBuf::from(filename),
        None => ipath.with_extension(OBJECT_EXTENSION),
    };

    if let Err(err) = fs::write(&opath, program.to_string()) {
        error!("fatal: unable to write to output file `{}`: {}", opath.display(), err);
        std::process::exit(1);
    }
    info!("wrote {} byte(s) to `{}`", program.len(), opath.display());
}

fn print_listing(program: &assembler::Program) {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(1),
        direction:   Direction::LeftToRight,
    });

    for ins in program.instructions().iter() {
        grid.add(Cell::from(format!("0x{:02X}:", ins.address)));
        grid.add(Cell::from(format!("{:>4}", ins.line)));
        grid.add(Cell::from(ins.source.clone()));
        grid.add(Cell::from("=>".to_string()));
        grid.add(Cell::from(encoder::to_hex(&ins.bytes)));
    }

    println!("{}", grid.fit_into_columns(5));
}

fn print_catalog(catalog: &Catalog) {
    let mut grid = Grid::new(GridOptions {
        filling:     Filling::Spaces(2),
        direction:   Direction::LeftToRight,
    });

    for ins in catalog.iter() {
        grid.add(Cell::from(ins.mnemonic.to_string()));
        grid.add(Cell::from(format!("{:02X}", ins.opcode)));
        grid.add(Cell::from(ins.operands.join(" ")));
    }

    println!("{}", grid.fit_into_columns(3));
}

fn process_arguments() -> ArgMatches<'static> {
    App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(Arg::with_name("INPUT")
            .help("Sets the input file to use (must end in .asm)")
            .required_unless("instructions")
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("output")
            .short("o")
            .takes_value(true)
            .help("write output to an outfile (defaults to the input name with .obj)"))
        .arg(Arg::with_name("instructions")
            .short("i")
            .takes_value(false)
            .help("prints the instruction catalog and exits"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .alias("show")
            .alias("s")
            .takes_value(false)
            .help("prints the debug information alongside the assembly to STDOUT"))
        .get_matches()
}

fn verbosity_filter(verbosity: u64) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(verbosity_filter(verbosity))
        .chain(std::io::stdout())
        .apply().ok();
}
