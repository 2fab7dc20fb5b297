use std::error::Error;

use sarge::prelude::*;
use unistream::{CopyOptions, Stream};

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  unistream_cat [--input <path>] [--output <path>] [--mode <mode>] [--lock]");
    eprintln!();
    eprintln!("  -i, --input <path>    Read from a file; '-' or omitted reads stdin");
    eprintln!("  -o, --output <path>   Write to a file; '-' or omitted writes stdout");
    eprintln!("  -m, --mode <mode>     Mode for the output file (default: w)");
    eprintln!("  -l, --lock            Hold a shared lock on the input while copying");
}

fn open_input(path: &str) -> unistream::Result<Stream> {
    if path == "-" {
        Stream::stdin()
    } else {
        Stream::open(path, "r")
    }
}

fn open_output(path: &str, mode: &str) -> unistream::Result<Stream> {
    if path == "-" {
        Stream::stdout()
    } else {
        Stream::open(path, mode)
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut reader = ArgumentReader::new();

    let input_ref = reader.add::<String>(tag::both('i', "input"));
    let output_ref = reader.add::<String>(tag::both('o', "output"));
    let mode_ref = reader.add::<String>(tag::both('m', "mode"));
    let lock_ref = reader.add::<bool>(tag::both('l', "lock"));

    let args = reader.parse()?;

    let input = match input_ref.get(&args) {
        Some(Ok(v)) => v,
        Some(Err(_)) => return Err("invalid --input".into()),
        None => "-".to_string(),
    };
    let output = match output_ref.get(&args) {
        Some(Ok(v)) => v,
        Some(Err(_)) => return Err("invalid --output".into()),
        None => "-".to_string(),
    };
    let mode = match mode_ref.get(&args) {
        Some(Ok(v)) => v,
        Some(Err(_)) => return Err("invalid --mode".into()),
        None => "w".to_string(),
    };
    let lock = matches!(lock_ref.get(&args), Some(Ok(true)));

    let mut source = open_input(&input)?;
    let mut target = open_output(&output, &mode)?;

    if lock {
        source.lock_shared(false)?;
    }

    source.copy_to(&mut target, &CopyOptions::default())?;
    target.flush()?;

    if lock {
        source.unlock()?;
    }
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("unistream_cat error: {e}");
        print_usage();
        std::process::exit(1);
    }
}
