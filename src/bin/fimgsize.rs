use std::io::{self, BufWriter, Write};
use std::process;

use clap::Parser;
use rayon::prelude::*;

use fastb64::common::io::read_input;
use fastb64::common::{report_error, reset_sigpipe};
use fastb64::imagesize::{self, ImageSize};

const TOOL_NAME: &str = "fimgsize";

#[derive(Parser)]
#[command(
    name = "fimgsize",
    about = "Print the type and dimensions of JPEG, PNG and GIF images.",
    after_help = "With no FILE, or when FILE is -, read standard input.\n\n\
        Output lines have the form 'FILE: TYPE WIDTHxHEIGHT'. The size is\n\
        printed as '?' when it could not be determined.",
    version
)]
struct Cli {
    /// Input is base64 encoded (a leading 'data:...,' URI prefix is accepted)
    #[arg(short = 'b', long = "base64")]
    base64: bool,

    /// Files to process
    files: Vec<String>,
}

fn sniff(filename: &str, base64: bool) -> io::Result<ImageSize> {
    let data = read_input(filename)?;
    if base64 {
        return Ok(imagesize::guess_format(imagesize::strip_data_uri(&data), true));
    }
    Ok(imagesize::guess_format(&data, false))
}

fn write_size(out: &mut impl Write, filename: &str, size: &ImageSize) -> io::Result<()> {
    out.write_all(filename.as_bytes())?;
    out.write_all(b": ")?;
    out.write_all(size.kind.name().as_bytes())?;
    match size.dimensions() {
        Some((width, height)) => {
            let mut buf = itoa::Buffer::new();
            out.write_all(b" ")?;
            out.write_all(buf.format(width).as_bytes())?;
            out.write_all(b"x")?;
            out.write_all(buf.format(height).as_bytes())?;
        }
        None => out.write_all(b" ?")?,
    }
    out.write_all(b"\n")
}

fn main() {
    reset_sigpipe();

    let cli = Cli::parse();
    let files = if cli.files.is_empty() {
        vec!["-".to_string()]
    } else {
        cli.files.clone()
    };

    let results: Vec<io::Result<ImageSize>> = files
        .par_iter()
        .map(|filename| sniff(filename, cli.base64))
        .collect();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut had_error = false;

    for (filename, result) in files.iter().zip(results) {
        let written = match result {
            Ok(size) => write_size(&mut out, filename, &size),
            Err(e) => {
                report_error(TOOL_NAME, filename, &e);
                had_error = true;
                Ok(())
            }
        };
        if let Err(e) = written {
            if e.kind() == io::ErrorKind::BrokenPipe {
                process::exit(0);
            }
            report_error(TOOL_NAME, "-", &e);
            process::exit(1);
        }
    }

    if let Err(e) = out.flush()
        && e.kind() != io::ErrorKind::BrokenPipe
    {
        report_error(TOOL_NAME, "-", &e);
        process::exit(1);
    }
    if had_error {
        process::exit(1);
    }
}
