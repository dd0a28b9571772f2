use std::io::{self, Write};
use std::process;

use clap::Parser;

use fastb64::base64;
use fastb64::common::io::read_input;
use fastb64::common::{report_error, reset_sigpipe};

const TOOL_NAME: &str = "fbase64";

#[derive(Parser)]
#[command(
    name = "fbase64",
    about = "Base64 encode or decode FILE, or standard input, to standard output.",
    after_help = "With no FILE, or when FILE is -, read standard input.\n\n\
        The data are encoded with the standard base64 alphabet of RFC 4648,\n\
        without line wrapping. When decoding, every byte outside the alphabet\n\
        (padding, newlines, other garbage) is skipped.",
    version
)]
struct Cli {
    /// Decode data
    #[arg(short = 'd', long = "decode")]
    decode: bool,

    /// Omit trailing '=' padding when encoding
    #[arg(short = 'n', long = "no-pad")]
    no_pad: bool,

    /// File to process (reads stdin if omitted or -)
    file: Option<String>,
}

fn run(cli: &Cli, filename: &str, out: &mut impl Write) -> io::Result<()> {
    let data = read_input(filename)?;
    if cli.decode {
        out.write_all(&base64::decode_to_vec(&data))?;
    } else if !data.is_empty() {
        let mut encoded = base64::encode_to_vec(&data, !cli.no_pad);
        encoded.push(b'\n');
        out.write_all(&encoded)?;
    }
    out.flush()
}

fn main() {
    reset_sigpipe();

    let cli = Cli::parse();
    let filename = cli.file.as_deref().unwrap_or("-");

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    if let Err(e) = run(&cli, filename, &mut out) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            process::exit(0);
        }
        report_error(TOOL_NAME, filename, &e);
        process::exit(1);
    }
}
