use std::fs::File;
use std::io::{self, Read, Write};
use std::process;

use clap::Parser;

use fastb64::common::io::read_full;
use fastb64::common::{report_error, reset_sigpipe};
use fastb64::murmur3::{BLOCK_SIZE, murmur3_32};

const TOOL_NAME: &str = "fmurmur3";

#[derive(Parser)]
#[command(
    name = "fmurmur3",
    about = "Print the murmur3 (x86, 32-bit) hash of FILE or standard input.",
    after_help = "With no FILE, or when FILE is -, read standard input.\n\n\
        Input is hashed in blocks of 4096 bytes, each block's hash seeding\n\
        the next one. The result is printed in decimal.",
    version
)]
struct Cli {
    /// Initial seed
    #[arg(short = 's', long = "seed", default_value_t = 0)]
    seed: u32,

    /// File to hash (reads stdin if omitted or -)
    file: Option<String>,
}

fn hash_reader(reader: &mut impl Read, seed: u32) -> io::Result<u32> {
    let mut buf = vec![0u8; BLOCK_SIZE];
    let mut hash = seed;
    loop {
        let n = read_full(reader, &mut buf)?;
        if n == 0 {
            break;
        }
        hash = murmur3_32(&buf[..n], hash);
        if n < BLOCK_SIZE {
            break;
        }
    }
    Ok(hash)
}

fn run(cli: &Cli, filename: &str) -> io::Result<u32> {
    if filename == "-" {
        return hash_reader(&mut io::stdin().lock(), cli.seed);
    }
    hash_reader(&mut File::open(filename)?, cli.seed)
}

fn main() {
    reset_sigpipe();

    let cli = Cli::parse();
    let filename = cli.file.as_deref().unwrap_or("-");

    let hash = match run(&cli, filename) {
        Ok(hash) => hash,
        Err(e) => {
            report_error(TOOL_NAME, filename, &e);
            process::exit(1);
        }
    };

    let mut buf = itoa::Buffer::new();
    let mut out = io::stdout().lock();
    if let Err(e) = writeln!(out, "{}", buf.format(hash)).and_then(|_| out.flush())
        && e.kind() != io::ErrorKind::BrokenPipe
    {
        report_error(TOOL_NAME, "-", &e);
        process::exit(1);
    }
}
