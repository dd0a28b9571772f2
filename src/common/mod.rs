pub mod io;


/// Reset SIGPIPE to its default action so `tool | head` terminates quietly
/// instead of surfacing EPIPE write errors. Call at the start of `main()`.
#[inline]
pub fn reset_sigpipe() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

/// Format an IO error message without the "(os error N)" suffix that
/// Rust's Display impl appends.
pub fn io_error_msg(e: &std::io::Error) -> String {
    match e.raw_os_error() {
        Some(raw) => {
            let msg = std::io::Error::from_raw_os_error(raw).to_string();
            msg.replace(&format!(" (os error {})", raw), "")
        }
        None => e.to_string(),
    }
}

/// Print `tool: [file: ]message` to stderr.
pub fn report_error(tool: &str, filename: &str, e: &std::io::Error) {
    if filename == "-" {
        eprintln!("{}: {}", tool, io_error_msg(e));
    } else {
        eprintln!("{}: {}: {}", tool, filename, io_error_msg(e));
    }
}
