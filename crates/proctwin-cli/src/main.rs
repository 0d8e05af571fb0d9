use clap::Parser;
use proctwin_cli::{Cli, run};
use std::process::ExitCode;

fn main() -> ExitCode {
    // `proctwin analyze big.csv | head` should end quietly, not panic in println!
    #[cfg(unix)]
    restore_default_sigpipe();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(unix)]
fn restore_default_sigpipe() {
    // SAFETY: runs first thing in main, before any other thread exists
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}
