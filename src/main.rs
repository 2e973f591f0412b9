//! lexindex CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;

use lexindex::VERSION;
use lexindex::cli::args::LexIndexArgs;
use lexindex::cli::commands::execute_command;

fn main() {
    let args = LexIndexArgs::parse();

    Builder::new()
        .filter_level(args.log_level())
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    log::info!(
        "lexindex {VERSION}: {} ({} threads available)",
        args.command.name(),
        num_cpus::get()
    );

    let command = args.command.name();
    if let Err(e) = execute_command(args) {
        log::debug!("{command} failed: {e:?}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
