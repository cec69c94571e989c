use std::io::Write;

use clap::Parser;
use typeahead::cli::{TypeaheadArgs, execute_command};

fn main() {
    let args = TypeaheadArgs::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
