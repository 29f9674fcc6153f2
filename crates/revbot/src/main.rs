//! Entrypoint.

fn main() {
    if let Err(err) = revbot::initialize_command_line() {
        eprintln!("ERROR: {:?}", err);
        std::process::exit(1);
    }
}
