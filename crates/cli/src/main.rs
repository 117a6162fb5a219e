use std::process::ExitCode;

fn main() -> ExitCode {
    quotewire_cli::run()
}
