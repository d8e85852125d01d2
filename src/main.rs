// SerialCalc - Interactive client for a serial-attached calculator
use clap::Parser;
use serialcalc::cli::{execute_command, Args};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let code = match execute_command(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    // Exit directly: a pending stdin read would otherwise hold up runtime shutdown.
    std::process::exit(code);
}
