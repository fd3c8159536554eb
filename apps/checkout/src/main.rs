//! Grocer checkout binary.

use std::env;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    checkout::init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let json = args.iter().any(|arg| arg == "--json");

    match checkout::run(args).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            match serde_json::to_string_pretty(&err) {
                Ok(body) if json => println!("{}", body),
                _ => eprintln!("{}", err),
            }
            ExitCode::from(err.code.exit_code())
        }
    }
}
