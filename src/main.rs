use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match estate_score::app::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
