use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match lifelink_lib::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("lifelink: {e}");
            ExitCode::FAILURE
        }
    }
}
