use hooklint::{Cli, HookError, Output};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse_from_env();
    let output = Output::new(cli.verbose > 0, cli.quiet);

    match cli.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(hook_error) = e.downcast_ref::<HookError>() {
                output.critical(&format!("Commit blocked: {hook_error}"));
            } else {
                output.error(&format!("{e:#}"));
            }
            ExitCode::FAILURE
        }
    }
}
