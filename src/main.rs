use std::io::Write;
use std::process::ExitCode;

use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use gptcli::cli::{self, Invocation};
use gptcli::{CompletionError, OpenAiClient};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail<W: Write>(program: &str, error: &CompletionError, out: &mut W) -> ExitCode {
    if let Err(e) = cli::report(program, error, out).and_then(|()| out.flush()) {
        tracing::error!(error = %e, "failed to write error output");
    }
    ExitCode::from(error.exit_code())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    init_tracing();

    let mut args = std::env::args_os().map(|arg| arg.to_string_lossy().into_owned());
    let program = args.next().unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string());

    let mut stdout = std::io::stdout().lock();

    let invocation = match Invocation::from_env(&program, args, |name| std::env::var(name).ok()) {
        Ok(invocation) => invocation,
        Err(e) => return fail(&program, &e, &mut stdout),
    };

    let client = match OpenAiClient::new(invocation.config) {
        Ok(client) => client,
        Err(e) => return fail(&program, &e, &mut stdout),
    };

    let written = cli::run(&program, &client, &invocation.prompt, &mut stdout)
        .await
        .and_then(|code| stdout.flush().map(|()| code));

    match written {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!(error = %e, "failed to write output");
            ExitCode::FAILURE
        }
    }
}
