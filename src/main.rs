use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use myisam_lock::cli::{Args, Mode};
use myisam_lock::{run_lock, run_unlock};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing();

    let result = match args.mode() {
        Mode::Lock => run_lock(&args.mysql_config_path, &args.unix_socket_path)
            .await
            .map(|report| info!(state = %report.state, "done")),
        Mode::Unlock => run_unlock(&args.unix_socket_path).await,
        Mode::Usage => {
            let program = std::env::args()
                .next()
                .unwrap_or_else(|| "myisam-lock".to_string());
            println!("Use {program} -h to see all options");
            return ExitCode::SUCCESS;
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(kind = ?e.kind(), "{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
