use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod args;
mod config;
mod frame;
mod input;
mod loader;
mod renderer;

use app::App;
use args::Args;
use config::Config;
use input::ExitStatus;

fn main() {
    // clion needs help in trait annotation
    let args = <Args as Parser>::parse();

    initialise_tracing(&args);

    let app = match App::new(Config::default()) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(ExitStatus::Failure.code());
        }
    };

    app.run();
}

fn initialise_tracing(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.default_log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
