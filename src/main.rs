use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use vmclone::cli::Cli;
use vmclone::command::PrivilegedRunner;
use vmclone::config;
use vmclone::flow;
use vmclone::precheck::SearchPath;

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Usage errors go through clap so stderr carries the usage text.
    let request = match cli.resolve() {
        Ok(request) => request,
        Err(e) => Cli::command()
            .error(ErrorKind::MissingRequiredArgument, e)
            .exit(),
    };

    // stderr stays quiet unless asked for: stdout is the operator's transcript.
    let filter = if cli.verbose {
        EnvFilter::new("vmclone=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"))
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(filter),
        )
        .init();

    let sys_config = config::resolve_config(cli.config.as_deref())?;
    let tools = &sys_config.tools;
    tracing::debug!(?tools, "resolved tools");

    let runner = PrivilegedRunner::new(&tools.privilege);
    let outcome = flow::run(&request, tools, &runner, &SearchPath)?;
    println!("{}", outcome.summary());
    Ok(())
}
