use cfgen::cli::CommandLineInterface;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = CommandLineInterface::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.run() {
        eprintln!("cfgen: {err:#}");
        std::process::exit(1);
    }
}
