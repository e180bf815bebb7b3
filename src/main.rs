use pattern_runner::{dotenv, init_logging, run_cli, style, CliArgs, Parser};

fn main() {
    // load environment variables from .env file if present, before clap reads them
    dotenv().ok();

    let args = CliArgs::parse();
    init_logging(args.verbose);

    if let Err(e) = run_cli(args) {
        eprintln!(
            "{} {} {}",
            style("❌"),
            style("pattern-runner failed:").red().bold(),
            style(format!("{e:#}")).red()
        );
        std::process::exit(1);
    }
}
