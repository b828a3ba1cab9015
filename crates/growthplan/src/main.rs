use clap::Parser;
use growthplan::{Args, init_logging, run};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(args.log_file.as_deref(), &args.log_level)?;

    let output = run(&args)?;
    print!("{output}");

    tracing::debug!("growthplan finished");
    Ok(())
}
