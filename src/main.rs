use anyhow::Result;
use log::{info, Level};

use split_fa_len::{
    cli::{parse_args, Invocation},
    split_by_length,
};

fn main() -> Result<()> {
    let args = match parse_args(std::env::args_os()) {
        Ok(Invocation::Split(args)) => args,
        Ok(Invocation::Usage(line)) => {
            println!("{}", line);
            return Ok(());
        }
        Err(e) => e.exit(),
    };

    let start = std::time::Instant::now();
    simple_logger::init_with_level(Level::Info)?;
    let summary = split_by_length(&args.source, args.threshold)?;
    info!("Short: {} records ({} bytes) written to {}",
        summary.counts.short.records, summary.counts.short.bytes, summary.short_path.display());
    info!("Long:  {} records ({} bytes) written to {}",
        summary.counts.long.records, summary.counts.long.bytes, summary.long_path.display());
    info!("Elapsed time: {:?}", start.elapsed());
    Ok(())
}
