use clap::Parser;

#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File containing newline-delimited base URLs to probe
    #[arg(short = 'u', long)]
    pub urls: String,

    /// File containing the wordlist (one word per line)
    #[arg(short = 'w', long)]
    pub wordlist: String,

    /// Delay in seconds after each probe, per concurrency slot (default: 0.1)
    #[arg(short = 't', long, default_value_t = 0.1)]
    pub throttle: f64,

    /// Global concurrency limit
    #[arg(short = 'c', long, default_value_t = 100)]
    pub concurrency: usize,

    /// Max concurrent connections per destination host
    #[arg(long, default_value_t = 10)]
    pub per_host: usize,

    /// Request timeout in seconds (default: 10)
    #[arg(long, default_value_t = 10_u64)]
    pub timeout: u64,

    /// Output directory for the hit log
    #[arg(short = 'o', long, default_value = "./results")]
    pub out: String,

    /// Enable detailed debug logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,

    /// Enable verbose logging
    #[arg(long, default_value_t = false)]
    pub verbose: bool,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
