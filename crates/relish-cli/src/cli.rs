use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(name = "relish-notifier")]
#[command(version)]
#[command(
    about = "Monitor Relish orders and send notifications",
    long_about = "Monitor Relish orders and send notifications.\n\n\
                  Credentials are retrieved from the system keychain (service: relish-notifier, \
                  accounts: EMAIL/PASSWORD).\n\
                  If the keychain is unavailable, the RELISH_USERNAME and RELISH_PASSWORD \
                  environment variables will be used as fallback."
)]
pub struct Cli {
    /// Run Chrome in headless mode
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub headless: bool,

    /// Enable browser extensions
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub extensions: bool,

    /// How often to check for delivery (seconds)
    #[arg(
        short = 'i',
        long,
        default_value_t = 30,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub check_interval: u64,

    /// Check once and exit
    #[arg(long)]
    pub once: bool,

    /// Page timeout (seconds)
    #[arg(
        short = 't',
        long,
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub page_timeout: u64,

    /// Run this command when your order has arrived
    #[arg(short = 'c', long)]
    pub command: Option<String>,

    /// Increase verbosity (-v: info, -vv: debug)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,
}
