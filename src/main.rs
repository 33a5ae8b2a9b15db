//! Convert a ktest file into a pcap file.
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use ktest2pcap::easy::{convert, Config};
use ktest2pcap::models::InterfaceId;
use ktest2pcap::utilities::configure_logger;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// ktest file to convert.
    ktest_file: PathBuf,
    /// pcap file to write.
    pcap_file: PathBuf,
    /// Interface whose packets are written.
    #[arg(default_value_t = 0, allow_negative_numbers = true)]
    nic_id: InterfaceId,
    /// Maximum number of packets to write (0 for unlimited).
    #[arg(default_value_t = 0)]
    num_packets: u64,
    /// Minimum log level.
    #[arg(short = 'L', long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn main() -> ExitCode {
    let args = Args::parse();
    configure_logger(args.log_level);

    let config = Config {
        input_file: args.ktest_file,
        output_file: args.pcap_file,
        interface: args.nic_id,
        max_packets: args.num_packets,
    };

    // Errors are already logged by `convert`.
    match convert(&config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
