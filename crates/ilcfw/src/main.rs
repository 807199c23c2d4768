use anyhow::{Context, Result};
use clap::Parser;
use ilchex::diff::diff;
use ilchex::fmt::SegmentList;
use ilchex::{AddressSpace, IlcVerifier, MemoryLayout, RangeError};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "ilcfw",
    about = "Tool to work with the Intel Hex memory dumps and firmware files.",
    long_about = "Loads an ILC memory dump, verifies the application statistics and application CRCs, optionally prints the interrupt vector table and diffs a firmware file against the dump.",
    after_help = "Examples:\n  ilcfw dump.hex\n  ilcfw -i dump.hex\n  ilcfw -d firmware.hex dump.hex\n  RUST_LOG=ilchex=debug ilcfw dump.hex"
)]
struct Cli {
    /// Diff against this firmware file
    #[arg(short = 'd', value_name = "FIRMWARE")]
    diff: Option<PathBuf>,

    /// Print J-IVT table contents
    #[arg(short = 'i')]
    ivt: bool,

    /// IVT base word address (hex), taken from the ILC link map
    #[arg(long, default_value = "0x1600", value_parser = parse_hex_u32)]
    ivt_base: u32,

    /// Memory dump file
    memdump: PathBuf,
}

fn parse_hex_u32(s: &str) -> Result<u32, String> {
    let hex_str = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u32::from_str_radix(hex_str, 16).map_err(|_| format!("Invalid hex value: {}", s))
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "ilcfw=info,ilchex=warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load(path: &Path, desc: &str) -> Result<AddressSpace> {
    let space = AddressSpace::from_path(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    println!(
        "{desc} {}, segments {}",
        path.display(),
        SegmentList(space.segments())
    );
    Ok(space)
}

// Prints each check as soon as it is known, so the statistics survive a
// missing application range.
fn cmd_verify(memhex: &AddressSpace) -> Result<bool, RangeError> {
    let verifier = IlcVerifier::new(memhex);
    let stats = verifier.statistics()?;
    println!("{stats}");
    let app = verifier.application(&stats)?;
    println!("{app}");
    Ok(stats.matches() && app.matches())
}

fn cmd_ivt(memhex: &AddressSpace, base: u32) {
    let mut invalid = 0;
    for entry in IlcVerifier::new(memhex).ivt(base) {
        if let Some(warning) = entry.warning() {
            invalid += 1;
            println!("{warning}");
        }
        println!("{entry}");
    }
    tracing::debug!(invalid, base, "IVT walked");
}

fn cmd_diff(diffhex: &AddressSpace, memhex: &AddressSpace) {
    let mut count = 0usize;
    for entry in diff(diffhex, memhex) {
        count += 1;
        println!("{entry}");
    }
    tracing::info!("{count} difference(s)");
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let memhex = load(&cli.memdump, "Loaded ")?;

    match cmd_verify(&memhex) {
        Ok(true) => tracing::info!("CRC verification passed"),
        Ok(false) => tracing::warn!("CRC verification failed"),
        Err(e) => println!("This isn't a hex dump: {e}"),
    }

    if cli.ivt {
        if cli.ivt_base != MemoryLayout::IVT_BASE {
            tracing::info!("IVT base overridden: 0x{:04x}", cli.ivt_base);
        }
        cmd_ivt(&memhex, cli.ivt_base);
    }

    if let Some(path) = cli.diff {
        let diffhex = load(&path, "Loaded original (diff) firmware ")?;
        cmd_diff(&diffhex, &memhex);
    }

    Ok(())
}
