/*!
 * ps - process listing over a simulated process table
 *
 * Boots a fresh table with a demo workload, enumerates it through the
 * `getprocs` request from cursor 0 and prints a flat listing (default) or the
 * parent/child tree.
 */

use clap::Parser;
use ptable::config::Config;
use ptable::core::KernelError;
use ptable::monitoring::init_tracing;
use ptable::process::{boot, Churn, ProcessTable};
use ptable::ps::{collect, render, Mode, SyscallSource};
use ptable::syscalls::Syscalls;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "ps", version, about = "List processes of a simulated process table")]
struct Cli {
    /// Output mode
    #[arg(short, long, value_enum, default_value_t = Mode::Flat)]
    mode: Mode,

    /// Maximum number of records to collect [env: PTABLE_SNAPSHOT_CAPACITY]
    #[arg(short, long)]
    capacity: Option<usize>,

    /// Number of demo processes to boot [env: PTABLE_WORKLOAD]
    #[arg(short, long)]
    workload: Option<usize>,

    /// Keep creating and reaping processes while the scan runs
    #[arg(long)]
    churn: bool,

    /// Raw user address to receive records instead of a mapped buffer
    #[arg(long, hide = true)]
    destination: Option<usize>,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    init_tracing("warn", config.trace_json);

    let capacity = cli.capacity.unwrap_or(config.snapshot_capacity);
    let workload = cli.workload.unwrap_or(config.workload);

    let table = Arc::new(ProcessTable::new());
    let pids = boot(&table, workload)?;
    info!(processes = pids.len(), capacity, mode = ?cli.mode, "Table ready");

    let churn = cli
        .churn
        .then(|| pids.get(1).or(pids.first()).copied())
        .flatten()
        .map(|parent| Churn::start(Arc::clone(&table), parent, Duration::from_micros(50)))
        .transpose()
        .map_err(KernelError::from)?;

    let syscalls = Syscalls::new(Arc::clone(&table));
    let mut source = SyscallSource::new(&syscalls).map_err(KernelError::from)?;
    if let Some(dst) = cli.destination {
        source = source.with_destination(dst);
    }
    let collected = collect(&source, capacity);

    if let Some(churn) = churn {
        let operations = churn.stop();
        debug!(operations, "Churn finished");
    }
    debug!(stats = ?syscalls.stats(), "Scan statistics");

    let snapshot = collected.map_err(KernelError::from)?;
    let listing = render(&snapshot, cli.mode).map_err(KernelError::from)?;
    print!("{listing}");
    Ok(())
}
