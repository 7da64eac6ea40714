//! Drive a scripted focus/workspace sequence through a full blursave session
//! with simulated hook and host, printing each save request. Useful for
//! eyeballing the wiring and the log output without a real host.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use blursave::{Pid, SaveError, SaveInvoker, Session, SimHook, SimHost};
use clap::Parser;
use tracing::info;

/// Pid the sim assigns to the host process.
const HOST_PID: Pid = 100;
/// Pid the sim assigns to the competing process.
const OTHER_PID: Pid = 200;

/// Command line interface.
#[derive(Debug, Parser)]
#[command(name = "blursave-sim", about = "Scripted blursave session")]
struct Cli {
    /// Logging options.
    #[command(flatten)]
    logs: logging::LogArgs,

    /// Number of focus gain/loss rounds to replay.
    #[arg(long, default_value_t = 3)]
    rounds: u32,

    /// Start with a workspace already open instead of opening one mid-run.
    #[arg(long)]
    preloaded: bool,
}

/// Invoker that prints each save-all to stdout.
struct EchoInvoker {
    /// Number of saves performed.
    saves: AtomicUsize,
}

impl SaveInvoker for EchoInvoker {
    fn save_all(&self) -> Result<(), SaveError> {
        let n = self.saves.fetch_add(1, Ordering::SeqCst) + 1;
        println!("save-all #{n}");
        Ok(())
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(&cli.logs);

    let hook = SimHook::new(HOST_PID);
    let host = SimHost::new(cli.preloaded);
    let invoker = Arc::new(EchoInvoker {
        saves: AtomicUsize::new(0),
    });
    let mut session = Session::activate(hook.clone(), host.clone(), invoker.clone(), HOST_PID);

    if !cli.preloaded {
        host.open_workspace();
    }
    for round in 0..cli.rounds {
        info!(round, "focus round");
        hook.focus(HOST_PID, 1);
        hook.focus(OTHER_PID, 2);
        // A second loss in the same round must not save again.
        hook.focus(OTHER_PID, 3);
    }
    host.close_workspace();
    hook.focus(HOST_PID, 1);
    hook.focus(OTHER_PID, 2);

    session.shutdown();
    let saved = invoker.saves.load(Ordering::SeqCst);
    println!("rounds={} saves={saved}", cli.rounds);
}
