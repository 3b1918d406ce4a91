use std::collections::BTreeMap;

use clap::{Parser, Subcommand};

use scx_configurator::command::{self, Selection};
use scx_configurator::ctl::{DEFAULT_TOOL, ScxCtl};
use scx_configurator::status::RunningStatus;
use scx_configurator::{Error, Result, catalog};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Name or path of the scheduler manager binary
    #[arg(long, global = true, default_value = DEFAULT_TOOL)]
    tool: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the schedulers the manager reports as available
    List,
    /// Print the current scheduler status
    Status,
    /// Print the built-in mode catalog (TOML, or JSON with --json)
    Catalog {
        #[arg(long)]
        json: bool,
    },
    /// Start or switch to a scheduler, picking the verb from current status
    Apply {
        /// Scheduler id, as reported by `list`
        sched: String,
        /// Named tuning mode from the catalog
        #[arg(long)]
        mode: Option<String>,
        /// Flag text forwarded verbatim to the scheduler; overrides the mode
        #[arg(long)]
        args: Option<String>,
        /// Print the resolved command without running it
        #[arg(long)]
        dry_run: bool,
    },
    /// Stop the running scheduler
    Stop,
    /// Interactive terminal UI
    Tui,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let ctl = ScxCtl::new(args.tool);
    match args.cmd {
        Command::List => cmd_list(&ctl),
        Command::Status => cmd_status(&ctl),
        Command::Catalog { json } => cmd_catalog(json),
        Command::Apply {
            sched,
            mode,
            args,
            dry_run,
        } => cmd_apply(&ctl, &sched, mode.as_deref(), args.as_deref(), dry_run),
        Command::Stop => cmd_stop(&ctl),
        Command::Tui => scx_configurator::ui::run_tui(ctl),
    }
}

fn cmd_list(ctl: &ScxCtl) -> Result<()> {
    for sched in ctl.list()? {
        println!("{sched}");
    }
    Ok(())
}

fn cmd_status(ctl: &ScxCtl) -> Result<()> {
    println!("{}", ctl.get()?);
    Ok(())
}

fn cmd_catalog(json: bool) -> Result<()> {
    let table: BTreeMap<&str, &catalog::SchedulerEntry> = catalog::entries().collect();
    let rendered = if json {
        serde_json::to_string_pretty(&table)
            .map_err(|e| Error::msg(format!("catalog to JSON failed: {e}")))?
    } else {
        toml::to_string_pretty(&table)
            .map_err(|e| Error::msg(format!("catalog to TOML failed: {e}")))?
    };
    println!("{rendered}");
    Ok(())
}

fn cmd_apply(
    ctl: &ScxCtl,
    sched: &str,
    mode: Option<&str>,
    args: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    // A failed query is reported but does not block the action; the
    // resolver falls into the switch branch for an unknown status.
    let current = match ctl.get() {
        Ok(status) => status,
        Err(e) => {
            eprintln!("warning: {e}; a scheduler may still be running");
            RunningStatus::Unknown
        }
    };
    let sel = Selection {
        scheduler: sched,
        mode,
        override_args: args.unwrap_or("").trim(),
    };
    if dry_run {
        let argv = command::resolve(ctl.tool(), &sel, &current);
        println!("DRY-RUN: {}", argv.join(" "));
        return Ok(());
    }
    let argv = ctl.apply(&sel, &current)?;
    println!("OK: {}", argv.join(" "));
    println!("status: {}", ctl.get()?);
    Ok(())
}

fn cmd_stop(ctl: &ScxCtl) -> Result<()> {
    ctl.stop()?;
    println!("OK: stop");
    println!("status: {}", ctl.get()?);
    Ok(())
}
