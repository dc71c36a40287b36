use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use floe_common::{logging, Settings};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings file; defaults to FLOE_CONFIG_PATH when set.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Directory backing the object store.
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the splits planned for one or more table roots.
    Plan {
        #[arg(required = true)]
        roots: Vec<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Print the rows stored under a table root.
    Scan {
        root: PathBuf,
        #[arg(long)]
        limit: Option<u64>,
    },
    /// Store an Arrow IPC file as a new object and write a pointer file to it.
    Put { ipc_file: PathBuf, pointer_file: PathBuf },
}

fn run(args: Args) -> floe_common::Result<()> {
    let mut settings = match &args.config {
        Some(path) => Settings::load(Some(path.as_str()))?,
        None => Settings::new()?,
    };
    if let Some(store_dir) = args.store_dir {
        settings.store_dir = store_dir;
    }
    logging::init(&settings.log_filter);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match args.command {
        Command::Plan { roots, json } => {
            floe::plan(&settings, &roots, json, &mut out)?;
        }
        Command::Scan { root, limit } => {
            floe::scan(&settings, &root, limit, &mut out)?;
        }
        Command::Put { ipc_file, pointer_file } => {
            let id = floe::put(&settings, &ipc_file, &pointer_file)?;
            writeln!(out, "{}", id)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("floe: {}", e);
            ExitCode::FAILURE
        }
    }
}
