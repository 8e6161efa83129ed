use std::{error::Error, path::PathBuf};

use clap::{Parser, Subcommand};

use fundilink::session::{FileStorage, SessionStore};

/// Inspect or change the persisted logged-in flag of a FundiLink client.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory the client keeps its persisted state in.
    #[arg(long, short, default_value = ".fundilink")]
    storage_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print whether a user is logged in.
    Status,
    /// Mark a user as logged in.
    LogIn,
    /// Mark the user as logged out.
    LogOut,
    /// Delete the persisted flag.
    Clear,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut store = SessionStore::new(FileStorage::new(&args.storage_dir));
    store.hydrate()?;

    match args.command {
        Command::Status => {}
        Command::LogIn => store.set_logged_in_user(true)?,
        Command::LogOut => store.set_logged_in_user(false)?,
        Command::Clear => {
            store.clear_storage()?;
            println!("Cleared the session state in {:#?}", store.storage().dir());
            return Ok(());
        }
    }

    println!("loggedInUser: {}", store.logged_in_user());

    Ok(())
}
