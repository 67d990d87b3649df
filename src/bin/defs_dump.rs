//! Catalog inspector for definition directories.
//!
//! Loads the element definition catalog from a directory (argument or the
//! resolved default) and prints it as JSON. With `--name`, prints the single
//! resolved definition instead, degrading to an empty object plus a warning
//! when the name is absent — the same policy runtime entities get. Designed
//! so operators can eyeball exactly what the host application will see.

use anyhow::{Result, bail};
use elementdefs::{DefinitionStore, LogSink, resolve_definition, resolve_definitions_dir};
use std::env;
use std::path::PathBuf;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse()?;
    let dir = args.dir.unwrap_or_else(resolve_definitions_dir);
    let store = DefinitionStore::new(dir);

    match args.name {
        Some(name) => {
            let definition = resolve_definition(&store, &name, &LogSink)?;
            println!("{}", serde_json::to_string_pretty(&definition)?);
        }
        None => {
            let catalog = store.catalog()?;
            println!("{}", serde_json::to_string_pretty(&*catalog)?);
        }
    }
    Ok(())
}

struct CliArgs {
    dir: Option<PathBuf>,
    name: Option<String>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut dir: Option<PathBuf> = None;
        let mut name: Option<String> = None;

        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--name" => {
                    let value = match args.next() {
                        Some(value) => value,
                        None => bail!("--name requires a value"),
                    };
                    if name.replace(value).is_some() {
                        bail!("--name may only be supplied once");
                    }
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other if other.starts_with("--") => bail!("unknown flag '{other}'"),
                other => {
                    if dir.replace(PathBuf::from(other)).is_some() {
                        bail!("at most one directory argument is accepted");
                    }
                }
            }
        }

        Ok(Self { dir, name })
    }
}

fn print_usage() {
    println!("usage: defs-dump [DIR] [--name NAME]");
    println!();
    println!("Prints the element definition catalog under DIR (default: the");
    println!("resolved definitions directory) as a JSON array. With --name,");
    println!("prints the single definition resolved for NAME instead.");
}
