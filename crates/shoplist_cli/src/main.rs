//! Terminal entry point for Shoplist.
//!
//! # Responsibility
//! - Resolve configuration (flags over `SHOPLIST_*` env over defaults).
//! - Open the SQLite-backed list and hand stdin/stdout to the command loop.

mod repl;

use clap::Parser;
use log::error;
use shoplist_core::{init_logging_from_config, open_list, ListConfig};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "shoplist", version, about = "Shopping list kept in a local SQLite file")]
struct Args {
    /// SQLite file holding the list.
    #[arg(long)]
    db_path: Option<PathBuf>,
    /// Storage entry name for the list.
    #[arg(long)]
    key: Option<String>,
    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files.
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Print core linkage info and exit.
    #[arg(long)]
    ping: bool,
}

impl Args {
    fn into_config(self, mut config: ListConfig) -> ListConfig {
        if let Some(db_path) = self.db_path {
            config.db_path = db_path;
        }
        if let Some(key) = self.key.filter(|key| !key.trim().is_empty()) {
            config.storage_key = key.trim().to_string();
        }
        if let Some(level) = self.log_level {
            config.log_level = level;
        }
        if let Some(log_dir) = self.log_dir {
            config.log_dir = Some(log_dir);
        }
        config
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    if args.ping {
        println!("shoplist_core ping={}", shoplist_core::ping());
        println!("shoplist_core version={}", shoplist_core::core_version());
        return ExitCode::SUCCESS;
    }
    let config = args.into_config(ListConfig::from_env());

    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("shoplist: file logging disabled: {err}");
    }

    let mut list = match open_list(&config) {
        Ok(list) => list,
        Err(err) => {
            error!("event=cli_open module=cli status=error error={err}");
            eprintln!(
                "shoplist: cannot open list at `{}`: {err}",
                config.db_path.display()
            );
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = repl::Console::new(stdin.lock(), stdout.lock());
    match repl::run(&mut list, &mut console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("shoplist: terminal error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{repl, Args};
    use clap::Parser;
    use shoplist_core::{open_list, ListConfig};
    use std::io::Cursor;
    use std::path::PathBuf;

    #[test]
    fn flags_override_resolved_config() {
        let args = Args::parse_from([
            "shoplist",
            "--db-path",
            "/tmp/groceries.db",
            "--key",
            " groceries ",
            "--log-level",
            "warn",
        ]);
        let config = args.into_config(ListConfig::default());

        assert_eq!(config.db_path, PathBuf::from("/tmp/groceries.db"));
        assert_eq!(config.storage_key, "groceries");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn blank_key_keeps_default() {
        let args = Args::parse_from(["shoplist", "--key", "  "]);
        let config = args.into_config(ListConfig::default());
        assert_eq!(config.storage_key, "items");
    }

    #[test]
    fn session_persists_to_db_path_flag() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("groceries.db");
        let config = || {
            Args::parse_from(["shoplist", "--db-path", db_path.to_str().unwrap()])
                .into_config(ListConfig::default())
        };

        let mut list = open_list(&config()).unwrap();
        let script = "add Milk\nadd Eggs\nrm 1\ny\nquit\n";
        let mut console = repl::Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        repl::run(&mut list, &mut console).unwrap();
        drop(list);

        let reopened = open_list(&config()).unwrap();
        let texts: Vec<_> = reopened.rows().iter().map(|row| row.text()).collect();
        assert_eq!(texts, vec!["Eggs"]);
    }
}
