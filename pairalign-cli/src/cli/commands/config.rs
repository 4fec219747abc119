use anyhow::Result;
use clap::Subcommand;
use colored::*;
use pairalign_core::{default_config, load_config, save_config, Config, PairAlignError};
use std::path::{Path, PathBuf};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Write the default configuration to a file
    Init {
        /// Destination path
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Show {
        /// Configuration file to read instead of the defaults
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Init { path, force } => {
            init_config(&path, force)?;
            println!("{} Wrote default configuration to {}", "✓".green(), path.display());
            Ok(())
        }
        ConfigCommands::Show { config } => {
            print!("{}", show_config(config.as_deref())?);
            Ok(())
        }
    }
}

fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(PairAlignError::Configuration(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        ))
        .into());
    }

    save_config(path, &default_config())?;
    Ok(())
}

fn show_config(path: Option<&Path>) -> Result<String> {
    let config = match path {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };
    Ok(config.to_toml_string()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairalign_core::Algorithm;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pairalign.toml");

        init_config(&path, false).unwrap();
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pairalign.toml");
        std::fs::write(&path, "[alignment]\nalgorithm = \"global\"\n").unwrap();

        let err = init_config(&path, false).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PairAlignError>(),
            Some(PairAlignError::Configuration(_))
        ));
        assert_eq!(load_config(&path).unwrap().alignment.algorithm, Algorithm::Global);

        init_config(&path, true).unwrap();
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_show_reflects_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pairalign.toml");
        std::fs::write(&path, "[scoring]\nmatrix = \"blosum62\"\n").unwrap();

        let shown = show_config(Some(&path)).unwrap();
        assert!(shown.contains("matrix = \"blosum62\""));
        assert!(shown.contains("min_parallel_cells = 65536"));

        let defaults = show_config(None).unwrap();
        assert!(defaults.contains("algorithm = \"linear-space\""));
    }
}
