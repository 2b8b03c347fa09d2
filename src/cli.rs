use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Default, Parser)]
#[command(name = "codegenie")]
#[command(version = "0.1.0")]
#[command(about = "Coding-test editor with a judge problem proxy")]
#[command(args_conflicts_with_subcommands = true)]
pub struct CliArgs {
    /// File to open in the editor
    pub file: Option<PathBuf>,

    /// Language mode: java, python, cpp, c, ruby or javascript
    #[arg(long, short = 'l')]
    pub lang: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run the local problem proxy used by the web client
    Serve {
        /// Port to listen on (default 3001)
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },
    /// Fetch a problem page and print its text bundle
    Fetch {
        /// Problem URL, or a problem number for Baekjoon
        target: String,

        /// baekjoon or programmers; inferred from the URL when omitted
        #[arg(long, short = 'p')]
        platform: Option<String>,
    },
}

impl CliArgs {
    /// Check if the provided path exists (following symlinks)
    pub fn exists(&self) -> bool {
        if let Some(path) = &self.file {
            std::fs::metadata(path).is_ok()
        } else {
            false
        }
    }
}

pub fn parse_args() -> Result<CliArgs, clap::Error> {
    CliArgs::try_parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_cli_args() {
        let args = CliArgs::default();
        assert!(args.file.is_none());
        assert!(args.command.is_none());
        assert!(!args.exists());
    }

    #[test]
    fn test_parse_no_args() {
        let args = CliArgs::parse_from(["codegenie"]);
        assert!(args.file.is_none());
        assert!(args.lang.is_none());
    }

    #[test]
    fn test_parse_file_with_lang() {
        let args = CliArgs::parse_from(["codegenie", "Main.java", "--lang", "python"]);
        assert_eq!(args.file, Some(PathBuf::from("Main.java")));
        assert_eq!(args.lang.as_deref(), Some("python"));
    }

    #[test]
    fn test_parse_serve() {
        let args = CliArgs::parse_from(["codegenie", "serve", "--port", "4000"]);
        assert!(matches!(args.command, Some(CliCommand::Serve { port: Some(4000) })));
    }

    #[test]
    fn test_parse_fetch() {
        let args = CliArgs::parse_from(["codegenie", "fetch", "1000", "-p", "baekjoon"]);
        match args.command {
            Some(CliCommand::Fetch { target, platform }) => {
                assert_eq!(target, "1000");
                assert_eq!(platform.as_deref(), Some("baekjoon"));
            }
            other => panic!("expected fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_exists() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("solution.py");
        fs::write(&file_path, "print(1)").unwrap();

        let args = CliArgs {
            file: Some(file_path),
            ..Default::default()
        };
        assert!(args.exists());

        let missing = CliArgs {
            file: Some(PathBuf::from("/nonexistent/path")),
            ..Default::default()
        };
        assert!(!missing.exists());
    }
}
