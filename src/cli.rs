use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::core::Language;

#[derive(Parser, Debug)]
#[command(name = "codegauge")]
#[command(about = "Multi-language code complexity scoring engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP evaluation service
    Serve {
        /// Address to bind
        #[arg(long, default_value = "0.0.0.0", env = "CODEGAUGE_HOST")]
        host: String,

        /// Port to listen on
        #[arg(long, default_value_t = 5001, env = "CODEGAUGE_PORT")]
        port: u16,

        /// Path to the pylint executable (discovered on PATH when unset)
        #[arg(long, env = "CODEGAUGE_PYLINT")]
        pylint: Option<PathBuf>,

        /// Quality linter timeout in seconds
        #[arg(long, default_value_t = 30, env = "CODEGAUGE_LINT_TIMEOUT")]
        lint_timeout: u64,
    },

    /// Analyze a file (or stdin) and print the report
    Analyze {
        /// Path to read, or `-` for stdin
        path: PathBuf,

        /// Source language (inferred from the file extension when omitted)
        #[arg(short, long, value_enum)]
        language: Option<LanguageArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LanguageArg {
    Python,
    Javascript,
}

impl From<LanguageArg> for Language {
    fn from(arg: LanguageArg) -> Self {
        match arg {
            LanguageArg::Python => Language::Python,
            LanguageArg::Javascript => Language::JavaScript,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full report as pretty-printed JSON
    Json,
    /// Short terminal summary
    Summary,
}
