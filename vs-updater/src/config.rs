use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::patch::LangVersion;

pub const DEFAULT_PATH: &str = ".";
pub const DEFAULT_VERSION: &str = "VS2019";

/// How processed files are reported on stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Echo each processed path
    #[default]
    Default,
    /// Echo each path followed by a unified diff of what was rewritten
    Diff,
    /// Echo each path followed by the changed lines only
    Summary,
}

#[derive(Parser, Debug)]
#[command(name = "vs-updater")]
#[command(about = "Retarget Visual Studio solution and project files to another Visual Studio version")]
#[command(long_about = "Rewrites the version markers of every *.sln and *.*proj file under a directory so
the solution opens in the targeted Visual Studio release.

SOLUTION FILES (*.sln):
  # Visual Studio <year>, VisualStudioVersion and MinimumVisualStudioVersion

PROJECT FILES (*.csproj, *.vbproj, *.vcxproj, ...):
  ToolsVersion on the <Project> element, and optionally <LangVersion>")]
#[command(after_help = "Examples:
  vs-updater --path src --version VS2017
  vs-updater -p . -v \"2015 Update 3\" -l 6
  vs-updater -l default
  vs-updater --list-versions")]
pub struct Cli {
    /// The solution directory
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// The Visual Studio version you target (defaults to VS2019)
    #[arg(short, long)]
    pub version: Option<String>,

    /// C# language version to force into project files ("default" removes it)
    #[arg(short, long = "langversion")]
    pub langversion: Option<String>,

    /// Output format for processed files
    #[arg(long, value_enum, default_value_t = OutputFormat::Default)]
    pub format: OutputFormat,

    /// Show summary statistics after the run
    #[arg(long)]
    pub stats: bool,

    /// Exclude paths matching these patterns (can be used multiple times)
    #[arg(long, num_args = 0..)]
    pub exclude: Vec<String>,

    /// Print the supported version aliases and exit
    #[arg(long)]
    pub list_versions: bool,

    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    pub path: PathBuf,
    pub version_alias: String,
    pub lang_version: Option<LangVersion>,
    pub format: OutputFormat,
    pub show_stats: bool,
    pub exclude: Vec<String>,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            path: PathBuf::from(DEFAULT_PATH),
            version_alias: DEFAULT_VERSION.to_string(),
            lang_version: None,
            format: OutputFormat::Default,
            show_stats: false,
            exclude: Vec::new(),
        }
    }
}

impl Cli {
    /// Apply defaults for every option left unset
    pub fn into_configuration(self) -> Configuration {
        Configuration {
            path: self.path.unwrap_or_else(|| PathBuf::from(DEFAULT_PATH)),
            version_alias: self
                .version
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
            lang_version: self.langversion.as_deref().and_then(LangVersion::parse),
            format: self.format,
            show_stats: self.stats,
            exclude: self.exclude,
        }
    }
}
