use std::fmt;

use crate::error::{Result, UpdaterError};

/// Version markers written into solution and project files for one IDE release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualStudioVersion {
    /// Number following `# Visual Studio ` in a solution header
    pub year_version: &'static str,
    /// Value of `VisualStudioVersion = ` in a solution file
    pub technical_version: &'static str,
    /// Value of `MinimumVisualStudioVersion = ` in a solution file
    pub minimum_compatible_technical_version: &'static str,
    /// Value of the `ToolsVersion` attribute on a project root element
    pub tools_version: &'static str,
}

impl fmt::Display for VisualStudioVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "# Visual Studio {}, VisualStudioVersion = {}, MinimumVisualStudioVersion = {}, ToolsVersion = {}",
            self.year_version,
            self.technical_version,
            self.minimum_compatible_technical_version,
            self.tools_version
        )
    }
}

/// One row of the version table
#[derive(Debug)]
pub struct VersionEntry {
    pub aliases: &'static [&'static str],
    pub version: VisualStudioVersion,
}

pub static VERSION_TABLE: &[VersionEntry] = &[
    VersionEntry {
        aliases: &["2019", "VS2019", "16.1.1"],
        version: VisualStudioVersion {
            year_version: "16",
            technical_version: "16.0.28922.388",
            minimum_compatible_technical_version: "16.0.0.0",
            tools_version: "15.0",
        },
    },
    VersionEntry {
        aliases: &["2017", "VS2017", "15.6.3"],
        version: VisualStudioVersion {
            year_version: "15",
            technical_version: "15.0.27428.2011",
            minimum_compatible_technical_version: "15.0.0.0",
            tools_version: "15.0",
        },
    },
    VersionEntry {
        aliases: &["2015", "VS2015", "14.0", "2015 Update 3", "VS2015 Update 3"],
        version: VisualStudioVersion {
            year_version: "14",
            technical_version: "14.0.25420.1",
            minimum_compatible_technical_version: "14.0.0.0",
            tools_version: "14.0",
        },
    },
    VersionEntry {
        aliases: &["2015 Update 2", "VS2015 Update 2"],
        version: VisualStudioVersion {
            year_version: "14",
            technical_version: "14.0.25123.0",
            minimum_compatible_technical_version: "14.0.0.0",
            tools_version: "14.0",
        },
    },
    VersionEntry {
        aliases: &["2013", "VS2013", "12.0", "2013 Update 3", "VS2013 Update 5"],
        version: VisualStudioVersion {
            year_version: "2013",
            technical_version: "12.0.40629.0",
            minimum_compatible_technical_version: "10.0.40219.1",
            tools_version: "12.0",
        },
    },
];

/// Minimum Jaro-Winkler similarity for an alias to be offered as a suggestion
const SUGGESTION_THRESHOLD: f64 = 0.85;

/// Resolve a version alias (case-sensitive) to its version markers
pub fn resolve(alias: &str) -> Result<VisualStudioVersion> {
    VERSION_TABLE
        .iter()
        .find(|entry| entry.aliases.iter().any(|known| *known == alias))
        .map(|entry| entry.version)
        .ok_or_else(|| UpdaterError::UnsupportedVersion {
            alias: alias.to_string(),
            suggestion: closest_alias(alias),
        })
}

/// Iterate over every known alias, in table order
pub fn aliases() -> impl Iterator<Item = &'static str> {
    VERSION_TABLE
        .iter()
        .flat_map(|entry| entry.aliases.iter().copied())
}

fn closest_alias(alias: &str) -> Option<&'static str> {
    let wanted = alias.to_lowercase();
    aliases()
        .map(|candidate| (candidate, strsim::jaro_winkler(&wanted, &candidate.to_lowercase())))
        .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(candidate, _)| candidate)
}
