use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::config::{Configuration, OutputFormat};
use crate::diff::{diff_stats, write_diff, write_summary_diff, DiffStats};
use crate::error::{Result, UpdaterError};
use crate::patch::{patch_project, patch_solution, LangVersion, MissingPropertyGroup, Patched};
use crate::text_file::TextFile;
use crate::version::{resolve, VisualStudioVersion, VERSION_TABLE};
use crate::walker::{FileWalker, PROJECT_PATTERN, SOLUTION_PATTERN};

/// The two kinds of file a run rewrites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Solution,
    Project,
}

impl FileKind {
    pub fn pattern(self) -> &'static str {
        match self {
            FileKind::Solution => SOLUTION_PATTERN,
            FileKind::Project => PROJECT_PATTERN,
        }
    }

    /// Solutions are written back even when nothing matched; projects only when a rule matched
    pub fn always_rewrite(self) -> bool {
        matches!(self, FileKind::Solution)
    }
}

/// What a completed run did
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub solutions_processed: usize,
    pub projects_processed: usize,
    pub files_rewritten: usize,
    pub stats: DiffStats,
}

/// Retarget every solution and project under `config.path`, echoing progress to stdout
pub fn run(config: &Configuration) -> Result<RunReport> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(config, &mut out)
}

/// Same as [`run`], writing the path echo and diffs to `out`
pub fn run_with_output<W: Write>(config: &Configuration, out: &mut W) -> Result<RunReport> {
    let version = resolve(&config.version_alias)?;
    info!("Targeting {} ({})", config.version_alias, version);

    let walker = FileWalker::new(&config.path)?.with_exclusions(&config.exclude)?;
    let mut updater = Updater {
        version,
        lang_version: config.lang_version.as_ref(),
        format: config.format,
        out: &mut *out,
        report: RunReport::default(),
    };

    for kind in [FileKind::Solution, FileKind::Project] {
        for path in walker.find_files(kind.pattern())? {
            updater.process(kind, &path?)?;
        }
    }

    let report = updater.report;
    if config.show_stats {
        report.stats.write_summary(out).map_err(UpdaterError::Output)?;
    }
    info!(
        "Processed {} solution(s) and {} project(s), rewrote {} file(s)",
        report.solutions_processed, report.projects_processed, report.files_rewritten
    );
    Ok(report)
}

struct Updater<'a, W: Write> {
    version: VisualStudioVersion,
    lang_version: Option<&'a LangVersion>,
    format: OutputFormat,
    out: &'a mut W,
    report: RunReport,
}

impl<W: Write> Updater<'_, W> {
    fn process(&mut self, kind: FileKind, path: &Path) -> Result<()> {
        writeln!(self.out, "{}", path.display()).map_err(UpdaterError::Output)?;

        let file = TextFile::read(path)?;
        let patched = self.patch(kind, &file)?;

        match kind {
            FileKind::Solution => self.report.solutions_processed += 1,
            FileKind::Project => self.report.projects_processed += 1,
        }

        if !(kind.always_rewrite() || patched.modified) {
            debug!("Unchanged, not rewriting: {}", path.display());
            return Ok(());
        }

        self.show_changes(path, file.content(), &patched.content)?;
        file.write(&patched.content)?;
        self.report.files_rewritten += 1;
        debug!("Rewrote {}", path.display());
        Ok(())
    }

    fn patch<'f>(&self, kind: FileKind, file: &'f TextFile) -> Result<Patched<'f>> {
        match kind {
            FileKind::Solution => Ok(patch_solution(file.content(), &self.version)),
            FileKind::Project => patch_project(file.content(), &self.version, self.lang_version)
                .map_err(|MissingPropertyGroup| UpdaterError::MissingPropertyGroup {
                    path: file.path().to_path_buf(),
                }),
        }
    }

    fn show_changes(&mut self, path: &Path, original: &str, modified: &str) -> Result<()> {
        let stats = match self.format {
            OutputFormat::Default => diff_stats(original, modified),
            OutputFormat::Diff => write_diff(&mut *self.out, path, original, modified)
                .map_err(UpdaterError::Output)?,
            OutputFormat::Summary => write_summary_diff(&mut *self.out, original, modified)
                .map_err(UpdaterError::Output)?,
        };
        self.report.stats.add(&stats);
        Ok(())
    }
}

/// Write the alias table, one version per line
pub fn list_versions<W: Write>(out: &mut W) -> Result<()> {
    for entry in VERSION_TABLE {
        let aliases: Vec<String> = entry
            .aliases
            .iter()
            .map(|alias| format!("\"{}\"", alias))
            .collect();
        writeln!(out, "{}", aliases.join(", ")).map_err(UpdaterError::Output)?;
        writeln!(out, "    {}", entry.version).map_err(UpdaterError::Output)?;
    }
    Ok(())
}
