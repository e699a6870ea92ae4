use std::io::{self, Write};
use std::path::Path;

use similar::{ChangeTag, TextDiff};

/// Line-level change counts, per file or summed over a run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffStats {
    pub files_changed: usize,
    pub lines_added: usize,
    pub lines_removed: usize,
}

impl DiffStats {
    pub fn add(&mut self, other: &DiffStats) {
        self.files_changed += other.files_changed;
        self.lines_added += other.lines_added;
        self.lines_removed += other.lines_removed;
    }

    pub fn write_summary<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\nSummary:")?;
        writeln!(out, "Files changed: {}", self.files_changed)?;
        writeln!(out, "Lines added: {}", self.lines_added)?;
        writeln!(out, "Lines removed: {}", self.lines_removed)
    }
}

/// Count inserted and deleted lines between two versions of a file
pub fn diff_stats(original: &str, modified: &str) -> DiffStats {
    let diff = TextDiff::from_lines(original, modified);
    let mut stats = DiffStats::default();

    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Insert => stats.lines_added += 1,
            ChangeTag::Delete => stats.lines_removed += 1,
            ChangeTag::Equal => {}
        }
    }

    if stats.lines_added > 0 || stats.lines_removed > 0 {
        stats.files_changed = 1;
    }
    stats
}

/// Generate a unified diff between original and modified content
///
/// Returns the diff text (with `---`/`+++` headers naming `path`) and the
/// change statistics. `context_lines` controls the hunk context radius.
pub fn generate_unified_diff(
    path: &Path,
    original: &str,
    modified: &str,
    context_lines: usize,
) -> (String, DiffStats) {
    let diff = TextDiff::from_lines(original, modified);
    let path_str = path.display().to_string();

    let mut output = String::new();
    output.push_str(&format!("--- {}\n", path_str));
    output.push_str(&format!("+++ {}\n", path_str));
    output.push_str(
        &diff
            .unified_diff()
            .context_radius(context_lines)
            .to_string(),
    );

    (output, diff_stats(original, modified))
}

/// Write a unified diff for one file, if anything changed
pub fn write_diff<W: Write>(
    out: &mut W,
    path: &Path,
    original: &str,
    modified: &str,
) -> io::Result<DiffStats> {
    let (diff_output, stats) = generate_unified_diff(path, original, modified, 3);

    if stats.files_changed > 0 {
        write!(out, "{}", diff_output)?;
    }
    Ok(stats)
}

/// Write only the removed and added lines of one file, without context.
///
/// The caller has already echoed the path, so no header is written.
pub fn write_summary_diff<W: Write>(
    out: &mut W,
    original: &str,
    modified: &str,
) -> io::Result<DiffStats> {
    let stats = diff_stats(original, modified);
    if stats.files_changed == 0 {
        return Ok(stats);
    }

    let diff = TextDiff::from_lines(original, modified);
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Insert => "+",
            ChangeTag::Delete => "-",
            ChangeTag::Equal => continue,
        };
        let line = change.value().trim_end_matches(['\r', '\n']);
        writeln!(out, "  {} {}", sign, line)?;
    }
    Ok(stats)
}
