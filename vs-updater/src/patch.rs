use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex, Replacer};

use crate::version::VisualStudioVersion;

static SOLUTION_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(# Visual Studio )\d+").expect("Invalid solution header regex")
});

static SOLUTION_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(VisualStudioVersion = )\d+\.\d+\.\d+\.\d+")
        .expect("Invalid VisualStudioVersion regex")
});

static SOLUTION_MIN_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(MinimumVisualStudioVersion = )\d+\.\d+\.\d+\.\d+")
        .expect("Invalid MinimumVisualStudioVersion regex")
});

/// A `<Project` line up to its last `ToolsVersion` attribute
static PROJECT_TOOLS_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^<Project.*ToolsVersion="\d+\.\d+""#).expect("Invalid ToolsVersion line regex")
});

static TOOLS_VERSION_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(ToolsVersion=")\d+\.\d+(")"#).expect("Invalid ToolsVersion regex")
});

static LANG_VERSION_ELEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*<LangVersion>[^<]*</LangVersion>").expect("Invalid LangVersion element regex")
});

static LANG_VERSION_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(<LangVersion>)[^<]*(</LangVersion>)").expect("Invalid LangVersion value regex")
});

/// Closing marker of a top-level property group in a conventionally indented project
const PROPERTY_GROUP_CLOSE: &str = "  </PropertyGroup>";

/// Language version directive to force into project files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LangVersion {
    /// Drop any `<LangVersion>` element so the compiler default applies
    Default,
    Version(String),
}

impl LangVersion {
    /// Interpret a raw command-line value. Blank input means "leave it alone".
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            None
        } else if raw == "default" {
            Some(LangVersion::Default)
        } else {
            Some(LangVersion::Version(raw.to_string()))
        }
    }
}

/// Result of running a patch over one file's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched<'a> {
    pub content: Cow<'a, str>,
    /// True when at least one rule matched, even if it wrote back identical text
    pub modified: bool,
}

impl<'a> Patched<'a> {
    fn unchanged(content: &'a str) -> Self {
        Patched {
            content: Cow::Borrowed(content),
            modified: false,
        }
    }

    fn then<R: Replacer>(self, re: &Regex, rep: R) -> Self {
        let (content, hit) = replace_all(re, self.content, rep);
        Patched {
            content,
            modified: self.modified || hit,
        }
    }
}

/// The project file lacks the marker a new `<LangVersion>` element is inserted before
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPropertyGroup;

/// Apply `re` to `input`, reporting whether anything matched
fn replace_all<'a, R: Replacer>(re: &Regex, input: Cow<'a, str>, rep: R) -> (Cow<'a, str>, bool) {
    match input {
        Cow::Borrowed(text) => {
            let out = re.replace_all(text, rep);
            let hit = matches!(out, Cow::Owned(_));
            (out, hit)
        }
        Cow::Owned(text) => {
            let replaced = match re.replace_all(&text, rep) {
                Cow::Owned(new_text) => Some(new_text),
                Cow::Borrowed(_) => None,
            };
            match replaced {
                Some(new_text) => (Cow::Owned(new_text), true),
                None => (Cow::Owned(text), false),
            }
        }
    }
}

/// Keep the captured prefix (and optional suffix) around a new value
fn keep_around(value: &str) -> impl FnMut(&Captures<'_>) -> String + '_ {
    move |caps: &Captures<'_>| {
        let suffix = caps.get(2).map_or("", |m| m.as_str());
        format!("{}{}{}", &caps[1], value, suffix)
    }
}

/// Rewrite every `ToolsVersion` attribute inside a matched `<Project` line
fn retarget_tools_versions(value: &str) -> impl FnMut(&Captures<'_>) -> String + '_ {
    move |caps: &Captures<'_>| {
        TOOLS_VERSION_ATTR
            .replace_all(&caps[0], keep_around(value))
            .into_owned()
    }
}

/// Rewrite the header, `VisualStudioVersion` and `MinimumVisualStudioVersion` lines of a solution
pub fn patch_solution<'a>(content: &'a str, version: &VisualStudioVersion) -> Patched<'a> {
    Patched::unchanged(content)
        .then(&SOLUTION_YEAR, keep_around(version.year_version))
        .then(&SOLUTION_VERSION, keep_around(version.technical_version))
        .then(
            &SOLUTION_MIN_VERSION,
            keep_around(version.minimum_compatible_technical_version),
        )
}

/// Rewrite `ToolsVersion` on the project root element and apply the optional language version.
///
/// Edits are plain text substitutions on well-known markers, so everything
/// else in the file is carried over byte for byte.
pub fn patch_project<'a>(
    content: &'a str,
    version: &VisualStudioVersion,
    lang_version: Option<&LangVersion>,
) -> Result<Patched<'a>, MissingPropertyGroup> {
    let patched = Patched::unchanged(content)
        .then(&PROJECT_TOOLS_LINE, retarget_tools_versions(version.tools_version));

    match lang_version {
        None => Ok(patched),
        Some(lang_version) => update_lang_version(patched, lang_version),
    }
}

fn update_lang_version<'a>(
    patched: Patched<'a>,
    lang_version: &LangVersion,
) -> Result<Patched<'a>, MissingPropertyGroup> {
    let value = match lang_version {
        LangVersion::Default => return Ok(patched.then(&LANG_VERSION_ELEMENT, "")),
        LangVersion::Version(value) => value.as_str(),
    };

    let (content, hit) = replace_all(&LANG_VERSION_VALUE, patched.content, keep_around(value));
    if hit {
        return Ok(Patched {
            content,
            modified: true,
        });
    }

    let index = content.find(PROPERTY_GROUP_CLOSE).ok_or(MissingPropertyGroup)?;
    let line_ending = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let mut inserted = content.into_owned();
    inserted.insert_str(
        index,
        &format!("    <LangVersion>{}</LangVersion>{}", value, line_ending),
    );
    Ok(Patched {
        content: Cow::Owned(inserted),
        modified: true,
    })
}
