#[cfg(test)]
mod runner_tests {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    use crate::config::{Configuration, OutputFormat};
    use crate::error::UpdaterError;
    use crate::patch::LangVersion;
    use crate::runner::run_with_output;

    const SOLUTION: &str = "\u{feff}\r
Microsoft Visual Studio Solution File, Format Version 12.00\r
# Visual Studio 16\r
VisualStudioVersion = 16.0.28922.388\r
MinimumVisualStudioVersion = 16.0.0.0\r
Project(\"{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}\") = \"App\", \"App\\App.csproj\", \"{5A1B0C9E-1111-2222-3333-444455556666}\"\r
EndProject\r
";

    const LEGACY_PROJECT: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\r
<Project ToolsVersion=\"12.0\" DefaultTargets=\"Build\" xmlns=\"http://schemas.microsoft.com/developer/msbuild/2003\">\r
  <PropertyGroup>\r
    <OutputType>Exe</OutputType>\r
  </PropertyGroup>\r
</Project>\r
";

    const SDK_PROJECT: &str = "<Project Sdk=\"Microsoft.NET.Sdk\">\n  <PropertyGroup>\n    <TargetFramework>net48</TargetFramework>\n    <LangVersion>7.3</LangVersion>\n  </PropertyGroup>\n</Project>\n";

    struct Workspace {
        dir: TempDir,
    }

    impl Workspace {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let root = dir.path();
            fs::create_dir_all(root.join("App")).unwrap();
            fs::create_dir_all(root.join("Lib")).unwrap();
            fs::write(root.join("App.sln"), SOLUTION).unwrap();
            fs::write(root.join("App/App.csproj"), LEGACY_PROJECT).unwrap();
            fs::write(root.join("Lib/Lib.csproj"), SDK_PROJECT).unwrap();
            fs::write(root.join("Lib/notes.txt"), "# Visual Studio 16\n").unwrap();
            Workspace { dir }
        }

        fn root(&self) -> &Path {
            self.dir.path()
        }

        fn read(&self, relative: &str) -> String {
            fs::read_to_string(self.root().join(relative)).unwrap()
        }

        fn config(&self, version: &str) -> Configuration {
            Configuration {
                path: self.root().to_path_buf(),
                version_alias: version.to_string(),
                ..Configuration::default()
            }
        }
    }

    fn run_captured(config: &Configuration) -> (crate::Result<crate::RunReport>, String) {
        let mut out = Vec::new();
        let result = run_with_output(config, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_retarget_to_2017() {
        let ws = Workspace::new();
        let (result, output) = run_captured(&ws.config("2017"));
        let report = result.unwrap();

        let solution = ws.read("App.sln");
        assert!(solution.starts_with('\u{feff}'));
        assert!(solution.contains("\r\n# Visual Studio 15\r\n"));
        assert!(solution.contains("\r\nVisualStudioVersion = 15.0.27428.2011\r\n"));
        assert!(solution.contains("\r\nMinimumVisualStudioVersion = 15.0.0.0\r\n"));

        let project = ws.read("App/App.csproj");
        assert!(project.contains("<Project ToolsVersion=\"15.0\" DefaultTargets=\"Build\""));

        // Not a solution or project file
        assert_eq!(ws.read("Lib/notes.txt"), "# Visual Studio 16\n");

        assert_eq!(report.solutions_processed, 1);
        assert_eq!(report.projects_processed, 2);
        // App.sln and App.csproj; Lib.csproj has no ToolsVersion and no override
        assert_eq!(report.files_rewritten, 2);
        assert_eq!(ws.read("Lib/Lib.csproj"), SDK_PROJECT);

        let echoed: Vec<&str> = output.lines().collect();
        assert_eq!(echoed.len(), 3);
        assert!(echoed[0].ends_with("App.sln"));
        assert!(echoed[1..].iter().all(|line| line.ends_with(".csproj")));
    }

    #[test]
    fn test_unchanged_solution_is_still_rewritten() {
        let ws = Workspace::new();
        let (result, _) = run_captured(&ws.config("VS2019"));
        let report = result.unwrap();

        assert_eq!(ws.read("App.sln"), SOLUTION);
        // App.sln (always) and App.csproj (ToolsVersion matched)
        assert_eq!(report.files_rewritten, 2);
        assert_eq!(report.stats.files_changed, 1);
    }

    #[test]
    fn test_untouched_project_is_not_rewritten() {
        let ws = Workspace::new();
        fs::remove_file(ws.root().join("App/App.csproj")).unwrap();
        fs::remove_file(ws.root().join("App.sln")).unwrap();

        let (result, output) = run_captured(&ws.config("2013"));
        let report = result.unwrap();

        assert_eq!(report.projects_processed, 1);
        assert_eq!(report.files_rewritten, 0);
        assert_eq!(ws.read("Lib/Lib.csproj"), SDK_PROJECT);
        // Still echoed even though nothing was written
        assert!(output.trim_end().ends_with("Lib.csproj"));
    }

    #[test]
    fn test_insert_lang_version() {
        let ws = Workspace::new();
        let mut config = ws.config("2019");
        config.lang_version = Some(LangVersion::Version("7.3".to_string()));

        let (result, _) = run_captured(&config);
        result.unwrap();

        assert_eq!(
            ws.read("App/App.csproj"),
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\r
<Project ToolsVersion=\"15.0\" DefaultTargets=\"Build\" xmlns=\"http://schemas.microsoft.com/developer/msbuild/2003\">\r
  <PropertyGroup>\r
    <OutputType>Exe</OutputType>\r
    <LangVersion>7.3</LangVersion>\r
  </PropertyGroup>\r
</Project>\r
"
        );
        // Existing element is updated in place rather than duplicated
        assert_eq!(ws.read("Lib/Lib.csproj"), SDK_PROJECT);
    }

    #[test]
    fn test_default_lang_version_removes_element() {
        let ws = Workspace::new();
        let mut config = ws.config("2019");
        config.lang_version = Some(LangVersion::Default);

        let (result, _) = run_captured(&config);
        let report = result.unwrap();

        assert_eq!(
            ws.read("Lib/Lib.csproj"),
            "<Project Sdk=\"Microsoft.NET.Sdk\">\n  <PropertyGroup>\n    <TargetFramework>net48</TargetFramework>\n  </PropertyGroup>\n</Project>\n"
        );
        assert_eq!(report.files_rewritten, 3);
    }

    #[test]
    fn test_unsupported_version_touches_nothing() {
        let ws = Workspace::new();
        let (result, output) = run_captured(&ws.config("VS2010"));

        let err = result.unwrap_err();
        assert!(matches!(err, UpdaterError::UnsupportedVersion { .. }));
        assert!(err
            .to_string()
            .starts_with("\"VS2010\" is not a supported visual studio version name"));
        assert!(output.is_empty());
        assert_eq!(ws.read("App.sln"), SOLUTION);
        assert_eq!(ws.read("App/App.csproj"), LEGACY_PROJECT);
    }

    #[test]
    fn test_unknown_path_fails() {
        let ws = Workspace::new();
        let mut config = ws.config("2017");
        config.path = ws.root().join("missing");

        let (result, output) = run_captured(&config);

        assert!(matches!(
            result.unwrap_err(),
            UpdaterError::PathNotFound { .. }
        ));
        assert!(output.is_empty());
        assert_eq!(ws.read("App.sln"), SOLUTION);
    }

    #[test]
    fn test_missing_property_group_aborts() {
        let ws = Workspace::new();
        fs::write(
            ws.root().join("Lib/Lib.csproj"),
            "<Project Sdk=\"Microsoft.NET.Sdk\">\n</Project>\n",
        )
        .unwrap();
        fs::remove_file(ws.root().join("App/App.csproj")).unwrap();
        let mut config = ws.config("2017");
        config.lang_version = Some(LangVersion::Version("latest".to_string()));

        let (result, _) = run_captured(&config);

        assert!(matches!(
            result.unwrap_err(),
            UpdaterError::MissingPropertyGroup { .. }
        ));
        // Solutions are processed first and stay written
        assert!(ws.read("App.sln").contains("# Visual Studio 15"));
    }

    #[test]
    fn test_diff_format_and_stats() {
        let ws = Workspace::new();
        let mut config = ws.config("2017");
        config.format = OutputFormat::Diff;
        config.show_stats = true;

        let (result, output) = run_captured(&config);
        let report = result.unwrap();

        assert!(output.contains("-# Visual Studio 16"));
        assert!(output.contains("+# Visual Studio 15"));
        assert!(output.contains("+<Project ToolsVersion=\"15.0\""));
        assert!(output.contains("\nSummary:\nFiles changed: 2\n"));
        assert_eq!(report.stats.files_changed, 2);
        assert_eq!(report.stats.lines_added, 4);
        assert_eq!(report.stats.lines_removed, 4);
    }

    #[test]
    fn test_summary_format_echoes_each_path_once() {
        let ws = Workspace::new();
        let mut config = ws.config("2017");
        config.format = OutputFormat::Summary;

        let (result, output) = run_captured(&config);
        result.unwrap();

        assert_eq!(output.matches("App.sln").count(), 1);
        assert_eq!(output.matches("App.csproj").count(), 1);
        let lines: Vec<&str> = output.lines().collect();
        assert!(lines[0].ends_with("App.sln"));
        assert_eq!(lines[1], "  - # Visual Studio 16");
        assert!(lines.contains(&"  + # Visual Studio 15"));
        assert!(lines.contains(&"  + <Project ToolsVersion=\"15.0\" DefaultTargets=\"Build\" xmlns=\"http://schemas.microsoft.com/developer/msbuild/2003\">"));
    }

    #[test]
    fn test_exclusions_skip_files() {
        let ws = Workspace::new();
        let mut config = ws.config("2017");
        config.exclude = vec!["App.sln".to_string(), "*App.csproj".to_string()];

        let (result, output) = run_captured(&config);
        let report = result.unwrap();

        assert_eq!(report.solutions_processed, 0);
        assert_eq!(report.projects_processed, 1);
        assert!(!output.contains("App.sln"));
        assert!(!output.contains("App.csproj"));
        assert_eq!(ws.read("App.sln"), SOLUTION);
    }
}
