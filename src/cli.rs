//! Argument parsing for the `doc-translations` binary.

use std::path::PathBuf;

/// Where to write the CSV export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvTarget {
    /// `translations-<lang>-<YYYYMMDD>.csv` in the working directory.
    DefaultName,
    Path(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub language: String,
    pub repo: Option<String>,
    pub checkout: Option<PathBuf>,
    pub limit: Option<usize>,
    pub csv: Option<CsvTarget>,
    pub json: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Report(ReportOptions),
    Languages {
        checkout: Option<PathBuf>,
        config: Option<PathBuf>,
    },
    ListRepos,
    Config {
        init: bool,
        config: Option<PathBuf>,
    },
    Help,
}

impl Command {
    /// Only audits log; help and listings leave the log directory alone.
    pub fn wants_log_file(&self) -> bool {
        matches!(self, Command::Report(_))
    }
}

pub fn parse_args(args: Vec<String>) -> Result<Command, String> {
    let Some(first) = args.first() else {
        return Ok(Command::Help);
    };
    let rest = &args[1..];
    match first.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "report" => parse_report(rest),
        "languages" => parse_languages(rest),
        "list-repos" => {
            if let Some(unknown) = rest.first() {
                if is_help(unknown) {
                    return Ok(Command::Help);
                }
                return Err(unknown_argument(unknown));
            }
            Ok(Command::ListRepos)
        }
        "config" => parse_config(rest),
        unknown => Err(format!("Unknown command: {unknown}\n\n{}", help_text())),
    }
}

fn parse_report(args: &[String]) -> Result<Command, String> {
    let mut options = ReportOptions::default();
    let mut language: Option<String> = None;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-l" | "--language" => {
                language = Some(value_after(args, &mut idx, "--language")?);
            }
            "-r" | "--repo" => {
                options.repo = Some(value_after(args, &mut idx, "--repo")?);
            }
            "--checkout" => {
                options.checkout = Some(PathBuf::from(value_after(args, &mut idx, "--checkout")?));
            }
            "--limit" => {
                let value = value_after(args, &mut idx, "--limit")?;
                let limit = value
                    .parse::<usize>()
                    .map_err(|_| format!("--limit expects a non-negative integer, got {value:?}"))?;
                options.limit = Some(limit);
            }
            "-c" | "--csv" => {
                // The path is optional; a following flag starts the next option.
                match args.get(idx + 1).filter(|next| !next.starts_with('-')) {
                    Some(path) => {
                        idx += 1;
                        options.csv = Some(CsvTarget::Path(PathBuf::from(path)));
                    }
                    None => options.csv = Some(CsvTarget::DefaultName),
                }
            }
            "--json" => {
                options.json = Some(PathBuf::from(value_after(args, &mut idx, "--json")?));
            }
            "--config" => {
                options.config = Some(PathBuf::from(value_after(args, &mut idx, "--config")?));
            }
            unknown => return Err(unknown_argument(unknown)),
        }
        idx += 1;
    }
    if options.repo.is_some() && options.checkout.is_some() {
        return Err("--repo and --checkout cannot be combined".to_string());
    }
    options.language = language.ok_or_else(|| "--language is required".to_string())?;
    Ok(Command::Report(options))
}

fn parse_languages(args: &[String]) -> Result<Command, String> {
    let mut checkout = None;
    let mut config = None;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--checkout" => {
                checkout = Some(PathBuf::from(value_after(args, &mut idx, "--checkout")?));
            }
            "--config" => {
                config = Some(PathBuf::from(value_after(args, &mut idx, "--config")?));
            }
            unknown => return Err(unknown_argument(unknown)),
        }
        idx += 1;
    }
    Ok(Command::Languages { checkout, config })
}

fn parse_config(args: &[String]) -> Result<Command, String> {
    let mut init = false;
    let mut config = None;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--init" => init = true,
            "--config" => {
                config = Some(PathBuf::from(value_after(args, &mut idx, "--config")?));
            }
            unknown => return Err(unknown_argument(unknown)),
        }
        idx += 1;
    }
    Ok(Command::Config { init, config })
}

fn value_after(args: &[String], idx: &mut usize, flag: &str) -> Result<String, String> {
    *idx += 1;
    args.get(*idx)
        .cloned()
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn is_help(arg: &str) -> bool {
    matches!(arg, "-h" | "--help")
}

fn unknown_argument(arg: &str) -> String {
    format!("Unknown argument: {arg}\n\n{}", help_text())
}

pub fn help_text() -> String {
    [
        "doc-translations",
        "",
        "Audit how complete and current a documentation translation is.",
        "",
        "Usage:",
        "  doc-translations report --language <code> [--repo <url> | --checkout <path>]",
        "                          [--limit <n>] [--csv [<path>]] [--json <path>] [--config <path>]",
        "  doc-translations languages [--checkout <path>] [--config <path>]",
        "  doc-translations list-repos",
        "  doc-translations config [--init] [--config <path>]",
        "",
        "Options:",
        "  -l, --language <code>  Target language directory, e.g. ko or zh-hant",
        "  -r, --repo <url>       Repository to clone (defaults to the configured one)",
        "      --checkout <path>  Audit an existing local checkout instead of cloning",
        "      --limit <n>        Rows in the Top-N tables",
        "  -c, --csv [<path>]     Export every document to CSV",
        "      --json <path>      Export the summary and documents as JSON",
        "      --config <path>    Settings file (defaults to the app directory)",
        "  -h, --help             Show this help",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn no_arguments_shows_help() {
        assert_eq!(parse_args(Vec::new()).unwrap(), Command::Help);
        assert_eq!(parse_args(args(&["--help"])).unwrap(), Command::Help);
    }

    #[test]
    fn parses_full_report_invocation() {
        let command = parse_args(args(&[
            "report", "-l", "ko", "--repo", "https://example.invalid/docs.git", "--limit", "3",
            "--json", "out/report.json",
        ]))
        .unwrap();
        assert_eq!(
            command,
            Command::Report(ReportOptions {
                language: "ko".into(),
                repo: Some("https://example.invalid/docs.git".into()),
                limit: Some(3),
                json: Some(PathBuf::from("out/report.json")),
                ..ReportOptions::default()
            })
        );
    }

    #[test]
    fn csv_path_is_optional() {
        let Command::Report(options) =
            parse_args(args(&["report", "--csv", "--language", "fr"])).unwrap()
        else {
            panic!("expected report");
        };
        assert_eq!(options.csv, Some(CsvTarget::DefaultName));
        assert_eq!(options.language, "fr");

        let Command::Report(options) =
            parse_args(args(&["report", "-l", "fr", "-c", "fr.csv"])).unwrap()
        else {
            panic!("expected report");
        };
        assert_eq!(options.csv, Some(CsvTarget::Path(PathBuf::from("fr.csv"))));
    }

    #[test]
    fn report_requires_language() {
        let err = parse_args(args(&["report", "--repo", "x"])).unwrap_err();
        assert!(err.contains("--language is required"));
    }

    #[test]
    fn rejects_bad_values_and_flags() {
        assert!(parse_args(args(&["report", "-l"])).unwrap_err().contains("requires a value"));
        assert!(parse_args(args(&["report", "-l", "fr", "--limit", "many"])).is_err());
        assert!(parse_args(args(&["report", "-l", "fr", "--bogus"])).unwrap_err().contains("Unknown argument"));
        assert!(parse_args(args(&["frobnicate"])).unwrap_err().contains("Unknown command"));
        assert!(
            parse_args(args(&["report", "-l", "fr", "--repo", "a", "--checkout", "b"]))
                .unwrap_err()
                .contains("cannot be combined")
        );
    }

    #[test]
    fn parses_auxiliary_commands() {
        assert_eq!(parse_args(args(&["list-repos"])).unwrap(), Command::ListRepos);
        assert_eq!(
            parse_args(args(&["languages", "--checkout", "/src/docs"])).unwrap(),
            Command::Languages {
                checkout: Some(PathBuf::from("/src/docs")),
                config: None,
            }
        );
        assert_eq!(
            parse_args(args(&["config", "--init"])).unwrap(),
            Command::Config {
                init: true,
                config: None,
            }
        );
    }

    #[test]
    fn only_reports_open_a_log_file() {
        let report = parse_args(args(&["report", "-l", "fr"])).unwrap();
        assert!(report.wants_log_file());
        let quiet: [&[&str]; 5] = [&["--help"], &["list-repos"], &["languages"], &["config"], &["report", "-h"]];
        for raw in quiet {
            assert!(!parse_args(args(raw)).unwrap().wants_log_file(), "{raw:?}");
        }
        assert!(parse_args(args(&["frobnicate"])).is_err());
    }
}
