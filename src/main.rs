//! Command line entry point for translation audits.

use std::path::{Path, PathBuf};

use doc_translations::audit::{AuditProgress, AuditRequest, run_audit_with_progress};
use doc_translations::cli::{self, Command, CsvTarget, ReportOptions};
use doc_translations::config::{self, AuditSettings, KNOWN_REPOSITORIES};
use doc_translations::logging;
use doc_translations::report;
use doc_translations::repository::{
    GitRepository, LocalCheckout, RepositorySource, available_languages,
};
use doc_translations::translations::{KNOWN_LANGUAGES, language_name};
use time::OffsetDateTime;
use tracing::debug;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let command = cli::parse_args(std::env::args().skip(1).collect())?;
    if command.wants_log_file()
        && let Err(err) = logging::init()
    {
        eprintln!("Logging disabled: {err}");
    }
    match command {
        Command::Help => println!("{}", cli::help_text()),
        Command::ListRepos => {
            println!("Known documentation repositories:");
            for repository in KNOWN_REPOSITORIES {
                println!("- {repository}");
            }
        }
        Command::Languages { checkout, config } => {
            print_languages(checkout.as_deref(), config.as_deref())?
        }
        Command::Config { init, config } => show_config(init, config)?,
        Command::Report(options) => run_report(options)?,
    }
    Ok(())
}

fn load_settings(path: Option<&Path>) -> Result<AuditSettings, String> {
    let settings = match path {
        Some(path) => config::load_from(path),
        None => config::load_or_default(),
    };
    settings.map_err(|err| err.to_string())
}

fn run_report(options: ReportOptions) -> Result<(), String> {
    let settings = load_settings(options.config.as_deref())?;
    let limit = options.limit.unwrap_or(settings.report_limit);
    let (source, location): (Box<dyn RepositorySource>, String) = match &options.checkout {
        Some(checkout) => (
            Box::new(LocalCheckout::from_settings(&settings)),
            checkout.to_string_lossy().into_owned(),
        ),
        None => (
            Box::new(GitRepository::from_settings(&settings)),
            options
                .repo
                .clone()
                .unwrap_or_else(|| settings.repository_url.clone()),
        ),
    };
    let request = AuditRequest::new(options.language.clone(), location);
    let on_progress = |progress: AuditProgress| {
        debug!(
            directories = progress.directories_done,
            files = progress.files_done,
            "Audit progress"
        );
    };
    let summary = run_audit_with_progress(source.as_ref(), &settings, &request, None, &on_progress)
        .map_err(|err| err.to_string())?;

    print!("{}", report::render_console(&summary, limit));

    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    if let Some(target) = &options.csv {
        let path = match target {
            CsvTarget::DefaultName => PathBuf::from(report::default_csv_file_name(
                summary.target_language(),
                now.date(),
            )),
            CsvTarget::Path(path) => path.clone(),
        };
        report::export_csv(&summary, &path).map_err(|err| err.to_string())?;
        println!("\nCSV report written to {}", path.display());
    }
    if let Some(path) = &options.json {
        report::export_json(&summary, path, now).map_err(|err| err.to_string())?;
        println!("JSON report written to {}", path.display());
    }
    Ok(())
}

fn print_languages(checkout: Option<&Path>, config_path: Option<&Path>) -> Result<(), String> {
    let Some(checkout) = checkout else {
        println!("Known translation languages:");
        for language in KNOWN_LANGUAGES {
            println!("- {}: {}", language.code, language.name);
        }
        return Ok(());
    };
    let settings = load_settings(config_path)?;
    let docs_root = checkout.join(&settings.docs_root);
    let languages = available_languages(&docs_root, &settings.source_language);
    if languages.is_empty() {
        println!("No translation directories under {}", docs_root.display());
        return Ok(());
    }
    println!("Translation directories under {}:", docs_root.display());
    for code in languages {
        match language_name(&code) {
            Some(name) => println!("- {code}: {name}"),
            None => println!("- {code}"),
        }
    }
    Ok(())
}

fn show_config(init: bool, path: Option<PathBuf>) -> Result<(), String> {
    let path = match path {
        Some(path) => path,
        None => config::config_path().map_err(|err| err.to_string())?,
    };
    if init {
        if path.exists() {
            return Err(format!("Config already exists at {}", path.display()));
        }
        config::save_to_path(&AuditSettings::default(), &path).map_err(|err| err.to_string())?;
        println!("Wrote default settings to {}", path.display());
    }
    let settings = config::load_from(&path).map_err(|err| err.to_string())?;
    let rendered = toml::to_string_pretty(&settings).map_err(|err| err.to_string())?;
    println!("# {}", path.display());
    print!("{rendered}");
    Ok(())
}
