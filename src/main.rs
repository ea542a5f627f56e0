//! cardiorisk: cardiovascular risk scoring from survey answers.
//!
//! Main entry point for the command line shell.
//!
//! ```bash
//! cardiorisk answers.json        # score one submission
//! cardiorisk < answers.json      # same, from stdin
//! cardiorisk --vocabulary        # print the encoding table
//! ```
//!
//! Stdout carries only JSON results. Logs go to stderr or a file.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cardiorisk::adapters::sanitize::SanitizingMakeWriter;
use cardiorisk::application::load_scorer;
use cardiorisk::config::Settings;
use cardiorisk::{CardioRiskError, EncodingTable, RawAnswers};

const USAGE: &str = "Usage: cardiorisk [ANSWERS_JSON | -]\n       cardiorisk --vocabulary";

enum Command {
    Score(Option<PathBuf>),
    Vocabulary,
    Help,
}

fn parse_args() -> Result<Command> {
    let mut args = std::env::args().skip(1);
    let command = match args.next().as_deref() {
        None | Some("-") => Command::Score(None),
        Some("--vocabulary") => Command::Vocabulary,
        Some("-h" | "--help") => Command::Help,
        Some(flag) if flag.starts_with("--") => anyhow::bail!("Unknown option {flag}\n{USAGE}"),
        Some(path) => Command::Score(Some(PathBuf::from(path))),
    };
    if args.next().is_some() {
        anyhow::bail!("Too many arguments\n{USAGE}");
    }
    Ok(command)
}

fn init_logging(settings: &Settings) -> Result<WorkerGuard> {
    let (writer, guard) = if settings.log_mode.uses_file() {
        if let Some(parent) = settings.log_file.parent() {
            // Best-effort: opening the file below reports the real failure.
            let _ = std::fs::create_dir_all(parent);
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&settings.log_file)
            .with_context(|| format!("Failed to open log file {:?}", settings.log_file))?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stderr())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(!settings.log_mode.uses_file())
                .with_writer(SanitizingMakeWriter::new(writer)),
        )
        .init();

    Ok(guard)
}

fn read_answers(path: Option<&PathBuf>) -> Result<RawAnswers> {
    let bytes = match path {
        Some(path) => {
            std::fs::read(path).with_context(|| format!("Failed to read answers from {path:?}"))?
        }
        None => {
            let mut buf = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read answers from stdin")?;
            buf
        }
    };
    let answers: RawAnswers = serde_json::from_slice(&bytes)
        .map_err(CardioRiskError::from)
        .context("Answers must be a JSON object of field name to value")?;
    Ok(answers)
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
        Command::Vocabulary => {
            let description = EncodingTable::canonical().describe();
            println!("{}", serde_json::to_string_pretty(&description)?);
            Ok(())
        }
        Command::Score(path) => {
            let settings = Settings::from_env()?;
            let _guard = init_logging(&settings)?;
            tracing::info!("Starting cardiorisk...");

            let scorer = load_scorer(&settings)?;
            let answers = read_answers(path.as_ref())?;
            tracing::debug!("Received {} answers", answers.len());

            let result = scorer.score(&answers)?;
            println!("{}", serde_json::to_string(&result)?);
            Ok(())
        }
    }
}

/// 2 when the submitted answers are at fault, 1 for everything else.
fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<CardioRiskError>() {
        Some(e) if e.is_user_input() => 2,
        _ => 1,
    }
}

fn main() -> ExitCode {
    let command = match parse_args() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(exit_status(&e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardiorisk::{EncodingError, Field};

    fn encoding_error(err: EncodingError) -> anyhow::Error {
        anyhow::Error::from(CardioRiskError::from(err))
    }

    #[test]
    fn test_user_input_errors_exit_2() {
        let invalid = encoding_error(EncodingError::InvalidCategory {
            field: Field::SmokerStatus,
            value: "Sometimes".into(),
        });
        assert_eq!(exit_status(&invalid), 2);

        let range = encoding_error(EncodingError::OutOfRange {
            field: Field::SleepHours,
            value: 25.0,
            min: 0.0,
            max: 24.0,
        });
        assert_eq!(exit_status(&range), 2);
    }

    #[test]
    fn test_other_errors_exit_1() {
        let schema = encoding_error(EncodingError::SchemaMismatch {
            missing: vec!["BMI".into()],
            unexpected: vec![],
        });
        assert_eq!(exit_status(&schema), 1);

        let unavailable = anyhow::Error::from(CardioRiskError::ModelUnavailable("gone".into()));
        assert_eq!(exit_status(&unavailable), 1);

        assert_eq!(exit_status(&anyhow::anyhow!("Too many arguments")), 1);
    }

    #[test]
    fn test_context_keeps_classification() {
        let wrapped = encoding_error(EncodingError::InvalidCategory {
            field: Field::Sex,
            value: "Other".into(),
        })
        .context("Scoring failed");
        assert_eq!(exit_status(&wrapped), 2);
    }

    #[test]
    fn test_malformed_answers_file_exits_1() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("answers.json");
        std::fs::write(&path, b"[1, 2, 3]").expect("write answers");

        let err = read_answers(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("JSON object"));
        assert_eq!(exit_status(&err), 1);
    }

    #[test]
    fn test_reads_answers_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("answers.json");
        std::fs::write(&path, br#"{"Sex": "Female", "BMI": 22.0}"#).expect("write answers");

        let answers = read_answers(Some(&path)).expect("Should parse");
        assert_eq!(answers.len(), 2);
    }
}
