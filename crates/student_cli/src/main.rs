//! Command-line entry point for the student store.
//!
//! # Responsibility
//! - Resolve configuration from flags and environment.
//! - Wire logging, database, repository and service together explicitly.
//! - Render service results as JSON on stdout.

use clap::{Parser, Subcommand};
use log::{error, info};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use student_core::db::open_db;
use student_core::{
    core_version, default_log_level, init_logging, SqliteStudentRepository, Student, StudentId,
    StudentService,
};

const DEFAULT_DB_FILE_NAME: &str = "student_management.sqlite3";

#[derive(Debug, Parser)]
#[command(name = "student", about = "Manage student records", version)]
struct Cli {
    /// SQLite database file.
    #[arg(long, env = "STUDENT_DB_PATH", global = true)]
    db_path: Option<String>,

    /// One of trace|debug|info|warn|error.
    #[arg(long, env = "STUDENT_LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long, env = "STUDENT_LOG_DIR", global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print all students as a JSON array.
    List,
    /// Print one student as JSON, or `null` when absent.
    Get {
        #[arg(allow_negative_numbers = true)]
        id: StudentId,
    },
    /// Create or update a student and print the stored record.
    Save {
        #[arg(long, allow_negative_numbers = true)]
        id: Option<StudentId>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a student by id. Unknown ids are ignored.
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: StudentId,
    },
    /// Print the core library version.
    Version,
}

impl Command {
    fn label(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get { .. } => "get",
            Self::Save { .. } => "save",
            Self::Delete { .. } => "delete",
            Self::Version => "version",
        }
    }
}

impl Cli {
    fn resolved_db_path(&self) -> PathBuf {
        match self.db_path.as_deref().map(str::trim) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
        }
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns whether logging was started.
    fn start_logging(&self) -> Result<bool, String> {
        let Some(log_dir) = self.log_dir.as_deref() else {
            return Ok(false);
        };
        let level = self.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
        Ok(true)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = cli.start_logging() {
        eprintln!("logging init failed: {err}");
        return ExitCode::FAILURE;
    }

    let stdout = std::io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, out: &mut impl Write) -> Result<(), String> {
    if let Command::Version = cli.command {
        writeln!(out, "{}", core_version()).map_err(|err| err.to_string())?;
        return Ok(());
    }

    let db_path = cli.resolved_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("database open failed: {err}"))?;
    let repo = SqliteStudentRepository::try_new(&conn)
        .map_err(|err| format!("repository init failed: {err}"))?;
    let service = StudentService::new(repo);

    let rendered = match &cli.command {
        Command::List => to_json(&service.get_all_students())?,
        Command::Get { id } => to_json(&service.get_student_by_id(*id))?,
        Command::Save { id, name, email } => {
            let student = Student {
                id: *id,
                name: name.clone(),
                email: email.clone(),
            };
            to_json(&service.save_student(&student))?
        }
        Command::Delete { id } => {
            service.delete_student(*id).map_err(|err| err.to_string())?;
            None
        }
        Command::Version => None,
    };

    info!(
        "event=cli_command module=cli status=ok command={} db_path={}",
        cli.command.label(),
        db_path.display()
    );
    if let Some(json) = rendered {
        writeln!(out, "{json}").map_err(|err| err.to_string())?;
    }
    Ok(())
}

fn to_json<T: serde::Serialize, E: std::fmt::Display>(
    result: &Result<T, E>,
) -> Result<Option<String>, String> {
    match result {
        Ok(value) => serde_json::to_string_pretty(value)
            .map(Some)
            .map_err(|err| err.to_string()),
        Err(err) => Err(err.to_string()),
    }
}
