//! Demo entry point for staffdb.
//!
//! # Responsibility
//! - Exercise one full Employee lifecycle against a file-backed database.
//! - Allow switching between both repository variants from the command line.

use std::error::Error;
use std::path::PathBuf;
use std::process;

use log::info;
use rand::Rng;
use staffdb_core::{
    default_log_level, init_logging, open_pool, Employee, EmployeeId, EmployeeRepository,
    RepoError, SqliteEmployeeRepository, TemplateEmployeeRepository,
};

const USAGE: &str = "usage: staffdb_cli [--template] [DB_PATH]";

struct DemoArgs {
    use_template: bool,
    db_path: PathBuf,
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("{USAGE}");
        return;
    }

    let demo = match parse_args(&args) {
        Ok(demo) => demo,
        Err(message) => {
            eprintln!("{message}");
            process::exit(2);
        }
    };

    // Logging is best effort: the demo still runs when the log directory is
    // unavailable.
    let log_dir = std::env::temp_dir().join("staffdb-logs");
    if let Err(message) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
        eprintln!("logging disabled: {message}");
    }

    if let Err(err) = run(&demo) {
        eprintln!("staffdb demo failed: {err}");
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<DemoArgs, String> {
    let mut use_template = false;
    let mut db_path: Option<PathBuf> = None;

    for arg in args {
        match arg.as_str() {
            "--template" => use_template = true,
            other if other.starts_with('-') => {
                return Err(format!("unknown flag `{other}`\n{USAGE}"));
            }
            other => {
                if db_path.replace(PathBuf::from(other)).is_some() {
                    return Err(format!("unexpected extra argument `{other}`\n{USAGE}"));
                }
            }
        }
    }

    Ok(DemoArgs {
        use_template,
        db_path: db_path.unwrap_or_else(default_db_path),
    })
}

fn default_db_path() -> PathBuf {
    std::env::temp_dir().join("staffdb-demo.sqlite3")
}

fn run(demo: &DemoArgs) -> Result<(), Box<dyn Error>> {
    let pool = open_pool(&demo.db_path)?;
    let repository: Box<dyn EmployeeRepository> = if demo.use_template {
        Box::new(TemplateEmployeeRepository::try_new(pool)?)
    } else {
        Box::new(SqliteEmployeeRepository::try_new(pool)?)
    };

    let variant = if demo.use_template { "template" } else { "manual" };
    println!(
        "staffdb {} demo, {variant} repository, database {}",
        staffdb_core::core_version(),
        demo.db_path.display()
    );
    info!(
        "event=demo_start module=cli variant={variant} db_path={}",
        demo.db_path.display()
    );

    let id: EmployeeId = rand::thread_rng().gen_range(0..1_000);
    let employee = Employee::new(id, "Alice", "Engineer");

    repository.create_employee(&employee)?;
    println!("created:   {employee}");

    let stored = repository
        .get_employee(id)?
        .ok_or_else(|| format!("employee {id} missing right after create"))?;
    println!("fetched:   {stored}");

    let promoted = Employee {
        role: "Manager".to_string(),
        ..stored
    };
    repository.update_employee(&promoted)?;
    println!("updated:   {promoted}");

    println!("directory:");
    for entry in repository.list_employees()? {
        println!("  {entry}");
    }

    repository.delete_employee(id)?;
    println!("deleted:   employee {id}");

    // The two variants report a missing row differently; the demo accepts
    // either signal as proof of deletion.
    match repository.get_employee(id) {
        Ok(None) | Err(RepoError::NotFound(_)) => println!("verified:  employee {id} is gone"),
        Ok(Some(leftover)) => {
            return Err(format!("employee still present after delete: {leftover}").into())
        }
        Err(err) => return Err(err.into()),
    }

    info!("event=demo_done module=cli status=ok id={id}");
    Ok(())
}
