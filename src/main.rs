use clap::Parser;
use newsdesk::core::config::{self, CliOverrides, LogLevel};
use newsdesk::core::session::Notice;
use newsdesk::core::store;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "newsdesk", version, about = "Edit the news.json shown on the website")]
struct Args {
    /// News file to edit (default: news.json beside this program)
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Write a log file at this level
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

/// Shown when the program's own directory cannot be found and the current
/// directory is used instead.
fn program_dir_notice(error: &std::io::Error) -> Notice {
    Notice::warning(
        "Program directory unknown",
        format!(
            "Could not locate this program's directory ({error}).\n\
             Using the current directory for {} and {}.",
            store::DATA_FILE_NAME,
            config::CONFIG_FILE_NAME
        ),
    )
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let mut startup_notices = Vec::new();
    let base_dir = store::program_dir().unwrap_or_else(|e| {
        startup_notices.push(program_dir_notice(&e));
        PathBuf::from(".")
    });

    let file_config = config::load_config(&base_dir).unwrap_or_else(|e| {
        startup_notices.push(Notice::warning(
            "Config ignored",
            format!("{e}\nUsing default settings."),
        ));
        config::NewsdeskConfig::default()
    });

    let cli = CliOverrides {
        data_file: args.file,
        log_level: args.log_level,
    };
    let resolved = config::resolve(&file_config, &base_dir, &cli);

    // Initialize file logger only when asked for; errors always go to the UI
    if resolved.log_level != LevelFilter::Off {
        let log_config = ConfigBuilder::new()
            .set_time_format_rfc3339()
            .build();

        if let Ok(log_file) = File::create(&resolved.log_path) {
            let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
        }
    }

    log::info!("Newsdesk starting up with data file: {}", resolved.data_path.display());

    newsdesk::tui::run(resolved, startup_notices)
}
