use crate::cli::args::{Args, Command, ConfigArgs, ConfigCommand};
use crate::cli::output::{ConsoleWriter, OutputWriter, PortSummary};
use crate::core::session::{
    InactivityWatchdog, InputReader, Session, SessionConsole, TerminationReason,
};
use crate::domain::config::CalcConfig;
use crate::domain::error::{SerialCalcError, SerialCalcResult};
use crate::infrastructure::activity_log::ActivityLog;
use crate::infrastructure::config::ConfigManager;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::serial::SerialChannel;
use std::io;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::debug;

/// Execute CLI command, returning the process exit status
pub async fn execute_command(args: Args) -> SerialCalcResult<i32> {
    let writer = ConsoleWriter::new(args.output);

    let config_manager = ConfigManager::new();
    let mut config = if let Some(config_path) = &args.config {
        config_manager.load_config_from_path(config_path.as_ref())?
    } else {
        config_manager.load_config()?
    };
    args.apply_overrides(&mut config);

    if !args.quiet {
        init_logging(&config.global.log_level, args.verbose)?;
    }

    match args.command {
        None | Some(Command::Run) => run_session(&config).await,
        Some(Command::Ports) => {
            list_ports(&writer)?;
            Ok(0)
        }
        Some(Command::Config(config_args)) => {
            execute_config_command(config_args, &writer, &config, &config_manager)?;
            Ok(0)
        }
        Some(Command::Version) => {
            writer.write_message(&format!("serialcalc {}", env!("CARGO_PKG_VERSION")))?;
            Ok(0)
        }
    }
}

/// Open the device and apply the configured line parameters
pub fn connect(config: &CalcConfig) -> SerialCalcResult<SerialChannel> {
    SerialChannel::open(&config.device.port)?.configure(&config.device, config.timeouts.clone())
}

/// Run the interactive session on stdin/stdout
pub async fn run_session(config: &CalcConfig) -> SerialCalcResult<i32> {
    let idle_timeout = config.session.idle_timeout();
    let mut console = SessionConsole::new(io::stdout(), idle_timeout);
    console.banner()?;

    let channel = match connect(config) {
        Ok(channel) => channel,
        Err(e) => {
            debug!("Connection to '{}' failed: {}", config.device.port, e);
            eprintln!("ERROR: Failed to connect to device. {}", e);
            return Ok(TerminationReason::ConnectFailure.exit_code());
        }
    };

    let log = match ActivityLog::open(&config.session.log_file) {
        Ok(log) => log,
        Err(e) => {
            debug!("Activity logging disabled: {}", e);
            eprintln!("ERROR: {}", e);
            ActivityLog::disabled()
        }
    };

    let session = Session::new(
        channel,
        log,
        InactivityWatchdog::new(idle_timeout),
        InputReader::new(BufReader::new(tokio::io::stdin())),
        console,
    );

    let reason = session.run().await;
    Ok(reason.exit_code())
}

fn list_ports(writer: &ConsoleWriter) -> SerialCalcResult<()> {
    let ports: Vec<PortSummary> = serialport::available_ports()?
        .into_iter()
        .map(PortSummary::from)
        .collect();

    writer.write_ports(&ports)?;
    Ok(())
}

fn execute_config_command(
    args: ConfigArgs,
    writer: &ConsoleWriter,
    config: &CalcConfig,
    config_manager: &ConfigManager,
) -> SerialCalcResult<()> {
    match args.command {
        ConfigCommand::Show => {
            writer.write_config(config)?;
        }
        ConfigCommand::Validate { file } => {
            let result = match &file {
                Some(config_path) => config_manager.load_config_from_path(config_path.as_ref()),
                None => config_manager.load_config(),
            };
            let subject = file
                .map(|path| format!("Configuration file '{}'", path))
                .unwrap_or_else(|| "Current configuration".to_string());

            match result {
                Ok(_) => writer.write_message(&format!("{} is valid", subject))?,
                Err(e) => writer.write_error(&format!("Configuration validation failed: {}", e))?,
            }
        }
        ConfigCommand::Init { dir, global } => {
            if global {
                let global_path = config_manager
                    .get_global_config_path_ref()
                    .ok_or_else(|| SerialCalcError::Config {
                        message: "Could not determine home directory".to_string(),
                    })?;
                config_manager.save_config_to_path(global_path, &CalcConfig::default())?;
                writer.write_message(&format!(
                    "Global configuration initialized at '{}'",
                    global_path.display()
                ))?;
            } else {
                let base: PathBuf = match dir {
                    Some(dir) => dir.into(),
                    None => std::env::current_dir()?,
                };
                let config_file = config_manager.init_project_config(&base)?;
                writer.write_message(&format!(
                    "Project configuration initialized at '{}'",
                    config_file.display()
                ))?;
            }
        }
    }

    Ok(())
}
