//! Command dispatch
//!
//! Loads configuration, parses arguments, sets up logging and runs one
//! subcommand. Library errors surface here and become an exit status.

use std::path::Path;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Args, Command, ConfigsCommand, LogFormat, Shell};
use crate::config::Config;
use crate::context::Environment;
use crate::devexp::{render, Language, RenderOptions};
use crate::errors::{HrbridgeError, Result};
use crate::external::{import_fields, import_into, ExternalFields, ImportReport};
use crate::interactive;
use crate::mock::{SimulatedResponse, TestRunner};
use crate::output::review::format_review;
use crate::output::{table, Clipboard, FileClipboard, Painter};
use crate::request::SecretString;
use crate::schema::catalog;
use crate::sessions::{
    export_configuration, import_configuration, ConfigStore, FileStore, SavedConfiguration,
};
use crate::status::ExitStatus;
use crate::wizard::WizardState;

/// Main entry point for the CLI
pub fn run(args: Vec<String>, mut env: Environment) -> ExitStatus {
    if let Some(name) = args.first() {
        if let Some(basename) = Path::new(name).file_stem() {
            env.program_name = basename.to_string_lossy().to_string();
        }
    }

    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };

    let merged_args = config.merge_default_options(args);

    let parsed = match Args::try_parse_from(&merged_args) {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                ExitStatus::Success
            } else {
                ExitStatus::Error
            };
        }
    };

    init_logging(parsed.verbose, parsed.log_format.unwrap_or_default());
    if let Some(e) = config_error {
        warn!(error = %e, "ignoring config file");
    }
    debug!(command = ?parsed.command, "parsed arguments");

    let painter = if parsed.no_color {
        Painter::new(false)
    } else {
        env.painter()
    };

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => return handle_error(HrbridgeError::Io(e), &env, painter),
    };

    match runtime.block_on(program(parsed, config, &env)) {
        Ok(status) => status,
        Err(e) => handle_error(e, &env, painter),
    }
}

fn init_logging(verbose: bool, format: LogFormat) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let registry = tracing_subscriber::registry().with(filter);
    let result = match format {
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
            .try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    };
    result.ok();
}

fn handle_error(err: HrbridgeError, env: &Environment, painter: Painter) -> ExitStatus {
    eprintln!("{}: {}", env.program_name, painter.error(&err.to_string()));
    ExitStatus::from_error(&err)
}

/// Fresh wizard state carrying the configured base URL, key and mapping policy
pub fn new_state(args: &Args, config: &Config) -> WizardState {
    let api_key = args
        .api_key
        .clone()
        .or_else(|| config.hr.api_key.clone().map(SecretString::from))
        .unwrap_or_default();
    WizardState::new()
        .with_policy(config.target_policy())
        .with_base_url(config.hr.base_url.clone())
        .with_api_key(api_key)
}

pub async fn program(args: Args, config: Config, env: &Environment) -> Result<ExitStatus> {
    let painter = if args.no_color {
        Painter::new(false)
    } else {
        env.painter()
    };
    let store_path = args.store.clone().unwrap_or_else(|| config.store_path());
    let mut store = FileStore::new(store_path);

    match &args.command {
        Command::Endpoints => {
            println!("{}", table::endpoints_table(&catalog::endpoints()));
        }

        Command::Fields {
            endpoint,
            search,
            category,
            csv,
        } => {
            require_endpoint(endpoint)?;
            let fields: Vec<_> = catalog::fields(endpoint)
                .into_iter()
                .filter(|f| search.as_deref().is_none_or(|term| f.matches(term)))
                .filter(|f| {
                    category.as_deref().is_none_or(|c| {
                        f.category.as_deref().is_some_and(|fc| fc.eq_ignore_ascii_case(c))
                    })
                })
                .collect();
            if *csv {
                print!("{}", table::fields_csv(&fields)?);
            } else {
                println!("{}", table::fields_table(&fields, &catalog::required_fields(endpoint)));
            }
        }

        Command::Filters { endpoint } => {
            require_endpoint(endpoint)?;
            println!("{}", table::filters_table(endpoint, &catalog::filters(endpoint)));
        }

        Command::Configs { action } => configs(action, &mut store, &args, &config, painter)?,

        Command::Render {
            id,
            languages,
            show_secrets,
            copy,
            json,
        } => {
            let saved = store.load(id)?;
            let mut state = new_state(&args, &config);
            state.apply(&saved);

            let options = RenderOptions {
                languages: if languages.is_empty() {
                    Language::ALL.to_vec()
                } else {
                    languages.clone()
                },
                reveal_secrets: *show_secrets,
            };
            let rendered = render(&state, &options);

            if *json {
                println!("{}", serde_json::to_string_pretty(&rendered)?);
            } else {
                print!("{}", format_review(&rendered, state.effective_direction(), painter));
            }

            if let Some(path) = copy {
                let mut clipboard = FileClipboard::new(path);
                if clipboard.copy(&rendered.copy_payload) {
                    eprintln!("{}", painter.success(&format!("Copied request to {}", path.display())));
                } else {
                    return Err(HrbridgeError::Argument(format!(
                        "could not copy request to {}",
                        path.display()
                    )));
                }
            }
        }

        Command::Test {
            id,
            seed,
            delay_ms,
            connection,
            discover,
        } => {
            let mut saved = store.load(id)?;
            let mut state = new_state(&args, &config);
            state.apply(&saved);

            let mut simulation = config.simulation.clone();
            if let Some(seed) = seed {
                simulation = simulation.with_seed(*seed);
            }
            if let Some(delay) = delay_ms {
                simulation = simulation.with_delay(*delay);
            }
            let runner = TestRunner::new(simulation);

            if *connection {
                let outcome = runner.test_connection(state.external_system(), *discover).await?;
                println!("{}", painter.success(&outcome.message));
                if let Some(fields) = outcome.discovered {
                    println!("{}", table::fields_table(&fields, &[]));
                    state.apply_discovered_fields(fields);
                    saved.external_fields = state.external_fields().clone();
                    store.save(saved)?;
                }
                return Ok(ExitStatus::Success);
            }

            let response = runner.run_request(&state).await?;
            print_response(&response, painter);
            return Ok(ExitStatus::from_simulated_status(response.status));
        }

        Command::ImportFields { file, into } => {
            let raw = std::fs::read(file)?;
            let report = match into {
                Some(id) => {
                    let mut saved = store.load(id)?;
                    let report = import_into(&mut saved.external_fields, &raw)?;
                    if !report.imported.is_empty() {
                        store.save(saved)?;
                    }
                    report
                }
                None => import_fields(&raw, &ExternalFields::new())?,
            };
            print_import_report(&report, painter);
        }

        Command::Wizard { from } => {
            if !env.is_interactive() {
                return Err(HrbridgeError::Argument(
                    "the wizard needs an interactive terminal".to_string(),
                ));
            }
            let mut state = new_state(&args, &config);
            if let Some(id) = from {
                state.apply(&store.load(id)?);
            }
            let runner = TestRunner::new(config.simulation.clone());
            interactive::run_wizard(state, &mut store, &runner, painter).await?;
        }

        Command::Completions { shell } => generate_completions(*shell),
    }

    Ok(ExitStatus::Success)
}

fn configs(
    action: &ConfigsCommand,
    store: &mut FileStore,
    args: &Args,
    config: &Config,
    painter: Painter,
) -> Result<()> {
    match action {
        ConfigsCommand::List => {
            println!("{}", table::configs_table(&store.list()?));
        }
        ConfigsCommand::Show { id, json } => {
            let saved = store.load(id)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&redacted(&saved))?);
            } else {
                let mut state = new_state(args, config);
                state.apply(&saved);
                let rendered = render(
                    &state,
                    &RenderOptions {
                        languages: Vec::new(),
                        reveal_secrets: false,
                    },
                );
                println!("{} {}", painter.label(&saved.name), painter.muted(&format!("[{}]", saved.id)));
                print!("{}", format_review(&rendered, state.effective_direction(), painter));
                if !saved.external_fields.is_empty() {
                    println!("\n{}", painter.label("External Fields"));
                    println!("{}", table::fields_table(saved.external_fields.as_slice(), &[]));
                }
            }
        }
        ConfigsCommand::Export { id, path } => {
            let saved = store.load(id)?;
            export_configuration(&saved, path)?;
            println!("{}", painter.success(&format!("Exported '{}' to {}", saved.name, path.display())));
        }
        ConfigsCommand::Import { path } => {
            let saved = import_configuration(store, path)?;
            println!("{}", painter.success(&format!("Imported '{}' as {}", saved.name, saved.id)));
        }
        ConfigsCommand::Delete { id } => {
            let removed = store.delete(id)?;
            println!("{}", painter.success(&format!("Deleted '{}'", removed.name)));
        }
    }
    Ok(())
}

fn require_endpoint(endpoint: &str) -> Result<()> {
    if catalog::is_known_endpoint(endpoint) {
        Ok(())
    } else {
        Err(HrbridgeError::Argument(format!(
            "unknown endpoint '{}' (see `hrbridge endpoints`)",
            endpoint
        )))
    }
}

/// Display copy of a saved configuration with external credentials masked
fn redacted(saved: &SavedConfiguration) -> SavedConfiguration {
    let mut copy = saved.clone();
    copy.external_system.auth = saved.external_system.auth.redacted();
    copy
}

pub fn print_response(response: &SimulatedResponse, painter: Painter) {
    println!(
        "{}  {}",
        painter.status(response.status),
        painter.latency(response.time_ms)
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&response.body).unwrap_or_default()
    );
}

pub fn print_import_report(report: &ImportReport, painter: Painter) {
    if report.imported.is_empty() {
        println!("{}", painter.warning(&report.to_string()));
    } else {
        println!("{}", painter.success(&report.to_string()));
        println!("{}", table::fields_table(&report.imported, &[]));
    }
}

fn generate_completions(shell: Shell) {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as ClapShell};

    let mut cmd = Args::command();
    let shell = match shell {
        Shell::Bash => ClapShell::Bash,
        Shell::Zsh => ClapShell::Zsh,
        Shell::Fish => ClapShell::Fish,
        Shell::PowerShell => ClapShell::PowerShell,
        Shell::Elvish => ClapShell::Elvish,
    };

    generate(shell, &mut cmd, "hrbridge", &mut std::io::stdout());
}
