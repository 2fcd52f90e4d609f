//! Terminal front end for the cultural-group schedules.
//!
//! # Responsibility
//! - Resolve configuration from the environment and command-line overrides.
//! - Open the schedule store and dispatch one command against it.
//! - Show generic Spanish messages to the user; details go to the log.

mod cli;
mod render;

use cli::{Args, Command};
use horarios_core::db::{open_db, DbError};
use horarios_core::logging::{normalize_level, normalize_log_dir};
use horarios_core::service::browse_service::LOAD_ERROR_MESSAGE;
use horarios_core::view::parse_group_route;
use horarios_core::{
    init_logging, AdminError, AdminService, AppConfig, BrowseService, ConfigError, ScheduleDraft,
    SqliteScheduleStore, StoreError, SubmitOutcome, ValidationRules, ViewError, ViewState,
    WeekSchedule,
};
use log::{error, info};
use serde_json::Value;
use std::convert::Infallible;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::process::ExitCode;

#[derive(Debug)]
enum CliError {
    Config(ConfigError),
    Logging(String),
    Db(DbError),
    UnknownRoute(String),
    Render(serde_json::Error),
    Unavailable(String),
    Load(StoreError),
    View(ViewError),
    Admin(AdminError),
}

impl CliError {
    fn user_message(&self) -> String {
        match self {
            Self::Load(_) => LOAD_ERROR_MESSAGE.to_string(),
            Self::Unavailable(message) => message.clone(),
            Self::View(err) => err.user_message().to_string(),
            Self::Admin(err) => err.user_message(),
            other => other.to_string(),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Logging(message) => write!(f, "logging init failed: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UnknownRoute(path) => write!(f, "not a group route: `{path}`"),
            Self::Render(err) => write!(f, "failed to render JSON: {err}"),
            Self::Unavailable(message) => write!(f, "{message}"),
            Self::Load(err) => write!(f, "{err}"),
            Self::View(err) => write!(f, "{err}"),
            Self::Admin(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Render(err) => Some(err),
            Self::Load(err) => Some(err),
            Self::View(err) => Some(err),
            Self::Admin(err) => Some(err),
            Self::Logging(_) | Self::UnknownRoute(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::Load(value)
    }
}

impl From<ViewError> for CliError {
    fn from(value: ViewError) -> Self {
        Self::View(value)
    }
}

impl From<AdminError> for CliError {
    fn from(value: AdminError) -> Self {
        Self::Admin(value)
    }
}

fn main() -> ExitCode {
    let args = match cli::parse(std::env::args().skip(1).collect()) {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}\n");
            eprintln!("{}", cli::usage());
            return ExitCode::FAILURE;
        }
    };

    if args.command == Command::Help {
        println!("{}", cli::usage());
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err}");
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

/// Applies command-line overrides on top of the environment settings.
fn resolve_config(args: &Args, mut config: AppConfig) -> Result<AppConfig, CliError> {
    if let Some(path) = &args.db_path {
        config.db_path.clone_from(path);
    }
    if let Some(level) = &args.log_level {
        config.log_level = normalize_level(level).map_err(CliError::Logging)?;
    }
    if let Some(dir) = &args.log_dir {
        config.log_dir = Some(normalize_log_dir(dir).map_err(CliError::Logging)?);
    }
    Ok(config)
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = resolve_config(args, AppConfig::from_env()?)?;
    if let Some(dir) = &config.log_dir {
        init_logging(config.log_level, &dir.to_string_lossy()).map_err(CliError::Logging)?;
    }

    let conn = open_db(&config.db_path)?;
    let store = SqliteScheduleStore::try_new(&conn)?;
    info!(
        "event=cli_command module=cli status=start db={}",
        config.db_path.display()
    );

    match &args.command {
        Command::Help => Ok(()),
        Command::Groups => {
            let groups = BrowseService::new(&store).catalog().groups();
            if args.json {
                print_json(&render::groups_json(groups))
            } else {
                print!("{}", render::groups(groups));
                Ok(())
            }
        }
        Command::Preview(group_name) => {
            let week = BrowseService::new(&store).group_preview(group_name);
            if args.json {
                return print_json(&render::week_json(&week));
            }
            let state = ViewState::resolve(
                Ok::<_, Infallible>(week),
                WeekSchedule::is_empty,
                LOAD_ERROR_MESSAGE,
            );
            print_panel(&state, render::NO_GROUP_SCHEDULES, |week| {
                render::week(week, false)
            })
        }
        Command::Group(target) => {
            let group_name = if target.starts_with('/') {
                parse_group_route(target).ok_or_else(|| CliError::UnknownRoute(target.clone()))?
            } else {
                target.clone()
            };
            let page = BrowseService::new(&store).group_page(&group_name)?;
            if args.json {
                print_json(&render::group_page_json(&page))
            } else {
                print!("{}", render::group_page(&page));
                Ok(())
            }
        }
        Command::AdminList => {
            let loaded = admin(&store, &config, args).registered_by_group();
            if args.json {
                return print_json(&render::buckets_json(&loaded?));
            }
            let state = ViewState::resolve(loaded, Vec::is_empty, LOAD_ERROR_MESSAGE);
            print_panel(&state, render::NO_SCHEDULES, |buckets| render::buckets(buckets))
        }
        Command::AdminCalendar => {
            let loaded = admin(&store, &config, args).weekly_calendar();
            if args.json {
                return print_json(&render::week_json(&loaded?));
            }
            let state = ViewState::resolve(loaded, WeekSchedule::is_empty, LOAD_ERROR_MESSAGE);
            print_panel(&state, render::NO_SCHEDULES, |week| render::week(week, true))
        }
        Command::AdminAdd(form) => {
            let mut draft = ScheduleDraft::default();
            form.apply_to(&mut draft);
            let outcome = admin(&store, &config, args).submit(&draft, None)?;
            report(outcome);
            Ok(())
        }
        Command::AdminEdit(id, form) => {
            let service = admin(&store, &config, args);
            let mut draft = service
                .edit_draft(*id)
                .map_err(|err| CliError::Admin(err.into()))?;
            form.apply_to(&mut draft);
            let outcome = service.submit(&draft, Some(*id))?;
            report(outcome);
            Ok(())
        }
        Command::AdminDelete(id) => {
            admin(&store, &config, args)
                .delete(*id)
                .map_err(|err| CliError::Admin(err.into()))?;
            println!("Horario eliminado: {id}");
            Ok(())
        }
    }
}

// Console writes check catalog membership unless `--lenient` is given.
fn validation_rules(args: &Args, config: &AppConfig) -> ValidationRules {
    if args.lenient {
        config.validation_rules()
    } else {
        ValidationRules::strict()
    }
}

fn admin<'s, 'conn>(
    store: &'s SqliteScheduleStore<'conn>,
    config: &AppConfig,
    args: &Args,
) -> AdminService<'static, &'s SqliteScheduleStore<'conn>> {
    AdminService::new(store).with_rules(validation_rules(args, config))
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let out = serde_json::to_string_pretty(value).map_err(CliError::Render)?;
    println!("{out}");
    Ok(())
}

fn print_panel<T>(
    state: &ViewState<T>,
    empty: &str,
    ready: impl FnOnce(&T) -> String,
) -> Result<(), CliError> {
    let text = render::panel(state, empty, ready).map_err(CliError::Unavailable)?;
    print!("{text}");
    Ok(())
}

fn report(outcome: SubmitOutcome) {
    match outcome {
        SubmitOutcome::Created(id) => println!("Horario creado: {id}"),
        SubmitOutcome::Updated(id) => println!("Horario actualizado: {id}"),
    }
}
