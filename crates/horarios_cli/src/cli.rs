//! Command-line parsing.

use getopts::{Matches, Options};
use horarios_core::model::validation::{SUB_GROUP_NONE, SUB_GROUP_OPTIONS};
use horarios_core::{ScheduleDraft, ScheduleId, Weekday};
use std::path::PathBuf;

pub struct Args {
    pub db_path: Option<PathBuf>,
    pub log_level: Option<String>,
    pub log_dir: Option<String>,
    pub json: bool,
    pub lenient: bool,
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Groups,
    Preview(String),
    Group(String),
    AdminList,
    AdminCalendar,
    AdminAdd(FormInput),
    AdminEdit(ScheduleId, FormInput),
    AdminDelete(ScheduleId),
}

/// Form fields given on the command line. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub group: Option<String>,
    pub day: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub place: Option<String>,
    pub sub_group: Option<String>,
}

impl FormInput {
    fn from_matches(matches: &Matches) -> Result<Self, String> {
        let sub_group = matches
            .opt_str("sub-group")
            .map(|value| parse_sub_group(&value))
            .transpose()?;
        Ok(Self {
            group: matches.opt_str("group"),
            day: matches.opt_str("day").map(|day| normalize_day(&day)),
            start: matches.opt_str("start"),
            end: matches.opt_str("end"),
            place: matches.opt_str("place"),
            sub_group,
        })
    }

    /// Overwrites the draft fields that were given.
    pub fn apply_to(&self, draft: &mut ScheduleDraft) {
        let pairs = [
            (&self.group, &mut draft.group_name),
            (&self.day, &mut draft.day_of_week),
            (&self.start, &mut draft.start_time),
            (&self.end, &mut draft.end_time),
            (&self.place, &mut draft.lugar),
            (&self.sub_group, &mut draft.sub_group),
        ];
        for (value, field) in pairs {
            if let Some(value) = value {
                field.clone_from(value);
            }
        }
    }
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag("h", "help", "Print this help output");
    opts.optopt(
        "",
        "db",
        "SQLite database file [Default: $HORARIOS_DB_PATH or <tmp>/horarios.sqlite3]",
        "PATH",
    );
    opts.optopt(
        "",
        "log-level",
        "trace|debug|info|warn|error [Default: $HORARIOS_LOG_LEVEL]",
        "LEVEL",
    );
    opts.optopt(
        "",
        "log-dir",
        "Absolute directory for rolling log files [Default: $HORARIOS_LOG_DIR]",
        "DIR",
    );
    opts.optflag("", "json", "Print records as JSON documents");
    opts.optflag(
        "",
        "lenient",
        "Accept group names outside the catalog (follows $HORARIOS_STRICT_GROUPS)",
    );
    opts.optopt("g", "group", "Cultural group name", "NAME");
    opts.optopt("d", "day", "Weekday, English or Spanish (Monday, Lunes)", "DAY");
    opts.optopt("s", "start", "Start time", "HH:MM");
    opts.optopt("e", "end", "End time", "HH:MM");
    opts.optopt("p", "place", "Meeting place", "PLACE");
    opts.optopt("", "sub-group", &sub_group_choices(), "KIND");
    opts
}

pub fn usage() -> String {
    let brief = format!(
        "Usage: {name} [options] <command>\n\n\
         Commands:\n    \
         groups                 List cultural groups\n    \
         preview <GROUP>        Weekly preview of one group\n    \
         group <GROUP|ROUTE>    Group detail page (/group/<encoded name> accepted)\n    \
         admin list             Registered schedules by group\n    \
         admin calendar         Weekly calendar of all schedules\n    \
         admin add              Create a schedule from --group --day --start --end --place\n    \
         admin edit <ID>        Overwrite the given fields of a schedule\n    \
         admin delete <ID>      Delete a schedule",
        name = env!("CARGO_BIN_NAME")
    );
    opts().usage(&brief)
}

pub fn parse(args: Vec<String>) -> Result<Args, String> {
    let matches = opts().parse(args).map_err(|fail| fail.to_string())?;

    let command = if matches.opt_present("help") {
        Command::Help
    } else {
        parse_command(&matches)?
    };

    Ok(Args {
        db_path: matches.opt_str("db").map(PathBuf::from),
        log_level: matches.opt_str("log-level"),
        log_dir: matches.opt_str("log-dir"),
        json: matches.opt_present("json"),
        lenient: matches.opt_present("lenient"),
        command,
    })
}

fn parse_command(matches: &Matches) -> Result<Command, String> {
    let free: Vec<&str> = matches.free.iter().map(String::as_str).collect();
    match free.as_slice() {
        [] => Err("missing command".to_string()),
        ["groups"] => Ok(Command::Groups),
        ["preview", rest @ ..] => group_argument(rest).map(Command::Preview),
        ["group", rest @ ..] => group_argument(rest).map(Command::Group),
        ["admin", "list"] => Ok(Command::AdminList),
        ["admin", "calendar"] => Ok(Command::AdminCalendar),
        ["admin", "add"] => FormInput::from_matches(matches).map(Command::AdminAdd),
        ["admin", "edit", id] => Ok(Command::AdminEdit(
            parse_id(id)?,
            FormInput::from_matches(matches)?,
        )),
        ["admin", "delete", id] => parse_id(id).map(Command::AdminDelete),
        ["admin", ..] => Err("usage: admin list|calendar|add|edit <ID>|delete <ID>".to_string()),
        [other, ..] => Err(format!("unknown command `{other}`")),
    }
}

fn parse_id(text: &str) -> Result<ScheduleId, String> {
    text.trim()
        .parse::<ScheduleId>()
        .map_err(|err| format!("invalid schedule id `{text}`: {err}"))
}

// Unquoted multi-word names arrive as separate words.
fn group_argument(words: &[&str]) -> Result<String, String> {
    let joined = words.join(" ");
    let trimmed = joined.trim();
    if trimmed.is_empty() {
        return Err("missing group name".to_string());
    }
    Ok(trimmed.to_string())
}

fn sub_group_choices() -> String {
    std::iter::once(SUB_GROUP_NONE)
        .chain(SUB_GROUP_OPTIONS)
        .collect::<Vec<_>>()
        .join("|")
}

// Mirrors the console picker: only the listed options or `none`.
fn parse_sub_group(value: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed == SUB_GROUP_NONE || SUB_GROUP_OPTIONS.contains(&trimmed) {
        return Ok(trimmed.to_string());
    }
    Err(format!(
        "invalid sub-group `{value}`; expected {}",
        sub_group_choices()
    ))
}

fn normalize_day(input: &str) -> String {
    let trimmed = input.trim();
    Weekday::ALL
        .iter()
        .find(|day| {
            day.as_str().eq_ignore_ascii_case(trimmed)
                || day.spanish_label().to_lowercase() == trimmed.to_lowercase()
        })
        .map_or_else(|| trimmed.to_string(), |day| day.as_str().to_string())
}
