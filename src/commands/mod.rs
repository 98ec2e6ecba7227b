use crate::components::shift_editor::{
    EditOutcome, EditingSession, ShiftDefaults, ShiftScope, SubjectDay, TimeInterval,
};
use crate::components::shift_store::ShiftStore;
use crate::error::EditorResult;
use crate::utils::time::{format_minutes, format_time, parse_selectable_time, time_options};
use chrono::{NaiveDate, NaiveTime, Weekday};
use clap::{Args, Parser, Subcommand};
use rust_i18n::t;
use std::sync::Arc;
use tracing::debug;

/// Edit employee working hours
#[derive(Debug, Parser)]
#[command(name = "shift-editor", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// The subject-day a command works on
#[derive(Debug, Clone, Args)]
pub struct Target {
    /// Employee id
    #[arg(long, short = 'e')]
    pub employee: String,

    /// Weekday of the regular shift (e.g. `monday`) or date of a one-off
    /// shift (`YYYY-MM-DD`)
    #[arg(long, short = 'd', value_parser = parse_scope)]
    pub day: ShiftScope,
}

impl Target {
    pub fn subject_day(&self) -> SubjectDay {
        SubjectDay {
            subject_id: self.employee.clone(),
            scope: self.day,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the stored shift
    Show(Target),
    /// Append an interval after the last one and save
    Add(Target),
    /// Change the start of an interval and save
    SetStart {
        #[command(flatten)]
        target: Target,
        /// Interval row, starting at 1
        row: usize,
        /// New start, HH:MM on a quarter hour or 23:59
        #[arg(value_parser = parse_selectable_time)]
        time: NaiveTime,
    },
    /// Change the end of an interval and save
    SetEnd {
        #[command(flatten)]
        target: Target,
        /// Interval row, starting at 1
        row: usize,
        /// New end, HH:MM on a quarter hour or 23:59
        #[arg(value_parser = parse_selectable_time)]
        time: NaiveTime,
    },
    /// Delete an interval and save
    Delete {
        #[command(flatten)]
        target: Target,
        /// Interval row, starting at 1
        row: usize,
    },
    /// Delete the whole shift of the day
    Clear(Target),
    /// List the times a shift may start or end at
    Options,
}

impl Command {
    /// Whether the command talks to the shift API
    pub fn needs_store(&self) -> bool {
        !matches!(self, Command::Options)
    }
}

/// Parse a weekday name or a `YYYY-MM-DD` date
pub fn parse_scope(value: &str) -> Result<ShiftScope, String> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(ShiftScope::OneOff(date));
    }

    value
        .parse::<Weekday>()
        .map(ShiftScope::Regular)
        .map_err(|_| format!("'{}' is neither a weekday nor a YYYY-MM-DD date", value))
}

/// Run a command against the store and return the text to show
pub async fn execute(
    command: Command,
    store: Arc<dyn ShiftStore>,
    defaults: ShiftDefaults,
    today: NaiveDate,
) -> EditorResult<String> {
    let (target, edit) = match command {
        Command::Options => return Ok(render_time_options()),
        Command::Show(target) => {
            let session = EditingSession::open(store, target.subject_day(), defaults, today).await?;
            return Ok(render_stored(&session));
        }
        Command::Clear(target) => {
            let mut session =
                EditingSession::open(store, target.subject_day(), defaults, today).await?;
            session.delete_day().await?;
            return Ok(t!("shift_deleted").to_string());
        }
        Command::Add(target) => (target, Edit::Add),
        Command::SetStart { target, row, time } => (target, Edit::Start(row, time)),
        Command::SetEnd { target, row, time } => (target, Edit::End(row, time)),
        Command::Delete { target, row } => (target, Edit::Delete(row)),
    };

    let mut session = EditingSession::open(store, target.subject_day(), defaults, today).await?;
    let outcome = edit.apply(&mut session)?;

    if outcome == EditOutcome::Ignored {
        debug!("Edit did not match an interval, not saving");
        return Ok(format!("{}\n{}", t!("shift_unchanged"), render_working(&session)));
    }

    session.save().await?;
    Ok(format!("{}\n{}", t!("shift_saved"), render_working(&session)))
}

/// One change requested on the command line
enum Edit {
    Add,
    Start(usize, NaiveTime),
    End(usize, NaiveTime),
    Delete(usize),
}

impl Edit {
    fn apply(self, session: &mut EditingSession) -> EditorResult<EditOutcome> {
        let outcome = match self {
            Edit::Add => {
                session.add_interval();
                EditOutcome::Applied
            }
            Edit::Start(row, time) => session.set_interval_start(row_index(row), time)?,
            Edit::End(row, time) => session.set_interval_end(row_index(row), time)?,
            Edit::Delete(row) => session.delete_interval(row_index(row))?,
        };
        Ok(outcome)
    }
}

/// Rows are numbered from 1 for people; row 0 names nothing
fn row_index(row: usize) -> usize {
    row.checked_sub(1).unwrap_or(usize::MAX)
}

/// Every selectable time of day, space separated
pub fn render_time_options() -> String {
    time_options()
        .into_iter()
        .map(format_time)
        .collect::<Vec<_>>()
        .join(" ")
}

/// The shift as last confirmed by the store
pub fn render_stored(session: &EditingSession) -> String {
    if session.baseline().is_empty() {
        return format!("{}\n{}", render_title(session.subject_day()), t!("shift_none"));
    }
    render_working(session)
}

/// The shift as currently edited
pub fn render_working(session: &EditingSession) -> String {
    render_intervals(
        session.subject_day(),
        session.intervals(),
        session.total_minutes(),
    )
}

fn render_intervals(subject_day: &SubjectDay, intervals: &[TimeInterval], total: i64) -> String {
    let mut lines = vec![render_title(subject_day)];

    for (index, interval) in intervals.iter().enumerate() {
        let row = (index + 1).to_string();
        let start = format_time(interval.start.time());
        let end = format_time(interval.end.time());
        lines.push(t!("shift_interval_row", row = row, start = start, end = end).to_string());
    }

    let duration = format_minutes(total);
    lines.push(t!("shift_total", duration = duration).to_string());
    lines.join("\n")
}

fn render_title(subject_day: &SubjectDay) -> String {
    let day = match subject_day.scope {
        ShiftScope::Regular(weekday) => {
            let weekday = weekday_name(weekday);
            t!("day_every", weekday = weekday).to_string()
        }
        ShiftScope::OneOff(date) => date.format("%Y-%m-%d").to_string(),
    };
    let subject = subject_day.subject_id.as_str();
    t!("shift_title", subject = subject, day = day).to_string()
}

fn weekday_name(weekday: Weekday) -> String {
    match weekday {
        Weekday::Mon => t!("day_monday"),
        Weekday::Tue => t!("day_tuesday"),
        Weekday::Wed => t!("day_wednesday"),
        Weekday::Thu => t!("day_thursday"),
        Weekday::Fri => t!("day_friday"),
        Weekday::Sat => t!("day_saturday"),
        Weekday::Sun => t!("day_sunday"),
    }
    .to_string()
}
