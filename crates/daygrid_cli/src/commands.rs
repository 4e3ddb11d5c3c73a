use crate::render;
use anyhow::{bail, Result};
use chrono::NaiveDate;
use daygrid_core::{CalendarService, EventDraft, SnapshotStore, YearMonth};
use std::path::Path;

pub fn add<S: SnapshotStore>(
    service: &mut CalendarService<S>,
    date: NaiveDate,
    draft: EventDraft,
) -> Result<()> {
    service.add(date, &draft)?;
    let index = service.events_on(date).len() - 1;
    println!("Added event #{index} on {date}.");
    Ok(())
}

/// Edits the event at `index`, starting from its current values.
///
/// A missing event starts from an empty draft so the core reports `NotFound`.
pub fn edit<S, F>(
    service: &mut CalendarService<S>,
    date: NaiveDate,
    index: usize,
    changes: F,
) -> Result<()>
where
    S: SnapshotStore,
    F: FnOnce(EventDraft) -> EventDraft,
{
    let current = service
        .events_on(date)
        .get(index)
        .map(|record| EventDraft::from_record(record))
        .unwrap_or_default();
    service.edit(date, index, &changes(current))?;
    println!("Updated event #{index} on {date}.");
    Ok(())
}

pub fn delete<S: SnapshotStore>(
    service: &mut CalendarService<S>,
    date: NaiveDate,
    index: usize,
) -> Result<()> {
    let removed = service.delete(date, index)?;
    println!("Deleted \"{}\" from {date}.", removed.name);
    Ok(())
}

pub fn day<S: SnapshotStore>(service: &CalendarService<S>, date: NaiveDate) -> Result<()> {
    let events = service.events_on(date);
    if events.is_empty() {
        println!("No events on {date}.");
        return Ok(());
    }
    for (index, event) in events.iter().enumerate() {
        println!("{}", render::indexed_line(index, event));
    }
    Ok(())
}

pub fn search<S: SnapshotStore>(service: &CalendarService<S>, term: &str) -> Result<()> {
    let matches = service.search(term);
    if matches.is_empty() {
        println!("No matching events.");
        return Ok(());
    }
    for event in matches {
        println!("{}", render::dated_line(event));
    }
    Ok(())
}

pub fn export<S: SnapshotStore>(
    service: &CalendarService<S>,
    dir: &Path,
    year: i32,
    month: u32,
) -> Result<()> {
    if YearMonth::new(year, month).is_none() {
        bail!("invalid month {month}; expected 1-12");
    }
    let count = service.export_month(year, month).len();
    let path = service.write_month_export(dir, year, month)?;
    println!("Exported {count} event(s) to {}.", path.display());
    Ok(())
}

pub fn select<S: SnapshotStore>(
    service: &mut CalendarService<S>,
    date: Option<NaiveDate>,
    clear: bool,
) -> Result<()> {
    if clear {
        service.select_day(None);
        println!("Selection cleared.");
        return Ok(());
    }
    match date {
        Some(day) => {
            service.select_day(Some(day));
            println!("Selected {day}.");
        }
        None => match service.selected_day() {
            Some(day) => println!("{day}"),
            None => println!("No day selected."),
        },
    }
    Ok(())
}
