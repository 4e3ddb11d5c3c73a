use daygrid_core::EventRecord;

/// `#0  09:00-09:30  [Work]  Standup (notes)`
pub fn indexed_line(index: usize, event: &EventRecord) -> String {
    format!("#{index}  {}", summary(event))
}

/// `2024-03-05  09:00-09:30  [Work]  Standup (notes)`
pub fn dated_line(event: &EventRecord) -> String {
    format!("{}  {}", event.date, summary(event))
}

fn summary(event: &EventRecord) -> String {
    let mut line = format!("{}  [{}]  {}", event.range, event.category, event.name);
    if let Some(description) = &event.description {
        line.push_str(&format!(" ({description})"));
    }
    line
}
