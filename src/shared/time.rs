use std::time::Duration;

/// Formats an elapsed duration as `1 h, 2 min, 3 s, 40 ms`, omitting zero parts.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total_millis = elapsed.as_millis();
    let hours = total_millis / 3_600_000;
    let minutes = (total_millis / 60_000) % 60;
    let seconds = (total_millis / 1_000) % 60;
    let millis = total_millis % 1_000;

    let parts: Vec<String> = [(hours, "h"), (minutes, "min"), (seconds, "s"), (millis, "ms")]
        .into_iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| format!("{} {}", value, unit))
        .collect();

    if parts.is_empty() {
        "0 ms".to_string()
    } else {
        parts.join(", ")
    }
}
