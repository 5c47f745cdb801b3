fn trailing_number(id: &str) -> Option<u64> {
    let digits_start = id
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit())
        .last()
        .map(|(i, _)| i)?;
    id[digits_start..].parse().ok()
}

/// `max(numeric ids) + 1`. Ids that are not plain numbers are ignored.
pub fn next_numeric_id<'a>(ids: impl IntoIterator<Item = &'a str>) -> String {
    let max = ids
        .into_iter()
        .filter_map(|id| id.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    (max + 1).to_string()
}

/// `<prefix><max trailing number + 1>`, e.g. `store3` after `store1, store2`.
pub fn next_prefixed_id<'a>(prefix: &str, ids: impl IntoIterator<Item = &'a str>) -> String {
    let max = ids.into_iter().filter_map(trailing_number).max().unwrap_or(0);
    format!("{prefix}{}", max + 1)
}

/// `<prefix><millis>`, bumped one millisecond at a time until it is not
/// already taken.
pub fn next_timestamped_id<'a>(
    prefix: &str,
    ids: impl IntoIterator<Item = &'a str>,
    now_millis: i64,
) -> String {
    let taken: Vec<&str> = ids.into_iter().collect();
    let mut millis = now_millis;
    loop {
        let candidate = format!("{prefix}{millis}");
        if !taken.contains(&candidate.as_str()) {
            return candidate;
        }
        millis += 1;
    }
}
