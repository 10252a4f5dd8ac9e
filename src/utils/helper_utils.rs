const PREVIEW_CHARS: usize = 60;

/// One-line, bounded rendering of a snippet for log fields.
pub fn preview_code(code: &str) -> String {
    let flat: String = code
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    let flat = flat.trim();
    match flat.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}…", &flat[..cut]),
        None => flat.to_string(),
    }
}
