//! Line-level helpers over a raw response preamble.

/// Split raw header bytes into lines, dropping line terminators and blank lines.
pub(crate) fn split_lines(raw: &[u8]) -> impl Iterator<Item = &[u8]> {
    raw.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.is_empty())
}

/// True for `HTTP/<version> <code> ...` lines.
pub(crate) fn is_status_line(line: &str) -> bool {
    line.starts_with("HTTP/")
}

/// Status code of a status line: `HTTP/1.1 407 Proxy Authentication Required` -> 407.
pub(crate) fn status_code(line: &str) -> Option<u32> {
    if !is_status_line(line) {
        return None;
    }
    let code = line.split_whitespace().nth(1)?;
    if code.len() != 3 {
        return None;
    }
    code.parse().ok()
}

/// True when `raw` ends with a complete header block (terminated by a blank
/// line) whose status is 4xx or 5xx. Used to recognise a proxy refusing a
/// CONNECT tunnel, which libcurl reports as a transfer error.
pub(crate) fn ends_with_error_block(raw: &[u8]) -> bool {
    if !(raw.ends_with(b"\r\n\r\n") || raw.ends_with(b"\n\n")) {
        return false;
    }
    let last_status = split_lines(raw)
        .filter_map(|line| std::str::from_utf8(line).ok())
        .filter(|line| is_status_line(line))
        .last();
    matches!(last_status.and_then(status_code), Some(400..=599))
}
