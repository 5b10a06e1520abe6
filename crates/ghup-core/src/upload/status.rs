//! Status line parsing from raw response header lines.

/// Status text (`"<code> <reason>"`) of the final response in `lines`.
///
/// Interim responses (`100 Continue`, redirects) each start with their own
/// status line, so the last one wins. Falls back to the bare code when the
/// server sent no reason phrase (HTTP/2 never does).
pub(crate) fn status_text(lines: &[String], code: u32) -> String {
    let reason = lines
        .iter()
        .map(|l| l.trim())
        .filter(|l| l.starts_with("HTTP/"))
        .last()
        .and_then(|l| {
            let mut parts = l.splitn(3, ' ');
            let _version = parts.next()?;
            let _code = parts.next()?;
            parts.next()
        })
        .map(str::trim)
        .filter(|r| !r.is_empty());

    match reason {
        Some(r) => format!("{} {}", code, r),
        None => code.to_string(),
    }
}
