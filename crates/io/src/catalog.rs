// Tracking catalog: one fixed-width record per line

/// Split decoded catalog text into record lines.
///
/// Line terminators are stripped, the first `header_lines` lines skipped and
/// blank lines dropped. Trailing spaces stay: they are part of the columns.
pub fn catalog_lines(text: &str, header_lines: usize) -> Vec<String> {
    text.lines()
        .skip(header_lines)
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}
