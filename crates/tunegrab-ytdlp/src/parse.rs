//! Parsing of yt-dlp console output.
//!
//! With `--newline` every progress report is a line of the form
//! `[download]  42.3% of 3.45MiB at 1.2MiB/s ETA 00:02`. Nothing else on
//! stdout matters except the `Destination:` lines, which are logged.

const DOWNLOAD_TAG: &str = "[download]";
const DESTINATION_MARKER: &str = "Destination:";
const ERROR_PREFIX: &str = "ERROR:";

/// Extract the percentage from a `[download]` progress line.
///
/// Returns `None` for any other line. The value is clamped to `[0, 100]`.
pub fn parse_progress_line(line: &str) -> Option<f32> {
    // A destination path may itself contain a percent sign
    if !line.contains(DOWNLOAD_TAG) || line.contains(DESTINATION_MARKER) {
        return None;
    }

    line.split_whitespace()
        .find_map(|token| token.strip_suffix('%'))
        .and_then(|number| number.parse::<f32>().ok())
        .filter(|percent| percent.is_finite())
        .map(|percent| percent.clamp(0.0, 100.0))
}

/// Extract the file path from a `Destination:` line.
pub fn parse_destination(line: &str) -> Option<&str> {
    line.split(DESTINATION_MARKER)
        .nth(1)
        .map(str::trim)
        .filter(|path| !path.is_empty())
}

/// Pick the line of stderr that best explains a failure.
///
/// Prefers the last `ERROR:` line (without the prefix), otherwise the last
/// non-empty line.
pub fn failure_reason(stderr: &str) -> Option<&str> {
    let mut last = None;
    for line in stderr.lines().map(str::trim).filter(|l| !l.is_empty()) {
        last = Some(line);
    }

    stderr
        .lines()
        .rev()
        .find_map(|line| line.trim().strip_prefix(ERROR_PREFIX))
        .map(str::trim)
        .or(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_line() {
        let line = "[download]  42.3% of 3.45MiB at 1.20MiB/s ETA 00:02";
        assert_eq!(parse_progress_line(line), Some(42.3));
    }

    #[test]
    fn test_progress_line_complete() {
        assert_eq!(
            parse_progress_line("[download] 100% of 3.45MiB in 00:03"),
            Some(100.0)
        );
    }

    #[test]
    fn test_non_progress_lines() {
        assert_eq!(parse_progress_line("[youtube] abc123: Downloading webpage"), None);
        assert_eq!(
            parse_progress_line("[download] Destination: /tmp/song.webm"),
            None
        );
        assert_eq!(parse_progress_line("[ExtractAudio] 50% done"), None);
        assert_eq!(
            parse_progress_line("[download] Destination: /tmp/100% Hits.webm"),
            None
        );
        assert_eq!(parse_progress_line("[download] Unknown% of ~"), None);
    }

    #[test]
    fn test_progress_is_clamped() {
        assert_eq!(parse_progress_line("[download] 120.0% of 1MiB"), Some(100.0));
        assert_eq!(parse_progress_line("[download] -3% of 1MiB"), Some(0.0));
    }

    #[test]
    fn test_destination() {
        assert_eq!(
            parse_destination("[download] Destination: /home/me/Downloads/Song.webm"),
            Some("/home/me/Downloads/Song.webm")
        );
        assert_eq!(
            parse_destination("[ExtractAudio] Destination: /home/me/Downloads/Song.mp3"),
            Some("/home/me/Downloads/Song.mp3")
        );
        assert_eq!(parse_destination("[download] Destination:   "), None);
        assert_eq!(parse_destination("[download]  10.0% of 1MiB"), None);
    }

    #[test]
    fn test_failure_reason_prefers_error_line() {
        let stderr = "WARNING: something odd\nERROR: [youtube] abc: Video unavailable\n\n";
        assert_eq!(failure_reason(stderr), Some("[youtube] abc: Video unavailable"));
    }

    #[test]
    fn test_failure_reason_falls_back_to_last_line() {
        assert_eq!(failure_reason("first\nsecond\n"), Some("second"));
        assert_eq!(failure_reason("  \n"), None);
    }
}
