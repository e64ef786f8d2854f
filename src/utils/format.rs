//! Display helpers for the timer face

use crate::state::TickRecord;

/// Format remaining seconds as `mm:ss`, with an `h:` prefix above one hour
pub fn format_seconds(secs: u64) -> String {
    let mut out = String::new();
    let mut rest = secs;
    if rest > 3600 {
        out.push_str(&format!("{}:", rest / 3600));
        rest %= 3600;
    }
    out.push_str(&format!("{:02}:{:02}", rest / 60, rest % 60));
    out
}

/// Grey level of the timer face, darkening as the phase progresses
pub fn shade(progress: f64) -> u8 {
    lerp(230.0, 190.0, progress.clamp(0.0, 1.0)).round() as u8
}

/// "Next: <label>" hint, empty when nothing follows
pub fn next_hint(next: Option<&TickRecord>) -> String {
    next.map(|n| format!("Next: {}", n.label)).unwrap_or_default()
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_seconds(0), "00:00");
        assert_eq!(format_seconds(5), "00:05");
        assert_eq!(format_seconds(75), "01:15");
    }

    #[test]
    fn hours_only_shown_above_one_hour() {
        assert_eq!(format_seconds(3600), "60:00");
        assert_eq!(format_seconds(3601), "1:00:01");
        assert_eq!(format_seconds(7325), "2:02:05");
    }

    #[test]
    fn shade_interpolates_between_light_and_dark() {
        assert_eq!(shade(0.0), 230);
        assert_eq!(shade(0.5), 210);
        assert_eq!(shade(1.0), 190);
        assert_eq!(shade(3.0), 190);
    }

    #[test]
    fn empty_hint_without_next() {
        assert_eq!(next_hint(None), "");
    }
}
