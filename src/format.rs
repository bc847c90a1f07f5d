//! Display helpers for timers and item descriptions

use regex::Regex;
use std::sync::OnceLock;

/// Format a millisecond count as seconds with two decimals and a comma
/// separator, e.g. 14620 -> "14,62"
pub fn format_timer(time_ms: u64) -> String {
    let seconds = time_ms as f64 / 1000.0;
    format!("{seconds:.2}").replace('.', ",")
}

/// Urgency band for the remaining time, used for display coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerZone {
    Safe,
    Caution,
    Warning,
    Danger,
    Critical,
}

pub fn zone_for(time_ms: u64) -> TimerZone {
    let seconds = time_ms as f64 / 1000.0;
    if seconds > 10.0 {
        TimerZone::Safe
    } else if seconds > 7.0 {
        TimerZone::Caution
    } else if seconds > 4.0 {
        TimerZone::Warning
    } else if seconds > 2.0 {
        TimerZone::Danger
    } else {
        TimerZone::Critical
    }
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

/// Strip the markup Data Dragon embeds in item descriptions:
/// `<br>` becomes a newline, other tags are dropped, `&nbsp;` unescaped.
pub fn clean_description(description: &str) -> String {
    let with_breaks = description.replace("<br>", "\n");
    tag_re()
        .replace_all(&with_breaks, "")
        .replace("&nbsp;", " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_comma_separator() {
        assert_eq!(format_timer(14620), "14,62");
        assert_eq!(format_timer(15000), "15,00");
        assert_eq!(format_timer(0), "0,00");
        assert_eq!(format_timer(50), "0,05");
    }

    #[test]
    fn zones_follow_thresholds() {
        assert_eq!(zone_for(15000), TimerZone::Safe);
        assert_eq!(zone_for(8000), TimerZone::Caution);
        assert_eq!(zone_for(5000), TimerZone::Warning);
        assert_eq!(zone_for(3000), TimerZone::Danger);
        assert_eq!(zone_for(2000), TimerZone::Critical);
        assert_eq!(zone_for(0), TimerZone::Critical);
    }

    #[test]
    fn strips_markup() {
        let raw = "<mainText><stats>+70 Attack Damage</stats><br>Critical strikes deal&nbsp;more damage.</mainText>";
        assert_eq!(
            clean_description(raw),
            "+70 Attack Damage\nCritical strikes deal more damage."
        );
    }
}
