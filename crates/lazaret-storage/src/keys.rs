//! Quarantine key scheme for the forensic store.

use chrono::{DateTime, Datelike, Utc};
use uuid::Uuid;

/// Build the forensic-store key for a quarantined object.
///
/// Layout: `quarantine/{year}/{month:02}/{day:02}/{scan_id}/{basename}`.
/// Only the source key's final path segment is kept; its prefix is dropped,
/// so two same-named files from different prefixes are distinguished by
/// scan id alone.
pub fn quarantine_key(scan_id: Uuid, source_key: &str, at: DateTime<Utc>) -> String {
    let basename = source_key.rsplit('/').next().unwrap_or(source_key);
    format!(
        "quarantine/{}/{:02}/{:02}/{}/{}",
        at.year(),
        at.month(),
        at.day(),
        scan_id,
        basename
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 7, 10, 30, 0).single().expect("valid date")
    }

    #[test]
    fn test_key_layout_pads_month_and_day() {
        let scan_id = Uuid::nil();
        let key = quarantine_key(scan_id, "report.pdf", fixed_date());
        assert_eq!(
            key,
            format!("quarantine/2024/03/07/{}/report.pdf", scan_id)
        );
    }

    #[test]
    fn test_key_drops_source_prefix() {
        let scan_id = Uuid::nil();
        let key = quarantine_key(scan_id, "uploads/2024/q1/report.pdf", fixed_date());
        assert_eq!(
            key,
            format!("quarantine/2024/03/07/{}/report.pdf", scan_id)
        );
    }

    #[test]
    fn test_key_is_deterministic() {
        let scan_id = Uuid::new_v4();
        let at = fixed_date();
        assert_eq!(
            quarantine_key(scan_id, "a/b.txt", at),
            quarantine_key(scan_id, "a/b.txt", at)
        );
    }
}
