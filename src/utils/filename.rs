use chrono::{DateTime, SecondsFormat, Utc};

/// `<prefix>-YYYY-MM-DD-HH-MM-SS.xlsx`, built from the ISO-8601 instant cut to
/// whole seconds with `:` and `T` replaced by `-`.
pub fn report_filename(prefix: &str, at: DateTime<Utc>) -> String {
    let iso = at.to_rfc3339_opts(SecondsFormat::Millis, true);
    let stamp: String = iso
        .chars()
        .take(19)
        .map(|c| if c == ':' || c == 'T' { '-' } else { c })
        .collect();
    format!("{prefix}-{stamp}.xlsx")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_replaces_separators() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 4, 7).unwrap();
        assert_eq!(
            report_filename("relatorio_as_cegas", at),
            "relatorio_as_cegas-2024-05-01-09-04-07.xlsx"
        );
    }

    #[test]
    fn sub_second_part_is_dropped() {
        let at = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap()
            + chrono::Duration::milliseconds(999);
        assert_eq!(
            report_filename("relatorio_auditoria_comparacao", at),
            "relatorio_auditoria_comparacao-2025-12-31-23-59-59.xlsx"
        );
    }
}
