//! Post-hoc record filtering per report granularity.

use tracing::debug;

use crate::dates::{parse_folder_date, parse_report_date};
use crate::models::record::{FacturaRecord, ReportType};

/// Filter records by their inferred date for the given report granularity.
///
/// `Year` returns the records unchanged. Any other granularity re-infers
/// the date from each record's folder names and drops records whose date
/// does not parse — the extractor's range pre-filter keeps those instead —
/// then applies the `DD/MM/YYYY` bounds, both inclusive (`date_to` covers
/// its whole day). A bound that fails to parse is ignored. Surviving
/// records keep their discovery order.
pub fn filter_by_type(
    records: Vec<FacturaRecord>,
    report_type: ReportType,
    date_from: Option<&str>,
    date_to: Option<&str>,
) -> Vec<FacturaRecord> {
    if report_type == ReportType::Year {
        return records;
    }

    let from = date_from.and_then(parse_report_date);
    let to = date_to.and_then(parse_report_date);

    let before = records.len();
    let kept: Vec<FacturaRecord> = records
        .into_iter()
        .filter(|record| {
            let Some(date) = parse_folder_date(&record.day_folder, &record.month, &record.year)
            else {
                return false;
            };
            if from.is_some_and(|f| date < f) {
                return false;
            }
            if to.is_some_and(|t| date > t) {
                return false;
            }
            true
        })
        .collect();

    debug!(before, after = kept.len(), "filtered records by date range");
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(day_folder: &str, invoice_id: &str) -> FacturaRecord {
        FacturaRecord {
            year: "2025".into(),
            month: "DICIEMBRE".into(),
            day_folder: day_folder.into(),
            invoice_id: invoice_id.into(),
            detail: String::new(),
            insurer: "SOLIDARIA".into(),
        }
    }

    #[test]
    fn test_year_is_identity() {
        let records = vec![record("23 DE DICIEMBRE", "COTU1"), record("???", "COTU2")];
        let out = filter_by_type(records.clone(), ReportType::Year, None, None);
        assert_eq!(out, records);
    }

    #[test]
    fn test_range_keeps_only_inner_dates() {
        let records = vec![
            record("20 DE DICIEMBRE", "COTU1"),
            record("25 DE DICIEMBRE", "COTU2"),
            record("30 DE DICIEMBRE", "COTU3"),
        ];
        let out = filter_by_type(
            records,
            ReportType::Month,
            Some("21/12/2025"),
            Some("28/12/2025"),
        );
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].day_folder, "25 DE DICIEMBRE");
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let records = vec![
            record("20 DE DICIEMBRE", "COTU1"),
            record("28 DE DICIEMBRE", "COTU2"),
        ];
        let out = filter_by_type(
            records,
            ReportType::Week,
            Some("20/12/2025"),
            Some("28/12/2025"),
        );
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn test_unparseable_dates_are_dropped() {
        let records = vec![record("SIN FECHA", "COTU1"), record("25 DE DICIEMBRE", "COTU2")];
        let out = filter_by_type(records, ReportType::Month, None, None);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].invoice_id, "COTU2");
    }

    #[test]
    fn test_day_report_lower_bound_only() {
        // Day reports supply only the start date
        let records = vec![
            record("20 DE DICIEMBRE", "COTU1"),
            record("25 DE DICIEMBRE", "COTU2"),
        ];
        let out = filter_by_type(records, ReportType::Day, Some("25/12/2025"), None);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].invoice_id, "COTU2");
    }

    #[test]
    fn test_empty_input() {
        let out = filter_by_type(vec![], ReportType::Month, Some("01/12/2025"), Some("31/12/2025"));
        assert_eq!(out, vec![]);
    }

    #[test]
    fn test_discovery_order_is_preserved() {
        let records = vec![
            record("30 DE DICIEMBRE", "COTU3"),
            record("20 DE DICIEMBRE", "COTU1"),
            record("25 DE DICIEMBRE", "COTU2"),
        ];
        let out = filter_by_type(records, ReportType::Month, None, None);
        let ids: Vec<&str> = out.iter().map(|r| r.invoice_id.as_str()).collect();
        assert_eq!(ids, vec!["COTU3", "COTU1", "COTU2"]);
    }
}
