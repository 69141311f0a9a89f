//! Invoice record types and report granularities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One detected invoice folder.
///
/// Every record comes from exactly one folder in the scanned tree. Raw
/// folder names are kept as-is; the calendar date is inferred on demand by
/// [`crate::dates::parse_folder_date`] and never stored on the record.
/// The serde names are the exact column headers of the exported reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacturaRecord {
    /// Year token, usually a folder name like `2025`.
    #[serde(rename = "AÑO")]
    pub year: String,

    /// Raw month folder name, e.g. `12-DICIEMBRE` or `DICIEMBRE`.
    #[serde(rename = "MES")]
    pub month: String,

    /// Raw day folder name, e.g. `23 DE DICIEMBRE`.
    #[serde(rename = "FECHA DE LA FACTURA")]
    pub day_folder: String,

    /// First whitespace token of the invoice folder name, e.g. `COTU74335`.
    #[serde(rename = "N° FACTURA")]
    pub invoice_id: String,

    /// Remaining tokens of the invoice folder name, space-joined.
    #[serde(rename = "DETALLE COMPLETO")]
    pub detail: String,

    /// Name of the folder one level above the invoice folder.
    #[serde(rename = "COMPAÑÍA")]
    pub insurer: String,
}

impl FacturaRecord {
    /// Project to the condensed three-column form.
    pub fn condensed(&self) -> CondensedRecord {
        CondensedRecord {
            date: self.day_folder.clone(),
            invoice_id: self.invoice_id.clone(),
            insurer: self.insurer.clone(),
        }
    }
}

/// Condensed export projection: date, invoice id, insurer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CondensedRecord {
    #[serde(rename = "FECHA")]
    pub date: String,

    #[serde(rename = "COTU")]
    pub invoice_id: String,

    #[serde(rename = "ASEGURADORA")]
    pub insurer: String,
}

/// Report granularity selecting the date-range filtering rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportType {
    /// Whole year: no post-hoc date filtering.
    Year,
    /// Calendar month range.
    Month,
    /// Week range.
    Week,
    /// Single day.
    Day,
}

impl ReportType {
    /// Spanish display label, as shown in reports and history entries.
    pub fn label(&self) -> &'static str {
        match self {
            ReportType::Year => "Año",
            ReportType::Month => "Mes",
            ReportType::Week => "Semana",
            ReportType::Day => "Día",
        }
    }

    /// Accent-free lowercase slug used in output file names.
    pub fn slug(&self) -> &'static str {
        match self {
            ReportType::Year => "anio",
            ReportType::Month => "mes",
            ReportType::Week => "semana",
            ReportType::Day => "dia",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for an unrecognized report type spelling.
#[derive(Debug, Clone, Error)]
#[error("unknown report type: {0}")]
pub struct ParseReportTypeError(String);

impl FromStr for ReportType {
    type Err = ParseReportTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "year" | "anio" | "año" => Ok(ReportType::Year),
            "month" | "mes" => Ok(ReportType::Month),
            "week" | "semana" => Ok(ReportType::Week),
            "day" | "dia" | "día" => Ok(ReportType::Day),
            other => Err(ParseReportTypeError(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_report_type_from_str() {
        assert_eq!("year".parse::<ReportType>().unwrap(), ReportType::Year);
        assert_eq!("Mes".parse::<ReportType>().unwrap(), ReportType::Month);
        assert_eq!("semana".parse::<ReportType>().unwrap(), ReportType::Week);
        assert_eq!("día".parse::<ReportType>().unwrap(), ReportType::Day);
        assert_eq!("dia".parse::<ReportType>().unwrap(), ReportType::Day);
        assert!("quincena".parse::<ReportType>().is_err());
    }

    #[test]
    fn test_record_serializes_to_report_columns() {
        let record = FacturaRecord {
            year: "2025".into(),
            month: "12-DICIEMBRE".into(),
            day_folder: "23 DE DICIEMBRE".into(),
            invoice_id: "COTU74335".into(),
            detail: "RENOVACION".into(),
            insurer: "SOLIDARIA".into(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["AÑO"], "2025");
        assert_eq!(json["N° FACTURA"], "COTU74335");
        assert_eq!(json["COMPAÑÍA"], "SOLIDARIA");
        assert_eq!(json["FECHA DE LA FACTURA"], "23 DE DICIEMBRE");
    }

    #[test]
    fn test_condensed_projection() {
        let record = FacturaRecord {
            year: "2025".into(),
            month: "DICIEMBRE".into(),
            day_folder: "13 DE DICIEMBRE".into(),
            invoice_id: "COTU12345".into(),
            detail: String::new(),
            insurer: "AURORA".into(),
        };
        let condensed = record.condensed();
        assert_eq!(condensed.date, "13 DE DICIEMBRE");
        assert_eq!(condensed.invoice_id, "COTU12345");
        assert_eq!(condensed.insurer, "AURORA");
    }
}
