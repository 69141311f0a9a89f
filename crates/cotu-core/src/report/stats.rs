//! Per-insurer record statistics.

use std::collections::HashMap;

use crate::models::record::FacturaRecord;

/// Bucket label for records without an insurer folder.
const NO_INSURER: &str = "SIN ASEGURADORA";

/// Render the per-insurer summary block.
///
/// One line per insurer with its record count and percentage of the
/// total (one decimal place), descending by count; records with an empty
/// insurer fall under `SIN ASEGURADORA`.
pub fn summarize(records: &[FacturaRecord]) -> String {
    let total = records.len();
    if total == 0 {
        return "No hay registros.".to_string();
    }

    let mut counts: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let insurer = if record.insurer.is_empty() {
            NO_INSURER
        } else {
            record.insurer.as_str()
        };
        match index.get(insurer) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(insurer, counts.len());
                counts.push((insurer, 1));
            }
        }
    }
    // Stable sort keeps first-appearance order between equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let mut lines = vec![format!("Total Facturas: {total}"), "-".repeat(20)];
    for (insurer, count) in counts {
        let pct = (count as f64 / total as f64) * 100.0;
        lines.push(format!("{insurer}: {count} ({pct:.1}%)"));
    }
    lines.join("\n")
}
