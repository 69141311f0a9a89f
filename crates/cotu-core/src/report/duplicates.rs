//! Duplicate invoice-number detection.

use std::collections::HashMap;

use crate::models::record::FacturaRecord;

/// Report invoice ids appearing in more than one record.
///
/// Ids are compared trimmed and upper-cased. The empty string and the
/// bare `COTU` prefix are not invoice numbers and never participate.
/// One message per duplicated id, in order of first appearance, listing
/// the occurrence count and the distinct day folders and insurers seen.
pub fn find_duplicates(records: &[FacturaRecord]) -> Vec<String> {
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (i, record) in records.iter().enumerate() {
        let id = record.invoice_id.trim().to_uppercase();
        if id.is_empty() || id == "COTU" {
            continue;
        }
        match index.get(&id) {
            Some(&g) => groups[g].1.push(i),
            None => {
                index.insert(id.clone(), groups.len());
                groups.push((id, vec![i]));
            }
        }
    }

    groups
        .iter()
        .filter(|(_, indices)| indices.len() > 1)
        .map(|(id, indices)| {
            let dates = distinct(indices.iter().map(|&i| records[i].day_folder.as_str()));
            let insurers = distinct(indices.iter().map(|&i| records[i].insurer.as_str()));
            format!(
                "Factura {} aparece {} veces (Fechas: {} - Cia: {})",
                id,
                indices.len(),
                dates.join(", "),
                insurers.join(", ")
            )
        })
        .collect()
}

/// Distinct values in first-seen order.
fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
