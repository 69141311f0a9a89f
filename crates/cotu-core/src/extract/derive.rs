//! Positional derivation of year/month/day/insurer from a folder path.
//!
//! The expected hierarchy is YEAR/MONTH/DAY/INSURER/INVOICE. Derivation is
//! an ordered chain: fixed offsets from the end of the path, then offsets
//! anchored at the scan root's own name, then a minimal fallback that
//! keeps the invoice tagged with the root name only.

/// Year, month, day and insurer folder names for one invoice folder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PathContext {
    pub year: String,
    pub month: String,
    pub day: String,
    pub insurer: String,
}

/// Derive the record context for the invoice folder whose path components
/// are `parts`, scanned from a root folder named `root_name`.
pub(crate) fn derive_context(parts: &[String], root_name: &str) -> PathContext {
    fixed_from_end(parts)
        .or_else(|| anchored_at_root(parts, root_name))
        .unwrap_or_else(|| minimal(root_name))
}

/// Fixed positions from the end of the path: -5 year, -4 month, -3 day,
/// -2 insurer, -1 the invoice folder itself.
fn fixed_from_end(parts: &[String]) -> Option<PathContext> {
    let n = parts.len();
    if n < 5 {
        return None;
    }
    Some(PathContext {
        year: parts[n - 5].clone(),
        month: parts[n - 4].clone(),
        day: parts[n - 3].clone(),
        insurer: parts[n - 2].clone(),
    })
}

/// Offsets relative to the scan root's own name, for paths shallower than
/// the full five-level hierarchy. The first subfolder below the root is
/// either itself a 4-digit year or already the month level; positions
/// past the end of the path become empty strings.
fn anchored_at_root(parts: &[String], root_name: &str) -> Option<PathContext> {
    let idx = parts.iter().position(|p| p == root_name)?;
    let part = |i: usize| parts.get(i).cloned().unwrap_or_default();

    if let Some(first) = parts.get(idx + 1) {
        if first.len() == 4 && first.chars().all(|c| c.is_ascii_digit()) {
            if parts.len() > idx + 4 {
                return Some(PathContext {
                    year: first.clone(),
                    month: part(idx + 2),
                    day: part(idx + 3),
                    insurer: part(idx + 4),
                });
            }
            return Some(PathContext {
                year: first.clone(),
                ..Default::default()
            });
        }
    }

    let ctx = if parts.len() > idx + 4 {
        PathContext {
            year: root_name.to_string(),
            month: part(idx + 1),
            day: part(idx + 3),
            insurer: part(idx + 4),
        }
    } else if parts.len() > idx + 3 {
        PathContext {
            year: root_name.to_string(),
            month: part(idx + 1),
            day: part(idx + 2),
            insurer: part(idx + 3),
        }
    } else {
        PathContext {
            year: root_name.to_string(),
            month: part(idx + 1),
            day: part(idx + 2),
            insurer: String::new(),
        }
    };
    Some(ctx)
}

/// Last resort: keep the invoice, tagged only with the root folder name.
pub(crate) fn minimal(root_name: &str) -> PathContext {
    PathContext {
        year: root_name.to_string(),
        ..Default::default()
    }
}
