//! SKU column detection.
//!
//! Sales exports name the seller SKU column inconsistently (`sellerSku`,
//! `Seller SKU`, `item_sku`, ...). [`resolve()`] picks the column by walking a
//! fixed alias list in priority order and, failing that, takes the first header
//! that merely contains `sku`. Matching ignores case and surrounding whitespace.

use std::collections::HashMap;

use log::debug;

use crate::error::ReportError;

/// Known SKU column aliases, highest priority first.
pub const SKU_CANDIDATES: [&str; 6] = [
    "sellersku",
    "seller_sku",
    "seller sku",
    "sku",
    "item_sku",
    "item sku",
];

const SKU_FRAGMENT: &str = "sku";

/// A header chosen as the SKU column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumn {
    /// Position in the header row.
    pub index: usize,
    /// Header text exactly as it appeared in the input.
    pub name: String,
    pub method: Detection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    /// Matched an entry of [`SKU_CANDIDATES`].
    Alias,
    /// Contained the `sku` fragment.
    Fragment,
    /// Named explicitly by the caller.
    Explicit,
}

pub fn normalize_header(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Normalized header -> (position, original) with last-write-wins on
/// collisions. A key keeps the slot where it was first seen.
struct HeaderLookup<'a> {
    entries: Vec<(String, usize, &'a str)>,
    slots: HashMap<String, usize>,
}

impl<'a> HeaderLookup<'a> {
    fn build<S: AsRef<str>>(columns: &'a [S]) -> Self {
        let mut entries: Vec<(String, usize, &'a str)> = Vec::with_capacity(columns.len());
        let mut slots: HashMap<String, usize> = HashMap::with_capacity(columns.len());
        for (index, column) in columns.iter().enumerate() {
            let original = column.as_ref();
            let key = normalize_header(original);
            match slots.get(&key) {
                Some(&slot) => {
                    debug!("Header '{original}' shadows an earlier header normalizing to '{key}'");
                    entries[slot].1 = index;
                    entries[slot].2 = original;
                }
                None => {
                    slots.insert(key.clone(), entries.len());
                    entries.push((key, index, original));
                }
            }
        }
        Self { entries, slots }
    }

    fn get(&self, key: &str) -> Option<(usize, &'a str)> {
        self.slots.get(key).map(|&slot| {
            let (_, index, original) = self.entries[slot];
            (index, original)
        })
    }
}

/// Locates the SKU column among `columns`, or `None` when nothing qualifies.
pub fn resolve<S: AsRef<str>>(columns: &[S]) -> Option<ResolvedColumn> {
    let lookup = HeaderLookup::build(columns);

    if let Some((index, name)) = SKU_CANDIDATES
        .iter()
        .find_map(|candidate| lookup.get(candidate))
    {
        debug!("SKU column '{name}' matched a known alias");
        return Some(ResolvedColumn {
            index,
            name: name.to_string(),
            method: Detection::Alias,
        });
    }

    lookup
        .entries
        .iter()
        .find(|(key, _, _)| key.contains(SKU_FRAGMENT))
        .map(|(_, index, name)| {
            debug!("SKU column '{name}' matched by substring fallback");
            ResolvedColumn {
                index: *index,
                name: name.to_string(),
                method: Detection::Fragment,
            }
        })
}

/// Like [`resolve()`] but reports the absent column as a typed error.
pub fn require<S: AsRef<str>>(columns: &[S]) -> Result<ResolvedColumn, ReportError> {
    resolve(columns).ok_or_else(|| ReportError::ColumnNotFound {
        columns: owned(columns),
    })
}

/// Resolves a caller-supplied column name with the same normalization rules.
pub fn resolve_named<S: AsRef<str>>(
    columns: &[S],
    requested: &str,
) -> Result<ResolvedColumn, ReportError> {
    let lookup = HeaderLookup::build(columns);
    lookup
        .get(&normalize_header(requested))
        .map(|(index, name)| ResolvedColumn {
            index,
            name: name.to_string(),
            method: Detection::Explicit,
        })
        .ok_or_else(|| ReportError::UnknownColumn {
            requested: requested.to_string(),
            columns: owned(columns),
        })
}

fn owned<S: AsRef<str>>(columns: &[S]) -> Vec<String> {
    columns.iter().map(|c| c.as_ref().to_string()).collect()
}
