//! Derived dot labels.
//!
//! Dots sharing `(mode, number)` form one labeled point. Labels are computed
//! from the annotation list on demand and never stored: the oldest dot (lowest
//! id) keeps the bare number, later ones get `a`, `b`, `c`, … in id order.

#[cfg(test)]
#[path = "labels_test.rs"]
mod labels_test;

use std::collections::{BTreeMap, HashMap};

use crate::doc::{Annotation, AnnotationId};

/// Label every numbered dot in `annotations`. Unnumbered dots and other
/// annotation kinds are absent from the result.
#[must_use]
pub fn dot_labels<'a, I>(annotations: I) -> HashMap<AnnotationId, String>
where
    I: IntoIterator<Item = &'a Annotation>,
{
    let mut groups: BTreeMap<(&str, u32), Vec<AnnotationId>> = BTreeMap::new();
    for annotation in annotations {
        if let Some(number) = annotation.number() {
            groups.entry((annotation.mode.as_str(), number)).or_default().push(annotation.id);
        }
    }

    let mut labels = HashMap::new();
    for ((_, number), mut ids) in groups {
        ids.sort_unstable();
        for (position, id) in ids.into_iter().enumerate() {
            let label = if position == 0 { number.to_string() } else { format!("{number}{}", suffix(position - 1)) };
            labels.insert(id, label);
        }
    }
    labels
}

/// Highest dot number used in `mode`, or 0 when there is none.
#[must_use]
pub fn max_dot_number<'a, I>(annotations: I, mode: &str) -> u32
where
    I: IntoIterator<Item = &'a Annotation>,
{
    annotations
        .into_iter()
        .filter(|a| a.mode == mode)
        .filter_map(Annotation::number)
        .max()
        .unwrap_or(0)
}

/// Spreadsheet-style letters: 0 → `a`, 25 → `z`, 26 → `aa`, 27 → `ab`.
fn suffix(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'a' + u8::try_from(index % 26).unwrap_or(0));
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().map(|&b| char::from(b)).collect()
}
