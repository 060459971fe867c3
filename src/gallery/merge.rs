use crate::photo::Photo;
use std::collections::HashMap;

/// Union two print lists keyed by `id`.
///
/// The result keeps `base` order with duplicates collapsed to their first
/// occurrence. A print in `overrides` replaces the base print with the same id
/// in place; the rest are appended in order. Within `overrides` the later
/// entry wins.
pub fn merge_by_id(base: Vec<Photo>, overrides: Vec<Photo>) -> Vec<Photo> {
    let mut merged: Vec<Photo> = Vec::with_capacity(base.len() + overrides.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for photo in base {
        if !index.contains_key(&photo.id) {
            index.insert(photo.id.clone(), merged.len());
            merged.push(photo);
        }
    }

    for photo in overrides {
        match index.get(&photo.id) {
            Some(&slot) => merged[slot] = photo,
            None => {
                index.insert(photo.id.clone(), merged.len());
                merged.push(photo);
            }
        }
    }

    merged
}
