//! Reduction of flattened join rows into nested `Pet` entities.
//!
//! The pet read queries left-join photos and tags in one statement, so a pet
//! with N photos and M tags comes back as N*M rows. The reducer here folds
//! that result set into one `Pet` per distinct id: photos are deduplicated by
//! URL, tags by tag id, and both keep their first-seen order. Pets keep the
//! first-seen order of their ids across the whole result set.

use std::collections::{HashMap, HashSet};

use crate::models::{Category, Pet, PetStatus, Tag};

/// One row of the pets/categories/photos/tags left join. Category, photo and
/// tag columns are null when the corresponding edge has no rows.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PetRow {
    pub id: i64,
    pub name: String,
    pub status: PetStatus,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub photo_url: Option<String>,
    pub tag_id: Option<i64>,
    pub tag_name: Option<String>,
}

/// Column list and joins shared by the pet read queries. Each query appends
/// its own WHERE clause.
pub const PET_SELECT: &str = "SELECT pets.id, pets.name, pets.status, \
     categories.id AS category_id, categories.name AS category_name, \
     pet_photos.photo_url, tags.id AS tag_id, tags.name AS tag_name \
     FROM pets \
     LEFT JOIN categories ON pets.category_id = categories.id \
     LEFT JOIN pet_photos ON pets.id = pet_photos.pet_id \
     LEFT JOIN tag_pets ON pets.id = tag_pets.pet_id \
     LEFT JOIN tags ON tag_pets.tag_id = tags.id";

struct PetAccumulator {
    pet: Pet,
    photos_seen: HashSet<String>,
    tags_seen: HashSet<i64>,
}

impl PetAccumulator {
    fn new(row: &PetRow) -> Self {
        Self {
            pet: Pet {
                id: row.id,
                name: row.name.clone(),
                status: row.status,
                category: Category {
                    id: row.category_id.unwrap_or_default(),
                    name: row.category_name.clone().unwrap_or_default(),
                },
                // Materialized as empty up front; never null on the wire.
                photo_urls: Vec::new(),
                tags: Vec::new(),
            },
            photos_seen: HashSet::new(),
            tags_seen: HashSet::new(),
        }
    }

    fn fold(&mut self, row: PetRow) {
        if let Some(url) = row.photo_url {
            if self.photos_seen.insert(url.clone()) {
                self.pet.photo_urls.push(url);
            }
        }

        if let Some(tag_id) = row.tag_id {
            if self.tags_seen.insert(tag_id) {
                self.pet.tags.push(Tag {
                    id: tag_id,
                    name: row.tag_name.unwrap_or_default(),
                });
            }
        }
    }
}

/// Fold a flattened result set into nested pets, one per distinct pet id.
pub fn collect_pets(rows: Vec<PetRow>) -> Vec<Pet> {
    let mut order: Vec<i64> = Vec::new();
    let mut grouped: HashMap<i64, PetAccumulator> = HashMap::new();

    for row in rows {
        let accumulator = grouped.entry(row.id).or_insert_with(|| {
            order.push(row.id);
            PetAccumulator::new(&row)
        });
        accumulator.fold(row);
    }

    order
        .into_iter()
        .filter_map(|id| grouped.remove(&id))
        .map(|accumulator| accumulator.pet)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, photo: Option<&str>, tag: Option<(i64, &str)>) -> PetRow {
        PetRow {
            id,
            name: format!("pet-{id}"),
            status: PetStatus::Available,
            category_id: Some(4),
            category_name: Some("rabbit".into()),
            photo_url: photo.map(str::to_string),
            tag_id: tag.map(|(tag_id, _)| tag_id),
            tag_name: tag.map(|(_, name)| name.to_string()),
        }
    }

    #[test]
    fn fan_out_rows_deduplicate_photos_and_tags() {
        // 2 photos x 3 tags = 6 rows for one pet
        let mut rows = Vec::new();
        for photo in ["a.jpg", "b.jpg"] {
            for tag in [(1, "gift"), (2, "fluffy"), (3, "small")] {
                rows.push(row(7, Some(photo), Some(tag)));
            }
        }

        let pets = collect_pets(rows);
        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].photo_urls, vec!["a.jpg", "b.jpg"]);
        assert_eq!(pets[0].tags.len(), 3);
        assert_eq!(pets[0].tags[0].name, "gift");
    }

    #[test]
    fn null_edges_become_empty_lists() {
        let pets = collect_pets(vec![row(1, None, None)]);
        assert_eq!(pets.len(), 1);
        assert!(pets[0].photo_urls.is_empty());
        assert!(pets[0].tags.is_empty());
    }

    #[test]
    fn missing_category_defaults_to_zero_values() {
        let mut solo = row(1, None, None);
        solo.category_id = None;
        solo.category_name = None;

        let pets = collect_pets(vec![solo]);
        assert_eq!(pets[0].category, Category::default());
    }

    #[test]
    fn pets_keep_first_seen_order() {
        let rows = vec![
            row(3, Some("c.jpg"), None),
            row(1, Some("a.jpg"), None),
            row(3, Some("c2.jpg"), None),
            row(2, None, Some((9, "old"))),
        ];

        let pets = collect_pets(rows);
        let ids: Vec<i64> = pets.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
        assert_eq!(pets[0].photo_urls, vec!["c.jpg", "c2.jpg"]);
    }

    #[test]
    fn empty_result_set_yields_no_pets() {
        assert!(collect_pets(Vec::new()).is_empty());
    }
}
