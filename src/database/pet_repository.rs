use sqlx::SqlitePool;

use crate::database::pet_rows::{collect_pets, PetRow, PET_SELECT};
use crate::models::{Pet, PetStatus};

/// Pet persistence across the normalized layout: `pets`, side table
/// `categories`, child table `pet_photos`, and the `tags`/`tag_pets`
/// junction pair.
#[derive(Clone)]
pub struct PetRepository {
    pool: SqlitePool,
}

impl PetRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new pet and its associations in one transaction. The caller
    /// gets the pet back with its assigned id; any failure rolls the whole
    /// write back.
    pub async fn add(&self, mut pet: Pet) -> Result<Pet, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        // Upsert the category: last writer wins on the name
        sqlx::query("INSERT OR REPLACE INTO categories (id, name) VALUES (?, ?)")
            .bind(pet.category.id)
            .bind(&pet.category.name)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("INSERT INTO pets (name, category_id, status) VALUES (?, ?, ?)")
            .bind(&pet.name)
            .bind(pet.category.id)
            .bind(pet.status)
            .execute(&mut *tx)
            .await?;
        pet.id = result.last_insert_rowid();

        for url in &pet.photo_urls {
            sqlx::query("INSERT INTO pet_photos (pet_id, photo_url) VALUES (?, ?)")
                .bind(pet.id)
                .bind(url)
                .execute(&mut *tx)
                .await?;
        }

        for tag in &pet.tags {
            sqlx::query("INSERT OR REPLACE INTO tags (id, name) VALUES (?, ?)")
                .bind(tag.id)
                .bind(&tag.name)
                .execute(&mut *tx)
                .await?;
            sqlx::query("INSERT INTO tag_pets (pet_id, tag_id) VALUES (?, ?)")
                .bind(pet.id)
                .bind(tag.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(pet)
    }

    /// Update a pet in place. Photos and tag links are full-replace: existing
    /// child rows are deleted and the supplied set re-inserted, so an empty
    /// list clears all associations.
    pub async fn update(&self, pet: Pet) -> Result<Pet, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT OR REPLACE INTO categories (id, name) VALUES (?, ?)")
            .bind(pet.category.id)
            .bind(&pet.category.name)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE pets SET name = ?, category_id = ?, status = ? WHERE id = ?")
            .bind(&pet.name)
            .bind(pet.category.id)
            .bind(pet.status)
            .bind(pet.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM pet_photos WHERE pet_id = ?")
            .bind(pet.id)
            .execute(&mut *tx)
            .await?;
        for url in &pet.photo_urls {
            sqlx::query("INSERT INTO pet_photos (pet_id, photo_url) VALUES (?, ?)")
                .bind(pet.id)
                .bind(url)
                .execute(&mut *tx)
                .await?;
        }

        sqlx::query("DELETE FROM tag_pets WHERE pet_id = ?")
            .bind(pet.id)
            .execute(&mut *tx)
            .await?;
        for tag in &pet.tags {
            sqlx::query("INSERT OR REPLACE INTO tags (id, name) VALUES (?, ?)")
                .bind(tag.id)
                .bind(&tag.name)
                .execute(&mut *tx)
                .await?;
            sqlx::query("INSERT INTO tag_pets (pet_id, tag_id) VALUES (?, ?)")
                .bind(pet.id)
                .bind(tag.id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(pet)
    }

    /// Single pet by id, or None when no row matches.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Pet>, sqlx::Error> {
        let sql = format!("{PET_SELECT} WHERE pets.id = ?");
        let rows: Vec<PetRow> = sqlx::query_as(&sql).bind(id).fetch_all(&self.pool).await?;
        Ok(collect_pets(rows).into_iter().next())
    }

    /// All pets whose status matches one of the given values, in first-seen
    /// id order.
    pub async fn find_by_status(&self, statuses: &[PetStatus]) -> Result<Vec<Pet>, sqlx::Error> {
        if statuses.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; statuses.len()].join(", ");
        let sql = format!("{PET_SELECT} WHERE pets.status IN ({placeholders})");

        let mut query = sqlx::query_as::<_, PetRow>(&sql);
        for status in statuses {
            query = query.bind(*status);
        }

        let rows = query.fetch_all(&self.pool).await?;
        Ok(collect_pets(rows))
    }

    /// Partial scalar update from the form endpoint. Both fields absent is a
    /// no-op success.
    pub async fn update_with_form(
        &self,
        id: i64,
        name: Option<&str>,
        status: Option<PetStatus>,
    ) -> Result<(), sqlx::Error> {
        match (name, status) {
            (None, None) => Ok(()),
            (Some(name), None) => {
                sqlx::query("UPDATE pets SET name = ? WHERE id = ?")
                    .bind(name)
                    .bind(id)
                    .execute(&self.pool)
                    .await?;
                Ok(())
            }
            (None, Some(status)) => {
                sqlx::query("UPDATE pets SET status = ? WHERE id = ?")
                    .bind(status)
                    .bind(id)
                    .execute(&self.pool)
                    .await?;
                Ok(())
            }
            (Some(name), Some(status)) => {
                sqlx::query("UPDATE pets SET name = ?, status = ? WHERE id = ?")
                    .bind(name)
                    .bind(status)
                    .bind(id)
                    .execute(&self.pool)
                    .await?;
                Ok(())
            }
        }
    }

    /// Soft delete: flip the status, keep the row.
    pub async fn delete(&self, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE pets SET status = ? WHERE id = ?")
            .bind(PetStatus::Deleted)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Record an uploaded image file name as a photo row.
    pub async fn add_photo(&self, id: i64, file_name: &str) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO pet_photos (pet_id, photo_url) VALUES (?, ?)")
            .bind(id)
            .bind(file_name)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
