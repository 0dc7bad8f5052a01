use thiserror::Error;

use crate::database::PetRepository;
use crate::models::{Pet, PetStatus};

#[derive(Debug, Error)]
pub enum PetError {
    #[error("pet not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

/// Pet operations with existence preconditions on the mutating paths.
#[derive(Clone)]
pub struct PetService {
    repository: PetRepository,
}

impl PetService {
    pub fn new(repository: PetRepository) -> Self {
        Self { repository }
    }

    pub async fn add(&self, pet: Pet) -> Result<Pet, PetError> {
        Ok(self.repository.add(pet).await?)
    }

    /// Update requires the pet to currently exist.
    pub async fn update(&self, pet: Pet) -> Result<Pet, PetError> {
        self.get_by_id(pet.id).await?;
        Ok(self.repository.update(pet).await?)
    }

    pub async fn find_by_status(&self, statuses: &[PetStatus]) -> Result<Vec<Pet>, PetError> {
        Ok(self.repository.find_by_status(statuses).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Pet, PetError> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(PetError::NotFound)
    }

    pub async fn update_with_form(
        &self,
        id: i64,
        name: Option<&str>,
        status: Option<PetStatus>,
    ) -> Result<(), PetError> {
        self.get_by_id(id).await?;
        Ok(self.repository.update_with_form(id, name, status).await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), PetError> {
        self.get_by_id(id).await?;
        Ok(self.repository.delete(id).await?)
    }

    pub async fn add_photo(&self, id: i64, file_name: &str) -> Result<(), PetError> {
        Ok(self.repository.add_photo(id, file_name).await?)
    }
}
