use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use super::store::{Backend, CaseStudyStore, StoreError};
use crate::entity::case_study;
use crate::models::case_study::{CaseStudy, CaseStudyFields};

/// Case studies stored in the `case_study` table.
pub struct DatabaseCaseStudyStore {
    db: DatabaseConnection,
}

impl DatabaseCaseStudyStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: &str) -> Result<Option<case_study::Model>, StoreError> {
        Ok(case_study::Entity::find_by_id(id.to_owned())
            .one(&self.db)
            .await?)
    }
}

#[async_trait]
impl CaseStudyStore for DatabaseCaseStudyStore {
    fn backend(&self) -> Backend {
        Backend::Database
    }

    async fn list(&self) -> Result<Vec<CaseStudy>, StoreError> {
        let models = case_study::Entity::find()
            .order_by_desc(case_study::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(CaseStudy::from).collect())
    }

    async fn find(&self, id: &str) -> Result<Option<CaseStudy>, StoreError> {
        Ok(self.find_model(id).await?.map(CaseStudy::from))
    }

    async fn insert(
        &self,
        fields: CaseStudyFields,
        image_url: Option<String>,
    ) -> Result<CaseStudy, StoreError> {
        let now = Utc::now();
        let new_case_study = case_study::ActiveModel {
            id: Set(Uuid::now_v7().to_string()),
            title: Set(fields.title),
            description: Set(fields.description),
            industry: Set(fields.industry),
            image_url: Set(image_url),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_case_study.insert(&self.db).await?;
        Ok(model.into())
    }

    async fn replace(
        &self,
        id: &str,
        fields: CaseStudyFields,
        image_url: Option<String>,
    ) -> Result<Option<CaseStudy>, StoreError> {
        let Some(existing) = self.find_model(id).await? else {
            return Ok(None);
        };

        let updated_at = Utc::now().max(existing.created_at);
        let mut active: case_study::ActiveModel = existing.into();
        active.title = Set(fields.title);
        active.description = Set(fields.description);
        active.industry = Set(fields.industry);
        active.image_url = Set(image_url);
        active.updated_at = Set(updated_at);

        let model = active.update(&self.db).await?;
        Ok(Some(model.into()))
    }

    async fn remove(&self, id: &str) -> Result<Option<CaseStudy>, StoreError> {
        let Some(existing) = self.find_model(id).await? else {
            return Ok(None);
        };

        let result = case_study::Entity::delete_by_id(id.to_owned())
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Ok(None);
        }
        Ok(Some(existing.into()))
    }
}
