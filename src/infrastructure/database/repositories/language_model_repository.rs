//! SeaORM implementation of the language model catalogue

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::domain::{DomainResult, LanguageModel, LanguageModelRepositoryInterface};
use crate::infrastructure::database::entities::language_model;

pub struct LanguageModelRepository {
    db: DatabaseConnection,
}

impl LanguageModelRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: language_model::Model) -> LanguageModel {
    LanguageModel {
        id: m.id,
        name: m.name,
        token_rate: m.token_rate,
        created_at: m.created_at,
    }
}

#[async_trait]
impl LanguageModelRepositoryInterface for LanguageModelRepository {
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<LanguageModel>> {
        let model = language_model::Entity::find()
            .filter(language_model::Column::Name.eq(name))
            .one(&self.db)
            .await?;

        Ok(model.map(model_to_domain))
    }
}
