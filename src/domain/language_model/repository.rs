use async_trait::async_trait;

use super::LanguageModel;
use crate::domain::DomainResult;

#[async_trait]
pub trait LanguageModelRepositoryInterface: Send + Sync {
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<LanguageModel>>;
}
