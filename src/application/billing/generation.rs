//! Metered and flat-rate generation

use std::sync::Arc;

use tracing::{error, info};

use super::LedgerService;
use crate::application::ports::{CompletionProvider, CompletionRequest};
use crate::domain::{
    DomainError, DomainResult, LanguageModelRepositoryInterface, UserRepositoryInterface,
};

/// Parameters of the flat-rate text generation path
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub default_model: String,
    pub max_tokens: u32,
    pub flat_cost: i64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            default_model: "gpt-4".into(),
            max_tokens: 100,
            flat_cost: 100,
        }
    }
}

pub struct GenerationService {
    users: Arc<dyn UserRepositoryInterface>,
    models: Arc<dyn LanguageModelRepositoryInterface>,
    ledger: Arc<LedgerService>,
    provider: Arc<dyn CompletionProvider>,
    settings: GenerationSettings,
}

impl GenerationService {
    pub fn new(
        users: Arc<dyn UserRepositoryInterface>,
        models: Arc<dyn LanguageModelRepositoryInterface>,
        ledger: Arc<LedgerService>,
        provider: Arc<dyn CompletionProvider>,
        settings: GenerationSettings,
    ) -> Self {
        Self {
            users,
            models,
            ledger,
            provider,
            settings,
        }
    }

    /// Charge for `tokens_used` tokens of `model_name` and return the
    /// confirmation message.
    pub async fn generate(
        &self,
        user_id: &str,
        model_name: &str,
        tokens_used: i64,
    ) -> DomainResult<String> {
        let model = self
            .models
            .find_by_name(model_name)
            .await?
            .ok_or_else(|| DomainError::ModelNotFound(model_name.to_string()))?;

        let cost = model.cost_for(tokens_used);
        self.ledger.debit(user_id, cost).await?;

        info!(user_id = %user_id, model = %model.name, tokens_used, cost, "Generation charged");
        Ok(format!("Generation succeeded! Cost: {} credits", cost))
    }

    /// Forward `prompt` to the upstream provider and charge the flat rate
    /// once it answered. A failed upstream call costs nothing.
    pub async fn generate_text(
        &self,
        user_id: &str,
        prompt: String,
        model_name: Option<String>,
    ) -> DomainResult<serde_json::Value> {
        let cost = self.settings.flat_cost;

        let affordable = self
            .users
            .get_user_by_id(user_id)
            .await?
            .is_some_and(|user| user.can_afford(cost));
        if !affordable {
            return Err(DomainError::InsufficientFunds { required: cost });
        }

        let request = CompletionRequest {
            model: model_name.unwrap_or_else(|| self.settings.default_model.clone()),
            prompt,
            max_tokens: self.settings.max_tokens,
        };

        let body = self.provider.complete(&request).await.map_err(|e| {
            error!(user_id = %user_id, model = %request.model, error = %e, "Upstream call failed");
            DomainError::Upstream(e.to_string())
        })?;

        self.ledger.debit(user_id, cost).await?;
        info!(user_id = %user_id, model = %request.model, cost, "Text generation charged");

        Ok(body)
    }
}
