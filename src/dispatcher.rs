use tracing::{error, info, instrument, warn};

use crate::ai::ReasoningClient;
use crate::catalog::Catalog;
use crate::classifier::{classify, Intent};
use crate::config::DEFAULT_CURRENCY;
use crate::error::AssistantError;
use crate::handlers::{answer_fallback, handle, HandlerContext};
use crate::messages;

/// Routes each question to the handler for its intent.
///
/// Classification failures and `unknown` questions go straight to the
/// fallback handler. A failing specialized handler gets exactly one retry
/// through the fallback. Questions are independent; nothing is remembered
/// between calls.
pub struct Dispatcher<C> {
    client: C,
    catalog: Catalog,
    catalog_json: String,
    currency: String,
}

impl<C: ReasoningClient> Dispatcher<C> {
    pub fn new(client: C, catalog: Catalog) -> Self {
        let catalog_json = catalog.to_prompt_json();
        Self {
            client,
            catalog,
            catalog_json,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Currency to fall back on when the catalog rows carry none, e.g. when
    /// the catalog is empty.
    pub fn with_currency(mut self, currency: &str) -> Self {
        self.currency = currency.to_string();
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    fn context(&self) -> HandlerContext<'_, C> {
        HandlerContext {
            client: &self.client,
            catalog: &self.catalog,
            catalog_json: &self.catalog_json,
            currency: &self.currency,
        }
    }

    /// Always produces something to show: the answer, or an error message
    /// when even the fallback failed.
    pub async fn answer(&self, question: &str) -> String {
        if question.trim().is_empty() {
            return messages::EMPTY_QUESTION.to_string();
        }
        match self.try_answer(question).await {
            Ok(answer) => answer,
            Err(err) => {
                error!(error = %err, "Unable to answer question");
                messages::unrecoverable_answer(&err.to_string())
            }
        }
    }

    /// Like [`Dispatcher::answer`], but surfaces an
    /// [`AssistantError::UnrecoverableFailure`] instead of a message.
    #[instrument(level = "debug", skip(self))]
    pub async fn try_answer(&self, question: &str) -> Result<String, AssistantError> {
        let intent = match classify(&self.client, question).await {
            Ok(classification) => classification.intent,
            Err(err) => {
                let err = AssistantError::ClassificationFailure(err);
                warn!(error = %err, "Falling back to general answer");
                return self.fallback(question).await;
            }
        };

        if intent == Intent::Unknown {
            info!("Unknown question type, using general answer");
            return self.fallback(question).await;
        }

        info!(%intent, "Dispatching question");
        match handle(intent, &self.context(), question).await {
            Ok(answer) => Ok(answer),
            Err(source) => {
                let err = AssistantError::HandlerFailure { intent, source };
                warn!(error = %err, "Retrying with general answer");
                self.fallback(question).await
            }
        }
    }

    async fn fallback(&self, question: &str) -> Result<String, AssistantError> {
        answer_fallback(&self.context(), question)
            .await
            .map_err(AssistantError::UnrecoverableFailure)
    }
}
