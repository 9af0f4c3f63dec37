//! Sales reply generation on top of an LLM client

use super::{HttpLLMClient, LLMClient};
use crate::config::LLMServiceConfig;
use crate::db::Product;
use crate::error::{Result, SalesDmError};
use crate::search::format_context;
use std::sync::Arc;

/// Reply sent when the LLM call exceeds its timeout
pub const TIMEOUT_REPLY: &str = "متأسفانه زمان پاسخگویی به پایان رسید. لطفاً دوباره تلاش کنید.";

/// Reply sent on transport failures and non-2xx statuses
pub const UNAVAILABLE_REPLY: &str =
    "متأسفانه در حال حاضر قادر به پاسخگویی نیستم. لطفاً بعداً تلاش کنید.";

/// Reply sent for every other failure
pub const GENERIC_ERROR_REPLY: &str = "متأسفانه خطایی رخ داد. لطفاً بعداً تلاش کنید.";

const SYSTEM_PROMPT: &str = "تو یک دستیار فروش حرفه‌ای هستی که به مشتریان در مورد محصولات الکترونیکی کمک می‌کنی.
وظیفه تو این است که:
1. به سوالات مشتری در مورد محصولات پاسخ دهی
2. اطلاعات دقیق و کامل از محصولات موجود ارائه دهی
3. در صورت نیاز، محصولات مشابه پیشنهاد دهی
4. همیشه مودب و حرفه‌ای باشی
5. فقط به زبان فارسی پاسخ دهی

اگر محصول مورد نظر موجود نبود، به مشتری اطلاع بده و محصولات مشابه پیشنهاد بده.
اگر سوال مشتری مربوط به محصولات نبود، به او بگو که فقط می‌توانی در مورد محصولات الکترونیکی کمک کنی.";

/// Generates customer-facing replies. Never fails: errors become fixed
/// Persian apology strings.
pub struct SalesResponder {
    client: Arc<dyn LLMClient>,
    max_context_length: usize,
}

impl SalesResponder {
    pub fn new(client: Arc<dyn LLMClient>, max_context_length: usize) -> Self {
        Self {
            client,
            max_context_length,
        }
    }

    /// Create with an HTTP client built from configuration
    pub fn from_config(config: LLMServiceConfig, max_context_length: usize) -> Result<Self> {
        let client = HttpLLMClient::new(config)?;
        Ok(Self::new(Arc::new(client), max_context_length))
    }

    pub fn client(&self) -> &Arc<dyn LLMClient> {
        &self.client
    }

    /// Build the full prompt for a customer message and retrieved products
    pub fn build_prompt(&self, user_message: &str, products: &[Product]) -> String {
        let context = format_context(products, self.max_context_length);
        render_prompt(user_message, &context)
    }

    /// Ask the LLM for a reply; failures map to a fallback sentence
    pub async fn generate_response(&self, user_message: &str, products: &[Product]) -> String {
        let prompt = self.build_prompt(user_message, products);
        tracing::debug!(
            "Sending prompt ({} chars) to {}",
            prompt.chars().count(),
            self.client.endpoint()
        );

        match self.client.complete(&prompt).await {
            Ok(reply) => {
                tracing::info!("Generated reply ({} chars)", reply.chars().count());
                reply
            }
            Err(e) => {
                tracing::error!("LLM call failed: {}", e);
                fallback_reply(&e).to_string()
            }
        }
    }
}

fn render_prompt(user_message: &str, context: &str) -> String {
    format!(
        "{}\n\nاطلاعات محصولات:\n{}\n\nسوال مشتری: {}\n\nپاسخ تو (فقط فارسی):",
        SYSTEM_PROMPT, context, user_message
    )
}

/// Map an LLM failure to the sentence shown to the customer
pub fn fallback_reply(error: &SalesDmError) -> &'static str {
    match error {
        SalesDmError::LlmTimeout(_) => TIMEOUT_REPLY,
        e if e.is_llm_transport() => UNAVAILABLE_REPLY,
        _ => GENERIC_ERROR_REPLY,
    }
}
