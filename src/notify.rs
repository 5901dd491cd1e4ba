use async_trait::async_trait;
use tracing::info;

/// Outbound customer notification channel. The lifecycle controller hands it a
/// normalized (digits-only) phone number and a ready-made message.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, phone: &str, message: &str) -> anyhow::Result<()>;
}

/// Builds the WhatsApp deep link for the message and logs it; the POS terminal
/// picks the link up from the response/logs and opens it. Nothing is pushed
/// from the server itself.
pub struct WhatsAppLink;

pub fn wa_link(phone: &str, message: &str) -> String {
    format!("https://wa.me/{}?text={}", phone, urlencoding::encode(message))
}

#[async_trait]
impl Notifier for WhatsAppLink {
    async fn send(&self, phone: &str, message: &str) -> anyhow::Result<()> {
        info!(phone = %phone, link = %wa_link(phone, message), "ready notification");
        Ok(())
    }
}
