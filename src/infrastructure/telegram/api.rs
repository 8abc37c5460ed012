//! Raw HTTP calls to the Telegram Bot API.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::domain::{
    error::TransportError,
    models::message::{InboundUpdate, InlineAnswer, Reply},
    services::chat_transport::ChatTransport,
};

use super::types::{
    ApiResponse, BotUser, InlineKeyboardButton, InlineKeyboardMarkup, InlineQueryResultArticle,
    InputTextMessageContent, Update,
};

pub const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Low-level Telegram Bot API client.
pub struct TelegramApi {
    client: Client,
    base_url: String,
    debug: bool,
}

impl TelegramApi {
    pub fn new(client: Client, bot_token: &str, debug: bool) -> Self {
        Self::with_base_url(client, bot_token, DEFAULT_BASE_URL, debug)
    }

    pub fn with_base_url(client: Client, bot_token: &str, base_url: &str, debug: bool) -> Self {
        Self {
            client,
            base_url: format!("{}/bot{}", base_url.trim_end_matches('/'), bot_token),
            debug,
        }
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, body: Value) -> Result<T, TransportError> {
        if self.debug {
            debug!(method, %body, "bot api request");
        }

        let resp = self
            .client
            .post(format!("{}/{}", self.base_url, method))
            .json(&body)
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        let api_resp: ApiResponse<T> = resp
            .json()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;
        if !api_resp.ok {
            let desc = api_resp.description.unwrap_or_default();
            warn!(method, "bot api call failed: {desc}");
            return Err(TransportError::Api(desc));
        }

        api_resp
            .result
            .ok_or_else(|| TransportError::Api(format!("{method} returned no result")))
    }
}

pub fn build_article(answer: &InlineAnswer) -> InlineQueryResultArticle {
    let reply_markup = answer.button.as_ref().map(|(text, data)| InlineKeyboardMarkup {
        inline_keyboard: vec![vec![InlineKeyboardButton {
            text: text.clone(),
            callback_data: data.clone(),
        }]],
    });

    InlineQueryResultArticle {
        result_type: "article",
        id: answer.result_id.clone(),
        title: answer.title.clone(),
        description: answer.description.clone(),
        input_message_content: InputTextMessageContent {
            message_text: answer.message_text.clone(),
            parse_mode: "Markdown",
        },
        reply_markup,
    }
}

#[async_trait]
impl ChatTransport for TelegramApi {
    async fn get_me(&self) -> Result<String, TransportError> {
        let me: BotUser = self.call("getMe", json!({})).await?;
        debug!(bot_id = me.id, "getMe");
        Ok(me.username.unwrap_or_default())
    }

    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u64,
    ) -> Result<Vec<InboundUpdate>, TransportError> {
        let mut body = json!({
            "timeout": timeout_secs,
            "allowed_updates": ["message", "inline_query", "callback_query"],
        });
        if let Some(off) = offset {
            body["offset"] = json!(off);
        }

        let updates: Vec<Update> = self.call("getUpdates", body).await?;
        Ok(updates.into_iter().map(InboundUpdate::from).collect())
    }

    async fn send_message(&self, reply: &Reply) -> Result<(), TransportError> {
        let mut body = json!({
            "chat_id": reply.chat_id,
            "text": reply.text,
        });
        if let Some(id) = reply.reply_to_message_id {
            body["reply_to_message_id"] = json!(id);
        }
        if let Some(mode) = reply.parse_mode {
            body["parse_mode"] = json!(mode.as_api_str());
        }
        if reply.disable_notification {
            body["disable_notification"] = json!(true);
        }

        let _: Value = self.call("sendMessage", body).await?;
        Ok(())
    }

    async fn answer_inline_query(&self, answer: &InlineAnswer) -> Result<(), TransportError> {
        let body = json!({
            "inline_query_id": answer.inline_query_id,
            "results": [build_article(answer)],
            "is_personal": true,
            "cache_time": 0,
        });

        let _: bool = self.call("answerInlineQuery", body).await?;
        Ok(())
    }

    async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<&str>,
    ) -> Result<(), TransportError> {
        let mut body = json!({
            "callback_query_id": callback_query_id,
        });
        if let Some(t) = text {
            body["text"] = json!(t);
        }

        let _: bool = self.call("answerCallbackQuery", body).await?;
        Ok(())
    }
}
