//! Integration tests for the helpdesk library.
//! These tests require a live backend and credentials in the environment.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use helpdesk::{
        ChatApi, Helpdesk, MemoryTokenStore, Role, SendMessageParams, StartChatParams, TokenStore,
    };

    fn client_from_env() -> Option<Helpdesk> {
        // These tests require HELPDESK_API_URL and HELPDESK_TOKEN to be set.
        let base_url = std::env::var("HELPDESK_API_URL").ok()?;
        let token = std::env::var("HELPDESK_TOKEN").ok()?;
        let store = Arc::new(MemoryTokenStore::new());
        store.set(Role::Customer, token);
        Helpdesk::new(Some(base_url), store, Role::Customer).ok()
    }

    #[tokio::test]
    async fn test_health_probe() {
        let Some(client) = client_from_env() else {
            eprintln!("Skipping test: HELPDESK_API_URL / HELPDESK_TOKEN not set");
            return;
        };

        let health = client.health().await;
        assert!(health.is_ok(), "Health probe should succeed");
    }

    #[tokio::test]
    async fn test_start_and_send_round_trip() {
        let Some(client) = client_from_env() else {
            eprintln!("Skipping test: HELPDESK_API_URL / HELPDESK_TOKEN not set");
            return;
        };

        let conversation = client
            .start_chat(StartChatParams::new())
            .await
            .expect("start_chat should succeed");
        assert!(!conversation.id.is_empty());

        let reply = client
            .send_message(SendMessageParams::new(
                conversation.id.clone(),
                "What is your return policy?",
            ))
            .await
            .expect("send_message should succeed");
        assert!(!reply.content.is_empty());

        let history = client
            .chat_history(&conversation.id, 50)
            .await
            .expect("history should succeed");
        assert!(!history.is_empty());
    }
}
