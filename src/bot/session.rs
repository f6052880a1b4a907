use crate::db::models::Recipe;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::{interval, Instant};
use tracing::{debug, info};

/// Identifies one chat conversation, e.g. a messenger chat id
pub type ConversationId = String;

#[derive(Debug, Clone)]
struct Session {
    /// Last numbered result list shown in this conversation
    results: Vec<Recipe>,
    updated_at: Instant,
}

/// Outcome of picking a recipe by its number in the last result list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Found(Recipe),
    OutOfRange { available: usize },
    NoResults,
}

/// Per-conversation result lists with expiry
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<ConversationId, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    fn is_expired(&self, session: &Session, now: Instant) -> bool {
        now.duration_since(session.updated_at) >= self.ttl
    }

    /// Replace the conversation's result list
    pub async fn remember(&self, conversation_id: &str, results: Vec<Recipe>) {
        let mut sessions = self.sessions.write().await;
        sessions.insert(
            conversation_id.to_string(),
            Session {
                results,
                updated_at: Instant::now(),
            },
        );
    }

    /// Pick the recipe numbered `number` (1-based) from the conversation's
    /// last result list. Expired lists are treated as absent.
    pub async fn select(&self, conversation_id: &str, number: usize) -> Selection {
        let sessions = self.sessions.read().await;

        let Some(session) = sessions.get(conversation_id) else {
            return Selection::NoResults;
        };
        if self.is_expired(session, Instant::now()) {
            return Selection::NoResults;
        }

        match number.checked_sub(1).and_then(|i| session.results.get(i)) {
            Some(recipe) => Selection::Found(recipe.clone()),
            None => Selection::OutOfRange {
                available: session.results.len(),
            },
        }
    }

    /// Forget a conversation's results
    pub async fn clear(&self, conversation_id: &str) {
        self.sessions.write().await.remove(conversation_id);
    }

    /// Drop expired sessions, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !self.is_expired(session, now));
        before - sessions.len()
    }

    /// Number of stored sessions, expired ones included
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Periodically purge expired sessions in the background
    pub fn start_sweeper(&self, every: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            info!(
                "Session sweeper started (interval: {}s, ttl: {}s)",
                every.as_secs(),
                store.ttl.as_secs()
            );

            let mut ticker = interval(every);
            loop {
                ticker.tick().await;

                let removed = store.purge_expired().await;
                if removed > 0 {
                    debug!("Purged {} expired chat sessions", removed);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: i64, title: &str) -> Recipe {
        Recipe {
            id,
            title: title.to_string(),
            ingredients: vec![],
            instructions: String::new(),
            cooking_time: 10,
            difficulty: "easy".to_string(),
        }
    }

    #[tokio::test]
    async fn test_select_from_remembered_list() {
        let store = SessionStore::new(Duration::from_secs(60));
        store
            .remember("chat-1", vec![recipe(1, "Плов"), recipe(2, "Суп")])
            .await;

        assert_eq!(store.select("chat-1", 2).await, Selection::Found(recipe(2, "Суп")));
        assert_eq!(
            store.select("chat-1", 3).await,
            Selection::OutOfRange { available: 2 }
        );
        assert_eq!(
            store.select("chat-1", 0).await,
            Selection::OutOfRange { available: 2 }
        );
    }

    #[tokio::test]
    async fn test_conversations_are_isolated() {
        let store = SessionStore::new(Duration::from_secs(60));
        store.remember("chat-1", vec![recipe(1, "Плов")]).await;
        store.remember("chat-2", vec![recipe(2, "Суп")]).await;

        assert_eq!(store.select("chat-1", 1).await, Selection::Found(recipe(1, "Плов")));
        assert_eq!(store.select("chat-2", 1).await, Selection::Found(recipe(2, "Суп")));
        assert_eq!(store.select("chat-3", 1).await, Selection::NoResults);
    }

    #[tokio::test]
    async fn test_remember_replaces_previous_list() {
        let store = SessionStore::new(Duration::from_secs(60));
        store.remember("chat-1", vec![recipe(1, "Плов")]).await;
        store.remember("chat-1", vec![recipe(5, "Салат")]).await;

        assert_eq!(store.select("chat-1", 1).await, Selection::Found(recipe(5, "Салат")));
        assert_eq!(store.len().await, 1);

        store.clear("chat-1").await;
        assert!(store.is_empty().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sessions_expire() {
        let store = SessionStore::new(Duration::from_secs(60));
        store.remember("old", vec![recipe(1, "Плов")]).await;

        tokio::time::advance(Duration::from_secs(45)).await;
        store.remember("fresh", vec![recipe(2, "Суп")]).await;

        tokio::time::advance(Duration::from_secs(20)).await;
        assert_eq!(store.select("old", 1).await, Selection::NoResults);
        assert_eq!(store.select("fresh", 1).await, Selection::Found(recipe(2, "Суп")));

        assert_eq!(store.purge_expired().await, 1);
        assert_eq!(store.len().await, 1);
    }
}
