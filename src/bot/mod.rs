//! Chat front end for recipe search.
//!
//! Messages are parsed into [`BotCommand`]s and answered with HTML-formatted
//! text. The transport (polling a messenger API) lives outside this crate;
//! each conversation keeps its own last result list in a [`SessionStore`].

pub mod commands;
pub mod session;

pub use commands::BotCommand;
pub use session::{ConversationId, Selection, SessionStore};

use crate::db::models::Recipe;
use crate::search::{Query, RecipeStore, SearchEngine};
use crate::utils::sanitize::escape_html;
use std::time::Duration;
use tracing::{debug, warn};

const GREETING: &str = "Привет! Я CookWizard бот";

const HELP_TEXT: &str = "<b>Список команд бота:</b>

👋 <b>Базовые команды:</b>
/start - Приветствие бота
/help - список команд

🔍 <b>Поиск рецептов:</b>
/name &lt;название блюда&gt; - поиск рецепта по имени
/product &lt;ингредиент1&gt;, &lt;ингредиент2&gt;, ... - поиск рецептов по ингредиентам";

const NAME_USAGE: &str = "Использование: /name <название блюда>";
const PRODUCT_USAGE: &str =
    "Использование: /product <название ингредиента>, <название ингредиента>, ...";
const NOTHING_FOUND: &str = "😔 Рецепты не найдены";
const SEARCH_FIRST: &str = "Сначала найдите рецепты командой /name или /product";
const BAD_NUMBER: &str = "❌ Неверный номер рецепта";
const SEARCH_FAILED: &str = "⚠️ Поиск временно недоступен, попробуйте позже";
const UNKNOWN_COMMAND: &str =
    "Неизвестная команда. Введите /help для вывода списка всех доступных команд";

/// Answers chat messages using the search engine
pub struct ChatBot<S> {
    engine: SearchEngine<S>,
    sessions: SessionStore,
    search_timeout: Duration,
}

impl<S> Clone for ChatBot<S> {
    fn clone(&self) -> Self {
        Self {
            engine: self.engine.clone(),
            sessions: self.sessions.clone(),
            search_timeout: self.search_timeout,
        }
    }
}

impl<S: RecipeStore> ChatBot<S> {
    pub fn new(engine: SearchEngine<S>, sessions: SessionStore, search_timeout: Duration) -> Self {
        Self {
            engine,
            sessions,
            search_timeout,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Produce the reply to one incoming message
    pub async fn handle_message(&self, conversation_id: &str, text: &str) -> String {
        let command = BotCommand::parse(text);
        debug!("Conversation {}: {:?}", conversation_id, command);

        match command {
            BotCommand::Start => GREETING.to_string(),
            BotCommand::Help => HELP_TEXT.to_string(),
            BotCommand::Name(None) => NAME_USAGE.to_string(),
            BotCommand::Product(None) => PRODUCT_USAGE.to_string(),
            BotCommand::Name(Some(title)) => {
                self.search(conversation_id, Query::new().with_title(&title))
                    .await
            }
            BotCommand::Product(Some(ingredients)) => {
                self.search(conversation_id, Query::new().with_ingredients(&ingredients))
                    .await
            }
            BotCommand::Select(number) => match self.sessions.select(conversation_id, number).await {
                Selection::Found(recipe) => format_recipe_details(&recipe),
                Selection::OutOfRange { .. } => BAD_NUMBER.to_string(),
                Selection::NoResults => SEARCH_FIRST.to_string(),
            },
            BotCommand::Unknown => UNKNOWN_COMMAND.to_string(),
        }
    }

    async fn search(&self, conversation_id: &str, query: Query) -> String {
        match self.engine.search_with_timeout(&query, self.search_timeout).await {
            Ok(results) if results.is_empty() => {
                self.sessions.clear(conversation_id).await;
                NOTHING_FOUND.to_string()
            }
            Ok(results) => {
                let reply = format_result_list(&results);
                self.sessions.remember(conversation_id, results).await;
                reply
            }
            Err(e) => {
                warn!(
                    "Search failed for conversation {}: {}",
                    conversation_id,
                    e.log_safe()
                );
                SEARCH_FAILED.to_string()
            }
        }
    }
}

/// Numbered list of titles and cooking times
pub fn format_result_list(recipes: &[Recipe]) -> String {
    let mut answer = String::from("🍳 Найденные рецепты:\n\n");
    for (i, recipe) in recipes.iter().enumerate() {
        answer.push_str(&format!(
            "{}. {} ({} мин.)\n",
            i + 1,
            escape_html(&recipe.title),
            recipe.cooking_time
        ));
    }
    answer.push_str("\n📝 Для просмотра рецепта введите его номер:");
    answer
}

pub fn format_recipe_details(recipe: &Recipe) -> String {
    format!(
        "<b>{}</b>\n\n🎯Сложность: {}\n⏱️Время приготовления: {} мин\n📋Инструкция:\n{}",
        escape_html(&recipe.title),
        escape_html(&recipe.difficulty),
        recipe.cooking_time,
        escape_html(&recipe.instructions)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use tokio_util::sync::CancellationToken;

    fn recipe(id: i64, title: &str, ingredients: &[&str], cooking_time: i64) -> Recipe {
        Recipe {
            id,
            title: title.to_string(),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            instructions: format!("Готовить {cooking_time} минут"),
            cooking_time,
            difficulty: "easy".to_string(),
        }
    }

    fn bot() -> ChatBot<Vec<Recipe>> {
        let store = vec![
            recipe(1, "Курица с картошкой", &["курица", "картошка", "лук"], 40),
            recipe(2, "Яичница с помидорами", &["яйца", "помидоры"], 10),
            recipe(3, "Суп куриный", &["курица", "картошка", "вермишель"], 60),
        ];
        ChatBot::new(
            SearchEngine::new(store),
            SessionStore::new(Duration::from_secs(60)),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn test_product_search_then_select() {
        let bot = bot();

        let reply = bot.handle_message("chat", "/product картошка, лук").await;
        assert!(reply.contains("1. Курица с картошкой (40 мин.)"));
        assert!(reply.contains("2. Суп куриный (60 мин.)"));
        assert!(!reply.contains("Яичница"));

        let reply = bot.handle_message("chat", "2").await;
        assert!(reply.starts_with("<b>Суп куриный</b>"));
        assert!(reply.contains("Готовить 60 минут"));

        assert_eq!(bot.handle_message("chat", "7").await, BAD_NUMBER);
    }

    #[tokio::test]
    async fn test_name_search_is_per_conversation() {
        let bot = bot();

        bot.handle_message("alice", "/name яичница").await;
        bot.handle_message("bob", "/name суп").await;

        assert!(bot
            .handle_message("alice", "1")
            .await
            .contains("Яичница с помидорами"));
        assert!(bot.handle_message("bob", "1").await.contains("Суп куриный"));
        assert_eq!(bot.handle_message("carol", "1").await, SEARCH_FIRST);
    }

    #[tokio::test]
    async fn test_nothing_found_clears_previous_list() {
        let bot = bot();

        bot.handle_message("chat", "/name суп").await;
        assert_eq!(bot.handle_message("chat", "/name торт").await, NOTHING_FOUND);
        assert_eq!(bot.handle_message("chat", "1").await, SEARCH_FIRST);
    }

    #[tokio::test]
    async fn test_usage_and_unknown() {
        let bot = bot();
        assert_eq!(bot.handle_message("chat", "/name").await, NAME_USAGE);
        assert_eq!(bot.handle_message("chat", "/product").await, PRODUCT_USAGE);
        assert_eq!(bot.handle_message("chat", "/start").await, GREETING);
        assert!(bot.handle_message("chat", "/help").await.contains("/product"));
        assert_eq!(bot.handle_message("chat", "hello").await, UNKNOWN_COMMAND);
    }

    struct BrokenStore;

    impl RecipeStore for BrokenStore {
        async fn list_all(&self, _cancel: &CancellationToken) -> Result<Vec<Recipe>> {
            Err(Error::Database(sqlx::Error::PoolClosed))
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_reported() {
        let bot = ChatBot::new(
            SearchEngine::new(BrokenStore),
            SessionStore::new(Duration::from_secs(60)),
            Duration::from_secs(5),
        );
        assert_eq!(bot.handle_message("chat", "/name суп").await, SEARCH_FAILED);
    }

    #[test]
    fn test_details_are_escaped() {
        let mut r = recipe(1, "Fish & <Chips>", &[], 15);
        r.instructions = "Fry".to_string();
        let details = format_recipe_details(&r);
        assert!(details.starts_with("<b>Fish &amp; &lt;Chips&gt;</b>"));
        assert!(details.contains("⏱️Время приготовления: 15 мин"));
    }
}
