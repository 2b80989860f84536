//! Storage keys and the Redis key builder.
//!
//! A [`StorageKey`] identifies one conversation for one bot. The
//! [`KeyBuilder`] turns it into a namespaced Redis key so several logical
//! bot instances can share a single backing store without colliding.

/// Identifies the conversation state slot for one chat/user pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StorageKey {
    pub bot_id: i64,
    pub chat_id: i64,
    pub user_id: i64,
}

impl StorageKey {
    pub fn new(bot_id: i64, chat_id: i64, user_id: i64) -> Self {
        Self {
            bot_id,
            chat_id,
            user_id,
        }
    }
}

/// Builds namespaced Redis keys from a [`StorageKey`].
///
/// `with_bot_id` scopes keys by bot identity; `with_destiny` appends a
/// per-deployment discriminator. Both default to on, matching a shared
/// Redis deployment.
#[derive(Debug, Clone)]
pub struct KeyBuilder {
    prefix: String,
    separator: char,
    with_bot_id: bool,
    with_destiny: bool,
    destiny: String,
}

impl Default for KeyBuilder {
    fn default() -> Self {
        Self {
            prefix: "fsm".to_string(),
            separator: ':',
            with_bot_id: true,
            with_destiny: true,
            destiny: "default".to_string(),
        }
    }
}

impl KeyBuilder {
    pub fn new(with_bot_id: bool, with_destiny: bool, destiny: impl Into<String>) -> Self {
        Self {
            with_bot_id,
            with_destiny,
            destiny: destiny.into(),
            ..Self::default()
        }
    }

    /// Renders the full Redis key for `key`.
    pub fn build(&self, key: &StorageKey) -> String {
        let mut parts = vec![self.prefix.clone()];
        if self.with_bot_id {
            parts.push(key.bot_id.to_string());
        }
        parts.push(key.chat_id.to_string());
        parts.push(key.user_id.to_string());
        if self.with_destiny {
            parts.push(self.destiny.clone());
        }
        parts.join(&self.separator.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_builder_default_includes_bot_id_and_destiny() {
        let builder = KeyBuilder::default();
        let key = StorageKey::new(42, 100, 200);
        assert_eq!(builder.build(&key), "fsm:42:100:200:default");
    }

    #[test]
    fn test_key_builder_without_bot_id() {
        let builder = KeyBuilder::new(false, true, "default");
        let key = StorageKey::new(42, 100, 200);
        assert_eq!(builder.build(&key), "fsm:100:200:default");
    }

    #[test]
    fn test_key_builder_without_destiny() {
        let builder = KeyBuilder::new(true, false, "default");
        let key = StorageKey::new(42, 100, 200);
        assert_eq!(builder.build(&key), "fsm:42:100:200");
    }

    #[test]
    fn test_key_builder_custom_destiny_separates_deployments() {
        let staging = KeyBuilder::new(true, true, "staging");
        let prod = KeyBuilder::new(true, true, "prod");
        let key = StorageKey::new(1, 2, 3);
        assert_ne!(staging.build(&key), prod.build(&key));
    }
}
