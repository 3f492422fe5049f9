//! "Grewt" mentor chat.
//!
//! Wraps user text in a fixed persona prompt and forwards it to the
//! generative service. Replies never fail: a missing credential or a
//! service error yields a canned message instead.

use super::{GenerationConfig, GenerativeService};
use crate::store::{KeyValueStore, StoreError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Store key holding the chat transcript.
pub const HISTORY_KEY: &str = "chat-history";

const WELCOME: &str = "Hi 👋 I'm Grewt, your career buddy and wellness coach! Ask me anything about learning, roadmaps, skill-building, or let me help you stay healthy while coding! 🚀💚";

const OFFLINE_REPLY: &str = "Hi there! 🤖✨ I'm Grewt, your career buddy and wellness coach! While I'm having some technical difficulties connecting to my AI brain, I'm still here to cheer you on and remind you to stay healthy! 🚀💚 Keep practicing those skills - you're doing amazing! 🌱💪";

const ERROR_REPLY: &str = "Oops! 🤖💫 My circuits got a bit tangled there! But hey, that's okay - even robots have off days! Remember to take breaks, stay hydrated, and keep coding awesome! 🚀✨💚";

const PERSONA: &str = r#"You are Grewt, a friendly AI career mentor, wellness coach, and therapist for students using the SkillSync app. Your personality is:

- Mix of wise guru + supportive mentor + caring therapist + fun friend
- Motivational, positive, and encouraging about both career and mental/physical health
- Use emojis like 🌱🚀📘💪🎯✨💚🧘💧👀🚶 to make conversations engaging
- Give clear, actionable career and learning guidance
- Provide mental health support, stress management tips, and wellness reminders
- Encourage healthy coding habits: regular breaks, hydration, eye rest, posture, movement
- Address burnout, imposter syndrome, anxiety, and study stress with empathy
- Keep responses concise but helpful (2-4 sentences max)

When relevant, suggest SkillSync features:
- "Retake the assessment to see how your strengths have shifted! 🗺️"
- "Try the career games to discover your strengths! 🎮"
- "Your roadmap has some great resource recommendations! 📚"

For wellness topics, give specific actionable advice: hydration, the 20-20-20 rule for eye care, posture and stretches, stress management, sleep hygiene, mindfulness and breathing exercises."#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Mentor,
    Reminder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Persisted chat history.
#[derive(Debug, Clone, Default)]
pub struct ChatTranscript {
    messages: Vec<ChatMessage>,
}

impl ChatTranscript {
    /// Load the transcript from `store`, seeding the welcome message when
    /// there is no saved history.
    pub fn load<S: KeyValueStore>(store: &S) -> Result<Self, StoreError> {
        match store.get::<Vec<ChatMessage>>(HISTORY_KEY)? {
            Some(messages) if !messages.is_empty() => Ok(Self { messages }),
            _ => {
                let mut transcript = Self::default();
                transcript.push(ChatRole::Mentor, WELCOME);
                Ok(transcript)
            }
        }
    }

    /// Append a message and return it.
    pub fn push(&mut self, role: ChatRole, text: impl Into<String>) -> &ChatMessage {
        let id = self.messages.last().map_or(1, |m| m.id + 1);
        self.messages.push(ChatMessage {
            id,
            role,
            text: text.into(),
            timestamp: Utc::now(),
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn save<S: KeyValueStore>(&self, store: &mut S) -> Result<(), StoreError> {
        store.set(HISTORY_KEY, &self.messages)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

/// The mentor persona.
pub struct MentorChat {
    service: Option<Arc<dyn GenerativeService>>,
    generation: GenerationConfig,
}

impl MentorChat {
    /// Create a mentor; `None` selects the offline reply.
    pub fn new(service: Option<Arc<dyn GenerativeService>>, generation: GenerationConfig) -> Self {
        Self {
            service,
            generation,
        }
    }

    /// Default persona sampling.
    pub fn default_generation() -> GenerationConfig {
        GenerationConfig {
            temperature: 0.8,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 200,
        }
    }

    pub fn is_online(&self) -> bool {
        self.service.is_some()
    }

    /// Answer a user message.
    pub async fn reply(&self, message: &str) -> String {
        let Some(service) = &self.service else {
            debug!("No credential configured, using offline reply");
            return OFFLINE_REPLY.to_string();
        };

        match service.generate(&persona_prompt(message), &self.generation).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("Mentor reply failed: {}", e);
                ERROR_REPLY.to_string()
            }
        }
    }
}

/// Wrap a user message in the persona prompt.
pub fn persona_prompt(message: &str) -> String {
    format!(
        "{}\n\nUser message: \"{}\"\n\nRespond as Grewt with helpful advice, encouragement, wellness tips, and relevant SkillSync feature suggestions:",
        PERSONA,
        message.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ServiceError;
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct EchoService {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl GenerativeService for EchoService {
        async fn generate(
            &self,
            prompt: &str,
            generation: &GenerationConfig,
        ) -> Result<String, ServiceError> {
            assert_eq!(generation.max_output_tokens, 200);
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("  Stay curious! 🌱  ".to_string())
        }

        fn model_name(&self) -> &str {
            "echo"
        }
    }

    struct DownService;

    #[async_trait]
    impl GenerativeService for DownService {
        async fn generate(&self, _: &str, _: &GenerationConfig) -> Result<String, ServiceError> {
            Err(ServiceError::Status {
                status: 503,
                body: "unavailable".to_string(),
            })
        }

        fn model_name(&self) -> &str {
            "down"
        }
    }

    #[tokio::test]
    async fn test_offline_reply_without_service() {
        let mentor = MentorChat::new(None, MentorChat::default_generation());
        assert!(!mentor.is_online());
        assert_eq!(mentor.reply("hello").await, OFFLINE_REPLY);
    }

    #[tokio::test]
    async fn test_reply_uses_persona_prompt() {
        let service = Arc::new(EchoService {
            prompts: Mutex::new(Vec::new()),
        });
        let mentor = MentorChat::new(Some(service.clone()), MentorChat::default_generation());

        assert_eq!(mentor.reply("How do I beat burnout?").await, "Stay curious! 🌱");

        let prompts = service.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with("You are Grewt"));
        assert!(prompts[0].contains("User message: \"How do I beat burnout?\""));
    }

    #[test]
    fn test_service_error_yields_canned_reply() {
        let mentor = MentorChat::new(Some(Arc::new(DownService)), MentorChat::default_generation());
        let reply = tokio_test::block_on(mentor.reply("hi"));
        assert_eq!(reply, ERROR_REPLY);
    }

    #[test]
    fn test_transcript_seeds_welcome() {
        let store = MemoryStore::default();
        let transcript = ChatTranscript::load(&store).unwrap();
        assert_eq!(transcript.messages().len(), 1);
        assert_eq!(transcript.messages()[0].role, ChatRole::Mentor);
        assert_eq!(transcript.messages()[0].text, WELCOME);
    }

    #[test]
    fn test_transcript_roundtrip_through_store() {
        let mut store = MemoryStore::default();
        let mut transcript = ChatTranscript::load(&store).unwrap();
        transcript.push(ChatRole::User, "hi");
        transcript.push(ChatRole::Reminder, "drink water");
        transcript.save(&mut store).unwrap();

        let restored = ChatTranscript::load(&store).unwrap();
        let ids: Vec<_> = restored.messages().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(restored.messages()[2].role, ChatRole::Reminder);
    }
}
