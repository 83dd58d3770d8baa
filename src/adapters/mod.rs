// Adapters layer: HTTP clients for the astrology API and the chat-completion API.

pub mod astrology;
pub mod groq;

pub use astrology::AstrologyApiService;
pub use groq::GroqAiService;
