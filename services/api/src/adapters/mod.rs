pub mod db;
pub mod emotion_llm;

pub use db::DbAdapter;
pub use emotion_llm::ChatCompletionEmotionAdapter;
