pub mod analysis;
pub mod domain;
pub mod ports;

pub use analysis::weekly_analysis;
pub use domain::{DailyEmotion, EmotionAnalysis, JournalEntry, NewJournalEntry, User, UserCredentials};
pub use ports::{DatabaseService, EmotionAnalysisService, PortError, PortResult};
