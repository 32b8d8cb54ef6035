// Emotion classification and coping advice

mod classifier;
mod coping;

pub use classifier::EmotionClassifier;
pub use coping::CopingAdvisor;
