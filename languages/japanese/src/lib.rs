pub mod prompts;
pub mod tutor;

pub use prompts::{SYSTEM_INSTRUCTION, TRANSLATE_TEMPLATE, WORD_OF_THE_DAY_PROMPT};
pub use tutor::JapaneseTutor;
