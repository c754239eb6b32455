pub mod recognizer;
pub mod stdin;
pub mod synth;

pub use recognizer::CommandRecognizer;
pub use stdin::{watch_lines, watch_stdin};
pub use synth::CommandSynthesizer;
