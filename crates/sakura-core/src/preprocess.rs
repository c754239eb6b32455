use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    fn process(&self, text: &str) -> String;
}

/// Trim, NFKC-normalize and flatten line breaks
pub fn normalize(text: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return String::new();
    }

    let text: String = text.nfkc().collect();
    text.replace(['\n', '\r'], " ").trim().to_string()
}

/// Emoji and pictograph ranges that speech engines choke on
pub fn is_pictograph(c: char) -> bool {
    matches!(
        c as u32,
        0x1F600..=0x1F64F // emoticons
            | 0x1F300..=0x1F5FF // misc symbols and pictographs
            | 0x1F680..=0x1F6FF // transport and map
            | 0x1F1E0..=0x1F1FF // flags
            | 0x2600..=0x26FF // misc symbols
            | 0x2700..=0x27BF // dingbats
            | 0x1F900..=0x1F9FF // supplemental symbols and pictographs
            | 0x1FA00..=0x1FA6F // chess symbols
            | 0x1FA70..=0x1FAFF // symbols and pictographs extended-A
            | 0xFE00..=0xFE0F // variation selectors
            | 0x200D // zero width joiner
    )
}

/// Prepares assistant text for speech synthesis
pub struct SpeechPreprocessor;

impl Preprocessor for SpeechPreprocessor {
    fn process(&self, text: &str) -> String {
        let stripped: String = text.chars().filter(|c| !is_pictograph(*c)).collect();
        normalize(&stripped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_emoji_and_keeps_japanese() {
        let out = SpeechPreprocessor.process("こんにちは！😊🌸 元気ですか？✨");
        assert_eq!(out, "こんにちは! 元気ですか?");
    }

    #[test]
    fn emoji_only_text_becomes_empty() {
        assert!(SpeechPreprocessor.process(" 🎉❤️ ").is_empty());
    }

    #[test]
    fn normalizes_half_width_katakana() {
        assert_eq!(normalize("ｶﾀｶﾅ\nです"), "カタカナ です");
    }
}
