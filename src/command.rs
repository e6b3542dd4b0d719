//! Free-text command interpretation for voice and UI input.
//!
//! The speech-recognition collaborator hands over raw transcripts; this
//! module maps them onto navigation commands through a declared, ordered
//! pattern table. Matching is substring-based over a normalized transcript
//! (whitespace stripped, case-folded), and the first matching category
//! wins, so overlapping keyword sets resolve deterministically.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A navigation command recognized from free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    /// Jump to the first stitch of the next row
    AdvanceRow,
    /// One stitch forward
    AdvanceStitch,
    /// One stitch back
    RetreatStitch,
    /// Back to row 1, stitch 1
    Reset,
    /// Stop continuous listening (handled by the voice collaborator)
    StopListening,
    /// No keyword matched; performs no state change
    Unrecognized,
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::AdvanceRow => write!(f, "advance-row"),
            Command::AdvanceStitch => write!(f, "advance-stitch"),
            Command::RetreatStitch => write!(f, "retreat-stitch"),
            Command::Reset => write!(f, "reset"),
            Command::StopListening => write!(f, "stop-listening"),
            Command::Unrecognized => write!(f, "unrecognized"),
        }
    }
}

/// Ordered keyword table mapping transcripts to commands.
///
/// The synonym sets are the union observed across the product's input
/// modalities: the Japanese voice phrases, the `+`/`-` tokens from button
/// labels, and English equivalents. Evaluation order is fixed - row
/// advance before stitch forward before stitch back before reset before
/// stop - and is behaviorally significant for phrases that contain
/// keywords from more than one category.
#[derive(Debug, Clone)]
pub struct CommandInterpreter {
    rules: Vec<(Command, Regex)>,
}

impl Default for CommandInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandInterpreter {
    pub fn new() -> Self {
        let table: [(Command, &str); 5] = [
            (Command::AdvanceRow, "次の段|つぎのだん|次へ|すすむ|次|nextrow|rowplus"),
            (
                Command::AdvanceStitch,
                "目プラス|めぷらす|目を進め|一つ進|すすめ|プラス|\\+|nextstitch|stitchplus|plus|forward",
            ),
            (
                Command::RetreatStitch,
                "目マイナス|めまいなす|目を戻|一つ戻|もどる|マイナス|-|prevstitch|stitchminus|minus|back",
            ),
            (Command::Reset, "リセット|さいしょ|最初に戻|reset|startover"),
            (Command::StopListening, "終了|ストップ|やめる|停止|stop|quit"),
        ];
        let rules = table
            .into_iter()
            .map(|(command, pattern)| {
                // Hardcoded patterns; a failure here is a programming error.
                (command, Regex::new(pattern).unwrap())
            })
            .collect();
        Self { rules }
    }

    /// Map a transcript onto a command.
    ///
    /// # Examples
    ///
    /// ```
    /// use knitchart::command::{Command, CommandInterpreter};
    ///
    /// let interpreter = CommandInterpreter::new();
    /// assert_eq!(interpreter.interpret("次の段"), Command::AdvanceRow);
    /// assert_eq!(interpreter.interpret("stitch plus"), Command::AdvanceStitch);
    /// assert_eq!(interpreter.interpret("something else"), Command::Unrecognized);
    /// ```
    pub fn interpret(&self, text: &str) -> Command {
        let normalized: String =
            text.chars().filter(|c| !c.is_whitespace()).collect::<String>().to_lowercase();
        if normalized.is_empty() {
            return Command::Unrecognized;
        }
        for (command, pattern) in &self.rules {
            if pattern.is_match(&normalized) {
                return *command;
            }
        }
        Command::Unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interpreter() -> CommandInterpreter {
        CommandInterpreter::new()
    }

    #[test]
    fn test_advance_row_phrases() {
        let it = interpreter();
        for phrase in ["次の段", "つぎのだん", "次へ", "すすむ", "次", "next row", "row plus"] {
            assert_eq!(it.interpret(phrase), Command::AdvanceRow, "phrase: {phrase}");
        }
    }

    #[test]
    fn test_advance_stitch_phrases() {
        let it = interpreter();
        for phrase in ["目プラス", "めぷらす", "目を進めて", "一つ進む", "プラス", "+", "stitch plus", "plus", "forward"] {
            assert_eq!(it.interpret(phrase), Command::AdvanceStitch, "phrase: {phrase}");
        }
    }

    #[test]
    fn test_retreat_stitch_phrases() {
        let it = interpreter();
        for phrase in ["目マイナス", "めまいなす", "目を戻して", "一つ戻る", "もどる", "マイナス", "-", "stitch minus", "minus", "back"] {
            assert_eq!(it.interpret(phrase), Command::RetreatStitch, "phrase: {phrase}");
        }
    }

    #[test]
    fn test_reset_phrases() {
        let it = interpreter();
        for phrase in ["リセット", "さいしょ", "最初に戻って", "reset", "start over"] {
            assert_eq!(it.interpret(phrase), Command::Reset, "phrase: {phrase}");
        }
    }

    #[test]
    fn test_stop_phrases() {
        let it = interpreter();
        for phrase in ["終了", "ストップ", "やめる", "停止", "stop", "quit"] {
            assert_eq!(it.interpret(phrase), Command::StopListening, "phrase: {phrase}");
        }
    }

    #[test]
    fn test_unrecognized() {
        let it = interpreter();
        assert_eq!(it.interpret(""), Command::Unrecognized);
        assert_eq!(it.interpret("   "), Command::Unrecognized);
        assert_eq!(it.interpret("こんにちは"), Command::Unrecognized);
        assert_eq!(it.interpret("hello there"), Command::Unrecognized);
    }

    #[test]
    fn test_normalization_strips_whitespace_and_case() {
        let it = interpreter();
        assert_eq!(it.interpret("  次 の 段  "), Command::AdvanceRow);
        assert_eq!(it.interpret("STITCH PLUS"), Command::AdvanceStitch);
        assert_eq!(it.interpret("\u{3000}リセット\u{3000}"), Command::Reset);
    }

    #[test]
    fn test_order_resolves_overlapping_keywords() {
        let it = interpreter();
        // Contains both a "+"-like token and a stop token; stitch forward is
        // tested before stop, so it wins
        assert_eq!(it.interpret("プラス 停止"), Command::AdvanceStitch);
        // "次" is tested first of all, even inside a longer phrase
        assert_eq!(it.interpret("次をプラス"), Command::AdvanceRow);
        // Reset is tested before stop
        assert_eq!(it.interpret("リセットして停止"), Command::Reset);
    }

    #[test]
    fn test_row_plus_is_row_advance_not_stitch() {
        // "rowplus" contains "plus", but row advance is tested first
        assert_eq!(interpreter().interpret("row plus"), Command::AdvanceRow);
    }

    #[test]
    fn test_command_serde_names() {
        let json = serde_json::to_string(&Command::AdvanceRow).unwrap();
        assert_eq!(json, "\"advance-row\"");
        let parsed: Command = serde_json::from_str("\"stop-listening\"").unwrap();
        assert_eq!(parsed, Command::StopListening);
    }

    #[test]
    fn test_command_display_matches_serde() {
        for command in [
            Command::AdvanceRow,
            Command::AdvanceStitch,
            Command::RetreatStitch,
            Command::Reset,
            Command::StopListening,
            Command::Unrecognized,
        ] {
            let json = serde_json::to_string(&command).unwrap();
            assert_eq!(json.trim_matches('"'), command.to_string());
        }
    }
}
