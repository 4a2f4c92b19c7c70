/// What the learner typed in response to a question
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnswerInput {
    Value(f64),
    Skip,
    Quit,
    Invalid,
}

impl AnswerInput {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.to_lowercase().as_str() {
            "" => AnswerInput::Invalid,
            "quit" | "exit" => AnswerInput::Quit,
            "skip" | "s" => AnswerInput::Skip,
            _ => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => AnswerInput::Value(v),
                _ => AnswerInput::Invalid,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numbers() {
        assert_eq!(AnswerInput::parse("16.09"), AnswerInput::Value(16.09));
        assert_eq!(AnswerInput::parse("  -40 \n"), AnswerInput::Value(-40.0));
        assert_eq!(AnswerInput::parse("1e2"), AnswerInput::Value(100.0));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(AnswerInput::parse("quit"), AnswerInput::Quit);
        assert_eq!(AnswerInput::parse("EXIT"), AnswerInput::Quit);
        assert_eq!(AnswerInput::parse("skip"), AnswerInput::Skip);
        assert_eq!(AnswerInput::parse("s"), AnswerInput::Skip);
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(AnswerInput::parse(""), AnswerInput::Invalid);
        assert_eq!(AnswerInput::parse("abc"), AnswerInput::Invalid);
        assert_eq!(AnswerInput::parse("12km"), AnswerInput::Invalid);
        assert_eq!(AnswerInput::parse("inf"), AnswerInput::Invalid);
        assert_eq!(AnswerInput::parse("NaN"), AnswerInput::Invalid);
    }
}
