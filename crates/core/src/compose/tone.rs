use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stylistic directive passed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Professional,
    Inspirational,
    Witty,
    Casual,
    Formal,
}

impl Tone {
    /// Every tone, in the order a selector should offer them.
    pub const ALL: [Tone; 5] = [Tone::Professional, Tone::Inspirational, Tone::Witty, Tone::Casual, Tone::Formal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional",
            Tone::Inspirational => "Inspirational",
            Tone::Witty => "Witty",
            Tone::Casual => "Casual",
            Tone::Formal => "Formal",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tone {
    type Err = String;

    /// Case-insensitive match on the tone name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Tone::ALL.into_iter().find(|tone| tone.as_str().eq_ignore_ascii_case(wanted)).ok_or_else(|| {
            let names = Tone::ALL.iter().map(Tone::as_str).collect::<Vec<_>>().join(", ");
            format!("unknown tone '{wanted}', expected one of: {names}")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Professional", Tone::Professional)]
    #[case("witty", Tone::Witty)]
    #[case("  CASUAL ", Tone::Casual)]
    #[case("Inspirational", Tone::Inspirational)]
    #[case("formal", Tone::Formal)]
    fn test_parse_tone(#[case] input: &str, #[case] expected: Tone) {
        assert_eq!(input.parse::<Tone>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_tone() {
        let err = "sarcastic".parse::<Tone>().unwrap_err();
        assert!(err.contains("sarcastic"));
        assert!(err.contains("Professional, Inspirational, Witty, Casual, Formal"));
    }

    #[test]
    fn test_default_is_first_option() {
        assert_eq!(Tone::default(), Tone::ALL[0]);
    }

    #[test]
    fn test_display_round_trips() {
        for tone in Tone::ALL {
            assert_eq!(tone.to_string().parse::<Tone>().unwrap(), tone);
        }
    }
}
