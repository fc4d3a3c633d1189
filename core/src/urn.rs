use crate::error::CoreError;
use crate::ports::{ParsedUrn, UrnParser};

/// Parses the common Sportradar-style URN shape `prefix:kind:id`, e.g.
/// `sr:sport:1` or `sr:match:12345`. Real deployments are expected to supply
/// their own [`UrnParser`] (URN parsing is an external collaborator per §1);
/// this one exists so the engine is runnable and testable standalone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimpleUrnParser;

impl UrnParser for SimpleUrnParser {
    fn parse(&self, urn: &str) -> Result<ParsedUrn, CoreError> {
        urn.rsplit(':')
            .next()
            .filter(|s| !s.is_empty())
            .and_then(|id| id.parse::<i64>().ok())
            .map(|id| ParsedUrn { id })
            .ok_or_else(|| CoreError::MalformedUrn(urn.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trailing_integer_segment() {
        let parsed = SimpleUrnParser.parse("sr:sport:1").unwrap();
        assert_eq!(parsed.id, 1);
    }

    #[test]
    fn rejects_non_numeric_segment() {
        assert!(SimpleUrnParser.parse("sr:sport:football").is_err());
    }

    #[test]
    fn rejects_empty_string() {
        assert!(SimpleUrnParser.parse("").is_err());
    }
}
