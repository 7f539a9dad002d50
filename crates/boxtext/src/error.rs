use thiserror::Error;

/// Failure to parse a configuration keyword such as `"justify"` or `"small-caps"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseKeywordError {
    #[error("unknown {attribute} value `{value}`")]
    UnknownValue {
        attribute: &'static str,
        value: String,
    },
    #[error("empty {attribute} value")]
    Empty { attribute: &'static str },
}

impl ParseKeywordError {
    pub(crate) fn unknown(attribute: &'static str, value: &str) -> Self {
        Self::UnknownValue {
            attribute,
            value: value.to_owned(),
        }
    }
}

/// Shared keyword lookup used by the `FromStr` impls of the config enums.
pub(crate) fn parse_keyword<T: Copy>(
    attribute: &'static str,
    value: &str,
    table: &[(&str, T)],
) -> Result<T, ParseKeywordError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ParseKeywordError::Empty { attribute });
    }

    table
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(value))
        .map(|(_, keyword)| *keyword)
        .ok_or_else(|| ParseKeywordError::unknown(attribute, value))
}
