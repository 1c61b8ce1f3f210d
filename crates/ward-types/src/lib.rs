//! Validated text primitives shared across the Ward crates.
//!
//! Free text entering the system from forms or the CLI is checked here once, so the
//! domain code can rely on values being present and trimmed.

/// Errors raised when constructing a validated text value.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextError {
    /// The input was empty or whitespace only.
    #[error("Text cannot be empty")]
    Empty,
    /// A room number contained characters other than ASCII letters, digits or '-'.
    #[error("invalid room number: {0}")]
    InvalidRoom(String),
}

/// A trimmed string with at least one non-whitespace character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Trims `input` and rejects it if nothing is left.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identifier of a ward room, e.g. `"17"`.
///
/// Rooms handed out by the admission synthesizer are the decimal numbers `1..=40`, but staff
/// may type other labels when editing a record, so any short alphanumeric label is accepted.
/// Comparison is on the trimmed label. All-digit labels are stored without leading zeros, so
/// `"01"` and `"1"` name the same room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomNumber(String);

impl RoomNumber {
    const MAX_LEN: usize = 16;

    /// Parses a room label typed by a user.
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        let ok = trimmed.len() <= Self::MAX_LEN
            && trimmed
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-');
        if !ok {
            return Err(TextError::InvalidRoom(trimmed.to_owned()));
        }
        if trimmed.bytes().all(|b| b.is_ascii_digit()) {
            let digits = trimmed.trim_start_matches('0');
            return Ok(Self(if digits.is_empty() { "0" } else { digits }.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Room for a numeric pool slot.
    pub fn from_number(number: u16) -> Self {
        Self(number.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for RoomNumber {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for RoomNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for RoomNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RoomNumber::parse(&s).map_err(serde::de::Error::custom)
    }
}
