// Tagged token fields
//
// Tagged output looks like `class { name: "value" name: "value" }`. Values
// never contain a double quote, so no escaping is defined.

use std::fmt;

/// One `name: "value"` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{FIELD_CLOSE}", field_open(&self.name), self.value)
    }
}

/// A classified token: the class label and its fields in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    pub class: String,
    pub fields: Vec<Field>,
}

impl TaggedToken {
    /// Value of the first field called `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }
}

impl fmt::Display for TaggedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&token_open(&self.class))?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{field}")?;
        }
        f.write_str(TOKEN_CLOSE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("expected ':' after field name at byte {offset}")]
    MissingColon { offset: usize },
    #[error("invalid field name at byte {offset}")]
    InvalidName { offset: usize },
    #[error("expected '\"' to open field value at byte {offset}")]
    MissingQuote { offset: usize },
    #[error("unterminated field value at byte {offset}")]
    Unterminated { offset: usize },
    #[error("expected `class {{ ... }}` framing")]
    MissingBrace,
}

/// Closes a field value.
pub const FIELD_CLOSE: &str = "\"";

/// Closes a tagged token.
pub const TOKEN_CLOSE: &str = " }";

/// Text before a field value: `name: "`.
pub fn field_open(name: &str) -> String {
    format!("{name}: \"")
}

/// Text before a token's fields: `class { `.
pub fn token_open(class: &str) -> String {
    format!("{class} {{ ")
}

/// Parse a run of space-separated `name: "value"` fields.
pub fn parse_fields(text: &str) -> Result<Vec<Field>, TokenError> {
    let mut fields = Vec::new();
    let mut rest = text.trim_start();

    while !rest.is_empty() {
        let offset = text.len() - rest.len();
        let colon = rest.find(':').ok_or(TokenError::MissingColon { offset })?;
        let name = rest[..colon].trim_end();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(TokenError::InvalidName { offset });
        }

        let after = rest[colon + 1..].trim_start();
        let Some(body) = after.strip_prefix('"') else {
            return Err(TokenError::MissingQuote { offset });
        };
        let end = body.find('"').ok_or(TokenError::Unterminated { offset })?;

        fields.push(Field::new(name, &body[..end]));
        rest = body[end + 1..].trim_start();
    }

    Ok(fields)
}

/// Parse `class { fields }`.
pub fn parse_tagged(text: &str) -> Result<TaggedToken, TokenError> {
    let text = text.trim();
    let open = text.find('{').ok_or(TokenError::MissingBrace)?;
    let class = text[..open].trim();
    let inner = text[open + 1..]
        .strip_suffix('}')
        .ok_or(TokenError::MissingBrace)?;
    if class.is_empty() || class.contains(char::is_whitespace) {
        return Err(TokenError::MissingBrace);
    }
    Ok(TaggedToken {
        class: class.to_string(),
        fields: parse_fields(inner)?,
    })
}
