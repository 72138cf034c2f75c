use std::fmt;
use std::sync::Arc;

/// A single unit of text in the chain.
///
/// Words are immutable and reference counted: the same allocation is shared
/// between the sliding window and every suffix bag it is stored in.
///
/// `Sentinel` marks both the start and the end of the stream. Being its own
/// variant, it can never be confused with a word read from the input, even
/// an empty one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Token {
	Sentinel,
	Word(Arc<str>),
}

impl Token {
	/// Creates a word token.
	pub fn word(text: impl Into<Arc<str>>) -> Self {
		Token::Word(text.into())
	}

	pub fn is_sentinel(&self) -> bool {
		matches!(self, Token::Sentinel)
	}

	/// Returns the text of a word, or `None` for the sentinel.
	pub fn as_word(&self) -> Option<&str> {
		match self {
			Token::Word(text) => Some(text),
			Token::Sentinel => None,
		}
	}
}

impl From<&str> for Token {
	fn from(text: &str) -> Self {
		Token::word(text)
	}
}

impl From<String> for Token {
	fn from(text: String) -> Self {
		Token::word(text)
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Token::Word(text) => f.write_str(text),
			Token::Sentinel => f.write_str("<sentinel>"),
		}
	}
}
