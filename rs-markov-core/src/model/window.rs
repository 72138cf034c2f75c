use super::token::Token;

/// Sliding buffer of the `order` most recent tokens.
///
/// This is the mutable working copy used while building and generating.
/// Keys stored in the [`PrefixIndex`](super::prefix_index::PrefixIndex) are
/// separate owned copies and never change once inserted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Window {
	tokens: Vec<Token>,
}

impl Window {
	/// Creates a window of `order` sentinels.
	pub fn new(order: usize) -> Self {
		Self { tokens: vec![Token::Sentinel; order] }
	}

	pub fn order(&self) -> usize {
		self.tokens.len()
	}

	/// Drops the oldest token and appends `token` at the end.
	pub fn slide(&mut self, token: Token) {
		if self.tokens.is_empty() {
			return;
		}
		self.tokens.rotate_left(1);
		if let Some(last) = self.tokens.last_mut() {
			*last = token;
		}
	}

	pub fn as_slice(&self) -> &[Token] {
		&self.tokens
	}
}
