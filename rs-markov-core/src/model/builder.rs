use log::{info, trace};

use super::prefix_index::PrefixIndex;
use super::token::Token;
use super::window::Window;
use crate::error::Result;

/// Incrementally trains a [`PrefixIndex`] from a token stream.
///
/// Every token is recorded as a suffix of the window that precedes it,
/// then the window slides over it. [`finish`](Self::finish) records the
/// sentinel after the last window so generation knows where the text ended.
///
/// The builder consumes itself on `finish`: an index is trained once and is
/// read-only afterwards.
#[derive(Debug)]
pub struct ChainBuilder {
	index: PrefixIndex,
	window: Window,
	tokens: usize,
}

impl ChainBuilder {
	/// Creates a builder for prefixes of `order` tokens.
	///
	/// # Errors
	/// Returns an error if `order` is 0.
	pub fn new(order: usize) -> Result<Self> {
		Ok(Self {
			index: PrefixIndex::new(order)?,
			window: Window::new(order),
			tokens: 0,
		})
	}

	/// Records `token` after the current window and slides over it.
	///
	/// # Errors
	/// Only fails on allocation failure; the builder should then be dropped.
	pub fn add(&mut self, token: impl Into<Token>) -> Result<()> {
		let token = token.into();
		trace!("{:?} -> {}", self.window.as_slice(), token);

		let entry = self.index.lookup_or_create(self.window.as_slice())?;
		self.index.insert_suffix(entry, token.clone())?;
		self.window.slide(token);
		self.tokens += 1;
		Ok(())
	}

	/// Number of tokens added so far (the final sentinel excluded).
	pub fn token_count(&self) -> usize {
		self.tokens
	}

	/// Terminates the stream with the sentinel and returns the trained index.
	pub fn finish(mut self) -> Result<PrefixIndex> {
		let entry = self.index.lookup_or_create(self.window.as_slice())?;
		self.index.insert_suffix(entry, Token::Sentinel)?;

		info!(
			"Chain built: {} tokens, {} prefixes, {} suffixes (order {})",
			self.tokens,
			self.index.len(),
			self.index.suffix_count(),
			self.index.order()
		);
		Ok(self.index)
	}
}

/// Builds a complete index of the given `order` from `tokens`.
///
/// # Errors
/// - `InvalidOrder` if `order` is 0
/// - `Allocation` if memory runs out; no partial index is returned
pub fn build<I>(tokens: I, order: usize) -> Result<PrefixIndex>
where
	I: IntoIterator,
	I::Item: Into<Token>,
{
	let mut builder = ChainBuilder::new(order)?;
	for token in tokens {
		builder.add(token)?;
	}
	builder.finish()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_stream_maps_sentinels_to_sentinel() {
		let index = build(Vec::<Token>::new(), 2).unwrap();
		assert_eq!(index.len(), 1);

		let entry = index.lookup(&[Token::Sentinel, Token::Sentinel]).unwrap();
		assert_eq!(entry.suffixes(), &[Token::Sentinel]);
	}

	#[test]
	fn every_token_is_a_suffix_of_exactly_one_prefix() {
		let words = ["a", "b", "a", "b", "a"];
		let index = build(words, 2).unwrap();

		// 5 words + the final sentinel
		assert_eq!(index.suffix_count(), words.len() + 1);

		let s = Token::Sentinel;
		let a = Token::from("a");
		let b = Token::from("b");
		let expected = [
			([s.clone(), s.clone()], vec![a.clone()]),
			([s.clone(), a.clone()], vec![b.clone()]),
			([a.clone(), b.clone()], vec![a.clone(), a.clone()]),
			([b.clone(), a.clone()], vec![b.clone(), s.clone()]),
		];
		assert_eq!(index.len(), expected.len());
		for (prefix, suffixes) in &expected {
			let entry = index.lookup(prefix).unwrap();
			assert_eq!(entry.suffixes(), suffixes.as_slice(), "after {:?}", prefix);
		}

		let windows: Vec<&[Token]> = index.entries().map(|entry| entry.prefix()).collect();
		let expected_windows: Vec<&[Token]> = expected.iter().map(|(prefix, _)| prefix.as_slice()).collect();
		assert_eq!(windows, expected_windows);
	}

	#[test]
	fn repeated_transitions_are_kept() {
		let index = build(["a", "b", "a", "b", "a"], 1).unwrap();

		let after_a = index.lookup(&[Token::from("a")]).unwrap();
		assert_eq!(after_a.occurrences(&"b".into()), 2);
		assert_eq!(after_a.occurrences(&Token::Sentinel), 1);

		let after_b = index.lookup(&[Token::from("b")]).unwrap();
		assert_eq!(after_b.suffixes(), &[Token::from("a"), Token::from("a")]);
	}

	#[test]
	fn builder_counts_tokens() {
		let mut builder = ChainBuilder::new(3).unwrap();
		builder.add("one").unwrap();
		builder.add(String::from("two")).unwrap();
		assert_eq!(builder.token_count(), 2);

		let index = builder.finish().unwrap();
		let last = [Token::Sentinel, Token::from("one"), Token::from("two")];
		assert_eq!(index.lookup(&last).unwrap().suffixes(), &[Token::Sentinel]);
	}

	#[test]
	fn rejects_order_zero() {
		assert!(build(["a"], 0).is_err());
	}
}
