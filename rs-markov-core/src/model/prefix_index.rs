use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;

use super::token::Token;
use crate::error::{ChainError, Result};

/// Handle to an entry of a [`PrefixIndex`].
///
/// Handles are only produced by [`PrefixIndex::lookup_or_create`] and stay
/// valid for the lifetime of the index (entries are never removed).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntryId(usize);

/// One prefix and every token observed right after it.
///
/// Conceptually, this is a node in a Markov chain. Unlike a counted
/// transition table, the suffix bag keeps one element per occurrence:
/// a token seen `k` times is stored `k` times, which is exactly what gives
/// it `k` times the chance of being sampled.
///
/// ## Invariants
/// - `prefix` is never modified after the entry is created
/// - `suffixes` keeps insertion order, so the `r`-th suffix is stable
#[derive(Clone, Debug)]
pub struct ChainEntry {
	prefix: Arc<[Token]>,
	suffixes: Vec<Token>,
}

impl ChainEntry {
	fn new(prefix: Arc<[Token]>) -> Self {
		Self { prefix, suffixes: Vec::new() }
	}

	pub fn prefix(&self) -> &[Token] {
		&self.prefix
	}

	/// All recorded suffixes, duplicates included, in insertion order.
	pub fn suffixes(&self) -> &[Token] {
		&self.suffixes
	}

	/// Number of suffix occurrences (not distinct tokens).
	pub fn len(&self) -> usize {
		self.suffixes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.suffixes.is_empty()
	}

	/// How many times `token` was recorded after this prefix.
	pub fn occurrences(&self, token: &Token) -> usize {
		self.suffixes.iter().filter(|suffix| *suffix == token).count()
	}

	/// Picks one suffix occurrence uniformly at random.
	///
	/// Draws `r` in `[0, len)` and returns the `r`-th stored suffix.
	/// Returns `None` if the bag is empty.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Token> {
		if self.suffixes.is_empty() {
			return None;
		}
		let r = rng.random_range(0..self.suffixes.len());
		self.suffixes.get(r)
	}

	fn push(&mut self, token: Token) -> Result<()> {
		self.suffixes.try_reserve(1)?;
		self.suffixes.push(token);
		Ok(())
	}
}

/// Maps every observed prefix of `order` tokens to its [`ChainEntry`].
///
/// # Responsibilities
/// - Exact, order-sensitive lookup of a prefix (`["a", "b"]` and `["b", "a"]`
///   are different keys)
/// - Creation of entries on first sight of a prefix
/// - Appending suffixes to an entry
///
/// # Invariants
/// - Every key has exactly `order` tokens
/// - Each distinct prefix owns exactly one entry
/// - Table and suffix bag growth go through `try_reserve`, so running out of
///   memory there is reported as [`ChainError::Allocation`]; the one owned
///   copy of a new key is an ordinary allocation
/// - A key is stored once and shared between the table and its entry
#[derive(Clone, Debug)]
pub struct PrefixIndex {
	order: usize,
	slots: HashMap<Arc<[Token]>, EntryId>,
	entries: Vec<ChainEntry>,
}

impl PrefixIndex {
	/// Creates an empty index for prefixes of `order` tokens.
	///
	/// # Errors
	/// Returns an error if `order` is 0.
	pub fn new(order: usize) -> Result<Self> {
		if order == 0 {
			return Err(ChainError::InvalidOrder(order));
		}
		Ok(Self { order, slots: HashMap::new(), entries: Vec::new() })
	}

	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct prefixes.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Total number of suffix occurrences across all entries.
	pub fn suffix_count(&self) -> usize {
		self.entries.iter().map(ChainEntry::len).sum()
	}

	/// Iterates over the entries in creation order.
	pub fn entries(&self) -> impl Iterator<Item = &ChainEntry> {
		self.entries.iter()
	}

	pub fn entry(&self, id: EntryId) -> Option<&ChainEntry> {
		self.entries.get(id.0)
	}

	/// Returns the entry for an exact prefix match.
	///
	/// Never creates anything. A prefix of the wrong length is simply absent.
	pub fn lookup(&self, prefix: &[Token]) -> Option<&ChainEntry> {
		let id = self.slots.get(prefix)?;
		self.entries.get(id.0)
	}

	/// Returns the entry for `prefix`, creating an empty one if needed.
	///
	/// The stored key is an owned copy; the caller's buffer can keep sliding.
	///
	/// # Errors
	/// - `PrefixLength` if `prefix` does not have `order` tokens
	/// - `Allocation` if the table cannot grow
	pub fn lookup_or_create(&mut self, prefix: &[Token]) -> Result<EntryId> {
		if prefix.len() != self.order {
			return Err(ChainError::PrefixLength { expected: self.order, found: prefix.len() });
		}
		if let Some(&id) = self.slots.get(prefix) {
			return Ok(id);
		}

		self.slots.try_reserve(1)?;
		self.entries.try_reserve(1)?;

		let id = EntryId(self.entries.len());
		let key: Arc<[Token]> = Arc::from(prefix);
		self.entries.push(ChainEntry::new(key.clone()));
		self.slots.insert(key, id);
		Ok(id)
	}

	/// Appends `token` to the suffix bag of `entry`.
	///
	/// # Errors
	/// - `UnknownEntry` if the handle does not belong to this index
	/// - `Allocation` if the bag cannot grow
	pub fn insert_suffix(&mut self, entry: EntryId, token: Token) -> Result<()> {
		self.entries
			.get_mut(entry.0)
			.ok_or(ChainError::UnknownEntry(entry.0))?
			.push(token)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn prefix(words: &[&str]) -> Vec<Token> {
		words.iter().map(|w| Token::from(*w)).collect()
	}

	#[test]
	fn rejects_order_zero() {
		assert!(matches!(PrefixIndex::new(0), Err(ChainError::InvalidOrder(0))));
	}

	#[test]
	fn lookup_does_not_create() {
		let index = PrefixIndex::new(2).unwrap();
		assert!(index.lookup(&prefix(&["a", "b"])).is_none());
		assert!(index.is_empty());
	}

	#[test]
	fn lookup_or_create_reuses_entries() {
		let mut index = PrefixIndex::new(2).unwrap();
		let first = index.lookup_or_create(&prefix(&["a", "b"])).unwrap();
		let second = index.lookup_or_create(&prefix(&["a", "b"])).unwrap();
		assert_eq!(first, second);
		assert_eq!(index.len(), 1);
	}

	#[test]
	fn keys_are_order_sensitive() {
		let mut index = PrefixIndex::new(2).unwrap();
		let ab = index.lookup_or_create(&prefix(&["a", "b"])).unwrap();
		let ba = index.lookup_or_create(&prefix(&["b", "a"])).unwrap();
		assert_ne!(ab, ba);
		assert_eq!(index.len(), 2);
	}

	#[test]
	fn entries_in_creation_order_share_their_key() {
		let mut index = PrefixIndex::new(2).unwrap();
		index.lookup_or_create(&prefix(&["b", "a"])).unwrap();
		index.lookup_or_create(&prefix(&["a", "b"])).unwrap();
		index.lookup_or_create(&prefix(&["b", "a"])).unwrap();

		let prefixes: Vec<&[Token]> = index.entries().map(ChainEntry::prefix).collect();
		assert_eq!(prefixes, vec![prefix(&["b", "a"]).as_slice(), prefix(&["a", "b"]).as_slice()]);

		for entry in &index.entries {
			let (key, _) = index.slots.get_key_value(entry.prefix()).unwrap();
			assert!(Arc::ptr_eq(key, &entry.prefix));
		}
	}

	#[test]
	fn wrong_prefix_length() {
		let mut index = PrefixIndex::new(2).unwrap();
		let err = index.lookup_or_create(&prefix(&["a"])).unwrap_err();
		assert!(matches!(err, ChainError::PrefixLength { expected: 2, found: 1 }));
		assert!(index.lookup(&prefix(&["a"])).is_none());
	}

	#[test]
	fn suffixes_keep_duplicates_in_order() {
		let mut index = PrefixIndex::new(1).unwrap();
		let id = index.lookup_or_create(&prefix(&["x"])).unwrap();
		for word in ["b", "a", "b"] {
			index.insert_suffix(id, word.into()).unwrap();
		}

		let entry = index.lookup(&prefix(&["x"])).unwrap();
		assert_eq!(entry.prefix(), prefix(&["x"]).as_slice());
		assert_eq!(entry.suffixes(), prefix(&["b", "a", "b"]).as_slice());
		assert_eq!(entry.occurrences(&"b".into()), 2);
		assert_eq!(index.suffix_count(), 3);
	}

	#[test]
	fn unknown_entry_is_rejected() {
		let mut index = PrefixIndex::new(1).unwrap();
		let err = index.insert_suffix(EntryId(7), "a".into()).unwrap_err();
		assert!(matches!(err, ChainError::UnknownEntry(7)));
	}

	#[test]
	fn sample_from_empty_entry() {
		let mut index = PrefixIndex::new(1).unwrap();
		let id = index.lookup_or_create(&prefix(&["x"])).unwrap();
		let mut rng = StdRng::seed_from_u64(1);
		assert!(index.entry(id).unwrap().sample(&mut rng).is_none());
	}

	#[test]
	fn sample_returns_a_stored_suffix() {
		let mut index = PrefixIndex::new(1).unwrap();
		let id = index.lookup_or_create(&prefix(&["x"])).unwrap();
		index.insert_suffix(id, "a".into()).unwrap();
		index.insert_suffix(id, "b".into()).unwrap();

		let mut rng = StdRng::seed_from_u64(42);
		let entry = index.entry(id).unwrap();
		for _ in 0..50 {
			let token = entry.sample(&mut rng).unwrap();
			assert!(entry.suffixes().contains(token));
		}
	}
}
