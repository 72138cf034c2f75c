use std::iter::FusedIterator;

use log::debug;
use rand::Rng;

use super::prefix_index::PrefixIndex;
use super::window::Window;

/// Where a [`Generation`] currently stands.
///
/// `Running` is the only non-terminal state. Every `Stopped*` state is a
/// normal end of generation, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationState {
	Running,
	/// The current window was never seen during training.
	StoppedByMissingEntry,
	/// The entry for the current window has no suffix.
	StoppedByEmptyBag,
	/// The sentinel was drawn: the text ended naturally.
	StoppedBySentinel,
	/// `max_tokens` words were emitted.
	StoppedByLengthLimit,
}

impl GenerationState {
	pub fn is_stopped(self) -> bool {
		self != GenerationState::Running
	}
}

/// Lazy walk through a trained [`PrefixIndex`].
///
/// Each call to `next` performs one step of the chain:
/// - look up the current window
/// - draw one suffix occurrence uniformly at random
/// - stop on the sentinel, otherwise yield the word and slide the window
///
/// Yielded words borrow from the index, which is never modified, so any
/// number of generations may run over the same index.
///
/// Once stopped, the iterator keeps returning `None`.
pub struct Generation<'a, R: Rng> {
	index: &'a PrefixIndex,
	rng: R,
	window: Window,
	remaining: usize,
	emitted: usize,
	state: GenerationState,
}

/// Starts a generation from the sentinel window, producing at most
/// `max_tokens` words.
///
/// The random source is passed in rather than created, so a single
/// process-wide seed can drive every run (pass `&mut rng` to keep it).
pub fn generate<R: Rng>(index: &PrefixIndex, rng: R, max_tokens: usize) -> Generation<'_, R> {
	Generation {
		index,
		rng,
		window: Window::new(index.order()),
		remaining: max_tokens,
		emitted: 0,
		state: GenerationState::Running,
	}
}

/// Generates a whole text: words joined by single spaces, ending with a newline.
pub fn generate_text<R: Rng>(index: &PrefixIndex, rng: R, max_tokens: usize) -> String {
	let words: Vec<&str> = generate(index, rng, max_tokens).collect();
	let mut text = words.join(" ");
	text.push('\n');
	text
}

impl<'a, R: Rng> Generation<'a, R> {
	pub fn state(&self) -> GenerationState {
		self.state
	}

	/// Number of words yielded so far.
	pub fn emitted(&self) -> usize {
		self.emitted
	}

	fn stop(&mut self, state: GenerationState) -> Option<&'a str> {
		debug!("Generation stopped after {} words: {:?}", self.emitted, state);
		self.state = state;
		None
	}
}

impl<'a, R: Rng> Iterator for Generation<'a, R> {
	type Item = &'a str;

	fn next(&mut self) -> Option<&'a str> {
		if self.state.is_stopped() {
			return None;
		}
		if self.remaining == 0 {
			return self.stop(GenerationState::StoppedByLengthLimit);
		}

		let index = self.index;
		let Some(entry) = index.lookup(self.window.as_slice()) else {
			return self.stop(GenerationState::StoppedByMissingEntry);
		};
		let Some(token) = entry.sample(&mut self.rng) else {
			return self.stop(GenerationState::StoppedByEmptyBag);
		};
		let Some(word) = token.as_word() else {
			return self.stop(GenerationState::StoppedBySentinel);
		};

		self.window.slide(token.clone());
		self.remaining -= 1;
		self.emitted += 1;
		Some(word)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		if self.state.is_stopped() {
			(0, Some(0))
		} else {
			(0, Some(self.remaining))
		}
	}
}

impl<'a, R: Rng> FusedIterator for Generation<'a, R> {}
