use std::collections::VecDeque;
use std::io::{BufRead, ErrorKind};

use log::warn;

use crate::model::token::Token;

/// Longest word, in characters, read as a single token by default.
pub const DEFAULT_MAX_TOKEN_LEN: usize = 99;

/// Lazily splits a reader into whitespace-delimited tokens.
///
/// - Reads one line at a time: memory use is bounded by the longest line,
///   not by the whole input
/// - Separators are the ASCII whitespace bytes (space, `\t`, `\n`, `\v`,
///   `\f`, `\r`); other Unicode spaces such as U+00A0 stay inside words
/// - Invalid UTF-8 is replaced, not rejected
/// - A word longer than `max_token_len` characters becomes several
///   consecutive tokens of at most `max_token_len` characters each
///   (`0` disables the bound)
/// - EOF or a read failure ends the stream; failures are logged
pub fn read_tokens<R: BufRead>(reader: R, max_token_len: usize) -> Tokens<R> {
	Tokens {
		reader,
		max_token_len,
		line: Vec::new(),
		pending: VecDeque::new(),
		done: false,
	}
}

/// Iterator returned by [`read_tokens`].
pub struct Tokens<R> {
	reader: R,
	max_token_len: usize,
	line: Vec<u8>,
	pending: VecDeque<Token>,
	done: bool,
}

impl<R: BufRead> Tokens<R> {
	fn split_line(&mut self) {
		let text = String::from_utf8_lossy(&self.line);
		for word in text.split(is_separator).filter(|word| !word.is_empty()) {
			push_bounded(&mut self.pending, word, self.max_token_len);
		}
	}
}

impl<R: BufRead> Iterator for Tokens<R> {
	type Item = Token;

	fn next(&mut self) -> Option<Token> {
		loop {
			if let Some(token) = self.pending.pop_front() {
				return Some(token);
			}
			if self.done {
				return None;
			}

			self.line.clear();
			match self.reader.read_until(b'\n', &mut self.line) {
				Ok(0) => self.done = true,
				Ok(_) => self.split_line(),
				Err(e) if e.kind() == ErrorKind::Interrupted => continue,
				Err(e) => {
					warn!("Input read failed, ending token stream: {}", e);
					self.done = true;
				}
			}
		}
	}
}

fn is_separator(c: char) -> bool {
	// `is_ascii_whitespace` leaves out the vertical tab
	c.is_ascii_whitespace() || c == '\x0b'
}

/// Pushes `word`, cut into pieces of at most `max_len` characters.
fn push_bounded(pending: &mut VecDeque<Token>, word: &str, max_len: usize) {
	if max_len == 0 {
		pending.push_back(word.into());
		return;
	}

	let mut start = 0;
	let mut count = 0;
	for (i, _) in word.char_indices() {
		if count == max_len {
			pending.push_back(word[start..i].into());
			start = i;
			count = 0;
		}
		count += 1;
	}
	pending.push_back(word[start..].into());
}
