//! Keystream derivation (spec §4.1).
//!
//! All layers derive a keyed byte stream from PBKDF2-HMAC-SHA256, the way
//! `maidos-auth` derives its token signatures from HMAC-SHA256
//! (examples/acegod818-MAIDOS-Series/maidos-shared/maidos-auth/src/token.rs);
//! here the "signature" is stretched into a cursor-addressable byte stream
//! instead of a single 32-byte tag.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::trace;

type HmacSha256 = Hmac<Sha256>;

/// Domain suffix appended to the salt before deriving the Latin punctuation
/// shift layer's keystream.
pub const PUNCT_SHIFT_LATIN_DOMAIN: &str = "|PunctShift:v1";

/// Domain suffix appended to the salt before deriving the JP punctuation
/// shift layer's keystream.
pub const PUNCT_SHIFT_JP_DOMAIN: &str = "|PunctShiftJP:v2";

/// Domain suffix appended to the salt before deriving the JP-native family's
/// ASCII-rotation keystream.
pub const JPNATIVE_ASCII_DOMAIN: &str = "|JPNative:v2|AsciiShift";

/// Derive a deterministic keystream of at least 32 bytes from `password` and
/// `salt` via PBKDF2-HMAC-SHA256.
///
/// Output length is `max(need_bytes, 32)`. Callers guarantee `iterations >= 1`
/// (enforced by [`crate::params::clamp_iterations`] at the API boundary).
pub fn derive_keystream(password: &str, salt: &str, iterations: u32, need_bytes: usize) -> Vec<u8> {
	let len = need_bytes.max(32);
	trace!(len, iterations, "deriving keystream");

	let mut out = vec![0u8; len];
	pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut out);
	out
}

/// HMAC-SHA256 of `msg_utf8` keyed by `key_utf8`.
pub fn hmac_sha256(key_utf8: &str, msg_utf8: &str) -> [u8; 32] {
	let mut mac =
		HmacSha256::new_from_slice(key_utf8.as_bytes()).expect("HMAC accepts keys of any length");
	mac.update(msg_utf8.as_bytes());
	mac.finalize().into_bytes().into()
}

/// A cursor into a keystream that wraps to 0 on exhaustion (spec §3
/// "Keystream", §9 "Keystream wrap").
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0 }
	}

	/// Read the next byte, advancing (and wrapping) the cursor.
	pub fn next_byte(&mut self) -> u8 {
		let b = self.bytes[self.pos];
		self.pos += 1;
		if self.pos >= self.bytes.len() {
			self.pos = 0;
		}
		b
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_derive_keystream_minimum_length() {
		let ks = derive_keystream("pw", "salt", 10, 4);
		assert_eq!(ks.len(), 32);
	}

	#[test]
	fn test_derive_keystream_grows_with_need() {
		let ks = derive_keystream("pw", "salt", 10, 100);
		assert_eq!(ks.len(), 100);
	}

	#[test]
	fn test_derive_keystream_deterministic() {
		let a = derive_keystream("pw", "salt", 1000, 64);
		let b = derive_keystream("pw", "salt", 1000, 64);
		assert_eq!(a, b);
	}

	#[test]
	fn test_derive_keystream_sensitive_to_params() {
		let base = derive_keystream("pw", "salt", 1000, 64);
		assert_ne!(base, derive_keystream("pw2", "salt", 1000, 64));
		assert_ne!(base, derive_keystream("pw", "salt2", 1000, 64));
		assert_ne!(base, derive_keystream("pw", "salt", 1001, 64));
	}

	#[test]
	fn test_hmac_sha256_deterministic() {
		let a = hmac_sha256("key", "msg");
		let b = hmac_sha256("key", "msg");
		assert_eq!(a, b);
		assert_ne!(a, hmac_sha256("key2", "msg"));
	}

	#[test]
	fn test_cursor_wraps() {
		let bytes = [1u8, 2, 3];
		let mut cur = Cursor::new(&bytes);
		assert_eq!(cur.next_byte(), 1);
		assert_eq!(cur.next_byte(), 2);
		assert_eq!(cur.next_byte(), 3);
		assert_eq!(cur.next_byte(), 1);
	}
}
