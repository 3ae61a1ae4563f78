//! Keyed, format-preserving text obfuscation.
//!
//! `rot500k` rotates the letters and digits of a string into other letters
//! and digits of the same or a paired script, under a password-derived
//! keystream, so the result stays pronounceable/printable and is exactly
//! invertible with the same password. It is an obfuscation primitive, not
//! encryption: rotation within small fixed alphabets does not carry
//! cryptographic secrecy guarantees.
//!
//! Three families share the same keystream derivation and rotation
//! primitives:
//! - [`rot500k_encrypt`]/[`rot500k_decrypt`] and friends: PhonoShift,
//!   Latin/Portuguese text to Latin/Portuguese text.
//! - [`kanashift_skin_encrypt`]/[`kanashift_skin_decrypt`]: Kana-Skin,
//!   Latin/Portuguese text to kana.
//! - [`kanashift_jp_encrypt`]/[`kanashift_jp_decrypt`]: JP-Native, Japanese
//!   text to Japanese text, with embedded ASCII rotated in place.
//!
//! Each family has a token-tagged (`KT`) variant that appends a per-token
//! HMAC check, letting a decoder detect a wrong password instead of
//! silently returning noise. PhonoShift additionally has a pronounceable
//! prefix-tagged (`KP`) variant and a `KV` auto-selecting facade over the
//! two ([`rot500kv`]/[`rot500kv_decrypt`]).

#[macro_use]
extern crate lazy_static;

#[macro_use]
mod ranges;

mod alphabet;
mod constants;
mod error;
mod jpnative;
mod keystream;
mod params;
mod phono;
mod punct;
mod sets;
mod skin;
mod verify;

pub use error::{Result, RotError};
pub use params::{Params, DEFAULT_CHECK_CHARS, DEFAULT_ITERATIONS, DEFAULT_SALT};
pub use verify::{looks_like_cipher, should_use_token, VerifiedResult};

use verify::Family;

/// `rot500k_encrypt` (spec §6): PhonoShift core, Latin/Portuguese to
/// Latin/Portuguese.
pub fn rot500k_encrypt(
	text: &str,
	password: &str,
	iterations: u32,
	salt: &str,
	shift_punct: bool,
) -> String {
	phono::encrypt(text, password, params::clamp_iterations(iterations), salt, shift_punct)
}

/// `rot500k_decrypt` (spec §6): inverse of [`rot500k_encrypt`].
pub fn rot500k_decrypt(
	text: &str,
	password: &str,
	iterations: u32,
	salt: &str,
	shift_punct: bool,
) -> String {
	phono::decrypt(text, password, params::clamp_iterations(iterations), salt, shift_punct)
}

/// `rot500k_token_tagged` (spec §6): PhonoShift + per-token HMAC check (KT).
pub fn rot500k_token_tagged(
	text: &str,
	password: &str,
	iterations: u32,
	salt: &str,
	check_chars: usize,
	shift_punct: bool,
) -> Result<String> {
	verify::kt_encrypt(Family::Phono, text, password, iterations, salt, check_chars, shift_punct)
}

/// `rot500k_token_tagged_decrypt` (spec §6): inverse of
/// [`rot500k_token_tagged`].
pub fn rot500k_token_tagged_decrypt(
	text: &str,
	password: &str,
	iterations: u32,
	salt: &str,
	check_chars: usize,
	shift_punct: bool,
) -> VerifiedResult {
	verify::kt_decrypt(Family::Phono, text, password, iterations, salt, check_chars, shift_punct)
}

/// `rot500k_prefix_tagged` (spec §6): PhonoShift + pronounceable HMAC prefix
/// (KP).
pub fn rot500k_prefix_tagged(text: &str, password: &str, iterations: u32, salt: &str, shift_punct: bool) -> String {
	verify::kp_encrypt(text, password, iterations, salt, shift_punct)
}

/// `rot500k_prefix_tagged_decrypt` (spec §6): inverse of
/// [`rot500k_prefix_tagged`].
pub fn rot500k_prefix_tagged_decrypt(
	text: &str,
	password: &str,
	iterations: u32,
	salt: &str,
	shift_punct: bool,
) -> VerifiedResult {
	verify::kp_decrypt(text, password, iterations, salt, shift_punct)
}

/// `rot500kv` (spec §6): auto-selecting facade over KT and KP, idempotence-
/// guarded against re-encrypting text that already looks like ciphertext.
pub fn rot500kv(text: &str, password: &str, iterations: u32, salt: &str, check_chars: usize, shift_punct: bool) -> String {
	verify::kv_encrypt(text, password, iterations, salt, check_chars, shift_punct)
}

/// `rot500kv_decrypt` (spec §6): tries KT then KP.
pub fn rot500kv_decrypt(
	text: &str,
	password: &str,
	iterations: u32,
	salt: &str,
	check_chars: usize,
	shift_punct: bool,
) -> VerifiedResult {
	verify::kv_decrypt(text, password, iterations, salt, check_chars, shift_punct)
}

/// `kanashift_skin_encrypt` (spec §6): Kana-Skin core, Latin/Portuguese to
/// kana.
pub fn kanashift_skin_encrypt(text: &str, password: &str, iterations: u32, salt: &str, shift_punct: bool) -> String {
	skin::skin_encrypt(text, password, params::clamp_iterations(iterations), salt, shift_punct)
}

/// `kanashift_skin_decrypt` (spec §6): inverse of [`kanashift_skin_encrypt`].
pub fn kanashift_skin_decrypt(text: &str, password: &str, iterations: u32, salt: &str, shift_punct: bool) -> String {
	skin::skin_decrypt(text, password, params::clamp_iterations(iterations), salt, shift_punct)
}

/// `kanashift_skin_token_encrypt` (spec §6): Kana-Skin + per-token HMAC
/// check (KT).
pub fn kanashift_skin_token_encrypt(
	text: &str,
	password: &str,
	iterations: u32,
	salt: &str,
	check_chars: usize,
	shift_punct: bool,
) -> Result<String> {
	verify::kt_encrypt(Family::Skin, text, password, iterations, salt, check_chars, shift_punct)
}

/// `kanashift_skin_token_decrypt` (spec §6): inverse of
/// [`kanashift_skin_token_encrypt`].
pub fn kanashift_skin_token_decrypt(
	text: &str,
	password: &str,
	iterations: u32,
	salt: &str,
	check_chars: usize,
	shift_punct: bool,
) -> VerifiedResult {
	verify::kt_decrypt(Family::Skin, text, password, iterations, salt, check_chars, shift_punct)
}

/// `kanashift_jp_encrypt` (spec §6): JP-Native core, Japanese to Japanese.
pub fn kanashift_jp_encrypt(text: &str, password: &str, iterations: u32, salt: &str, shift_punct: bool) -> String {
	jpnative::jp_encrypt(text, password, params::clamp_iterations(iterations), salt, shift_punct)
}

/// `kanashift_jp_decrypt` (spec §6): inverse of [`kanashift_jp_encrypt`].
pub fn kanashift_jp_decrypt(text: &str, password: &str, iterations: u32, salt: &str, shift_punct: bool) -> String {
	jpnative::jp_decrypt(text, password, params::clamp_iterations(iterations), salt, shift_punct)
}

/// `kanashift_jp_token_encrypt` (spec §6): JP-Native + per-token HMAC check
/// (KT).
pub fn kanashift_jp_token_encrypt(
	text: &str,
	password: &str,
	iterations: u32,
	salt: &str,
	check_chars: usize,
	shift_punct: bool,
) -> Result<String> {
	verify::kt_encrypt(Family::JpNative, text, password, iterations, salt, check_chars, shift_punct)
}

/// `kanashift_jp_token_decrypt` (spec §6): inverse of
/// [`kanashift_jp_token_encrypt`].
pub fn kanashift_jp_token_decrypt(
	text: &str,
	password: &str,
	iterations: u32,
	salt: &str,
	check_chars: usize,
	shift_punct: bool,
) -> VerifiedResult {
	verify::kt_decrypt(Family::JpNative, text, password, iterations, salt, check_chars, shift_punct)
}

/// Run a family's core encrypt/decrypt pair via a [`Params`] bundle, the
/// convenience form of the free-function API above.
impl Params {
	/// PhonoShift encrypt using this bundle's parameters.
	pub fn phono_encrypt(&self, text: &str) -> String {
		rot500k_encrypt(text, &self.password, self.iterations, &self.salt, self.shift_punct)
	}

	/// PhonoShift decrypt using this bundle's parameters.
	pub fn phono_decrypt(&self, text: &str) -> String {
		rot500k_decrypt(text, &self.password, self.iterations, &self.salt, self.shift_punct)
	}

	/// `rot500kv` encrypt using this bundle's parameters.
	pub fn kv_encrypt(&self, text: &str) -> String {
		rot500kv(text, &self.password, self.iterations, &self.salt, self.check_chars, self.shift_punct)
	}

	/// `rot500kv_decrypt` using this bundle's parameters.
	pub fn kv_decrypt(&self, text: &str) -> VerifiedResult {
		rot500kv_decrypt(text, &self.password, self.iterations, &self.salt, self.check_chars, self.shift_punct)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Installs a `tracing` subscriber so the `debug!`/`trace!`/`info!` calls
	/// scattered through the family transforms and the verification layer are
	/// visible under `cargo test -- --nocapture`. Idempotent: later calls
	/// across other test threads just see `try_init` fail quietly.
	fn init_tracing() {
		let _ = tracing_subscriber::fmt().with_test_writer().try_init();
	}

	#[test]
	fn test_rot500k_roundtrip() {
		init_tracing();
		let s = "Vamos lá, amigo!";
		let enc = rot500k_encrypt(s, "pw", 1000, "salt", true);
		let dec = rot500k_decrypt(&enc, "pw", 1000, "salt", true);
		assert_eq!(dec, s);
	}

	#[test]
	fn test_rot500k_token_tagged_roundtrip_and_failure() {
		let s = "hello world";
		let enc = rot500k_token_tagged(s, "pw", 1000, "salt", 1, true).unwrap();
		let ok = rot500k_token_tagged_decrypt(&enc, "pw", 1000, "salt", 1, true);
		assert!(ok.ok);
		assert_eq!(ok.value, s);

		let bad = rot500k_token_tagged_decrypt(&enc, "wrong-password", 1000, "salt", 1, true);
		assert!(!bad.ok);
		assert_eq!(bad.value, "");
	}

	#[test]
	fn test_rot500k_prefix_tagged_roundtrip() {
		let s = "hello world";
		let enc = rot500k_prefix_tagged(s, "pw", 1000, "salt", true);
		let dec = rot500k_prefix_tagged_decrypt(&enc, "pw", 1000, "salt", true);
		assert!(dec.ok);
		assert_eq!(dec.value, s);
	}

	#[test]
	fn test_kanashift_skin_roundtrip() {
		let s = "ABC 123";
		let enc = kanashift_skin_encrypt(s, "pw", 1000, "salt", true);
		let dec = kanashift_skin_decrypt(&enc, "pw", 1000, "salt", true);
		assert_eq!(dec, s);
	}

	#[test]
	fn test_kanashift_jp_roundtrip() {
		let s = "完了。それは本当ですか？";
		let enc = kanashift_jp_encrypt(s, "pw", 1000, "salt", true);
		let dec = kanashift_jp_decrypt(&enc, "pw", 1000, "salt", true);
		assert_eq!(dec, s);
	}

	#[test]
	fn test_params_builder_roundtrip() {
		let params = Params::new("pw").with_salt("mysalt").with_iterations(1000);
		let enc = params.phono_encrypt("hello there");
		let dec = params.phono_decrypt(&enc);
		assert_eq!(dec, "hello there");
	}

	#[test]
	fn test_iterations_clamp_applies_at_boundary() {
		let a = rot500k_encrypt("test", "pw", 0, "salt", true);
		let b = rot500k_encrypt("test", "pw", 1, "salt", true);
		assert_eq!(a, b);
	}
}
