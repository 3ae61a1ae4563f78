//! PhonoShift family (spec §4.3): Latin/PT text rotated to other Latin/PT
//! text, phonetic class preserved (vowels stay vowels, consonants stay
//! consonants).

use crate::alphabet::{rotate_digit_raw, rotate_in_set_no_zero};
use crate::keystream::{derive_keystream, Cursor};
use crate::punct::punct_shift_latin;
use crate::sets::{C_LO, CED_LO, CED_UP, V_LO, VPT_LO, VPT_UP};
use tracing::debug;

/// Core PhonoShift operation. `direction = 1` encrypts, `direction = -1`
/// decrypts.
pub fn phono_transform(text: &str, password: &str, iterations: u32, salt: &str, direction: i64) -> String {
	if text.is_empty() {
		return String::new();
	}
	debug!(direction, scalars = text.chars().count(), "phono_transform");
	let need = text.chars().count() + 64;
	let ks = derive_keystream(password, salt, iterations, need);
	let mut cur = Cursor::new(&ks);

	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		if matches!(c, separator_range!()) {
			out.push(c);
			continue;
		}

		let b = cur.next_byte();
		let shift = (b as i64 + 1) * direction;

		if c.is_ascii_digit() {
			let d = c as u8 - b'0';
			out.push((b'0' + rotate_digit_raw(d, shift)) as char);
			continue;
		}

		let upper = c.is_ascii_uppercase() || VPT_UP.contains(c) || c == 'Ç';
		let folded = if c.is_ascii_uppercase() { c.to_ascii_lowercase() } else { c };

		if V_LO.contains(folded) {
			let ch = rotate_in_set_no_zero(&V_LO, folded, shift);
			out.push(if upper { ch.to_ascii_uppercase() } else { ch });
		} else if C_LO.contains(folded) {
			let ch = rotate_in_set_no_zero(&C_LO, folded, shift);
			out.push(if upper { ch.to_ascii_uppercase() } else { ch });
		} else if VPT_LO.contains(c) {
			out.push(rotate_in_set_no_zero(&VPT_LO, c, shift));
		} else if VPT_UP.contains(c) {
			out.push(rotate_in_set_no_zero(&VPT_UP, c, shift));
		} else if CED_LO.contains(c) {
			out.push(rotate_in_set_no_zero(&CED_LO, c, shift));
		} else if CED_UP.contains(c) {
			out.push(rotate_in_set_no_zero(&CED_UP, c, shift));
		} else {
			out.push(c);
		}
	}
	out
}

/// `rot500k_encrypt` (spec §6): PhonoShift core, plus the optional Latin
/// punctuation shift applied after encryption.
pub fn encrypt(text: &str, password: &str, iterations: u32, salt: &str, shift_punct: bool) -> String {
	let cipher = phono_transform(text, password, iterations, salt, 1);
	if shift_punct {
		punct_shift_latin(&cipher, password, iterations, salt, 1)
	} else {
		cipher
	}
}

/// `rot500k_decrypt` (spec §6): inverse of [`encrypt`].
pub fn decrypt(text: &str, password: &str, iterations: u32, salt: &str, shift_punct: bool) -> String {
	let base = if shift_punct {
		punct_shift_latin(text, password, iterations, salt, -1)
	} else {
		text.to_string()
	};
	phono_transform(&base, password, iterations, salt, -1)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_roundtrip_basic_sentence() {
		let s = "Vamos lá!";
		let enc = encrypt(s, "pw", 10, "salt", true);
		let dec = decrypt(&enc, "pw", 10, "salt", true);
		assert_eq!(dec, s);
	}

	#[test]
	fn test_roundtrip_without_punct_shift() {
		let s = "Hello, world! 2024";
		let enc = encrypt(s, "pw", 10, "salt", false);
		let dec = decrypt(&enc, "pw", 10, "salt", false);
		assert_eq!(dec, s);
	}

	#[test]
	fn test_separators_preserved_verbatim() {
		let s = "ab-cd'ef gh";
		let enc = encrypt(s, "pw", 10, "salt", false);
		assert_eq!(enc.chars().filter(|c| matches!(c, '-' | '\'' | ' ')).count(), 3);
		for (a, b) in s.chars().zip(enc.chars()) {
			if matches!(a, '-' | '\'' | ' ') {
				assert_eq!(a, b);
			}
		}
	}

	#[test]
	fn test_case_preserved() {
		let enc = encrypt("ABC", "pw", 10, "salt", false);
		assert!(enc.chars().all(|c| c.is_ascii_uppercase()));
	}

	#[test]
	fn test_digit_rotation_changes_output_somewhere() {
		let enc = encrypt("0000000000", "pw", 10, "salt", false);
		assert_ne!(enc, "0000000000");
	}

	#[test]
	fn test_deterministic() {
		let a = encrypt("same input", "pw", 10, "salt", true);
		let b = encrypt("same input", "pw", 10, "salt", true);
		assert_eq!(a, b);
	}

	#[test]
	fn test_empty_text() {
		assert_eq!(encrypt("", "pw", 10, "salt", true), "");
		assert_eq!(decrypt("", "pw", 10, "salt", true), "");
	}
}
