//! JP-Native family (spec §4.5): Japanese text rotated onto Japanese text,
//! with embedded ASCII letters/digits rotated in place instead of
//! transliterated to kana.

use crate::alphabet::{digit_value, effective_shift, fullwidth_digit, rotate_codepoint_range_no_zero, rotate_in_set_allow_zero};
use crate::constants::{HIRAGANA_END, HIRAGANA_START, KANJI_END, KANJI_START, KATAKANA_END, KATAKANA_START};
use crate::keystream::{derive_keystream, Cursor, JPNATIVE_ASCII_DOMAIN};
use crate::punct::{punct_shift_jp, punct_translate};
use crate::sets::{C_LO, V_LO};
use tracing::debug;

/// Core JP-native operation. Derives its own domain-salted keystream (spec
/// §4.1) independent of [`crate::phono::phono_transform`]'s.
pub fn jpnative_transform(text: &str, password: &str, iterations: u32, salt: &str, direction: i64) -> String {
	if text.is_empty() {
		return String::new();
	}
	let domain_salt = format!("{}{}", salt, JPNATIVE_ASCII_DOMAIN);
	let need = text.chars().count() + 64;
	let ks = derive_keystream(password, &domain_salt, iterations, need);
	let mut cur = Cursor::new(&ks);

	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		if matches!(c, ' ' | '-' | '\'') || matches!(c, 'ー' | '々' | 'ゝ' | 'ゞ' | 'ヽ' | 'ヾ') {
			out.push(c);
			continue;
		}

		if let Some(d) = digit_value(c) {
			let b = cur.next_byte();
			let shift = b as i64 * direction;
			let eff = effective_shift(shift, 10);
			let nd = ((d as i64 + eff).rem_euclid(10)) as u8;
			if direction >= 0 {
				out.push(fullwidth_digit(nd));
			} else {
				out.push((b'0' + nd) as char);
			}
			continue;
		}

		if c.is_ascii_alphabetic() {
			let b = cur.next_byte();
			let shift = b as i64 * direction;
			let upper = c.is_ascii_uppercase();
			let folded = if upper { c.to_ascii_lowercase() } else { c };
			let rotated = if V_LO.contains(folded) {
				rotate_in_set_allow_zero(&V_LO, folded, shift)
			} else if C_LO.contains(folded) {
				rotate_in_set_allow_zero(&C_LO, folded, shift)
			} else {
				folded
			};
			out.push(if upper { rotated.to_ascii_uppercase() } else { rotated });
			continue;
		}

		let code = c as u32;
		if (HIRAGANA_START..=HIRAGANA_END).contains(&code) {
			let b = cur.next_byte();
			let shift = b as i64 * direction;
			out.push(rotate_codepoint_range_no_zero(c, shift, HIRAGANA_START, HIRAGANA_END));
		} else if (KATAKANA_START..=KATAKANA_END).contains(&code) {
			let b = cur.next_byte();
			let shift = b as i64 * direction;
			out.push(rotate_codepoint_range_no_zero(c, shift, KATAKANA_START, KATAKANA_END));
		} else if (KANJI_START..=KANJI_END).contains(&code) {
			let b = cur.next_byte();
			let shift = b as i64 * direction;
			out.push(rotate_codepoint_range_no_zero(c, shift, KANJI_START, KANJI_END));
		} else {
			out.push(c);
		}
	}
	out
}

/// `kanashift_jp_encrypt` (spec §4.5, §6).
pub fn jp_encrypt(text: &str, password: &str, iterations: u32, salt: &str, shift_punct: bool) -> String {
	let r = jpnative_transform(text, password, iterations, salt, 1);
	let r = punct_translate(&r, 1);
	if shift_punct {
		punct_shift_jp(&r, password, iterations, salt, 1)
	} else {
		r
	}
}

/// `kanashift_jp_decrypt` (spec §4.5, §6): inverse of [`jp_encrypt`].
pub fn jp_decrypt(text: &str, password: &str, iterations: u32, salt: &str, shift_punct: bool) -> String {
	let r = if shift_punct {
		punct_shift_jp(text, password, iterations, salt, -1)
	} else {
		text.to_string()
	};
	let r = punct_translate(&r, -1);
	jpnative_transform(&r, password, iterations, salt, -1)
}
