//! Punctuation layer (spec §4.6): an unkeyed ASCII↔fullwidth translation
//! table plus two independently keyed punctuation-subset rotations.

use crate::alphabet::rotate_in_set_no_zero;
use crate::keystream::{derive_keystream, Cursor, PUNCT_SHIFT_JP_DOMAIN, PUNCT_SHIFT_LATIN_DOMAIN};
use crate::sets::{P_END_JP, P_END_LATIN, P_MID_JP, P_OPEN};

/// ASCII/fullwidth punctuation pairs, in table order (spec §4.6).
const PAIRS: &[(char, char)] = &[
	('?', '？'),
	('!', '！'),
	(',', '、'),
	('.', '。'),
	(':', '：'),
	(';', '；'),
	('(', '（'),
	(')', '）'),
	('[', '［'),
	(']', '］'),
	('{', '｛'),
	('}', '｝'),
	('"', '＂'),
];

/// Deterministic, unkeyed, bijective ASCII↔fullwidth punctuation
/// substitution. `direction >= 0` maps ASCII to fullwidth; `direction < 0`
/// inverts it.
pub fn punct_translate(s: &str, direction: i64) -> String {
	let mut out = String::with_capacity(s.len());
	for c in s.chars() {
		let mapped = if direction >= 0 {
			PAIRS.iter().find(|(ascii, _)| *ascii == c).map(|(_, wide)| *wide)
		} else {
			PAIRS.iter().find(|(_, wide)| *wide == c).map(|(ascii, _)| *ascii)
		};
		out.push(mapped.unwrap_or(c));
	}
	out
}

/// Keyed rotation of the PhonoShift punctuation subsets `P_OPEN` and
/// `P_END_LATIN` (spec §4.6). Only matching scalars consume keystream bytes.
pub fn punct_shift_latin(s: &str, password: &str, iterations: u32, salt: &str, direction: i64) -> String {
	let need = s.chars().filter(|c| matches!(c, '¿' | '¡' | '!' | '?')).count();
	if need == 0 {
		return s.to_string();
	}
	let domain_salt = format!("{}{}", salt, PUNCT_SHIFT_LATIN_DOMAIN);
	let ks = derive_keystream(password, &domain_salt, iterations, need + 64);
	let mut cur = Cursor::new(&ks);

	let mut out = String::with_capacity(s.len());
	for c in s.chars() {
		match c {
			'¿' | '¡' => {
				let b = cur.next_byte();
				let shift = (b as i64 + 1) * direction;
				out.push(rotate_in_set_no_zero(&P_OPEN, c, shift));
			}
			'!' | '?' => {
				let b = cur.next_byte();
				let shift = (b as i64 + 1) * direction;
				out.push(rotate_in_set_no_zero(&P_END_LATIN, c, shift));
			}
			_ => out.push(c),
		}
	}
	out
}

/// Keyed rotation of the JP punctuation subsets `P_END_JP` and `P_MID_JP`
/// (spec §4.6). No `+1` on the shift: `rotate_in_set_no_zero` still
/// guarantees movement.
pub fn punct_shift_jp(s: &str, password: &str, iterations: u32, salt: &str, direction: i64) -> String {
	let need = s.chars().filter(|c| matches!(c, '！' | '？' | '、' | '。' | '・')).count();
	if need == 0 {
		return s.to_string();
	}
	let domain_salt = format!("{}{}", salt, PUNCT_SHIFT_JP_DOMAIN);
	let ks = derive_keystream(password, &domain_salt, iterations, need + 64);
	let mut cur = Cursor::new(&ks);

	let mut out = String::with_capacity(s.len());
	for c in s.chars() {
		match c {
			'！' | '？' => {
				let b = cur.next_byte();
				let shift = b as i64 * direction;
				out.push(rotate_in_set_no_zero(&P_END_JP, c, shift));
			}
			'、' | '。' | '・' => {
				let b = cur.next_byte();
				let shift = b as i64 * direction;
				out.push(rotate_in_set_no_zero(&P_MID_JP, c, shift));
			}
			_ => out.push(c),
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_punct_translate_roundtrip() {
		let s = "Hi, (there)! \"quoted\" [x]; {y}: z?";
		let enc = punct_translate(s, 1);
		let dec = punct_translate(&enc, -1);
		assert_eq!(dec, s);
	}

	#[test]
	fn test_punct_translate_maps_known_pairs() {
		assert_eq!(punct_translate("?", 1), "？");
		assert_eq!(punct_translate("？", -1), "?");
	}

	#[test]
	fn test_punct_shift_latin_roundtrip() {
		let s = "¿Qué? ¡Vamos!";
		let enc = punct_shift_latin(s, "pw", 10, "salt", 1);
		let dec = punct_shift_latin(&enc, "pw", 10, "salt", -1);
		assert_eq!(dec, s);
	}

	#[test]
	fn test_punct_shift_latin_moves_scalars() {
		let s = "!!!???";
		let enc = punct_shift_latin(s, "pw", 10, "salt", 1);
		assert_ne!(enc, s);
	}

	#[test]
	fn test_punct_shift_jp_roundtrip() {
		let s = "完了。それは？本当・はい！";
		let enc = punct_shift_jp(s, "pw", 10, "salt", 1);
		let dec = punct_shift_jp(&enc, "pw", 10, "salt", -1);
		assert_eq!(dec, s);
	}

	#[test]
	fn test_punct_shift_no_match_passthrough() {
		let s = "no punctuation here";
		assert_eq!(punct_shift_latin(s, "pw", 10, "salt", 1), s);
		assert_eq!(punct_shift_jp(s, "pw", 10, "salt", 1), s);
	}
}
