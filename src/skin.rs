//! Kana-Skin family (spec §4.4): Latin/PT text rotated onto kana, the
//! letter's phonetic class (vowel/consonant/accented) preserved across the
//! script change.

use crate::alphabet::{digit_value, fullwidth_digit, rotate_digit_raw, Alphabet};
use crate::keystream::{derive_keystream, Cursor};
use crate::punct::{punct_shift_jp, punct_translate};
use crate::sets::{
	C_ACC_LO, C_ACC_UP, C_CON_LO, C_CON_UP, C_LO, C_UP, C_VOW_LO, C_VOW_UP, V_LO, V_UP, VPT_LO, VPT_UP,
};
use tracing::debug;

fn rotate_paired(idx: usize, n: usize, shift: i64) -> usize {
	let n = n as i64;
	((idx as i64 + shift.rem_euclid(n)).rem_euclid(n)) as usize
}

fn map_plain_to_cipher(c: char, shift: i64) -> Option<char> {
	let pairs: [(&Alphabet, &Alphabet); 6] = [
		(&V_LO, &C_VOW_LO),
		(&C_LO, &C_CON_LO),
		(&V_UP, &C_VOW_UP),
		(&C_UP, &C_CON_UP),
		(&VPT_LO, &C_ACC_LO),
		(&VPT_UP, &C_ACC_UP),
	];
	for (plain, cipher) in pairs {
		if let Some(idx) = plain.index_of(c) {
			return Some(cipher.at(rotate_paired(idx, plain.len(), shift)));
		}
	}
	match c {
		'ç' => Some('ゞ'),
		'Ç' => Some('ヾ'),
		_ => None,
	}
}

fn map_cipher_to_plain(c: char, shift: i64) -> Option<char> {
	let pairs: [(&Alphabet, &Alphabet); 6] = [
		(&C_VOW_LO, &V_LO),
		(&C_CON_LO, &C_LO),
		(&C_VOW_UP, &V_UP),
		(&C_CON_UP, &C_UP),
		(&C_ACC_LO, &VPT_LO),
		(&C_ACC_UP, &VPT_UP),
	];
	for (cipher, plain) in pairs {
		if let Some(idx) = cipher.index_of(c) {
			return Some(plain.at(rotate_paired(idx, cipher.len(), shift)));
		}
	}
	match c {
		'ゞ' => Some('ç'),
		'ヾ' => Some('Ç'),
		_ => None,
	}
}

/// Core Kana-Skin operation. `direction = 1` encrypts (Latin/PT → kana),
/// `direction = -1` decrypts (kana → Latin/PT).
pub fn skin_transform(text: &str, password: &str, iterations: u32, salt: &str, direction: i64) -> String {
	if text.is_empty() {
		return String::new();
	}
	debug!(direction, scalars = text.chars().count(), "skin_transform");
	let need = text.chars().count() + 64;
	let ks = derive_keystream(password, salt, iterations, need);
	let mut cur = Cursor::new(&ks);

	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		if matches!(c, ' ' | '-' | '\'') {
			out.push(c);
			continue;
		}

		let b = cur.next_byte();
		let shift = (b as i64 + 1) * direction;

		if let Some(d) = digit_value(c) {
			let nd = rotate_digit_raw(d, shift);
			if direction >= 0 {
				out.push(fullwidth_digit(nd));
			} else {
				out.push((b'0' + nd) as char);
			}
			continue;
		}

		let mapped = if direction >= 0 {
			map_plain_to_cipher(c, shift)
		} else {
			map_cipher_to_plain(c, shift)
		};
		out.push(mapped.unwrap_or(c));
	}
	out
}

/// `kanashift_skin_encrypt` (spec §4.4, §6).
pub fn skin_encrypt(text: &str, password: &str, iterations: u32, salt: &str, shift_punct: bool) -> String {
	let r = skin_transform(text, password, iterations, salt, 1);
	let r = punct_translate(&r, 1);
	if shift_punct {
		punct_shift_jp(&r, password, iterations, salt, 1)
	} else {
		r
	}
}

/// `kanashift_skin_decrypt` (spec §4.4, §6): inverse of [`skin_encrypt`].
pub fn skin_decrypt(text: &str, password: &str, iterations: u32, salt: &str, shift_punct: bool) -> String {
	let r = if shift_punct {
		punct_shift_jp(text, password, iterations, salt, -1)
	} else {
		text.to_string()
	};
	let r = punct_translate(&r, -1);
	skin_transform(&r, password, iterations, salt, -1)
}
