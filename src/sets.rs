//! Concrete alphabet instances used across the family transforms (spec §3).
//!
//! The Latin/PT alphabets and punctuation subsets are taken verbatim from
//! spec §3. The "skin" family's kana cipher alphabets are not enumerated by
//! the spec (only their cardinality is): we pick disjoint runs of common
//! hiragana/katakana that avoid the reserved "stable JP marks" (`ー 々 ゝ ゞ
//! ヽ ヾ`), documented in DESIGN.md.

use crate::alphabet::Alphabet;
use lazy_static::lazy_static;

lazy_static! {
	pub static ref V_LO: Alphabet = Alphabet::new("aeiou");
	pub static ref C_LO: Alphabet = Alphabet::new("bcdfghjklmnpqrstvwxyz");
	pub static ref V_UP: Alphabet = Alphabet::new("AEIOU");
	pub static ref C_UP: Alphabet = Alphabet::new("BCDFGHJKLMNPQRSTVWXYZ");

	// Portuguese-accented vowels. The spec text names a cardinality of 24 but
	// the reference implementation's literal alphabet
	// (examples/original_source/ports/python/phonoshift.py) has 22 members
	// per case; this crate follows the reference implementation for wire
	// compatibility (see DESIGN.md).
	pub static ref VPT_LO: Alphabet = Alphabet::new("áàâãäéèêëíìîïóòôõöúùûü");
	pub static ref VPT_UP: Alphabet = Alphabet::new("ÁÀÂÃÄÉÈÊËÍÌÎÏÓÒÔÕÖÚÙÛÜ");

	pub static ref CED_LO: Alphabet = Alphabet::new("ç");
	pub static ref CED_UP: Alphabet = Alphabet::new("Ç");

	pub static ref P_OPEN: Alphabet = Alphabet::new("¿¡");
	pub static ref P_END_LATIN: Alphabet = Alphabet::new("!?");
	pub static ref P_END_JP: Alphabet = Alphabet::new("！？");
	pub static ref P_MID_JP: Alphabet = Alphabet::new("、。・");

	// Kana-skin cipher alphabets, index-paired with the Latin/PT alphabets
	// above.
	pub static ref C_VOW_LO: Alphabet = Alphabet::new("あいうえお");
	pub static ref C_CON_LO: Alphabet = Alphabet::new("かきくけこさしすせそたちつてとなにぬねのは");
	pub static ref C_VOW_UP: Alphabet = Alphabet::new("アイウエオ");
	pub static ref C_CON_UP: Alphabet = Alphabet::new("カキクケコサシスセソタチツテトナニヌネノハ");
	pub static ref C_ACC_LO: Alphabet = Alphabet::new("ひふへほまみむめもやゆよらりるれろわをゐゑゔ");
	pub static ref C_ACC_UP: Alphabet = Alphabet::new("ヒフヘホマミムメモヤユヨラリルレロワヲヰヱヴ");

	// Verification-layer check alphabets.
	pub static ref CONSET: Alphabet = Alphabet::new("bcdfghjklmnpqrstvwxyz");
	pub static ref KANA_CHK: Alphabet = Alphabet::new("さしすせそたちつてとなにぬねのはひふへほま");
}
