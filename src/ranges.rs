/// Pattern for the separators that are never rotated and never advance the
/// keystream cursor: space, hyphen and apostrophe.
macro_rules! separator_range {
	() => {
		(' ' | '-' | '\'')
	};
}

/// Pattern for the "stable JP marks" that survive the JP-native transform
/// unchanged and never advance the keystream cursor.
macro_rules! stable_jp_mark_range {
	() => {
		(
			// U+30FC "ー" Katakana-Hiragana Prolonged Sound Mark
			'ー'
			// U+3005 "々" Ideographic Iteration Mark
			| '々'
			// U+309D/U+309E Hiragana iteration marks
			| 'ゝ' | 'ゞ'
			// U+30FD/U+30FE Katakana iteration marks
			| 'ヽ' | 'ヾ'
		)
	};
}

/// Pattern for full-width Hiragana letters (`U+3041..=U+3096`).
macro_rules! hiragana_range {
	() => {
		('\u{3041}'..='\u{3096}')
	};
}

/// Pattern for full-width Katakana letters (`U+30A1..=U+30FA`).
macro_rules! katakana_range {
	() => {
		('\u{30A1}'..='\u{30FA}')
	};
}

/// Pattern for the CJK Unified Ideographs block as used by the JP-native
/// transform (`U+4E00..=U+9FFF`).
macro_rules! kanji_range {
	() => {
		('\u{4E00}'..='\u{9FFF}')
	};
}

/// Pattern for the PhonoShift punctuation "open" subset (`¿¡`).
macro_rules! p_open_range {
	() => {
		('¿' | '¡')
	};
}

/// Pattern for the PhonoShift punctuation "end" subset (`!?`).
macro_rules! p_end_latin_range {
	() => {
		('!' | '?')
	};
}

/// Pattern for the JP-family punctuation "end" subset (fullwidth `！？`).
macro_rules! p_end_jp_range {
	() => {
		('！' | '？')
	};
}

/// Pattern for the JP-family punctuation "mid" subset (`、。・`).
macro_rules! p_mid_jp_range {
	() => {
		('、' | '。' | '・')
	};
}

/// Pattern for the PhonoShift-family token separators.
macro_rules! phono_token_sep_range {
	() => {
		(' ' | '-' | '\'' | '.' | ',' | '!' | '?' | ':' | ';' | '\t' | '\n' | '\r')
	};
}

/// Pattern for the token separators that the kana families add on top of the
/// PhonoShift separator set.
macro_rules! kana_extra_token_sep_range {
	() => {
		(
			'\u{3000}' | '。' | '、' | '！' | '？' | '：' | '；' | '・'
			| '「' | '」' | '『' | '』' | '（' | '）' | '［' | '］' | '｛' | '｝'
		)
	};
}
