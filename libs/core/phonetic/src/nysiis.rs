// [libs/core/phonetic/src/nysiis.rs]
//! NYSIIS (New York State Identification and Intelligence System), variante
//! simplificada: transliteración de prefijos/sufijos seguida de colapso de
//! vocales internas y consonantes dobles.

pub fn nysiis(folded_name: &str) -> String {
    let mut word: Vec<char> = folded_name.chars().filter(|c| c.is_ascii_alphabetic()).collect();
    if word.is_empty() {
        return String::new();
    }

    transliterate_prefix(&mut word);
    transliterate_suffix(&mut word);

    let mut key = String::new();
    key.push(word[0].to_ascii_uppercase());

    let mut last_code: Option<char> = Some(translate(word[0], None));

    for idx in 1..word.len() {
        let translated = translate(word[idx], Some(word[idx - 1]));
        if translated != '\0' && Some(translated) != last_code {
            key.push(translated.to_ascii_uppercase());
        }
        last_code = Some(translated);
    }

    if key.ends_with('S') && key.len() > 1 {
        key.pop();
    }
    if key.ends_with("AY") {
        key.truncate(key.len() - 2);
        key.push('Y');
    }
    if key.ends_with('A') && key.len() > 1 {
        key.pop();
    }

    key.truncate(6);
    key
}

fn transliterate_prefix(word: &mut Vec<char>) {
    let joined: String = word.iter().collect();
    let replacement = if joined.starts_with("mac") {
        Some(("mac", "mcc"))
    } else if joined.starts_with("kn") {
        Some(("kn", "nn"))
    } else if joined.starts_with('k') {
        Some(("k", "c"))
    } else if joined.starts_with("ph") || joined.starts_with("pf") {
        Some((&joined[0..2], "ff"))
    } else if joined.starts_with("sch") {
        Some(("sch", "sss"))
    } else {
        None
    };

    if let Some((prefix, replace_with)) = replacement {
        let rest: String = joined.chars().skip(prefix.chars().count()).collect();
        *word = format!("{}{}", replace_with, rest).chars().collect();
    }
}

fn transliterate_suffix(word: &mut Vec<char>) {
    let joined: String = word.iter().collect();
    let replacement: &[(&str, &str)] = &[
        ("ee", "y"),
        ("ie", "y"),
        ("dt", "d"),
        ("rt", "d"),
        ("rd", "d"),
        ("nt", "d"),
        ("nd", "d"),
    ];

    for (suffix, replace_with) in replacement {
        if joined.ends_with(suffix) {
            let head: String = joined.chars().take(joined.chars().count() - suffix.chars().count()).collect();
            *word = format!("{}{}", head, replace_with).chars().collect();
            return;
        }
    }
}

fn translate(c: char, prev: Option<char>) -> char {
    match c {
        'a' | 'e' | 'i' | 'o' | 'u' => 'a',
        'q' => 'g',
        'z' => 's',
        'm' => 'n',
        'k' => 'c',
        'v' => 'f',
        'w' if matches!(prev, Some('a' | 'e' | 'i' | 'o' | 'u')) => 'a',
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mac_prefix_folds() {
        // "mac" and "mcc" variants should converge on the same key head.
        assert_eq!(&nysiis("macdonald")[0..1], "M");
    }

    #[test]
    fn empty_input_yields_empty_code() {
        assert_eq!(nysiis(""), "");
    }

    #[test]
    fn bounded_length() {
        assert!(nysiis("nkosinathi mthembu dlamini").len() <= 6);
    }
}
