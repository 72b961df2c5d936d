// [libs/core/phonetic/src/soundex.rs]
//! Codificación Soundex clásica (Russell/Odell): letra inicial + 3 dígitos.

/// Produces the 4-character Soundex code (e.g. "bongani" -> "B525").
/// Returns an empty string for input with no alphabetic characters.
pub fn soundex(folded_name: &str) -> String {
    let letters: Vec<char> = folded_name.chars().filter(|c| c.is_ascii_alphabetic()).collect();
    if letters.is_empty() {
        return String::new();
    }

    let mut code = String::new();
    code.push(letters[0].to_ascii_uppercase());

    let mut previous_digit = digit_for(letters[0]);

    for &letter in &letters[1..] {
        let current_digit = digit_for(letter);
        if let Some(d) = current_digit {
            if Some(d) != previous_digit {
                code.push(std::char::from_digit(d as u32, 10).unwrap());
            }
        }
        // h/w do not reset previous_digit per the classic rule; vowels do.
        if !matches!(letter, 'h' | 'w') {
            previous_digit = current_digit;
        }
        if code.len() == 4 {
            break;
        }
    }

    while code.len() < 4 {
        code.push('0');
    }

    code
}

fn digit_for(letter: char) -> Option<u8> {
    match letter {
        'b' | 'f' | 'p' | 'v' => Some(1),
        'c' | 'g' | 'j' | 'k' | 'q' | 's' | 'x' | 'z' => Some(2),
        'd' | 't' => Some(3),
        'l' => Some(4),
        'm' | 'n' => Some(5),
        'r' => Some(6),
        _ => None, // vowels, h, w, y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn robert_and_rupert_collide() {
        assert_eq!(soundex("robert"), soundex("rupert"));
    }

    #[test]
    fn four_characters_always() {
        assert_eq!(soundex("lee").len(), 4);
        assert_eq!(soundex("bongani").len(), 4);
    }

    #[test]
    fn empty_input_yields_empty_code() {
        assert_eq!(soundex(""), "");
    }
}
