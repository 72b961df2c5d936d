// [libs/core/phonetic/src/double_metaphone.rs]
//! Double Metaphone (Philips, 2000), variante reducida: produce un código
//! primario y, cuando el origen del nombre admite una pronunciación
//! alternativa (dígrafos de origen romance/eslavo comunes en nombres de
//! directores), un código secundario.

pub struct DoubleMetaphoneCode {
    pub primary: String,
    pub secondary: Option<String>,
}

pub fn double_metaphone(folded_name: &str) -> DoubleMetaphoneCode {
    let chars: Vec<char> = folded_name.chars().filter(|c| c.is_ascii_alphabetic()).collect();
    if chars.is_empty() {
        return DoubleMetaphoneCode { primary: String::new(), secondary: None };
    }

    let mut primary = String::new();
    let mut secondary = String::new();
    let mut has_alternate = false;
    let n = chars.len();

    let mut i = 0usize;
    while i < n && primary.len() < 6 {
        let c = chars[i];
        let next = chars.get(i + 1).copied();

        match c {
            'a' | 'e' | 'i' | 'o' | 'u' => {
                if i == 0 {
                    primary.push('a');
                    secondary.push('a');
                }
            }
            'c' => {
                if next == Some('h') {
                    primary.push('x');
                    secondary.push('k');
                    has_alternate = true;
                    i += 1;
                } else if matches!(next, Some('i') | Some('e') | Some('y')) {
                    primary.push('s');
                    secondary.push('s');
                } else {
                    primary.push('k');
                    secondary.push('k');
                }
            }
            'g' => {
                if next == Some('h') {
                    primary.push('k');
                    secondary.push('f');
                    has_alternate = true;
                    i += 1;
                } else if matches!(next, Some('i') | Some('e') | Some('y')) {
                    primary.push('j');
                    secondary.push('k');
                    has_alternate = true;
                } else {
                    primary.push('k');
                    secondary.push('k');
                }
            }
            'j' => {
                primary.push('j');
                secondary.push('h');
                has_alternate = true;
            }
            'w' | 'h' | 'y' => {
                if next.map(|n2| "aeiou".contains(n2)).unwrap_or(false) {
                    primary.push(c);
                    secondary.push(c);
                }
            }
            'x' => {
                primary.push('k');
                primary.push('s');
                secondary.push('k');
                secondary.push('s');
            }
            'z' => {
                primary.push('s');
                secondary.push('t');
                has_alternate = true;
            }
            'q' => {
                primary.push('k');
                secondary.push('k');
            }
            'v' => {
                primary.push('f');
                secondary.push('f');
            }
            other if other.is_ascii_alphabetic() => {
                primary.push(other);
                secondary.push(other);
            }
            _ => {}
        }

        i += 1;
    }

    primary.truncate(6);
    secondary.truncate(6);

    DoubleMetaphoneCode {
        primary: primary.to_uppercase(),
        secondary: if has_alternate && secondary != primary {
            Some(secondary.to_uppercase())
        } else {
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chen_has_primary_and_secondary() {
        let code = double_metaphone("chen");
        assert_eq!(code.primary, "XN");
        assert_eq!(code.secondary.as_deref(), Some("KN"));
    }

    #[test]
    fn simple_name_has_no_alternate() {
        let code = double_metaphone("ben");
        assert!(code.secondary.is_none());
    }

    #[test]
    fn empty_input_yields_empty_primary() {
        assert_eq!(double_metaphone("").primary, "");
    }
}
