//! Fiscal-code (codice fiscale) derivation.
//!
//! Simplified approximation of the Italian algorithm: consonant/vowel name
//! compression, the official month-letter table, sex-dependent day code.
//! The place code is a 4-character slice of the free-text birth place (no
//! cadastral lookup) and the check character is a fixed placeholder — this
//! tool does not claim official compliance.
//!
//! Two entry points: [`compute_fiscal_code`] reproduces the legacy lenient
//! behavior (never fails, best-effort output on malformed input) and is the
//! compatibility mode; [`try_compute_fiscal_code`] validates its inputs and
//! is what the patient service calls.

use thiserror::Error;

/// Filler character used when a name fragment is too short.
const FILLER: char = 'X';

/// Month-letter table, index 0 = January. Skips F, G, I, N, O, Q as the
/// official table does.
const MONTH_CODES: [char; 12] = ['A', 'B', 'C', 'D', 'E', 'H', 'L', 'M', 'P', 'R', 'S', 'T'];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FiscalCodeError {
    #[error("Birth date is not in DD/MM/YYYY form: {0}")]
    MalformedDate(String),

    #[error("Day out of range: {0}")]
    InvalidDay(u32),

    #[error("Month out of range: {0}")]
    InvalidMonth(u32),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Compress a name fragment to exactly `length` characters.
///
/// Uppercases the text, takes consonants in order, then vowels in order
/// (whitespace stripped from both runs), truncates to `length` and pads
/// with `'X'` when the fragment is too short. Empty input yields all
/// filler characters.
pub fn extract_code(text: &str, length: usize) -> String {
    let upper = text.to_uppercase();

    let is_vowel = |c: char| matches!(c, 'A' | 'E' | 'I' | 'O' | 'U');

    let consonants = upper.chars().filter(|c| !is_vowel(*c) && !c.is_whitespace());
    let vowels = upper.chars().filter(|c| is_vowel(*c));

    let mut code: String = consonants.chain(vowels).take(length).collect();
    while code.chars().count() < length {
        code.push(FILLER);
    }
    code
}

/// Letter for a calendar month (1–12). Out-of-range input falls back to
/// `'A'`, matching the reference tool's silent-default behavior.
pub fn month_code(month: u32) -> char {
    match month {
        1..=12 => MONTH_CODES[(month - 1) as usize],
        _ => 'A',
    }
}

/// Day code: raw day zero-padded for males, day + 40 for females.
///
/// The female branch deliberately does not zero-pad — days 1–9 render as
/// 41–49 which is two characters anyway, and the reference tool never
/// enforced padding there.
fn day_code(day_text: &str, sex: &str) -> String {
    if sex.eq_ignore_ascii_case("M") {
        format!("{day_text:0>2}")
    } else {
        let day: u32 = day_text.trim().parse().unwrap_or(0);
        (day + 40).to_string()
    }
}

/// First four characters of the uppercased birth place. Shorter places are
/// left unpadded, as in the reference tool.
fn place_code(birth_place: &str) -> String {
    birth_place.chars().take(4).collect::<String>().to_uppercase()
}

/// Compose the 16-character fiscal code from its parts. Shared by both the
/// lenient and the validated entry point.
fn compose(
    given_name: &str,
    surname: &str,
    day_text: &str,
    month: u32,
    year_text: &str,
    birth_place: &str,
    sex: &str,
) -> String {
    let surname_code = extract_code(surname, 3);
    let given_name_code = extract_code(given_name, 3);

    // Everything after the century digits, i.e. the last two for a
    // four-digit year.
    let year_code: String = year_text.chars().skip(2).collect();

    format!(
        "{surname_code}{given_name_code}{year_code}{}{}{}{FILLER}",
        month_code(month),
        day_code(day_text, sex),
        place_code(birth_place),
    )
}

/// Legacy lenient derivation: `birth_date_text` is split on `/` as
/// DD/MM/YYYY and missing or unparsable parts degrade silently (empty year
/// code, month falls back to `'A'`, unparsable female day reads as 0).
/// Always returns a string; the result is only guaranteed to be 16
/// characters when the inputs are well-formed.
pub fn compute_fiscal_code(
    given_name: &str,
    surname: &str,
    birth_date_text: &str,
    birth_place: &str,
    sex: &str,
) -> String {
    let mut parts = birth_date_text.split('/');
    let day_text = parts.next().unwrap_or("");
    let month_text = parts.next().unwrap_or("");
    let year_text = parts.next().unwrap_or("");

    let month: u32 = month_text.trim().parse().unwrap_or(0);

    compose(
        given_name,
        surname,
        day_text,
        month,
        year_text,
        birth_place,
        sex,
    )
}

/// Validated derivation: rejects malformed dates and empty fields instead
/// of producing a degenerate code. The composition itself is identical to
/// [`compute_fiscal_code`] — validation never changes the output shape.
pub fn try_compute_fiscal_code(
    given_name: &str,
    surname: &str,
    birth_date_text: &str,
    birth_place: &str,
    sex: &str,
) -> Result<String, FiscalCodeError> {
    if given_name.trim().is_empty() {
        return Err(FiscalCodeError::MissingField("given name"));
    }
    if surname.trim().is_empty() {
        return Err(FiscalCodeError::MissingField("surname"));
    }
    if birth_place.trim().is_empty() {
        return Err(FiscalCodeError::MissingField("birth place"));
    }

    let malformed = || FiscalCodeError::MalformedDate(birth_date_text.to_string());

    let parts: Vec<&str> = birth_date_text.split('/').collect();
    let &[day_text, month_text, year_text] = parts.as_slice() else {
        return Err(malformed());
    };

    if year_text.len() != 4 || !year_text.chars().all(|c| c.is_ascii_digit()) {
        return Err(malformed());
    }

    let day: u32 = day_text.trim().parse().map_err(|_| malformed())?;
    if !(1..=31).contains(&day) {
        return Err(FiscalCodeError::InvalidDay(day));
    }

    let month: u32 = month_text.trim().parse().map_err(|_| malformed())?;
    if !(1..=12).contains(&month) {
        return Err(FiscalCodeError::InvalidMonth(month));
    }

    Ok(compose(
        given_name,
        surname,
        day_text,
        month,
        year_text,
        birth_place,
        sex,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_code_prefers_consonants() {
        assert_eq!(extract_code("ROSSI", 3), "RSS");
        assert_eq!(extract_code("Bianchi", 3), "BNC");
    }

    #[test]
    fn extract_code_falls_back_to_vowels() {
        // ANNA: consonants "NN", then vowels "AA", truncated to 3.
        assert_eq!(extract_code("ANNA", 3), "NNA");
        assert_eq!(extract_code("Aia", 3), "AIA");
    }

    #[test]
    fn extract_code_pads_short_fragments() {
        assert_eq!(extract_code("Li", 3), "LIX");
        assert_eq!(extract_code("A", 3), "AXX");
        assert_eq!(extract_code("", 3), "XXX");
    }

    #[test]
    fn extract_code_always_exact_length() {
        for name in ["", "B", "De Luca", "Montecchi Capuleti", "   "] {
            assert_eq!(extract_code(name, 3).chars().count(), 3, "input {name:?}");
        }
    }

    #[test]
    fn extract_code_strips_whitespace() {
        // "De Luca": consonants DLC, the space must not survive.
        assert_eq!(extract_code("De Luca", 3), "DLC");
    }

    #[test]
    fn month_table_matches_official_letters() {
        assert_eq!(month_code(1), 'A');
        assert_eq!(month_code(5), 'E');
        assert_eq!(month_code(8), 'M');
        assert_eq!(month_code(12), 'T');
    }

    #[test]
    fn month_out_of_range_falls_back_to_a() {
        assert_eq!(month_code(0), 'A');
        assert_eq!(month_code(13), 'A');
    }

    #[test]
    fn well_formed_male_input() {
        let code = compute_fiscal_code("Mario", "Rossi", "01/01/1980", "Roma", "M");
        assert_eq!(code, "RSSMRA80A01ROMAX");
        assert_eq!(code.len(), 16);
        // Month letter sits after surname(3) + name(3) + year(2).
        assert_eq!(code.chars().nth(8), Some('A'));
        assert_eq!(&code[9..11], "01");
    }

    #[test]
    fn well_formed_female_input() {
        let code = compute_fiscal_code("Anna", "Bianchi", "15/08/1975", "Torino", "F");
        assert_eq!(code, "BNCNNA75M55TORIX");
        assert_eq!(code.len(), 16);
        assert_eq!(code.chars().nth(8), Some('M'));
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let a = compute_fiscal_code("Mario", "Rossi", "01/01/1980", "Roma", "M");
        let b = compute_fiscal_code("Mario", "Rossi", "01/01/1980", "Roma", "M");
        assert_eq!(a, b);
    }

    #[test]
    fn female_day_code_is_day_plus_40_unpadded() {
        let male = compute_fiscal_code("Mario", "Rossi", "05/03/1990", "Roma", "M");
        let female = compute_fiscal_code("Maria", "Rossi", "05/03/1990", "Roma", "F");
        assert_eq!(&male[9..11], "05");
        // 5 + 40 = 45: two characters without any explicit padding. The
        // asymmetry with the zero-padded male branch is reference behavior.
        assert_eq!(&female[9..11], "45");
    }

    #[test]
    fn sex_comparison_is_case_insensitive() {
        let upper = compute_fiscal_code("Mario", "Rossi", "01/01/1980", "Roma", "M");
        let lower = compute_fiscal_code("Mario", "Rossi", "01/01/1980", "Roma", "m");
        assert_eq!(upper, lower);
        // Anything that is not "M" takes the female branch.
        let other = compute_fiscal_code("Mario", "Rossi", "01/01/1980", "Roma", "X");
        assert_eq!(&other[9..11], "41");
    }

    #[test]
    fn short_place_is_not_padded() {
        let code = compute_fiscal_code("Mario", "Rossi", "01/01/1980", "Ro", "M");
        // Place contributes only 2 chars, so the whole code comes up short.
        assert_eq!(code, "RSSMRA80A01ROX");
    }

    #[test]
    fn lenient_mode_degrades_on_malformed_date() {
        // No slashes: everything lands in the day slot.
        let code = compute_fiscal_code("Mario", "Rossi", "1980-01-01", "Roma", "M");
        assert!(code.starts_with("RSSMRA"));
        // Year missing -> no year code; month unparsable -> 'A'.
        assert_eq!(code.chars().nth(6), Some('A'));
    }

    #[test]
    fn validated_mode_accepts_well_formed_input() {
        let code = try_compute_fiscal_code("Mario", "Rossi", "01/01/1980", "Roma", "M").unwrap();
        assert_eq!(code, compute_fiscal_code("Mario", "Rossi", "01/01/1980", "Roma", "M"));
    }

    #[test]
    fn validated_mode_rejects_malformed_date() {
        let err = try_compute_fiscal_code("Mario", "Rossi", "1980-01-01", "Roma", "M").unwrap_err();
        assert!(matches!(err, FiscalCodeError::MalformedDate(_)));

        let err = try_compute_fiscal_code("Mario", "Rossi", "01/13/1980", "Roma", "M").unwrap_err();
        assert_eq!(err, FiscalCodeError::InvalidMonth(13));

        let err = try_compute_fiscal_code("Mario", "Rossi", "32/01/1980", "Roma", "M").unwrap_err();
        assert_eq!(err, FiscalCodeError::InvalidDay(32));
    }

    #[test]
    fn validated_mode_rejects_empty_fields() {
        let err = try_compute_fiscal_code("", "Rossi", "01/01/1980", "Roma", "M").unwrap_err();
        assert_eq!(err, FiscalCodeError::MissingField("given name"));

        let err = try_compute_fiscal_code("Mario", "Rossi", "01/01/1980", "  ", "M").unwrap_err();
        assert_eq!(err, FiscalCodeError::MissingField("birth place"));
    }
}
