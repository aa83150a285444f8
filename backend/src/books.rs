//! Canonical book table and USFM book code resolution.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Returned by [`book_number`] for codes outside the 66-book canon.
pub const UNRESOLVED_BOOK: i32 = 0;

/// The 66 USFM book codes in Protestant canonical order,
/// Genesis first, Revelation last.
pub static BOOK_CODES: [&'static str; 66] = [
    "GEN", "EXO", "LEV", "NUM", "DEU",
    "JOS", "JDG", "RUT", "1SA", "2SA",
    "1KI", "2KI", "1CH", "2CH", "EZR",
    "NEH", "EST", "JOB", "PSA", "PRO",
    "ECC", "SNG", "ISA", "JER", "LAM",
    "EZK", "DAN", "HOS", "JOL", "AMO",
    "OBA", "JON", "MIC", "NAM", "HAB",
    "ZEP", "HAG", "ZEC", "MAL",
    "MAT", "MRK", "LUK", "JHN", "ACT",
    "ROM", "1CO", "2CO", "GAL", "EPH",
    "PHP", "COL", "1TH", "2TH", "1TI",
    "2TI", "TIT", "PHM", "HEB", "JAS",
    "1PE", "2PE", "1JN", "2JN", "3JN",
    "JUD", "REV",
];

lazy_static! {
    static ref BOOK_NUMBERS: HashMap<&'static str, i32> = {
        let mut m = HashMap::with_capacity(BOOK_CODES.len());
        for (i, code) in BOOK_CODES.iter().enumerate() {
            m.insert(*code, (i + 1) as i32);
        }
        m
    };
}

/// Resolve a USFM book code to its canonical book number (1-66).
///
/// Input is trimmed and matched case-insensitively. Anything not in the
/// canon, including the empty string, resolves to [`UNRESOLVED_BOOK`].
/// Total function, never fails.
pub fn book_number(book_code: &str) -> i32 {
    let code = book_code.trim().to_uppercase();
    *BOOK_NUMBERS.get(code.as_str()).unwrap_or(&UNRESOLVED_BOOK)
}

/// All (code, number) pairs in canonical order.
pub fn book_listing() -> Vec<(&'static str, i32)> {
    BOOK_CODES
        .iter()
        .enumerate()
        .map(|(i, code)| (*code, (i + 1) as i32))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_boundaries() {
        assert_eq!(book_number("GEN"), 1);
        assert_eq!(book_number("MAL"), 39);
        assert_eq!(book_number("MAT"), 40);
        assert_eq!(book_number("REV"), 66);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(book_number("gen"), 1);
        assert_eq!(book_number("Rev"), 66);
        assert_eq!(book_number("  jhn  "), 43);
    }

    #[test]
    fn test_unresolved() {
        assert_eq!(book_number("XYZ"), UNRESOLVED_BOOK);
        assert_eq!(book_number(""), UNRESOLVED_BOOK);
        assert_eq!(book_number("GENESIS"), UNRESOLVED_BOOK);
    }

    #[test]
    fn test_listing_is_complete_and_unique() {
        let listing = book_listing();
        assert_eq!(listing.len(), 66);
        assert_eq!(listing[0], ("GEN", 1));
        assert_eq!(listing[65], ("REV", 66));

        let mut codes: Vec<&str> = listing.iter().map(|(c, _)| *c).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 66);
    }
}
