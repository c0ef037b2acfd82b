/// First code point ("zero") of every run of ten decimal digits (Unicode
/// general category Nd, as of Unicode 16.0). Each run maps `zero..=zero + 9`
/// onto `0..=9`.
const DIGIT_ZEROS: &[u32] = &[
    0x0030,  // ASCII
    0x0660,  // Arabic-Indic
    0x06F0,  // Extended Arabic-Indic (Persian, Urdu)
    0x07C0,  // NKo
    0x0966,  // Devanagari
    0x09E6,  // Bengali
    0x0A66,  // Gurmukhi
    0x0AE6,  // Gujarati
    0x0B66,  // Oriya
    0x0BE6,  // Tamil
    0x0C66,  // Telugu
    0x0CE6,  // Kannada
    0x0D66,  // Malayalam
    0x0DE6,  // Sinhala Lith
    0x0E50,  // Thai
    0x0ED0,  // Lao
    0x0F20,  // Tibetan
    0x1040,  // Myanmar
    0x1090,  // Myanmar Shan
    0x17E0,  // Khmer
    0x1810,  // Mongolian
    0x1946,  // Limbu
    0x19D0,  // New Tai Lue
    0x1A80,  // Tai Tham Hora
    0x1A90,  // Tai Tham Tham
    0x1B50,  // Balinese
    0x1BB0,  // Sundanese
    0x1C40,  // Lepcha
    0x1C50,  // Ol Chiki
    0xA620,  // Vai
    0xA8D0,  // Saurashtra
    0xA900,  // Kayah Li
    0xA9D0,  // Javanese
    0xA9F0,  // Myanmar Tai Laing
    0xAA50,  // Cham
    0xABF0,  // Meetei Mayek
    0xFF10,  // Fullwidth
    0x104A0, // Osmanya
    0x10D30, // Hanifi Rohingya
    0x10D40, // Garay
    0x11066, // Brahmi
    0x110F0, // Sora Sompeng
    0x11136, // Chakma
    0x111D0, // Sharada
    0x112F0, // Khudawadi
    0x11450, // Newa
    0x114D0, // Tirhuta
    0x11650, // Modi
    0x116C0, // Takri
    0x116D0, // Myanmar Pao
    0x116DA, // Myanmar Eastern Pwo Karen
    0x11730, // Ahom
    0x118E0, // Warang Citi
    0x11950, // Dives Akuru
    0x11BF0, // Sunuwar
    0x11C50, // Bhaiksuki
    0x11D50, // Masaram Gondi
    0x11DA0, // Gunjala Gondi
    0x11F50, // Kawi
    0x16130, // Gurung Khema
    0x16A60, // Mro
    0x16AC0, // Tangsa
    0x16B50, // Pahawh Hmong
    0x16D70, // Kirat Rai
    0x1CCF0, // Outlined
    0x1D7CE, // Mathematical bold
    0x1D7D8, // Mathematical double-struck
    0x1D7E2, // Mathematical sans-serif
    0x1D7EC, // Mathematical sans-serif bold
    0x1D7F6, // Mathematical monospace
    0x1E140, // Nyiakeng Puachue Hmong
    0x1E2F0, // Wancho
    0x1E4F0, // Nag Mundari
    0x1E5F1, // Ol Onal
    0x1E950, // Adlam
    0x1FBF0, // Segmented
];

/// Map a decimal digit of any script to its ASCII equivalent.
fn ascii_digit(c: char) -> Option<char> {
    if c.is_ascii() {
        return c.is_ascii_digit().then_some(c);
    }
    let cp = c as u32;
    DIGIT_ZEROS
        .iter()
        .find(|&&zero| (zero..zero + 10).contains(&cp))
        .and_then(|&zero| char::from_digit(cp - zero, 10))
}

/// Replace every Unicode decimal digit in `filename` with its ASCII digit.
///
/// Other characters, including numeric symbols that are not decimal digits
/// (superscripts, fractions, roman numerals), pass through unchanged, so the
/// result always has the same number of characters as the input.
pub fn normalize(filename: &str) -> String {
    filename
        .chars()
        .map(|c| ascii_digit(c).unwrap_or(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_arabic_and_persian_digits() {
        assert_eq!(normalize("٢٠٢٠١٢٢٥_١٢٣٠٥٩.jpg"), "20201225_123059.jpg");
        assert_eq!(normalize("۲۰۲۰۱۲۲۵_۱۲۳۰۵۹.jpg"), "20201225_123059.jpg");
    }

    #[test]
    fn test_fullwidth_and_devanagari_digits() {
        assert_eq!(normalize("ＩＭＧ_２０１８１１２８.jpg"), "ＩＭＧ_20181128.jpg");
        assert_eq!(normalize("२०१९"), "2019");
        assert_eq!(normalize("๒๕๖๓"), "2563");
    }

    #[test]
    fn test_unicode_16_digits() {
        assert_eq!(normalize("\u{10D42}\u{10D40}\u{10D42}\u{10D44}"), "2024");
        assert_eq!(normalize("\u{116DB}\u{116D9}"), "19");
        assert_eq!(normalize("\u{11BF1}\u{16139}\u{16D75}\u{1CCF7}\u{1E5F4}"), "19573");
    }

    #[test]
    fn test_table_sorted_without_overlap() {
        assert!(DIGIT_ZEROS.windows(2).all(|w| w[0] + 10 <= w[1]));
    }

    #[test]
    fn test_ascii_and_digitless_unchanged() {
        assert_eq!(normalize("20201225_123059.jpg"), "20201225_123059.jpg");
        assert_eq!(normalize("photo.jpg"), "photo.jpg");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_non_decimal_numerics_untouched() {
        assert_eq!(normalize("x²½Ⅻ"), "x²½Ⅻ");
    }

    proptest! {
        #[test]
        fn prop_preserves_char_count(s in "\\PC*") {
            prop_assert_eq!(normalize(&s).chars().count(), s.chars().count());
        }

        #[test]
        fn prop_ascii_input_is_fixed_point(s in "[ -~]*") {
            prop_assert_eq!(normalize(&s), s);
        }

        #[test]
        fn prop_every_run_maps_to_ascii(run in 0..DIGIT_ZEROS.len(), d in 0u32..10) {
            let c = char::from_u32(DIGIT_ZEROS[run] + d).unwrap();
            prop_assert_eq!(normalize(&c.to_string()), d.to_string());
        }
    }
}
