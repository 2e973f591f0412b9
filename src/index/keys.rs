//! Key derivation and the deterministic shard hash.
//!
//! Shard assignment must agree with consumers written in other languages, so
//! [`java_hash`] reproduces `java.lang.String#hashCode` exactly: it walks the
//! key's UTF-16 code units with wrapping signed 32-bit arithmetic.

use crate::index::config::MAX_KEY_LEN_LIMIT;
use crate::lexicon::record::Lexicon;

/// The wildcard symbol used in pattern keys.
pub const WILDCARD: &str = "?";

/// Whether every position of `key` is a wildcard. The empty key counts.
pub fn all_wild(key: &str) -> bool {
    key.chars().all(|c| c == '?')
}

/// Number of leading positions that take part in wildcard enumeration.
/// Never more than [`MAX_KEY_LEN_LIMIT`].
pub fn variant_positions(letters: &[String], max_key_len: usize) -> usize {
    letters.len().min(max_key_len).min(MAX_KEY_LEN_LIMIT)
}

/// Build one wildcard variant of `letters`.
///
/// Bit `i` of `mask` replaces position `i` with [`WILDCARD`]. Positions at or
/// beyond `max_key_len` (capped at [`MAX_KEY_LEN_LIMIT`]) are always
/// wildcards, so the key keeps the full letter length.
pub fn wildcard_key(letters: &[String], mask: u32, max_key_len: usize) -> String {
    let known = max_key_len.min(MAX_KEY_LEN_LIMIT);
    let mut key = String::with_capacity(letters.len() * 2);
    for (i, letter) in letters.iter().enumerate() {
        if i >= known || mask & (1 << i) != 0 {
            key.push_str(WILDCARD);
        } else {
            key.push_str(letter);
        }
    }
    key
}

/// All `2^L` wildcard variants of `letters`, where `L` is capped at
/// `max_key_len`. Variant `mask` is at position `mask` in the result.
pub fn wildcard_variants(letters: &[String], max_key_len: usize) -> Vec<String> {
    let len = variant_positions(letters, max_key_len);
    (0..1u32 << len)
        .map(|mask| wildcard_key(letters, mask, max_key_len))
        .collect()
}

/// The anagram signature of a letter sequence: letters sorted into the
/// lexicon's alphabet order and concatenated.
pub fn anagram_key(lexicon: &Lexicon, letters: &[String]) -> String {
    let mut sorted: Vec<&str> = letters.iter().map(String::as_str).collect();
    sorted.sort_by_key(|letter| lexicon.letter_rank(letter));
    sorted.concat()
}

/// The phonetic key of one phoneme sequence.
pub fn phonetic_key(lexicon: &Lexicon, phonemes: &[String]) -> String {
    phonemes.join(&lexicon.phoneme_separator)
}

/// `java.lang.String#hashCode` over the UTF-16 encoding of `key`.
pub fn java_hash(key: &str) -> i32 {
    key.encode_utf16().fold(0i32, |hash, unit| {
        (hash << 5).wrapping_sub(hash).wrapping_add(i32::from(unit))
    })
}

/// The shard a key belongs to, in `0..num_shards`.
pub fn index_shard(key: &str, num_shards: usize) -> usize {
    let n = num_shards as i64;
    let shard = i64::from(java_hash(key)) % n;
    if shard < 0 {
        (shard + n) as usize
    } else {
        shard as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::profile::LanguageProfile;

    fn letters(s: &str) -> Vec<String> {
        s.chars().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_java_hash_matches_known_values() {
        assert_eq!(java_hash(""), 0);
        assert_eq!(java_hash("a"), 97);
        assert_eq!(java_hash("ab"), 3105);
        assert_eq!(java_hash("hello"), 99162322);
        // Overflows i32 in Java as well.
        assert_eq!(java_hash("polygenelubricants"), i32::MIN);
    }

    #[test]
    fn test_java_hash_uses_utf16_units() {
        // U+1F600 is a surrogate pair: 0xD83D 0xDE00.
        let expected = 0xD83Di32.wrapping_mul(31).wrapping_add(0xDE00);
        assert_eq!(java_hash("\u{1F600}"), expected);
    }

    #[test]
    fn test_index_shard_is_non_negative() {
        assert_eq!(index_shard("polygenelubricants", 2000), 352);
        for key in ["", "ACT", "AEHLLO", "ZZZZZZZZZZZZZZ", "अकत"] {
            assert!(index_shard(key, 2000) < 2000);
        }
        assert_eq!(index_shard("anything", 1), 0);
    }

    #[test]
    fn test_wildcard_key_masks_positions() {
        let cat = letters("CAT");
        assert_eq!(wildcard_key(&cat, 0b000, 10), "CAT");
        assert_eq!(wildcard_key(&cat, 0b101, 10), "?A?");
        assert_eq!(wildcard_key(&cat, 0b111, 10), "???");
    }

    #[test]
    fn test_wildcard_key_beyond_max_len() {
        let word = letters("ABCDEFGHIJKL");
        assert_eq!(wildcard_key(&word, 0, 10), "ABCDEFGHIJ??");
        assert_eq!(wildcard_key(&word, 1, 10), "?BCDEFGHIJ??");
        assert_eq!(wildcard_variants(&word, 10).len(), 1024);
    }

    #[test]
    fn test_wildcard_variants() {
        let variants = wildcard_variants(&letters("AB"), 10);
        assert_eq!(variants, vec!["AB", "?B", "A?", "??"]);
        assert_eq!(wildcard_variants(&[], 10), vec![""]);
    }

    #[test]
    fn test_all_wild() {
        assert!(all_wild(""));
        assert!(all_wild("???"));
        assert!(!all_wild("?A?"));
    }

    #[test]
    fn test_anagram_key_uses_alphabet_order() {
        let profile = LanguageProfile::builtin("English").unwrap();
        let lexicon = Lexicon::new(&profile);
        // Vowels sort before consonants in the English alphabet.
        let key = anagram_key(&lexicon, &letters("CAT"));
        assert_eq!(key, "ACT");
        assert_eq!(anagram_key(&lexicon, &letters("ACT")), key);
        assert_eq!(anagram_key(&lexicon, &letters("BEE")), "EEB");
    }

    #[test]
    fn test_key_length_is_capped() {
        let letters: Vec<String> = (0..40).map(|i| ((b'A' + i % 26) as char).to_string()).collect();
        assert_eq!(variant_positions(&letters, 64), MAX_KEY_LEN_LIMIT);
        let key = wildcard_key(&letters, 0, 64);
        assert_eq!(key.chars().count(), 40);
        assert!(key[MAX_KEY_LEN_LIMIT..].chars().all(|c| c == '?'));
        assert_eq!(key, wildcard_key(&letters, 0, MAX_KEY_LEN_LIMIT));
    }
}
