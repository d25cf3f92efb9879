// This file is part of mnemo.
//
// Copyright (c) 2026  René Coignard <contact@renecoignard.com>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

use crate::error::Result;
use crate::mnemonic::Mnemonic;

pub const SEED_ROUNDS: u32 = 2048;
pub const SALT_PREFIX: &str = "mnemonic";
pub const SEED_LEN: usize = 64;
pub const MINI_SECRET_LEN: usize = 32;

/// BIP39 seed: PBKDF2-HMAC-SHA512 over the normalized phrase, salted with
/// `"mnemonic"` followed by the NFKD passphrase.
pub fn mnemonic_to_seed(mnemonic: &str, passphrase: &str) -> Result<Zeroizing<[u8; SEED_LEN]>> {
    let mnemonic = Mnemonic::parse(mnemonic)?;
    Ok(derive_seed(&mnemonic, passphrase))
}

/// 32-byte mini-secret: the same PBKDF2 construction keyed with the raw
/// entropy instead of the phrase, truncated to the first 32 bytes. Unlike the
/// seed, the passphrase enters the salt exactly as given, without NFKD.
pub fn mnemonic_to_mini_secret(
    mnemonic: &str,
    passphrase: &str,
) -> Result<Zeroizing<[u8; MINI_SECRET_LEN]>> {
    let mnemonic = Mnemonic::parse(mnemonic)?;
    Ok(derive_mini_secret(&mnemonic, passphrase))
}

pub fn derive_seed(mnemonic: &Mnemonic, passphrase: &str) -> Zeroizing<[u8; SEED_LEN]> {
    debug!(
        words = mnemonic.word_count().words(),
        passphrase = !passphrase.is_empty(),
        "deriving seed"
    );

    // Canonical phrase: wordlist entries are ASCII, so it is already NFKD.
    let salt = seed_salt(passphrase);
    stretch(mnemonic.phrase().as_bytes(), salt.as_bytes())
}

pub fn derive_mini_secret(
    mnemonic: &Mnemonic,
    passphrase: &str,
) -> Zeroizing<[u8; MINI_SECRET_LEN]> {
    debug!(
        words = mnemonic.word_count().words(),
        passphrase = !passphrase.is_empty(),
        "deriving mini-secret"
    );

    let salt = mini_secret_salt(passphrase);
    let stretched = stretch(mnemonic.entropy().as_bytes(), salt.as_bytes());

    let mut secret = Zeroizing::new([0u8; MINI_SECRET_LEN]);
    secret.copy_from_slice(&stretched[..MINI_SECRET_LEN]);
    secret
}

fn stretch(password: &[u8], salt: &[u8]) -> Zeroizing<[u8; SEED_LEN]> {
    let mut output = Zeroizing::new([0u8; SEED_LEN]);
    pbkdf2_hmac::<Sha512>(password, salt, SEED_ROUNDS, &mut output[..]);
    output
}

fn seed_salt(passphrase: &str) -> Zeroizing<String> {
    let mut salt = Zeroizing::new(String::with_capacity(SALT_PREFIX.len() + passphrase.len()));
    salt.push_str(SALT_PREFIX);
    salt.extend(passphrase.nfkd());
    salt
}

fn mini_secret_salt(passphrase: &str) -> Zeroizing<String> {
    let mut salt = Zeroizing::new(String::with_capacity(SALT_PREFIX.len() + passphrase.len()));
    salt.push_str(SALT_PREFIX);
    salt.push_str(passphrase);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, MnemonicFault};

    const PHRASE: &str =
        "daughter song common combine misery cotton audit morning stuff weasel flee field";

    const MINI_SECRET: [u8; 32] = [
        49, 98, 91, 191, 124, 49, 124, 0, 208, 99, 248, 41, 196, 131, 195, 96, 115, 127, 171, 82,
        16, 205, 187, 45, 20, 195, 40, 22, 91, 21, 209, 128,
    ];

    const SEED: [u8; 64] = [
        97, 142, 41, 83, 73, 179, 98, 128, 176, 134, 250, 222, 64, 184, 51, 176, 121, 119, 215,
        115, 220, 77, 28, 15, 253, 64, 10, 1, 213, 54, 239, 124, 13, 177, 228, 36, 117, 73, 233,
        203, 69, 210, 93, 42, 124, 115, 127, 160, 98, 177, 26, 4, 212, 251, 48, 82, 108, 28, 77,
        197, 86, 84, 240, 119,
    ];

    fn seed_hex(phrase: &str, passphrase: &str) -> String {
        hex::encode(&mnemonic_to_seed(phrase, passphrase).unwrap()[..])
    }

    fn mini_secret_hex(phrase: &str, passphrase: &str) -> String {
        hex::encode(&mnemonic_to_mini_secret(phrase, passphrase).unwrap()[..])
    }

    #[test]
    fn test_mini_secret_vector() {
        let secret = mnemonic_to_mini_secret(PHRASE, "").unwrap();
        assert_eq!(*secret, MINI_SECRET);
    }

    #[test]
    fn test_seed_vector() {
        let seed = mnemonic_to_seed(PHRASE, "").unwrap();
        assert_eq!(seed.len(), SEED_LEN);
        assert_eq!(*seed, SEED);
    }

    #[test]
    fn test_with_passphrase_vectors() {
        assert_eq!(
            mini_secret_hex(PHRASE, "TREZOR"),
            "d714c27453fdffb0331ce44d1f97979af8fca37fedbdfcc30071e980d60acecb"
        );
        assert_eq!(
            seed_hex(PHRASE, "TREZOR"),
            "36d756aa1bdb578749c076bc28ed7595573ffc33c256872a4b22277cf6e19773\
             5621b74d44a3df9e09250a60faf99c634a7c7f536f5364b7ed244e30b8a09b2c"
        );
    }

    #[test]
    fn test_bip39_trezor_seed_vectors() {
        let cases = [
            (
                "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
                "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e5349553\
                 1f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04",
            ),
            (
                "legal winner thank year wave sausage worth useful legal winner thank yellow",
                "2e8905819b8723fe2c1d161860e5ee1830318dbf49a83bd451cfb8440c28bd6f\
                 a457fe1296106559a3c80937a1c1069be3a3a5bd381ee6260e8d9739fce1f607",
            ),
            (
                "letter advice cage absurd amount doctor acoustic avoid letter advice cage above",
                "d71de856f81a8acc65e6fc851a38d4d7ec216fd0796d0a6827a3ad6ed5511a30\
                 fa280f12eb2e47ed2ac03b5c462a0358d18d69fe4f985ec81778c1b370b652a8",
            ),
        ];

        for (phrase, expected) in cases {
            assert_eq!(seed_hex(phrase, "TREZOR"), expected, "{}", phrase);
        }
    }

    #[test]
    fn test_mini_secret_full_length_entropy() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";
        assert_eq!(
            mini_secret_hex(phrase, ""),
            "4ed8d4b17698ddeaa1f1559f152f87b5d472f725ca86d341bd0276f1b61197e2"
        );
    }

    #[test]
    fn test_invalid_mnemonic_rejected() {
        assert_eq!(
            mnemonic_to_seed("invalid mnemonic", "").unwrap_err(),
            Error::InvalidMnemonic(MnemonicFault::WordCount(2))
        );
        assert!(matches!(
            mnemonic_to_mini_secret("invalid mnemonic", ""),
            Err(Error::InvalidMnemonic(_))
        ));

        let bad_checksum = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert!(matches!(
            mnemonic_to_seed(bad_checksum, "TREZOR"),
            Err(Error::InvalidMnemonic(MnemonicFault::Checksum))
        ));
    }

    #[test]
    fn test_deterministic_derivation() {
        assert_eq!(seed_hex(PHRASE, "pass"), seed_hex(PHRASE, "pass"));
        assert_eq!(mini_secret_hex(PHRASE, "pass"), mini_secret_hex(PHRASE, "pass"));
    }

    #[test]
    fn test_different_passphrases_different_keys() {
        assert_ne!(seed_hex(PHRASE, ""), seed_hex(PHRASE, "a"));
        assert_ne!(mini_secret_hex(PHRASE, ""), mini_secret_hex(PHRASE, "a"));
        assert_ne!(seed_hex(PHRASE, "a"), seed_hex(PHRASE, "A"));
    }

    #[test]
    fn test_seed_and_mini_secret_independent() {
        let seed = mnemonic_to_seed(PHRASE, "").unwrap();
        let secret = mnemonic_to_mini_secret(PHRASE, "").unwrap();
        assert_ne!(&seed[..MINI_SECRET_LEN], &secret[..]);
    }

    #[test]
    fn test_unicode_normalization_passphrase() {
        let nfc = "caf\u{e9}";
        let nfd = "cafe\u{0301}";

        assert_eq!(seed_hex(PHRASE, nfc), seed_hex(PHRASE, nfd));
        assert!(seed_hex(PHRASE, nfc).starts_with("bc8ea7423566927c"));
    }

    #[test]
    fn test_mini_secret_passphrase_not_normalized() {
        let nfc = "caf\u{e9}";
        let nfd = "cafe\u{0301}";

        assert_eq!(
            mini_secret_hex(PHRASE, nfc),
            "9dec906ee06d81216fee0fe5c58c3eb2eabef6f857bde90cf450973b53de690f"
        );
        assert_eq!(
            mini_secret_hex(PHRASE, nfd),
            "d0f9444d8238322a2548dfce8b292c20a3893a81745d7aee5cd3295a1879460d"
        );
        assert_eq!(
            mini_secret_hex(PHRASE, "ＴＲＥＺＯＲ"),
            "0f250722bc3cccf7c72e802f49c7120e08fe6486bde1bee04ee61e9f248b5ba3"
        );
    }

    #[test]
    fn test_unicode_compatibility_passphrase() {
        // NFKD folds the fullwidth forms to ASCII.
        assert_eq!(seed_hex(PHRASE, "ＴＲＥＺＯＲ"), seed_hex(PHRASE, "TREZOR"));
    }

    #[test]
    fn test_whitespace_in_phrase_ignored() {
        let messy = "  daughter song  common combine misery cotton audit morning stuff weasel flee\tfield\n";

        assert_eq!(seed_hex(messy, ""), hex::encode(SEED));
        assert_eq!(mini_secret_hex(messy, ""), hex::encode(MINI_SECRET));
    }

    #[test]
    fn test_passphrase_whitespace_significant() {
        assert_ne!(seed_hex(PHRASE, "pass"), seed_hex(PHRASE, " pass"));
    }

    #[test]
    fn test_salt_layout() {
        assert_eq!(seed_salt("").as_str(), "mnemonic");
        assert_eq!(seed_salt("TREZOR").as_str(), "mnemonicTREZOR");
        assert_eq!(seed_salt("cafe\u{0301}").as_str(), seed_salt("caf\u{e9}").as_str());

        assert_eq!(mini_secret_salt("").as_str(), "mnemonic");
        assert_eq!(mini_secret_salt("caf\u{e9}").as_str(), "mnemoniccaf\u{e9}");
        assert_ne!(
            mini_secret_salt("cafe\u{0301}").as_str(),
            mini_secret_salt("caf\u{e9}").as_str()
        );
    }

    #[test]
    fn test_methods_match_free_functions() {
        let mnemonic = Mnemonic::parse(PHRASE).unwrap();

        assert_eq!(*mnemonic.to_seed(""), SEED);
        assert_eq!(*mnemonic.to_mini_secret(""), MINI_SECRET);
    }
}
