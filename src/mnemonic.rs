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

//! Conversion between entropy and BIP39 phrases.
//!
//! A phrase of N words carries 11 * N bits: the entropy followed by the
//! first `ENT / 32` bits of SHA-256(entropy). Each 11-bit group, read
//! big-endian, is an index into the wordlist.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};
use tracing::{debug, trace};
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, Zeroizing};

use crate::entropy::{Entropy, WordCount};
use crate::error::{Error, MnemonicFault, Result};
use crate::kdf;
use crate::wordlist::{get_wordlist, word_index};

const INDEX_BITS: usize = 11;
const INDEX_MASK: u32 = (1 << INDEX_BITS) - 1;

/// A phrase that has passed word count, wordlist and checksum validation.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic {
    entropy: Entropy,
    indices: Zeroizing<Vec<u16>>,
    phrase: Zeroizing<String>,
}

impl Mnemonic {
    /// Encodes raw entropy bytes. Fails with [`Error::InvalidEntropyLength`]
    /// unless the length is 16, 20, 24, 28 or 32.
    pub fn from_entropy(bytes: &[u8]) -> Result<Self> {
        Ok(Self::encode(Entropy::from_bytes(bytes)?))
    }

    /// Parses and fully validates a phrase. The text is NFKD-normalized and
    /// split on any whitespace, so surrounding or repeated blanks are ignored.
    pub fn parse(text: &str) -> Result<Self> {
        let indices = parse_indices(text).inspect_err(|fault| {
            debug!(%fault, "rejected mnemonic");
        })?;

        let entropy = decode(&indices).inspect_err(|fault| {
            debug!(%fault, "rejected mnemonic");
        })?;

        Ok(Self::from_parts(entropy, indices))
    }

    pub fn entropy(&self) -> &Entropy {
        &self.entropy
    }

    pub fn word_count(&self) -> WordCount {
        self.entropy.word_count()
    }

    /// Words joined by single ASCII spaces.
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    pub fn words(&self) -> impl Iterator<Item = &'static str> + '_ {
        let wordlist = get_wordlist();
        self.indices.iter().map(move |&index| wordlist[index as usize])
    }

    pub fn to_seed(&self, passphrase: &str) -> Zeroizing<[u8; kdf::SEED_LEN]> {
        kdf::derive_seed(self, passphrase)
    }

    pub fn to_mini_secret(&self, passphrase: &str) -> Zeroizing<[u8; kdf::MINI_SECRET_LEN]> {
        kdf::derive_mini_secret(self, passphrase)
    }

    fn encode(entropy: Entropy) -> Self {
        let count = entropy.word_count();
        let checksum = Sha256::digest(entropy.as_bytes())[0];

        let mut indices = Zeroizing::new(Vec::with_capacity(count.words()));
        let mut acc: u32 = 0;
        let mut acc_bits = 0;

        // The checksum never exceeds 8 bits, so only its first byte is fed in;
        // its unused trailing bits are left in the accumulator.
        for &byte in entropy.as_bytes().iter().chain(std::iter::once(&checksum)) {
            acc = (acc << 8) | u32::from(byte);
            acc_bits += 8;

            while acc_bits >= INDEX_BITS && indices.len() < count.words() {
                acc_bits -= INDEX_BITS;
                indices.push(((acc >> acc_bits) & INDEX_MASK) as u16);
                acc &= (1u32 << acc_bits) - 1;
            }
        }
        acc.zeroize();

        trace!(words = count.words(), "encoded entropy");
        Self::from_parts(entropy, indices)
    }

    fn from_parts(entropy: Entropy, indices: Zeroizing<Vec<u16>>) -> Self {
        let wordlist = get_wordlist();

        let mut phrase = Zeroizing::new(String::with_capacity(indices.len() * 9));
        for (i, &index) in indices.iter().enumerate() {
            if i > 0 {
                phrase.push(' ');
            }
            phrase.push_str(wordlist[index as usize]);
        }

        Self {
            entropy,
            indices,
            phrase,
        }
    }
}

fn parse_indices(text: &str) -> std::result::Result<Zeroizing<Vec<u16>>, MnemonicFault> {
    let normalized: Zeroizing<String> = Zeroizing::new(text.nfkd().collect());
    let words: Vec<&str> = normalized.split_whitespace().collect();

    let count =
        WordCount::try_from(words.len()).map_err(|_| MnemonicFault::WordCount(words.len()))?;

    let mut indices = Zeroizing::new(Vec::with_capacity(count.words()));
    for (position, word) in words.iter().enumerate() {
        let index = word_index(word).ok_or(MnemonicFault::UnknownWord(position))?;
        indices.push(index);
    }

    Ok(indices)
}

/// Reassembles the bit stream from wordlist indices and checks the checksum.
fn decode(indices: &[u16]) -> std::result::Result<Entropy, MnemonicFault> {
    let count =
        WordCount::try_from(indices.len()).map_err(|_| MnemonicFault::WordCount(indices.len()))?;

    let mut bytes = Zeroizing::new(Vec::with_capacity(count.entropy_bytes() + 1));
    let mut acc: u32 = 0;
    let mut acc_bits = 0;

    for &index in indices {
        acc = (acc << INDEX_BITS) | (u32::from(index) & INDEX_MASK);
        acc_bits += INDEX_BITS;

        while acc_bits >= 8 {
            acc_bits -= 8;
            bytes.push((acc >> acc_bits) as u8);
            acc &= (1u32 << acc_bits) - 1;
        }
    }
    if acc_bits > 0 {
        bytes.push((acc << (8 - acc_bits)) as u8);
    }
    acc.zeroize();

    let (data, tail) = bytes.split_at(count.entropy_bytes());
    let mask = 0xffu8 << (8 - count.checksum_bits());
    let expected = Sha256::digest(data)[0] & mask;

    if tail.first().copied() != Some(expected) {
        return Err(MnemonicFault::Checksum);
    }

    Entropy::from_bytes(data).map_err(|_| MnemonicFault::WordCount(indices.len()))
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.phrase)
    }
}

impl fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mnemonic([REDACTED; {} words])", self.indices.len())
    }
}

impl FromStr for Mnemonic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

pub fn entropy_to_mnemonic(entropy: &Entropy) -> Mnemonic {
    Mnemonic::encode(entropy.clone())
}

/// Recovers the entropy behind a phrase, failing with
/// [`Error::InvalidMnemonic`] wherever [`validate_mnemonic`] returns `false`.
pub fn mnemonic_to_entropy(text: &str) -> Result<Entropy> {
    Mnemonic::parse(text).map(|mnemonic| mnemonic.entropy)
}

/// Total check of untrusted input: never fails, never panics.
pub fn validate_mnemonic(text: &str) -> bool {
    Mnemonic::parse(text).is_ok()
}
