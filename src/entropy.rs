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

use std::fmt;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};

/// Supported mnemonic lengths. Every other parameter of a phrase follows from
/// the word count: ENT = 32 * words / 3 bits, CS = words / 3 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WordCount {
    Words12 = 12,
    Words15 = 15,
    Words18 = 18,
    Words21 = 21,
    Words24 = 24,
}

impl WordCount {
    pub const ALL: [Self; 5] = [
        Self::Words12,
        Self::Words15,
        Self::Words18,
        Self::Words21,
        Self::Words24,
    ];

    pub const fn words(self) -> usize {
        self as usize
    }

    pub const fn entropy_bits(self) -> usize {
        32 * self.words() / 3
    }

    pub const fn entropy_bytes(self) -> usize {
        self.words() * 4 / 3
    }

    pub const fn checksum_bits(self) -> usize {
        self.words() / 3
    }

    pub fn from_entropy_len(len: usize) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|count| count.entropy_bytes() == len)
            .ok_or(Error::InvalidEntropyLength(len))
    }
}

impl TryFrom<usize> for WordCount {
    type Error = Error;

    fn try_from(words: usize) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|count| count.words() == words)
            .ok_or(Error::InvalidWordCount(words))
    }
}

impl fmt::Display for WordCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.words())
    }
}

/// Raw entropy behind a mnemonic, 16 to 32 bytes in 4-byte steps.
/// Wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Entropy {
    bytes: Vec<u8>,
    #[zeroize(skip)]
    count: WordCount,
}

impl Entropy {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let count = WordCount::from_entropy_len(bytes.len())?;
        Ok(Self {
            bytes: bytes.to_vec(),
            count,
        })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn word_count(&self) -> WordCount {
        self.count
    }
}

impl AsRef<[u8]> for Entropy {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl fmt::Debug for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entropy([REDACTED; {} bytes])", self.bytes.len())
    }
}

/// Fresh entropy for a phrase of `word_count` words, read from the operating
/// system CSPRNG.
pub fn generate_entropy(word_count: usize) -> Result<Entropy> {
    generate_entropy_with(&mut OsRng, word_count)
}

pub fn generate_entropy_with<R: RngCore + CryptoRng>(
    rng: &mut R,
    word_count: usize,
) -> Result<Entropy> {
    let count = WordCount::try_from(word_count)?;

    let mut bytes = vec![0u8; count.entropy_bytes()];
    rng.fill_bytes(&mut bytes);

    debug!(words = count.words(), bytes = bytes.len(), "generated entropy");
    Ok(Entropy { bytes, count })
}
