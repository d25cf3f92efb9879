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

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("invalid word count {0}, expected one of 12, 15, 18, 21 or 24")]
    InvalidWordCount(usize),

    #[error("invalid entropy length {0} bytes, expected one of 16, 20, 24, 28 or 32")]
    InvalidEntropyLength(usize),

    #[error("invalid mnemonic: {0}")]
    InvalidMnemonic(MnemonicFault),
}

/// Why a phrase was rejected. Carried by [`Error::InvalidMnemonic`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MnemonicFault {
    #[error("unsupported number of words ({0})")]
    WordCount(usize),

    /// Zero-based position of the first word missing from the wordlist.
    #[error("word {0} is not in the wordlist")]
    UnknownWord(usize),

    #[error("checksum mismatch")]
    Checksum,
}

impl From<MnemonicFault> for Error {
    fn from(fault: MnemonicFault) -> Self {
        Error::InvalidMnemonic(fault)
    }
}
