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

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use tracing::debug;
use zeroize::Zeroizing;

use crate::entropy::generate_entropy_with;
use crate::error::Result;
use crate::mnemonic::{Mnemonic, entropy_to_mnemonic};

/// New random phrase of `word_count` words (12, 15, 18, 21 or 24), words
/// separated by single spaces.
pub fn generate_mnemonic(word_count: usize) -> Result<Zeroizing<String>> {
    let mnemonic = generate_mnemonic_with(&mut OsRng, word_count)?;
    Ok(Zeroizing::new(mnemonic.phrase().to_owned()))
}

pub fn generate_mnemonic_with<R: RngCore + CryptoRng>(
    rng: &mut R,
    word_count: usize,
) -> Result<Mnemonic> {
    let entropy = generate_entropy_with(rng, word_count).inspect_err(|err| {
        debug!(%err, "refused to generate mnemonic");
    })?;

    Ok(entropy_to_mnemonic(&entropy))
}
