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

use std::sync::OnceLock;

const WORDLIST_DATA: &str = include_str!("../assets/english.txt");

#[cfg(test)]
const EXPECTED_SHA256: &str = "2f5eed53a4727b4bf8880d8f3f199efc90e58503646d9ff8eff3a2ed3b24dbda";

const WORDLIST_SIZE: usize = 2048;

static WORDLIST: OnceLock<Vec<&'static str>> = OnceLock::new();

/// The BIP39 English wordlist, parsed on first use.
pub fn get_wordlist() -> &'static [&'static str] {
    WORDLIST.get_or_init(|| {
        let words: Vec<&'static str> = WORDLIST_DATA
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        assert_eq!(
            words.len(),
            WORDLIST_SIZE,
            "Wordlist must contain exactly 2048 words"
        );
        words
    })
}

pub const fn wordlist_size() -> u16 {
    WORDLIST_SIZE as u16
}

/// Position of `word` in the wordlist. Matching is exact and case-sensitive;
/// the list is sorted, so this is a binary search.
pub fn word_index(word: &str) -> Option<u16> {
    get_wordlist()
        .binary_search_by(|probe| (*probe).cmp(word))
        .ok()
        .map(|index| index as u16)
}
