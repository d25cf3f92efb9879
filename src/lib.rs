pub mod entropy;
pub mod error;
pub mod generator;
pub mod kdf;
pub mod mnemonic;
pub mod wordlist;

pub use entropy::{Entropy, WordCount, generate_entropy, generate_entropy_with};
pub use error::{Error, MnemonicFault, Result};
pub use generator::{generate_mnemonic, generate_mnemonic_with};
pub use kdf::{MINI_SECRET_LEN, SEED_LEN, mnemonic_to_mini_secret, mnemonic_to_seed};
pub use mnemonic::{Mnemonic, entropy_to_mnemonic, mnemonic_to_entropy, validate_mnemonic};
pub use wordlist::{get_wordlist, word_index, wordlist_size};
