//! `hashsig compare` – compare two hex digests.

use hashsig_core::digest;
use hashsig_core::Verdict;

use super::exit_code;

pub fn run_compare(first: &str, second: &str) -> i32 {
    if digest::equal(first, second) {
        println!("Hashes match");
        exit_code(Verdict::DigestsMatch)
    } else {
        println!("Hashes don't match");
        exit_code(Verdict::DigestsMismatch)
    }
}
