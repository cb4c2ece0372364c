//! Built-in program ideas for empty requests.

use rand::seq::SliceRandom;

/// Example program descriptions offered when the operator presses Enter
/// without typing a request.
pub const PROGRAM_IDEAS: &[&str] = &[
    "Given two strings str1 and str2, prints all interleavings of the given \
     two strings. You may assume that all characters in both strings are \
     different. Input: str1 = \"AB\", str2 = \"CD\"",
    "A program that checks if a number is a palindrome",
    "A program that finds the kth smallest element in a given binary search tree",
    "A program that gets number and check if it is prime",
    "A program that calculate the GCD of two numbers",
];

/// Pick a random idea from the catalogue.
pub fn random_idea() -> &'static str {
    let mut rng = rand::thread_rng();
    PROGRAM_IDEAS
        .choose(&mut rng)
        .copied()
        .unwrap_or(PROGRAM_IDEAS[0])
}
