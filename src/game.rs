//! Choice list backing the challenge accept flow's select menu.

use rand::seq::SliceRandom;

pub const CHOICES: [&str; 3] = ["rock", "paper", "scissors"];

/// Choices in a fresh random order, so the menu doesn't telegraph a default.
pub fn shuffled_choices() -> Vec<&'static str> {
    let mut choices = CHOICES.to_vec();
    choices.shuffle(&mut rand::thread_rng());
    choices
}

/// Uppercases the first letter for display labels.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{capitalize, shuffled_choices, CHOICES};

    #[test]
    fn shuffled_choices_is_a_permutation_of_the_choice_list() {
        let mut shuffled = shuffled_choices();
        shuffled.sort_unstable();
        let mut expected = CHOICES.to_vec();
        expected.sort_unstable();
        assert_eq!(shuffled, expected);
    }

    #[test]
    fn capitalize_uppercases_the_first_letter_only() {
        assert_eq!(capitalize("rock"), "Rock");
        assert_eq!(capitalize("r"), "R");
        assert_eq!(capitalize(""), "");
    }
}
