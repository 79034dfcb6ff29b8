// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A card parsed from a deck file, not yet in the database.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ParsedCard {
    pub front: String,
    pub back: String,
}

/// Parse the text of a deck file into cards.
///
/// Cards are separated by blank lines. Within a card, the first ` / ` splits
/// the front from the back; either side may span multiple lines. Blocks with
/// no separator, or with an empty side, are skipped.
pub fn parse_cards(content: &str) -> Vec<ParsedCard> {
    let mut flashcards = Vec::new();

    let cards: Vec<&str> = content
        .split("\n\n")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .collect();

    for card_text in cards {
        if let Some(separator_pos) = card_text.find(" / ") {
            let front = card_text[..separator_pos].trim().to_string();
            let back = card_text[separator_pos + 3..].trim().to_string();
            if !front.is_empty() && !back.is_empty() {
                flashcards.push(ParsedCard { front, back });
            }
        }
    }

    flashcards
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let content = "What is the capital of France? / Paris";
        let cards = parse_cards(content);

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front, "What is the capital of France?");
        assert_eq!(cards[0].back, "Paris");
    }

    #[test]
    fn test_parse_multiple_cards() {
        let content =
            "What is the capital of France? / Paris\n\nWhat is the capital of Germany? / Berlin";
        let cards = parse_cards(content);

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].back, "Paris");
        assert_eq!(cards[1].back, "Berlin");
    }

    #[test]
    fn test_parse_with_extra_whitespace() {
        let content = "  What is 2+2? / 4  \n\n\nWhat is 3+3? / 6  ";
        let cards = parse_cards(content);

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].front, "What is 2+2?");
        assert_eq!(cards[0].back, "4");
    }

    #[test]
    fn test_empty_input() {
        let content = "";
        let cards = parse_cards(content);
        assert_eq!(cards.len(), 0);
    }

    #[test]
    fn test_empty_whitespace_input() {
        let content = "\n   \n  \n";
        let cards = parse_cards(content);
        assert_eq!(cards.len(), 0);
    }

    #[test]
    fn test_empty_sides() {
        let content = " / ";
        let cards = parse_cards(content);
        assert_eq!(cards.len(), 0);
    }

    #[test]
    fn test_invalid_cards_ignored() {
        let content = "This is not a valid card\n\nWhat is valid? / Yes\n\nAlso not valid";
        let cards = parse_cards(content);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front, "What is valid?");
        assert_eq!(cards[0].back, "Yes");
    }

    #[test]
    fn test_multiline_front_and_back() {
        let content = "What is\nthe capital of Russia? / Moscow";
        let cards = parse_cards(content);

        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front, "What is\nthe capital of Russia?");
        assert_eq!(cards[0].back, "Moscow");
    }

    #[test]
    fn test_first_separator_wins() {
        let content = "a / b / c";
        let cards = parse_cards(content);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].front, "a");
        assert_eq!(cards[0].back, "b / c");
    }
}
