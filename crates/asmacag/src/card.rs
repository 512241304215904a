use serde::{Deserialize, Serialize};
use std::fmt;

/// An ASMACAG card.
///
/// Number cards are played on number cards on the board and score the
/// difference. The two special cards scale the score of the next number
/// card played by the same player.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Card {
    Number(u8),
    Mult2,
    Div2,
}

impl Card {
    /// Returns the number on the card, if it is a number card
    #[inline]
    pub const fn number(self) -> Option<u8> {
        match self {
            Card::Number(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_number(self) -> bool {
        matches!(self, Card::Number(_))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Number(n) => write!(f, "{}", n),
            Card::Mult2 => write!(f, "x2"),
            Card::Div2 => write!(f, "/2"),
        }
    }
}

/// Removes the first copy of `card` from `cards`, returning whether one was found.
pub(crate) fn take(cards: &mut Vec<Card>, card: Card) -> bool {
    match cards.iter().position(|&c| c == card) {
        Some(index) => {
            cards.remove(index);
            true
        }
        None => false,
    }
}

/// Formats a pile as `[a] [b] [c]`.
pub(crate) struct Pile<'a>(pub &'a [Card]);

impl fmt::Display for Pile<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "[{}]", card)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number() {
        assert_eq!(Card::Number(4).number(), Some(4));
        assert_eq!(Card::Mult2.number(), None);
        assert!(Card::Number(1).is_number());
        assert!(!Card::Div2.is_number());
    }

    #[test]
    fn test_ordering_puts_numbers_first() {
        let mut cards = vec![Card::Div2, Card::Number(3), Card::Mult2, Card::Number(1)];
        cards.sort();
        assert_eq!(cards, vec![Card::Number(1), Card::Number(3), Card::Mult2, Card::Div2]);
    }

    #[test]
    fn test_take_removes_one_copy() {
        let mut cards = vec![Card::Number(2), Card::Mult2, Card::Number(2)];
        assert!(take(&mut cards, Card::Number(2)));
        assert_eq!(cards, vec![Card::Mult2, Card::Number(2)]);
        assert!(!take(&mut cards, Card::Div2));
        assert_eq!(cards.len(), 2);
    }

    #[test]
    fn test_display() {
        let cards = [Card::Number(6), Card::Mult2, Card::Div2];
        assert_eq!(Pile(&cards).to_string(), "[6] [x2] [/2]");
        assert_eq!(Pile(&[]).to_string(), "");
    }
}
