//! The handful of fixed screens the game shows.

use heapless::String;

use crate::display::{Font, TextLine};

pub type ScoreText = String<20>;

pub const TITLE: [TextLine<'static>; 1] = [TextLine::new("Simon Says", 15, 40, Font::Title)];

pub const GAME_OVER: [TextLine<'static>; 1] = [TextLine::new("GAME OVER", 15, 30, Font::Title)];

pub const RESTART_PROMPT: [TextLine<'static>; 3] = [
    TextLine::new("GAME OVER", 15, 30, Font::Title),
    TextLine::new("Press any button", 0, 45, Font::Body),
    TextLine::new("to restart", 25, 60, Font::Body),
];

pub const VICTORY_PROMPT: [TextLine<'static>; 3] = [
    TextLine::new("YOU WIN!", 20, 30, Font::Title),
    TextLine::new("Press any button", 0, 45, Font::Body),
    TextLine::new("to restart", 25, 60, Font::Body),
];

fn labelled(label: &str, value: u16) -> ScoreText {
    let mut text = ScoreText::new();
    // room for the longest label plus five digits
    ufmt::uwrite!(&mut text, "{}{}", label, value).ok();
    text
}

/// "Your score: N" and "Best score: N".
pub fn score_texts(turn: u16, best: u16) -> (ScoreText, ScoreText) {
    (labelled("Your score: ", turn), labelled("Best score: ", best))
}

pub fn score<'a>(yours: &'a ScoreText, best: &'a ScoreText) -> [TextLine<'a>; 2] {
    [
        TextLine::new(yours.as_str(), 1, 25, Font::Body),
        TextLine::new(best.as_str(), 1, 50, Font::Body),
    ]
}
