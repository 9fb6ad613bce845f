//! Compile-time game tuning: timings, debounce policy, melodies and tones.

use crate::sequence::Slot;
use crate::tone::{Note, Pitch};

/// Longest sequence the buffer can hold. Completing this many rounds wins the game.
pub const SEQUENCE_CAPACITY: usize = 50;

/// Delays applied around a detected button press.
///
/// There is no filtering on the inputs themselves; bounce is swallowed by
/// holding the feedback for `press_confirm_ms` and `release_settle_ms`
/// before the next scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebouncePolicy {
    /// LED lit with its tone after a press is seen.
    pub press_confirm_ms: u32,
    /// Dark pause after the feedback before scanning resumes.
    pub release_settle_ms: u32,
    /// Pause after the restart press so it does not leak into the next pass.
    pub restart_settle_ms: u32,
}

/// How a slot is shown: LED on for `on_ms`, the first `tone_ms` of which
/// carry its tone, then dark for `off_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flash {
    pub tone_ms: u32,
    pub on_ms: u32,
    pub off_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Gap after each note of the startup and ready melodies.
    pub note_gap_ms: u32,
    /// Pause after a melody before the next screen.
    pub melody_hold_ms: u32,
    /// How long the score screen stays up before playback.
    pub score_hold_ms: u32,
    pub playback: Flash,
    /// Pause between the last correct press and the next round.
    pub pass_exit_ms: u32,
    /// Each half of the failure alarm.
    pub alarm_ms: u32,
    pub alarm_repeats: u8,
    /// Hold on the game over screen before the restart prompt.
    pub game_over_hold_ms: u32,
    /// LED blink period half while waiting for the restart press.
    pub restart_blink_ms: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub timings: Timings,
    pub debounce: DebouncePolicy,
    /// Tone of each slot, indexed like the LEDs and buttons.
    pub tones: [Pitch; 4],
    pub startup_tune: [Note; 6],
    /// LED lit under each startup note.
    pub startup_accents: [Slot; 6],
    pub ready_tune: [Note; 6],
    pub alarm: [Pitch; 2],
}

impl Config {
    pub const DEFAULT: Config = Config {
        timings: Timings {
            note_gap_ms: 25,
            melody_hold_ms: 1000,
            score_hold_ms: 1000,
            playback: Flash {
                tone_ms: 100,
                on_ms: 400,
                off_ms: 100,
            },
            pass_exit_ms: 500,
            alarm_ms: 200,
            alarm_repeats: 4,
            game_over_hold_ms: 2000,
            restart_blink_ms: 100,
        },
        debounce: DebouncePolicy {
            press_confirm_ms: 200,
            release_settle_ms: 250,
            restart_settle_ms: 1000,
        },
        tones: [Pitch::G3, Pitch::A3, Pitch::B3, Pitch::C4],
        startup_tune: [
            Note::new(Pitch::E4, 100),
            Note::new(Pitch::E4, 200),
            Note::new(Pitch::C4, 100),
            Note::new(Pitch::E4, 200),
            Note::new(Pitch::G4, 100),
            Note::new(Pitch::G4, 400),
        ],
        startup_accents: [
            Slot::ALL[0],
            Slot::ALL[1],
            Slot::ALL[0],
            Slot::ALL[1],
            Slot::ALL[2],
            Slot::ALL[2],
        ],
        ready_tune: [
            Note::new(Pitch::A4, 100),
            Note::new(Pitch::A4, 100),
            Note::new(Pitch::A4, 100),
            Note::new(Pitch::A4, 300),
            Note::new(Pitch::B4, 100),
            Note::new(Pitch::A4, 300),
        ],
        alarm: [Pitch::G2, Pitch::C2],
    };

    /// Tone used while a press is confirmed.
    pub const fn press_feedback(&self) -> Flash {
        Flash {
            tone_ms: self.timings.playback.tone_ms,
            on_ms: self.debounce.press_confirm_ms,
            off_ms: self.debounce.release_settle_ms,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::DEFAULT
    }
}
