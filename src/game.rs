//! The game state machine.
//!
//! [`Game::step`] runs the transition function of the current [`State`] to
//! completion and moves to the state it returns. All waiting happens inside
//! those functions through [`Outputs::sleep_ms`]; the only state that returns
//! early is [`State::AwaitingInput`], which hands back control after every
//! scan of the four buttons.

use ufmt::{uWrite, uwriteln};

use crate::config::{Config, Flash};
use crate::panel::{Inputs, Outputs};
use crate::screens;
use crate::sequence::{RecordError, Sequence, Slot, SlotSource};
use crate::store::ScoreStore;
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Boot,
    RoundIntro,
    Playback,
    /// `step` is the index of the next expected slot.
    AwaitingInput { step: u16 },
    RoundComplete,
    Failed,
    /// Every slot of the buffer was repeated correctly.
    Won,
}

/// Game data threaded through every transition.
#[derive(Debug, Default)]
pub struct Context {
    /// Rounds completed in this game.
    pub turn: u16,
    pub sequence: Sequence,
    pub high_score: u16,
}

pub struct Game<H, G, S, W> {
    hw: H,
    slots: G,
    store: S,
    log: W,
    config: Config,
    ctx: Context,
    state: State,
}

impl<H, G, S, W> Game<H, G, S, W>
where
    H: Outputs + Inputs,
    G: SlotSource,
    S: ScoreStore,
    W: uWrite,
{
    pub fn new(hw: H, slots: G, store: S, log: W) -> Self {
        Self::with_config(hw, slots, store, log, Config::DEFAULT)
    }

    pub fn with_config(hw: H, slots: G, store: S, log: W, config: Config) -> Self {
        Self {
            hw,
            slots,
            store,
            log,
            config,
            ctx: Context::default(),
            state: State::Boot,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn hardware(&self) -> &H {
        &self.hw
    }

    pub fn hardware_mut(&mut self) -> &mut H {
        &mut self.hw
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn log_mut(&mut self) -> &mut W {
        &mut self.log
    }

    /// Run the current state and advance. On error the state is kept, along
    /// with any presses already matched, so the next call picks up from there.
    pub fn step(&mut self) -> Result<State, Error> {
        let next = match self.state {
            State::Boot => self.boot()?,
            State::RoundIntro => self.round_intro()?,
            State::Playback => self.playback()?,
            State::AwaitingInput { step } => self.await_input(step)?,
            State::RoundComplete => self.round_complete(),
            State::Failed => self.failed()?,
            State::Won => self.won()?,
        };
        self.state = next;
        Ok(next)
    }

    fn boot(&mut self) -> Result<State, Error> {
        self.hw.set_all_leds(false)?;
        self.hw.stop_tone()?;

        self.ctx.high_score = self.store.load();
        uwriteln!(&mut self.log, "boot: best score {}", self.ctx.high_score).ok();

        self.hw.show_text(&screens::TITLE)?;
        self.play_startup_tune()?;
        self.hw.sleep_ms(self.config.timings.melody_hold_ms);
        Ok(State::RoundIntro)
    }

    fn round_intro(&mut self) -> Result<State, Error> {
        let t = self.config.timings;

        self.hw.show_text(&screens::TITLE)?;
        self.hw.set_all_leds(true)?;
        for note in self.config.ready_tune {
            self.hw.play_tone(note.pitch, note.ms as u32)?;
            self.hw.stop_tone()?;
            self.hw.sleep_ms(t.note_gap_ms);
        }
        self.hw.set_all_leds(false)?;
        self.hw.sleep_ms(t.melody_hold_ms);

        self.record_best();

        let (yours, best) = screens::score_texts(self.ctx.turn, self.ctx.high_score);
        self.hw.show_text(&screens::score(&yours, &best))?;
        self.hw.sleep_ms(t.score_hold_ms);

        uwriteln!(&mut self.log, "round {}", self.ctx.turn + 1).ok();
        Ok(State::Playback)
    }

    fn playback(&mut self) -> Result<State, Error> {
        let slot = self.slots.next_slot();
        let recorded = match self.ctx.sequence.record(self.ctx.turn as usize, slot) {
            Err(RecordError::Gap) => {
                uwriteln!(&mut self.log, "turn {} past the sequence, starting over", self.ctx.turn).ok();
                self.ctx.turn = 0;
                self.ctx.sequence.record(0, slot)
            }
            recorded => recorded,
        };
        if recorded.is_err() {
            // RoundComplete stops the game before the buffer overflows
            return Ok(State::Won);
        }
        uwriteln!(&mut self.log, "new slot {}", slot).ok();

        let turn = self.ctx.turn as usize;
        let flash = self.config.timings.playback;
        for i in 0..=turn {
            let Some(slot) = self.ctx.sequence.get(i) else {
                break;
            };
            self.flash(slot, flash)?;
        }
        Ok(State::AwaitingInput { step: 0 })
    }

    fn await_input(&mut self, mut step: u16) -> Result<State, Error> {
        for slot in Slot::ALL {
            if !self.hw.read_button(slot)? {
                continue;
            }
            self.flash(slot, self.config.press_feedback())?;

            match self.ctx.sequence.get(step as usize) {
                Some(expected) if expected == slot => {}
                Some(expected) => {
                    uwriteln!(&mut self.log, "press {}: expected {}, got {}", step + 1, expected, slot).ok();
                    return Ok(State::Failed);
                }
                None => {
                    uwriteln!(&mut self.log, "press {}: nothing expected, got {}", step + 1, slot).ok();
                    return Ok(State::Failed);
                }
            }

            step += 1;
            self.state = State::AwaitingInput { step };
            if step > self.ctx.turn {
                self.hw.sleep_ms(self.config.timings.pass_exit_ms);
                self.ctx.turn += 1;
                uwriteln!(&mut self.log, "pass complete, turn {}", self.ctx.turn).ok();
                return Ok(State::RoundComplete);
            }
        }
        Ok(State::AwaitingInput { step })
    }

    fn round_complete(&self) -> State {
        if self.ctx.sequence.is_full() {
            State::Won
        } else {
            State::RoundIntro
        }
    }

    fn failed(&mut self) -> Result<State, Error> {
        let t = self.config.timings;
        let [high, low] = self.config.alarm;
        uwriteln!(&mut self.log, "game over at turn {}", self.ctx.turn).ok();

        self.hw.show_text(&screens::GAME_OVER)?;
        for _ in 0..t.alarm_repeats {
            self.hw.set_all_leds(true)?;
            self.hw.play_tone(high, t.alarm_ms)?;
            self.hw.set_all_leds(false)?;
            self.hw.play_tone(low, t.alarm_ms)?;
        }
        self.hw.stop_tone()?;
        self.hw.sleep_ms(t.game_over_hold_ms);

        self.hw.show_text(&screens::RESTART_PROMPT)?;
        self.await_restart()
    }

    fn won(&mut self) -> Result<State, Error> {
        uwriteln!(&mut self.log, "sequence complete after {} rounds", self.ctx.turn).ok();
        self.record_best();

        self.hw.show_text(&screens::VICTORY_PROMPT)?;
        self.play_startup_tune()?;
        self.await_restart()
    }

    /// Blink until any button goes down, then start over from turn 0.
    fn await_restart(&mut self) -> Result<State, Error> {
        let blink = self.config.timings.restart_blink_ms;
        while !self.hw.any_pressed()? {
            self.hw.set_all_leds(true)?;
            self.hw.sleep_ms(blink);
            self.hw.set_all_leds(false)?;
            self.hw.sleep_ms(blink);
        }
        self.hw.sleep_ms(self.config.debounce.restart_settle_ms);

        self.ctx.turn = 0;
        uwriteln!(&mut self.log, "restart").ok();
        Ok(State::RoundIntro)
    }

    fn record_best(&mut self) {
        if self.ctx.turn > self.ctx.high_score {
            self.ctx.high_score = self.ctx.turn;
            self.store.save(self.ctx.turn);
            uwriteln!(&mut self.log, "new best score {}", self.ctx.turn).ok();
        }
    }

    fn play_startup_tune(&mut self) -> Result<(), Error> {
        let gap = self.config.timings.note_gap_ms;
        for (note, led) in self.config.startup_tune.into_iter().zip(self.config.startup_accents) {
            self.hw.set_led(led, true)?;
            self.hw.play_tone(note.pitch, note.ms as u32)?;
            self.hw.stop_tone()?;
            self.hw.set_all_leds(false)?;
            self.hw.sleep_ms(gap);
        }
        Ok(())
    }

    fn flash(&mut self, slot: Slot, flash: Flash) -> Result<(), Error> {
        self.hw.set_led(slot, true)?;
        self.hw.play_tone(self.config.tones[slot.index()], flash.tone_ms)?;
        self.hw.sleep_ms(flash.on_ms.saturating_sub(flash.tone_ms));
        self.hw.set_led(slot, false)?;
        self.hw.sleep_ms(flash.off_ms);
        Ok(())
    }
}
