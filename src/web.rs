//! Browser binding
//!
//! The canvas renderer and Web Audio player live in JavaScript. They create
//! a `WebSession`, forward key presses, and call `frame()` once per
//! `requestAnimationFrame`, drawing the returned snapshot and reacting to
//! its events.

use wasm_bindgen::prelude::*;

use crate::best_score::BestScore;
use crate::session::{Command, Session};
use crate::settings::Settings;
use crate::sim::{Autopilot, Direction, GameEvent, Layout};

#[wasm_bindgen]
pub struct WebSession {
    session: Session,
    autopilot: Option<Autopilot>,
    seed: u64,
}

#[wasm_bindgen]
impl WebSession {
    /// Create a session with the default layout. `layout_json` may supply an
    /// alternative layout; an invalid one falls back to the default.
    #[wasm_bindgen(constructor)]
    pub fn new(layout_json: Option<String>) -> WebSession {
        console_error_panic_hook::set_once();
        // A second session on the same page already has a logger
        let _ = console_log::init_with_level(log::Level::Info);

        let layout = match layout_json.as_deref().map(Layout::from_json) {
            Some(Ok(layout)) => layout,
            Some(Err(e)) => {
                log::warn!("Invalid layout, using default: {}", e);
                Layout::default()
            }
            None => Layout::default(),
        };

        let seed = js_sys::Date::now() as u64;
        log::info!("Ghost Crossing starting (seed {})", seed);

        WebSession {
            session: Session::new(layout, Settings::load(), BestScore::load()),
            autopilot: None,
            seed,
        }
    }

    /// Handle a `KeyboardEvent.key`. Returns true if the key was used.
    pub fn key_down(&mut self, key: &str) -> bool {
        if let Some(direction) = Direction::from_key(key) {
            self.session.push(Command::Move(direction));
            return true;
        }
        match key {
            "r" | "R" => self.restart(),
            "m" | "M" => self.toggle_music(),
            "i" | "I" => self.toggle_autopilot(),
            _ => return false,
        }
        true
    }

    pub fn restart(&mut self) {
        self.session.restart();
    }

    pub fn toggle_music(&mut self) {
        self.session.toggle_music();
    }

    pub fn toggle_autopilot(&mut self) {
        self.autopilot = match self.autopilot {
            Some(_) => None,
            None => {
                self.seed = self.seed.wrapping_add(1);
                Some(Autopilot::new(self.seed))
            }
        };
        log::info!("Autopilot: {}", self.autopilot.is_some());
    }

    /// Advance one tick and return the frame as JSON
    pub fn frame(&mut self) -> String {
        if let Some(pilot) = self.autopilot.as_mut() {
            if let Some(direction) = pilot.next_move(self.session.state()) {
                self.session.push(Command::Move(direction));
            }
        }

        let frame = self.session.frame();
        for event in &frame.events {
            match event {
                GameEvent::NewBestScore { .. } => self.session.best_score().save(),
                GameEvent::MusicToggled { .. } => self.session.settings().save(),
                _ => {}
            }
        }

        serde_json::to_string(&frame).unwrap_or_else(|e| {
            log::error!("Frame serialization failed: {}", e);
            String::from("{}")
        })
    }

    /// Current state as JSON without ticking
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_else(|_| String::from("{}"))
    }
}
