//! Headless key scripts.
//!
//! A script is literal text mixed with `<token>` keys, e.g.
//! `ca<down><down><enter>`. Whitespace outside tokens is ignored so scripts
//! can span lines; use `<space>` for a literal space and `<lt>` for `<`.
//! `<wait>` lets every pending timer fire; `<wait:250>` advances 250 ms.

use crate::core::NodeId;
use crate::error::{Error, Result};
use crate::runtime::event::AppEvent;
use crate::runtime::session::Session;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers, TerminalEvent, TerminalSize};
use crate::ui::frame_json::frame_to_json;
use indexmap::IndexMap;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Virtual time between two scripted keys.
const KEY_INTERVAL: Duration = Duration::from_millis(10);

pub const REPLAY_SIZE: TerminalSize = TerminalSize {
    width: 80,
    height: 24,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayStep {
    Key(KeyEvent),
    /// Let every pending timer fire.
    Settle,
    Wait(Duration),
}

pub fn parse_script(script: &str) -> Result<Vec<ReplayStep>> {
    let mut steps = Vec::new();
    let mut chars = script.char_indices();

    while let Some((offset, ch)) = chars.next() {
        if ch != '<' {
            if !ch.is_whitespace() {
                steps.push(ReplayStep::Key(KeyEvent::plain(KeyCode::Char(ch))));
            }
            continue;
        }

        let mut token = String::new();
        let mut closed = false;
        for (_, next) in chars.by_ref() {
            if next == '>' {
                closed = true;
                break;
            }
            token.push(next);
        }
        if !closed {
            return Err(Error::UnterminatedToken(offset));
        }
        steps.push(parse_token(&token).ok_or_else(|| Error::UnknownToken {
            token: token.clone(),
            offset,
        })?);
    }

    Ok(steps)
}

fn parse_token(token: &str) -> Option<ReplayStep> {
    let token = token.trim().to_ascii_lowercase();
    if let Some(ms) = token.strip_prefix("wait:") {
        return ms.parse().ok().map(|ms| ReplayStep::Wait(Duration::from_millis(ms)));
    }
    if let Some(ch) = token.strip_prefix("ctrl-") {
        let mut rest = ch.chars();
        let (Some(ch), None) = (rest.next(), rest.next()) else {
            return None;
        };
        return Some(ReplayStep::Key(KeyEvent {
            code: KeyCode::Char(ch),
            modifiers: KeyModifiers::CONTROL,
        }));
    }

    let code = match token.as_str() {
        "wait" => return Some(ReplayStep::Settle),
        "down" => KeyCode::Down,
        "up" => KeyCode::Up,
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "bs" => KeyCode::Backspace,
        "del" => KeyCode::Delete,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "space" => KeyCode::Char(' '),
        "lt" => KeyCode::Char('<'),
        _ => return None,
    };
    Some(ReplayStep::Key(KeyEvent::plain(code)))
}

#[derive(Debug, Clone, Serialize)]
pub struct LiveRegionSnapshot {
    pub text: String,
    pub politeness: crate::core::config::Politeness,
    pub revision: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplayReport {
    pub frame: serde_json::Value,
    pub values: IndexMap<NodeId, String>,
    pub live_regions: IndexMap<NodeId, LiveRegionSnapshot>,
    pub suggestions: IndexMap<NodeId, Vec<String>>,
}

/// Feeds `steps` through `session` on a virtual clock starting at `start`.
pub fn run(session: &mut Session, steps: &[ReplayStep], start: Instant) -> ReplayReport {
    let mut now = start;
    session.start(now);

    for step in steps {
        match *step {
            ReplayStep::Key(key) => {
                now += KEY_INTERVAL;
                session.process_scheduled(now);
                session.dispatch(AppEvent::Terminal(TerminalEvent::Key(key)), now);
            }
            ReplayStep::Settle => {
                if let Some(due) = session.last_due() {
                    now = now.max(due);
                }
                session.process_scheduled(now);
            }
            ReplayStep::Wait(duration) => {
                now += duration;
                session.process_scheduled(now);
            }
        }
        tracing::trace!(?step, "replay step");
    }

    report(session)
}

pub fn report(session: &Session) -> ReplayReport {
    let form = session.form();
    let mut live_regions = IndexMap::new();
    let mut suggestions = IndexMap::new();
    for (id, field) in form.fields() {
        let Some(suggest) = field.as_suggest() else {
            continue;
        };
        let live = suggest.live_region();
        live_regions.insert(
            id.clone(),
            LiveRegionSnapshot {
                text: live.text().to_string(),
                politeness: live.politeness(),
                revision: live.revision(),
            },
        );
        suggestions.insert(
            id.clone(),
            suggest.suggestions().into_iter().map(str::to_owned).collect(),
        );
    }

    ReplayReport {
        frame: frame_to_json(session.frame(), REPLAY_SIZE),
        values: form.values(),
        live_regions,
        suggestions,
    }
}
