use crate::runtime::event::AppEvent;
use crate::runtime::session::Session;
use crate::terminal::{Terminal, TerminalEvent};
use std::io;
use std::time::{Duration, Instant};

const IDLE_POLL: Duration = Duration::from_millis(120);

/// Interactive event loop: terminal events in, frames out.
pub struct Runtime {
    session: Session,
    terminal: Terminal,
}

impl Runtime {
    pub fn new(session: Session, terminal: Terminal) -> Self {
        Self { session, terminal }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.terminal.enter()?;

        let run_result = (|| -> io::Result<()> {
            self.session.start(Instant::now());
            self.paint()?;

            while !self.session.should_exit() {
                if self.session.process_scheduled(Instant::now()) {
                    self.paint()?;
                }

                let timeout = self.session.poll_timeout(Instant::now(), IDLE_POLL);
                let event = self.terminal.poll_event(timeout)?;
                if let TerminalEvent::Resize(size) = event {
                    self.terminal.set_size(size);
                }

                if self
                    .session
                    .dispatch(AppEvent::Terminal(event), Instant::now())
                {
                    self.paint()?;
                }
            }

            Ok(())
        })();

        let exit_result = self.terminal.exit();
        run_result.and(exit_result)
    }

    fn paint(&mut self) -> io::Result<()> {
        self.terminal.render_frame(self.session.frame())
    }
}
