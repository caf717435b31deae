//! Numerate terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `numerate-term`.
//! The simulation runs in fixed steps of `tick_ms`; input is handled between
//! steps.

use std::fs::OpenOptions;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use numerate::app::{load_ledger, App};
use numerate::config::Settings;
use numerate::input::{
    handle_key_event, handle_mouse_event, handle_text_key, is_interrupt, should_quit,
};
use numerate::term::{FrameBuffer, TerminalRenderer, Viewport};

/// Steps run back to back after a stall before the clock is resynced.
const MAX_CATCH_UP_STEPS: u32 = 10;

fn main() -> Result<()> {
    let (settings, config_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(err) => (Settings::from_env(), Some(err)),
    };
    init_logging(&settings)?;
    if let Some(err) = config_error {
        log::warn!("ignoring settings file: {err:#}");
    }

    let ledger = load_ledger(&settings.scores_path);
    let mut app = App::new(&settings, ledger);

    let mut term = TerminalRenderer::new();
    if !settings.mouse {
        term = term.without_mouse();
    }
    term.enter()?;

    let result = run(&mut term, &mut app, settings.tick());

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(settings: &Settings) -> Result<()> {
    let Some(path) = &settings.log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("install logger")?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, app: &mut App, tick: Duration) -> Result<()> {
    let dt = tick.as_secs_f64();
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        app.render_into(viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.is_editing_text() {
                        if is_interrupt(key) {
                            return Ok(());
                        }
                        if let Some(edit) = handle_text_key(key) {
                            app.handle_text(edit);
                        }
                    } else {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if let Some(action) = handle_key_event(key) {
                            app.handle_action(action);
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(pointer) = handle_mouse_event(mouse) {
                        app.handle_pointer(pointer, viewport);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let mut steps = 0;
        while last_tick.elapsed() >= tick {
            if steps == MAX_CATCH_UP_STEPS {
                last_tick = Instant::now();
                break;
            }
            last_tick += tick;
            app.tick(dt);
            steps += 1;
        }

        if app.should_exit() {
            return Ok(());
        }
    }
}
