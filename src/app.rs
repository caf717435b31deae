//! App shell: which screen is showing and how input moves between them.
//!
//! Every screen takes the same three kinds of input ([`GameAction`]s,
//! pointer events, text edits) plus a fixed-step [`App::tick`], and renders
//! into the caller's framebuffer.

use std::path::{Path, PathBuf};

use crate::core::{victory_line, PuzzleSession, SessionSnapshot};
use crate::input::{PointerEvent, TextEdit};
use crate::scores::{LedgerError, ScoreLedger};
use crate::term::{FrameBuffer, GameView, MenuPage, MenuView, NameEntryPage, Viewport};
use crate::types::{Difficulty, Direction, GameAction, Mode, MoveResult, MAX_NAME_LENGTH};

use crate::config::Settings;

const MAIN_ITEMS: [&str; 3] = ["Play", "High Scores", "Quit"];

/// Menus in the order the player walks through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuKind {
    Main,
    Mode,
    Difficulty { mode: Mode },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    pub kind: MenuKind,
    pub selected: usize,
}

impl MenuState {
    fn len(&self) -> usize {
        match self.kind {
            MenuKind::Main => MAIN_ITEMS.len(),
            MenuKind::Mode => Mode::ALL.len(),
            MenuKind::Difficulty { .. } => Difficulty::ALL.len(),
        }
    }

    fn scroll(&mut self, direction: Direction) {
        let len = self.len();
        self.selected = match direction {
            Direction::Up | Direction::Left => (self.selected + len - 1) % len,
            Direction::Down | Direction::Right => (self.selected + 1) % len,
        };
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub difficulty: Difficulty,
    pub score: i32,
    pub headline: String,
    pub name: String,
}

impl NameEntry {
    fn edit(&mut self, edit: TextEdit) {
        match edit {
            TextEdit::Insert(c) => {
                if self.name.encode_utf16().count() + c.len_utf16() <= MAX_NAME_LENGTH {
                    self.name.push(c);
                }
            }
            TextEdit::Backspace => {
                self.name.pop();
            }
            TextEdit::Submit | TextEdit::Cancel => {}
        }
    }
}

#[derive(Debug)]
pub enum Screen {
    Menu(MenuState),
    Game(Box<PuzzleSession>),
    NameEntry(NameEntry),
    Scores,
}

pub struct App {
    screen: Screen,
    ledger: ScoreLedger,
    scores_path: PathBuf,
    default_name: String,
    default_mode: Mode,
    default_difficulty: Difficulty,
    game_view: GameView,
    menu_view: MenuView,
    snap: SessionSnapshot,
    exit: bool,
}

impl App {
    pub fn new(settings: &Settings, ledger: ScoreLedger) -> Self {
        Self {
            screen: Screen::Menu(MenuState {
                kind: MenuKind::Main,
                selected: 0,
            }),
            ledger,
            scores_path: settings.scores_path.clone(),
            default_name: settings.default_name.clone(),
            default_mode: settings.mode(),
            default_difficulty: settings.difficulty(),
            game_view: GameView::default(),
            menu_view: MenuView::new(),
            snap: SessionSnapshot::default(),
            exit: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn ledger(&self) -> &ScoreLedger {
        &self.ledger
    }

    pub fn should_exit(&self) -> bool {
        self.exit
    }

    /// Keys should go to [`App::handle_text`] instead of [`App::handle_action`].
    pub fn is_editing_text(&self) -> bool {
        matches!(self.screen, Screen::NameEntry(_))
    }

    /// Start a session directly, skipping the menus.
    pub fn start_game(&mut self, mode: Mode, difficulty: Difficulty, seed: u64) {
        log::info!("starting {:?}/{:?} with seed {}", mode, difficulty, seed);
        self.screen = Screen::Game(Box::new(PuzzleSession::new(mode, difficulty, seed)));
    }

    fn to_main_menu(&mut self) {
        self.screen = Screen::Menu(MenuState {
            kind: MenuKind::Main,
            selected: 0,
        });
    }

    /// Advance the running session, if any, by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        if let Screen::Game(session) = &mut self.screen {
            session.elapse_time(dt, &self.ledger);
        }
    }

    pub fn handle_action(&mut self, action: GameAction) {
        match &mut self.screen {
            Screen::Menu(menu) => match action {
                GameAction::Cursor(direction) => menu.scroll(direction),
                GameAction::Confirm => {
                    let menu = *menu;
                    self.confirm_menu(menu);
                }
                GameAction::Cancel => {
                    let back = match menu.kind {
                        MenuKind::Main => None,
                        MenuKind::Mode => Some(MenuState {
                            kind: MenuKind::Main,
                            selected: 0,
                        }),
                        MenuKind::Difficulty { mode } => Some(MenuState {
                            kind: MenuKind::Mode,
                            selected: mode_index(mode),
                        }),
                    };
                    if let Some(back) = back {
                        self.screen = Screen::Menu(back);
                    }
                }
                GameAction::ToggleUndo => {}
            },
            Screen::Game(session) => {
                if session.is_victorious() {
                    if matches!(action, GameAction::Confirm | GameAction::Cancel) {
                        self.finish_game();
                    }
                    return;
                }
                let result = session.apply_action(action);
                if action == GameAction::Cancel && result == MoveResult::Irrelevant {
                    log::info!("session abandoned after {} moves", session.move_count());
                    self.to_main_menu();
                }
            }
            Screen::Scores => {
                if matches!(action, GameAction::Confirm | GameAction::Cancel) {
                    self.to_main_menu();
                }
            }
            Screen::NameEntry(_) => {}
        }
    }

    pub fn handle_text(&mut self, edit: TextEdit) {
        let Screen::NameEntry(entry) = &mut self.screen else {
            return;
        };
        match edit {
            TextEdit::Submit => {
                let entry = entry.clone();
                self.record_score(&entry);
                self.screen = Screen::Scores;
            }
            TextEdit::Cancel => self.to_main_menu(),
            _ => entry.edit(edit),
        }
    }

    pub fn handle_pointer(&mut self, pointer: PointerEvent, viewport: Viewport) {
        let (x, y) = pointer.position();
        match &mut self.screen {
            Screen::Game(session) => {
                let cell = self
                    .game_view
                    .hit_test(session.grid().side() as u8, viewport, x, y);
                match pointer {
                    PointerEvent::Moved { .. } => session.point_at(cell),
                    PointerEvent::Primary { .. } => {
                        if session.is_victorious() {
                            self.finish_game();
                        } else if cell.is_some() {
                            session.point_at(cell);
                            session.confirm();
                        }
                    }
                    PointerEvent::Secondary { .. } => {
                        session.cancel();
                    }
                }
            }
            Screen::Menu(menu) => {
                let labels = menu_labels(menu.kind);
                let page = MenuPage {
                    title: "",
                    items: labels.as_slice(),
                    selected: menu.selected,
                    caption: "",
                };
                let Some(index) = self.menu_view.item_at(&page, viewport, x, y) else {
                    return;
                };
                menu.selected = index;
                if let PointerEvent::Primary { .. } = pointer {
                    let menu = *menu;
                    self.confirm_menu(menu);
                }
            }
            Screen::Scores => {
                if let PointerEvent::Primary { .. } = pointer {
                    self.to_main_menu();
                }
            }
            Screen::NameEntry(_) => {}
        }
    }

    fn confirm_menu(&mut self, menu: MenuState) {
        match menu.kind {
            MenuKind::Main => match menu.selected {
                0 => {
                    self.screen = Screen::Menu(MenuState {
                        kind: MenuKind::Mode,
                        selected: mode_index(self.default_mode),
                    })
                }
                1 => self.screen = Screen::Scores,
                _ => self.exit = true,
            },
            MenuKind::Mode => {
                let mode = Mode::ALL[menu.selected.min(Mode::ALL.len() - 1)];
                self.screen = Screen::Menu(MenuState {
                    kind: MenuKind::Difficulty { mode },
                    selected: self.default_difficulty.index(),
                });
            }
            MenuKind::Difficulty { mode } => {
                let difficulty = Difficulty::from_index(menu.selected).unwrap_or_default();
                self.start_game(mode, difficulty, rand::random());
            }
        }
    }

    /// Leave a won game: to the name prompt if the score placed.
    fn finish_game(&mut self) {
        let Screen::Game(session) = &self.screen else {
            return;
        };
        match session.placement() {
            Some(rank) => {
                self.screen = Screen::NameEntry(NameEntry {
                    difficulty: session.difficulty(),
                    score: session.score(),
                    headline: victory_line(Some(rank), session.seed() as usize),
                    name: self.default_name.clone(),
                });
            }
            None => self.to_main_menu(),
        }
    }

    fn record_score(&mut self, entry: &NameEntry) {
        let name = entry.name.trim();
        let name = if name.is_empty() {
            self.default_name.as_str()
        } else {
            name
        };
        if self
            .ledger
            .insert(entry.difficulty, name, entry.score)
            .is_some()
        {
            if let Err(err) = self.ledger.save(&self.scores_path) {
                log::warn!("{err}");
            }
        }
    }

    pub fn render_into(&mut self, viewport: Viewport, fb: &mut FrameBuffer) {
        match &self.screen {
            Screen::Menu(menu) => {
                let labels = menu_labels(menu.kind);
                let (title, caption) = match menu.kind {
                    MenuKind::Main => ("NUMERATE", "arrows to choose, enter to select, q to quit"),
                    MenuKind::Mode => {
                        let mode = Mode::ALL[menu.selected.min(Mode::ALL.len() - 1)];
                        ("Choose a mode", mode.goal())
                    }
                    MenuKind::Difficulty { mode } => ("Choose a difficulty", mode.goal()),
                };
                let page = MenuPage {
                    title,
                    items: labels.as_slice(),
                    selected: menu.selected,
                    caption,
                };
                self.menu_view.render_menu_into(&page, viewport, fb);
            }
            Screen::Game(session) => {
                session.snapshot_into(&mut self.snap);
                self.game_view.render_into(&self.snap, viewport, fb);
            }
            Screen::NameEntry(entry) => {
                let page = NameEntryPage {
                    headline: &entry.headline,
                    difficulty: entry.difficulty,
                    score: entry.score,
                    name: &entry.name,
                };
                self.menu_view.render_name_entry_into(&page, viewport, fb);
            }
            Screen::Scores => self.menu_view.render_scores_into(&self.ledger, viewport, fb),
        }
    }
}

/// Labels for a menu; at most four items.
fn menu_labels(kind: MenuKind) -> MenuLabels {
    let mut labels = MenuLabels::default();
    match kind {
        MenuKind::Main => labels.extend(MAIN_ITEMS),
        MenuKind::Mode => labels.extend(Mode::ALL.map(|m| m.label())),
        MenuKind::Difficulty { .. } => labels.extend(Difficulty::ALL.map(|d| d.label())),
    }
    labels
}

#[derive(Default)]
struct MenuLabels {
    items: [&'static str; 4],
    len: usize,
}

impl MenuLabels {
    fn extend<const N: usize>(&mut self, items: [&'static str; N]) {
        for item in items {
            if self.len < self.items.len() {
                self.items[self.len] = item;
                self.len += 1;
            }
        }
    }

    fn as_slice(&self) -> &[&'static str] {
        &self.items[..self.len]
    }
}

fn mode_index(mode: Mode) -> usize {
    Mode::ALL.iter().position(|m| *m == mode).unwrap_or(0)
}

/// Load the score file at `path`.
///
/// A missing file starts an empty table; any other failure keeps whatever
/// loaded cleanly.
pub fn load_ledger(path: &Path) -> ScoreLedger {
    match ScoreLedger::load(path) {
        Ok(ledger) => ledger,
        Err(LedgerError::NotFound { .. }) => {
            log::info!("no score file at {}, starting fresh", path.display());
            ScoreLedger::new()
        }
        Err(err) => {
            log::warn!("{err}; keeping what loaded");
            err.into_partial()
        }
    }
}
