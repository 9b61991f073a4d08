//! Screen state machine driven by the three panel buttons.

use chrono::{DateTime, Local, Utc};

use crate::{
    scroll::ListWindow,
    snapshot::IssSnapshot,
    surface::{RenderSurface, ScreenLine},
};

/// Entries on the main menu, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEntry {
    Summary,
    People,
    Times,
}

impl MenuEntry {
    pub const ALL: [MenuEntry; 3] = [MenuEntry::Summary, MenuEntry::People, MenuEntry::Times];

    pub fn label(self) -> &'static str {
        match self {
            MenuEntry::Summary => "Summary",
            MenuEntry::People => "People",
            MenuEntry::Times => "Times",
        }
    }

    /// Fresh screen for this entry.
    fn open(self) -> Screen {
        match self {
            MenuEntry::Summary => Screen::Summary,
            MenuEntry::People => Screen::People(ListWindow::default()),
            MenuEntry::Times => Screen::Times(ListWindow::default()),
        }
    }
}

/// The screen currently on the panel.
///
/// Transitions consume the screen and hand back the one that should be
/// current next, which is often the same value with a moved cursor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    MainMenu { selected_line: usize },
    Summary,
    People(ListWindow),
    Times(ListWindow),
}

impl Default for Screen {
    fn default() -> Self {
        Screen::MainMenu { selected_line: 0 }
    }
}

impl Screen {
    /// Title drawn on line 0.
    pub fn name(&self) -> &'static str {
        match self {
            Screen::MainMenu { .. } => "Main Menu",
            Screen::Summary => "Summary",
            Screen::People(_) => "People",
            Screen::Times(_) => "Times",
        }
    }

    pub fn on_select(self) -> Screen {
        match self {
            Screen::MainMenu { selected_line } => {
                MenuEntry::ALL[selected_line % MenuEntry::ALL.len()].open()
            }
            Screen::Summary | Screen::People(_) | Screen::Times(_) => Screen::default(),
        }
    }

    pub fn on_up(self) -> Screen {
        match self {
            Screen::MainMenu { selected_line } => {
                let n = MenuEntry::ALL.len();
                Screen::MainMenu {
                    selected_line: (selected_line + n - 1) % n,
                }
            }
            Screen::Summary => Screen::Summary,
            Screen::People(mut w) => {
                w.step_up();
                Screen::People(w)
            }
            Screen::Times(mut w) => {
                w.step_up();
                Screen::Times(w)
            }
        }
    }

    pub fn on_down(self) -> Screen {
        match self {
            Screen::MainMenu { selected_line } => Screen::MainMenu {
                selected_line: (selected_line + 1) % MenuEntry::ALL.len(),
            },
            Screen::Summary => Screen::Summary,
            Screen::People(mut w) => {
                w.step_down();
                Screen::People(w)
            }
            Screen::Times(mut w) => {
                w.step_down();
                Screen::Times(w)
            }
        }
    }

    /// Draw this screen for `snapshot`. Paginated screens settle their
    /// window against the current list length first.
    pub fn paint<S: RenderSurface + ?Sized>(&mut self, surface: &mut S, snapshot: &IssSnapshot) {
        let title = self.name();
        surface.draw_centered(0, title);

        match self {
            Screen::MainMenu { selected_line } => {
                for (i, entry) in MenuEntry::ALL.iter().enumerate() {
                    let row = ScreenLine::new(entry.label()).selected(i == *selected_line);
                    surface.draw_line(i as u8 + 1, &row);
                }
            }
            Screen::Summary => {
                surface.draw_text(1, &format!("lt:{}", snapshot.latitude), false);
                surface.draw_text(2, &format!("ln:{}", snapshot.longitude), false);
                if let Some(next) = snapshot.next_pass() {
                    surface.draw_centered(3, &format_pass_time(next));
                }
            }
            Screen::People(window) => {
                paint_list(surface, window, &snapshot.crew, |name| name.clone());
            }
            Screen::Times(window) => {
                paint_list(surface, window, &snapshot.upcoming_passes, format_pass_time);
            }
        }
    }
}

/// Settle `window` against `items` and draw the visible rows.
fn paint_list<S, T, F>(surface: &mut S, window: &mut ListWindow, items: &[T], label: F)
where
    S: RenderSurface + ?Sized,
    F: Fn(&T) -> String,
{
    window.settle(items.len());
    for (line, index, selected) in window.rows(items.len()) {
        let row = ScreenLine::new(label(&items[index])).selected(selected);
        surface.draw_line(line, &row);
    }
}

/// Pass time in the panel's `YYYY-MM-DD HH:MM:SS` local form.
pub fn format_pass_time(t: &DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}
