//! TUI用端末の初期化と復元、およびパネルのエミュレーション表示。

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};
use std::io::{self, Stdout};

use crate::{raster::MonoRaster, surface::RenderSurface};

/// アプリ全体で使う端末型。
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// 代替画面へ切り替え、rawモードを有効化する。
pub fn init_terminal() -> Result<Tui> {
    // キー入力を即時に受け取れるようrawモードへ切り替える。
    enable_raw_mode()?;
    // 標準出力を取得して代替画面へ入る。
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    // CrosstermバックエンドでTerminalを構築する。
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

/// 終了時に端末状態を元に戻す。
pub fn restore_terminal() -> Result<()> {
    // rawモードを解除する。
    disable_raw_mode()?;
    // 代替画面を終了して元の画面へ戻す。
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// 端末上にOLEDパネルを再現する描画面。
///
/// 描画はラスタへ行い、`present` で半角ブロック文字に変換して表示する。
pub struct TerminalSurface<'a> {
    terminal: &'a mut Tui,
    raster: MonoRaster,
}

impl<'a> TerminalSurface<'a> {
    pub fn new(terminal: &'a mut Tui, width: u32, height: u32) -> Self {
        Self {
            terminal,
            raster: MonoRaster::new(width, height),
        }
    }
}

impl RenderSurface for TerminalSurface<'_> {
    fn width(&self) -> u32 {
        self.raster.width()
    }

    fn height(&self) -> u32 {
        self.raster.height()
    }

    fn clear(&mut self) {
        RenderSurface::clear(&mut self.raster);
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, on: bool) {
        self.raster.fill_rect(x, y, width, height, on);
    }

    fn draw_text(&mut self, line: u8, text: &str, highlighted: bool) {
        self.raster.draw_text(line, text, highlighted);
    }

    fn present(&mut self) -> Result<()> {
        // ラスタを文字列行へ変換してから描画する。
        let rows = half_block_rows(&self.raster);
        let (w, h) = (self.raster.width(), self.raster.height());
        self.terminal.draw(|f| draw_panel(f, &rows, w, h))?;
        Ok(())
    }
}

/// 上下2ピクセルを1文字（▀ ▄ █ 空白）にまとめた行を作る。
pub fn half_block_rows(raster: &MonoRaster) -> Vec<String> {
    let (w, h) = (raster.width(), raster.height());
    (0..h)
        .step_by(2)
        .map(|y| {
            (0..w)
                .map(|x| match (raster.pixel(x, y), raster.pixel(x, y + 1)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                })
                .collect()
        })
        .collect()
}

/// パネルを画面中央に枠付きで描画する。
fn draw_panel(f: &mut Frame, rows: &[String], width: u32, height: u32) {
    // 枠線の分だけ大きい領域を中央に確保する。
    let area = centered_rect(f.area(), width as u16 + 2, (height as u16).div_ceil(2) + 2);
    let text: Vec<Line> = rows.iter().map(|r| Line::raw(r.as_str())).collect();
    let panel = Paragraph::new(text)
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .block(Block::default().borders(Borders::ALL).title("ISS"));
    f.render_widget(panel, area);
}

/// 固定サイズの領域を中央に配置する。
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    // 縦方向の余白を作り、中央行を取り出す。
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    // 横方向も中央に寄せる。
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(rows[1])[1]
}
