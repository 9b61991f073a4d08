//! 表示ループ、入力処理、画面状態の管理。

mod handlers;

use anyhow::Result;
use std::{mem, sync::Arc};

use crate::{
    config::Config,
    input::{ButtonBindings, InputSource, KeyboardInput},
    iss::client::OpenNotifyClient,
    poller,
    screen::Screen,
    shortcuts::Shortcuts,
    snapshot::{DataSource, SnapshotReader},
    surface::RenderSurface,
    ui::{TerminalSurface, Tui},
};

use handlers::apply_buttons;

/// 描画面・入力・データをまとめた表示ループの状態。
pub struct App<S, I> {
    /// パネル（またはそのエミュレーション）。
    pub surface: S,
    /// ボタンの読み取り元。
    pub input: I,
    /// 最新スナップショットの読み取りハンドル。
    pub data: SnapshotReader,
    /// 現在表示中の画面。
    pub current: Screen,
}

impl<S: RenderSurface, I: InputSource> App<S, I> {
    pub fn new(surface: S, input: I, data: SnapshotReader) -> Self {
        Self {
            surface,
            input,
            data,
            current: Screen::default(),
        }
    }

    /// 1フレーム分の処理。終了要求があれば `true` を返す。
    pub fn tick(&mut self) -> Result<bool> {
        // スナップショットは1フレームの間固定で使う。
        let snapshot = self.data.current();
        self.surface.clear();
        self.current.paint(&mut self.surface, &snapshot);
        self.surface.present()?;

        // 描画後にボタンを読み、次の画面を決める。
        let buttons = self.input.sample()?;
        if buttons.quit {
            tracing::info!("quit requested on {}", self.current.name());
            return Ok(true);
        }
        self.current = apply_buttons(mem::take(&mut self.current), buttons);
        Ok(false)
    }

    /// 終了要求が来るまでフレームを回す。
    pub fn run(&mut self) -> Result<()> {
        while !self.tick()? {}
        Ok(())
    }
}

/// ユーザーが終了するまでメインループを回す。
pub async fn run_app(terminal: &mut Tui, cfg: Config, shortcuts: Shortcuts) -> Result<()> {
    // 割り当て不正は端末を使い始める前に検出する。
    let bindings = ButtonBindings::from_shortcuts(&shortcuts)?;

    // APIクライアントとデータソースを用意する。
    let client = OpenNotifyClient::new(&cfg.api)?;
    let source = Arc::new(DataSource::new(Arc::new(client), cfg.observer));
    let reader = source.reader();

    // バックグラウンドで定期更新を開始する。
    let poller = poller::spawn(source, cfg.poller.interval());

    // 端末上のパネルとキーボード入力を組み立ててループに入る。
    let surface = TerminalSurface::new(terminal, cfg.display.width, cfg.display.height);
    let input = KeyboardInput::new(bindings, cfg.display.frame_budget());
    let mut app = App::new(surface, input, reader);
    let res = app.run();

    // ループを抜けたらポーラーも止める。
    poller.abort();
    res
}
