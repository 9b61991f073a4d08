//! ボタン入力のサンプリング。

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::Duration;

use crate::shortcuts::{self, KeyBinding, Shortcuts};

/// 1ティック分のボタン状態。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Buttons {
    pub select: bool,
    pub up: bool,
    pub down: bool,
    /// エミュレータ専用の終了要求。
    pub quit: bool,
}

/// ティックごとに一度ボタンを読む入力源。
pub trait InputSource {
    fn sample(&mut self) -> Result<Buttons>;
}

/// 解析済みのボタン割り当て。
#[derive(Clone, Debug)]
pub struct ButtonBindings {
    select: Vec<KeyBinding>,
    up: Vec<KeyBinding>,
    down: Vec<KeyBinding>,
    quit: Vec<KeyBinding>,
}

impl ButtonBindings {
    /// 設定文字列を解析する。不正な割り当てがあればエラー。
    pub fn from_shortcuts(sc: &Shortcuts) -> Result<Self> {
        Ok(Self {
            select: shortcuts::parse_all(&sc.buttons.select)?,
            up: shortcuts::parse_all(&sc.buttons.up)?,
            down: shortcuts::parse_all(&sc.buttons.down)?,
            quit: shortcuts::parse_all(&sc.buttons.quit)?,
        })
    }

    /// キー1件をボタン状態へ反映する。
    pub fn apply(&self, key: &KeyEvent, buttons: &mut Buttons) {
        // 押下以外（リピート・リリース）は無視する。
        if key.kind != KeyEventKind::Press {
            return;
        }
        let hit = |list: &[KeyBinding]| list.iter().any(|b| b.matches(key));
        buttons.select |= hit(&self.select);
        buttons.up |= hit(&self.up);
        buttons.down |= hit(&self.down);
        // Ctrl+Cはどの割り当てでも終了扱い。
        buttons.quit |= hit(&self.quit) || shortcuts::is_ctrl_c(key);
    }
}

/// 端末のキーボードでボタンを代用する入力源。
pub struct KeyboardInput {
    bindings: ButtonBindings,
    /// 1ティックで入力を待つ最大時間。
    window: Duration,
}

impl KeyboardInput {
    pub fn new(bindings: ButtonBindings, window: Duration) -> Self {
        Self { bindings, window }
    }
}

impl InputSource for KeyboardInput {
    fn sample(&mut self) -> Result<Buttons> {
        let mut buttons = Buttons::default();
        // 最初のイベントは最大1フレーム待ち、以降は溜まっている分だけ読む。
        let mut wait = self.window;
        while event::poll(wait)? {
            if let Event::Key(k) = event::read()? {
                self.bindings.apply(&k, &mut buttons);
            }
            wait = Duration::ZERO;
        }
        Ok(buttons)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn bindings() -> ButtonBindings {
        ButtonBindings::from_shortcuts(&Shortcuts::default()).unwrap()
    }

    #[test]
    fn test_keys_map_to_buttons() {
        // 既定の割り当てで各ボタンが立つことを検証する。
        let b = bindings();
        let mut buttons = Buttons::default();
        b.apply(&press(KeyCode::Enter), &mut buttons);
        b.apply(&press(KeyCode::Char('j')), &mut buttons);
        assert_eq!(
            buttons,
            Buttons {
                select: true,
                up: false,
                down: true,
                quit: false
            }
        );
    }

    #[test]
    fn test_release_is_ignored() {
        // リリースイベントは押下として扱わない。
        let b = bindings();
        let mut buttons = Buttons::default();
        let release = KeyEvent {
            code: KeyCode::Up,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        b.apply(&release, &mut buttons);
        assert_eq!(buttons, Buttons::default());
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        // 終了キー設定に関わらずCtrl+Cで終了する。
        let b = bindings();
        let mut buttons = Buttons::default();
        b.apply(
            &KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut buttons,
        );
        assert!(buttons.quit);
    }

    #[test]
    fn test_invalid_binding_is_rejected() {
        // 解析できない割り当ては起動時にエラーにする。
        let mut sc = Shortcuts::default();
        sc.buttons.up = vec!["Meta+x".into()];
        assert!(ButtonBindings::from_shortcuts(&sc).is_err());
    }
}
