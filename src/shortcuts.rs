//! ボタン割り当て（ショートカット）設定の管理。

use anyhow::{Result, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// ショートカット設定の全体。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortcuts {
    pub buttons: ButtonShortcuts,
}

/// 3つの物理ボタンと終了キーに対応するキー。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonShortcuts {
    pub select: Vec<String>,
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub quit: Vec<String>,
}

impl Shortcuts {
    /// TOMLから読み込み、無ければデフォルトを返す。
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            // 既存ファイルを読み込んでパースする。
            let content = std::fs::read_to_string(path)?;
            let shortcuts: Shortcuts = toml::from_str(&content)?;
            Ok(shortcuts)
        } else {
            // 未作成の場合は既定値を利用する。
            Ok(Self::default())
        }
    }
}

impl Default for Shortcuts {
    fn default() -> Self {
        Self {
            buttons: ButtonShortcuts {
                select: vec!["Enter".into(), "Space".into()],
                up: vec!["Up".into(), "k".into()],
                down: vec!["Down".into(), "j".into()],
                quit: vec!["q".into(), "Esc".into()],
            },
        }
    }
}

/// 解析済みのキー割り当て1件（例: "Ctrl+u", "Enter", "j"）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    modifiers: KeyModifiers,
    code: KeyCode,
}

impl KeyBinding {
    /// ショートカット文字列を解析する。
    pub fn parse(shortcut: &str) -> Result<Self> {
        // 最後の要素がキー本体、それ以前が修飾キー。
        let mut parts: Vec<&str> = shortcut.split('+').collect();
        let Some(key_str) = parts.pop() else {
            bail!("empty shortcut");
        };

        // 修飾キーを解析して期待値を作る。
        let mut modifiers = KeyModifiers::empty();
        for modifier in parts {
            modifiers |= match modifier.to_ascii_lowercase().as_str() {
                "ctrl" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                other => bail!("unknown modifier {other:?} in shortcut {shortcut:?}"),
            };
        }

        let code = match key_str.to_ascii_lowercase().as_str() {
            "enter" => KeyCode::Enter,
            "esc" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "space" => KeyCode::Char(' '),
            "backspace" => KeyCode::Backspace,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            // 単一文字は大文字小文字を保ったまま Char として扱う。
            _ => {
                let mut chars = key_str.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => bail!("unknown key {key_str:?} in shortcut {shortcut:?}"),
                }
            }
        };

        Ok(Self { modifiers, code })
    }

    /// KeyEventがこの割り当てと一致するか判定する。
    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.modifiers == self.modifiers && key.code == self.code
    }
}

/// 文字列のリストをまとめて解析する。
pub fn parse_all(shortcuts: &[String]) -> Result<Vec<KeyBinding>> {
    shortcuts.iter().map(|s| KeyBinding::parse(s)).collect()
}

/// Ctrl+Cかどうかを判定する。
pub fn is_ctrl_c(k: &KeyEvent) -> bool {
    k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c')
}
