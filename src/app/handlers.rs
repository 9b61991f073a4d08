//! ボタン入力ハンドラー関数。

use crate::{input::Buttons, screen::Screen};

/// 1ティック分のボタンを現在の画面へ適用し、次の画面を返す。
///
/// 同一ティックで複数のボタンが押された場合は select → up → down の順に
/// すべて適用する（排他にはしない）。
pub fn apply_buttons(mut current: Screen, buttons: Buttons) -> Screen {
    if buttons.select {
        current = transition(current, "select", Screen::on_select);
    }
    if buttons.up {
        current = transition(current, "up", Screen::on_up);
    }
    if buttons.down {
        current = transition(current, "down", Screen::on_down);
    }
    current
}

/// 遷移を実行し、画面種別が変わったときだけログに残す。
fn transition(current: Screen, button: &str, f: fn(Screen) -> Screen) -> Screen {
    let from = current.name();
    let next = f(current);
    if next.name() != from {
        tracing::info!("{button}: {from} -> {}", next.name());
    } else {
        tracing::debug!("{button} on {from}");
    }
    next
}
