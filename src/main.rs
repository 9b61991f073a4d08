//! アプリケーションのエントリポイントとランタイム初期化。

use anyhow::Result;
use clap::Parser;
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod config;
mod input;
mod iss;
mod poller;
mod raster;
mod screen;
mod scroll;
mod shortcuts;
mod snapshot;
mod surface;
mod ui;

use cli::Cli;
use config::Config;
use iss::client::OpenNotifyClient;
use shortcuts::Shortcuts;

/// ファイルロギングを初期化し、非同期ガードを生存させる。
fn init_logging() -> Result<WorkerGuard> {
    // ログ出力先ファイル名を決める。
    let log_file = "iss_tracker.log";
    // 端末表示を汚さないよう、ファイルへ直接書き込む。
    let file_appender = tracing_appender::rolling::never(".", log_file);
    // 非同期書き込み用のラッパーとガードを用意する。
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    // RUST_LOG未指定時はinfo以上を記録する。
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to init logging: {e}"))?;
    tracing::info!("logging to {}", log_file);
    Ok(guard)
}

#[tokio::main]
/// エントリポイント：ログ初期化→設定読込→問い合わせ or 表示ループ。
async fn main() -> Result<()> {
    // 引数を先に解析し、--help等はロガー無しで終わらせる。
    let cli = Cli::parse();
    // ロガーを初期化し、ガードを保持して書き込みを継続させる。
    let _log_guard = init_logging()?;
    tracing::info!("app starting");

    // 設定ファイルを読み込む（初回はデフォルトを生成）。
    let cfg = Config::load_or_default(&cli.config)?;

    // 問い合わせフラグがあれば結果を標準出力へ書いて終了する。
    if cli.is_query() {
        let client = OpenNotifyClient::new(&cfg.api)?;
        let res = cli::run_query(&cli, &client, &mut io::stdout().lock()).await;
        if let Err(ref e) = res {
            tracing::error!("query failed: {e}");
        }
        return res;
    }

    // ボタン割り当てを読み込む（無ければデフォルト）。
    let shortcuts = Shortcuts::load_or_default("shortcut.toml")?;

    // TUI用の端末状態へ切り替える。
    let mut terminal = ui::init_terminal()?;
    // 表示ループを実行する。
    let res = app::run_app(&mut terminal, cfg, shortcuts).await;
    // 端末の状態を必ず元に戻す。
    ui::restore_terminal()?;
    // エラーがあればログに残す。
    if let Err(ref e) = res {
        tracing::error!("app error: {e}");
    }
    tracing::info!("app exiting");
    res
}
