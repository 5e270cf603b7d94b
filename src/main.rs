use std::process::ExitCode;

use clap::Parser;
use haru::cli::output::{haru_error, haru_warn};
use haru::cli::{self, Cli};
use haru::config::HaruConfig;
use haru::logging;
use haru::session::resolve_offset;
use tracing::{info, warn};

fn main() -> ExitCode {
    // .env ファイルから環境変数（HARU_LOG など）を読み込む
    dotenvy::dotenv().ok();

    let args = Cli::parse();

    // ログのオフセットは設定から決まるため、設定の読み込みが先。
    // 読み込み中の出来事はロギング初期化後に出力する。
    let loaded = match &args.config {
        Some(path) => HaruConfig::load_from(path),
        None => HaruConfig::load(),
    };

    let offset = match resolve_offset(loaded.config.clock.utc_offset_hours) {
        Ok(offset) => offset,
        Err(e) => {
            loaded.emit_events();
            haru_error(&format!("{e:#}"));
            return ExitCode::FAILURE;
        }
    };

    // ガードは main 終了まで保持する必要がある
    let _guard = match logging::init_logging(offset) {
        Ok(guard) => Some(guard),
        Err(e) => {
            haru_warn(&format!("logging disabled: {e:#}"));
            None
        }
    };
    info!(command = ?args.command, "haru started");
    loaded.emit_events();

    match cli::run(args.command, &loaded.config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{e:#}");
            warn!(error = %message, "Command failed");
            haru_error(&message);
            ExitCode::FAILURE
        }
    }
}
