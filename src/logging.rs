//! ログ初期化モジュール
//!
//! `tracing` + `tracing-subscriber` を使用して、ログを外部ファイルに出力する。
//! 標準出力はプロンプト本文専用のため、ログは一切端末に出さない。
//! ログファイルは設定の UTC オフセット基準で日次ローテーションする。

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{FixedOffset, NaiveDate, Utc};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{fmt, EnvFilter};

/// ログファイル名のプレフィックス
const LOG_PREFIX: &str = "haru.log";

// ---------------------------------------------------------------------------
// オフセット付きタイマー
// ---------------------------------------------------------------------------

/// ログ行のタイムスタンプを設定のオフセットで出力するタイマー
struct OffsetTimer {
    offset: FixedOffset,
}

impl FormatTime for OffsetTimer {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        let now = Utc::now().with_timezone(&self.offset);
        write!(w, "{}", now.format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
    }
}

// ---------------------------------------------------------------------------
// 日次ローテーションアペンダー
// ---------------------------------------------------------------------------

/// オフセット基準の日付で日次ローテーションするファイルアペンダー。
///
/// 書き込み時に現在の日付を確認し、日付が変わっていれば新しいファイルを開く。
/// `tracing_appender::non_blocking` と組み合わせて使用する。
struct DailyAppender {
    dir: PathBuf,
    offset: FixedOffset,
    current_date: NaiveDate,
    file: File,
}

impl DailyAppender {
    fn new(dir: PathBuf, offset: FixedOffset) -> std::io::Result<Self> {
        let today = Utc::now().with_timezone(&offset).date_naive();
        let file = Self::open_log_file(&dir, today)?;
        Ok(Self {
            dir,
            offset,
            current_date: today,
            file,
        })
    }

    /// 指定した日付のログファイルを開く（なければ作成）。
    fn open_log_file(dir: &Path, date: NaiveDate) -> std::io::Result<File> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(log_file_name(date)))
    }
}

impl Write for DailyAppender {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let today = Utc::now().with_timezone(&self.offset).date_naive();
        if today != self.current_date {
            self.file = Self::open_log_file(&self.dir, today)?;
            self.current_date = today;
        }
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

fn log_file_name(date: NaiveDate) -> String {
    format!("{LOG_PREFIX}.{}", date.format("%Y-%m-%d"))
}

// ---------------------------------------------------------------------------
// ログ初期化
// ---------------------------------------------------------------------------

/// ログの出力先ディレクトリを決定する。
///
/// `HARU_LOG_DIR` が設定されていればそれを使い、なければ
/// `CARGO_MANIFEST_DIR`（開発時）またはカレントディレクトリ配下の `var/logs/`。
fn log_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("HARU_LOG_DIR") {
        return PathBuf::from(dir);
    }

    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        return PathBuf::from(manifest_dir).join("var").join("logs");
    }

    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("var")
        .join("logs")
}

/// ログシステムを初期化する。
///
/// - ログレベルは `HARU_LOG` 環境変数で制御（デフォルト: `info`）
/// - ログファイルは `haru.log.YYYY-MM-DD` に日次ローテーション
/// - タイムスタンプ・ローテーションとも `offset` 基準
///
/// 返り値のガードは `main()` で保持し続ける必要がある（ドロップするとログ出力が停止する）。
pub fn init_logging(offset: FixedOffset) -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = log_dir();

    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let file_appender = DailyAppender::new(log_dir.clone(), offset)
        .with_context(|| format!("failed to create log file in {}", log_dir.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_env("HARU_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(non_blocking)
        .with_timer(OffsetTimer { offset })
        .with_ansi(false) // ファイル出力には ANSI カラーコードを含めない
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .with_file(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(guard)
}
