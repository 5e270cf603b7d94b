//! コマンドライン引数の定義

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "haru")]
#[command(about = "Render the Haru persona prompt for a language-model conversation")]
#[command(version)]
pub struct Cli {
    /// 設定ファイルのパス（デフォルト: ~/.config/haru/config.toml）
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// プレースホルダーを埋めたプロンプトを出力する
    Render(RenderArgs),
    /// テンプレートのプレースホルダー一覧を表示する
    Placeholders,
    /// retrieve_memory ツールの定義を JSON で出力する
    Tool,
    /// カスタムテンプレートを検証する
    Check {
        /// 検証するテンプレートファイル
        path: PathBuf,
    },
}

#[derive(Args, Debug, Default)]
pub struct RenderArgs {
    /// 記憶ファイル（.json はエントリ配列、それ以外はそのまま使用）
    #[arg(short = 'm', long)]
    pub memory: Option<PathBuf>,

    /// セッション開始時刻（デフォルト: --now と同じ）
    #[arg(short = 's', long)]
    pub session_start: Option<String>,

    /// 現在時刻として扱う時刻（デフォルト: 実際の現在時刻）
    #[arg(short = 'n', long)]
    pub now: Option<String>,

    /// 組み込みの代わりに使うテンプレートファイル
    #[arg(short = 't', long)]
    pub template: Option<PathBuf>,

    /// 出力形式
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// request 形式で使うモデル名（デフォルト: 設定の persona.model）
    #[arg(long)]
    pub model: Option<String>,
}

/// render の出力形式
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// 展開済みプロンプトのテキスト
    #[default]
    Text,
    /// system メッセージの JSON
    Json,
    /// system メッセージとツールを含むリクエスト雛形の JSON
    Request,
}
