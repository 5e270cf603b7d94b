//! 設定ファイル管理
//!
//! `~/.config/haru/config.toml` から TOML 形式の設定を読み込む。
//! ファイルが存在しない場合はテンプレートを生成し、デフォルト値を使用する。
//!
//! # 設定ファイル例
//!
//! ```toml
//! [persona]
//! template = "/home/me/prompts/haru.md"
//! model = "gpt-4o"
//!
//! [clock]
//! utc_offset_hours = 9
//! time_format = "%Y-%m-%d %H:%M:%S %:z"
//!
//! [memory]
//! max_entries = 20
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use crate::cli::output::haru_warn;
use crate::session::DEFAULT_TIME_FORMAT;

/// Haru の設定全体
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct HaruConfig {
    pub persona: PersonaConfig,
    pub clock: ClockConfig,
    pub memory: MemoryConfig,
}

/// ペルソナ関連の設定
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PersonaConfig {
    /// 組み込みテンプレートの代わりに使うテンプレートファイル
    pub template: Option<PathBuf>,
    /// リクエスト雛形に書き込むモデル名
    pub model: String,
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            template: None,
            model: "gpt-4o".to_string(),
        }
    }
}

/// 時刻表示の設定
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// UTC からのオフセット（時間）。未設定ならシステムのローカルオフセット。
    pub utc_offset_hours: Option<i32>,
    /// strftime 形式の時刻フォーマット
    pub time_format: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: None,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

/// 記憶ブロックの設定
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// 記憶ブロックに含める最大件数
    pub max_entries: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self { max_entries: 20 }
    }
}

const TEMPLATE: &str = r#"# Haru configuration
#
# You can write setting like this:

[persona]
# template = "/path/to/custom_prompt.md"
# model = "gpt-4o"

[clock]
# utc_offset_hours = 9
# time_format = "%Y-%m-%d %H:%M:%S %:z"

[memory]
# max_entries = 20
"#;

/// 設定読み込み中に起きた出来事。
///
/// 時刻オフセットは設定から決まるため、ロギングは設定を読んだ後に初期化される。
/// 読み込み中のログはここに溜めておき、[`LoadedConfig::emit_events`] で出力する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEvent {
    /// テンプレートから設定ファイルを生成した
    Created { path: PathBuf },
    /// 設定ファイルを読み込んだ
    Loaded { path: PathBuf },
    /// 読み込み・生成に失敗した（デフォルト値で続行）
    Warning {
        path: PathBuf,
        context: &'static str,
        error: String,
    },
}

/// 読み込んだ設定と、その間に起きた出来事
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: HaruConfig,
    pub events: Vec<ConfigEvent>,
}

impl LoadedConfig {
    /// 溜めておいた出来事をログに書き出す。警告は端末にも表示する。
    pub fn emit_events(&self) {
        for event in &self.events {
            match event {
                ConfigEvent::Created { path } => {
                    info!(path = %path.display(), "Created default config file");
                }
                ConfigEvent::Loaded { path } => {
                    info!(
                        path = %path.display(),
                        custom_template = self.config.persona.template.is_some(),
                        model = %self.config.persona.model,
                        utc_offset_hours = ?self.config.clock.utc_offset_hours,
                        max_entries = self.config.memory.max_entries,
                        "Config loaded successfully"
                    );
                }
                ConfigEvent::Warning {
                    path,
                    context,
                    error,
                } => {
                    warn!(path = %path.display(), error = %error, "Failed to {context}");
                    haru_warn(&format!("failed to {context}: {error}"));
                }
            }
        }
    }
}

impl HaruConfig {
    /// 設定ファイルを読み込む。
    ///
    /// `~/.config/haru/config.toml` が存在すればパースし、
    /// 存在しなければテンプレートを生成してデフォルト値を返す。
    /// 読み込み・パースエラーの場合はデフォルト値を返し、警告を
    /// [`LoadedConfig::events`] に記録する。
    pub fn load() -> LoadedConfig {
        Self::load_from(&Self::config_path())
    }

    /// 指定パスから設定を読み込む。挙動は [`HaruConfig::load`] と同じ。
    pub fn load_from(path: &Path) -> LoadedConfig {
        let mut events = Vec::new();
        let config = Self::read_or_default(path, &mut events);
        LoadedConfig { config, events }
    }

    fn read_or_default(path: &Path, events: &mut Vec<ConfigEvent>) -> Self {
        let warning = |context: &'static str, error: String| ConfigEvent::Warning {
            path: path.to_path_buf(),
            context,
            error,
        };

        if !path.exists() {
            Self::create_default_config(path, events);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<HaruConfig>(&content) {
                Ok(config) => {
                    events.push(ConfigEvent::Loaded {
                        path: path.to_path_buf(),
                    });
                    config
                }
                Err(e) => {
                    events.push(warning("parse config file", e.to_string()));
                    Self::default()
                }
            },
            Err(e) => {
                events.push(warning("read config file", e.to_string()));
                Self::default()
            }
        }
    }

    /// 設定ファイルのパスを返す。
    ///
    /// dotfiles として管理しやすいよう、XDG_CONFIG_HOME に依存しない固定パスとする。
    /// `$HOME` が取得できない場合は `./.config/haru/config.toml` にフォールバックする。
    pub fn config_path() -> PathBuf {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(".config/haru/config.toml")
    }

    /// 設定ファイルが存在しない場合にテンプレートから生成する。
    /// 生成に失敗しても警告を記録するだけで処理は継続する。
    fn create_default_config(path: &Path, events: &mut Vec<ConfigEvent>) {
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                events.push(ConfigEvent::Warning {
                    path: parent.to_path_buf(),
                    context: "create config directory",
                    error: e.to_string(),
                });
                return;
            }
        }

        match std::fs::write(path, TEMPLATE) {
            Ok(()) => events.push(ConfigEvent::Created {
                path: path.to_path_buf(),
            }),
            Err(e) => events.push(ConfigEvent::Warning {
                path: path.to_path_buf(),
                context: "create default config file",
                error: e.to_string(),
            }),
        }
    }
}
