//! サブコマンドの実行

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::args::{Command, OutputFormat, RenderArgs};
use super::output::{haru_say, haru_warn};
use crate::ai::{build_tools, persona_request, system_message};
use crate::config::HaruConfig;
use crate::memory::load_memory_file;
use crate::persona::{haru_template, PromptContext, PromptTemplate, Slot};
use crate::session::{now_in, parse_timestamp, resolve_offset, SessionClock};

/// サブコマンドを実行し、標準出力に結果を書く。
pub fn run(command: Command, config: &HaruConfig) -> Result<()> {
    let output = match command {
        Command::Render(args) => render(&args, config)?,
        Command::Placeholders => placeholders(),
        Command::Tool => serde_json::to_string_pretty(&build_tools())
            .context("failed to serialize tool definitions")?,
        Command::Check { path } => check(&path)?,
    };

    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
    Ok(())
}

/// render: テンプレートを展開し、指定形式の文字列を返す。
pub fn render(args: &RenderArgs, config: &HaruConfig) -> Result<String> {
    let offset = resolve_offset(config.clock.utc_offset_hours)?;

    let now = match &args.now {
        Some(value) => parse_timestamp(value, offset).context("invalid --now")?,
        None => now_in(offset),
    };
    let started_at = match &args.session_start {
        Some(value) => parse_timestamp(value, offset).context("invalid --session-start")?,
        None => now,
    };
    let clock = SessionClock::new(started_at.with_timezone(&offset), &config.clock.time_format)
        .context("invalid [clock] time_format")?;

    let recent_memory = match &args.memory {
        Some(path) => load_memory_file(path, offset, config.memory.max_entries)?,
        None => String::new(),
    };

    let template_path = args.template.as_deref().or(config.persona.template.as_deref());
    let template = load_template(template_path)?;

    let context = PromptContext::from_clock(recent_memory, &clock, now);
    if context.is_fresh_start() {
        info!("No recent memory supplied, rendering as fresh start");
        haru_say("no recent memory. this is a fresh start.");
    }
    debug!(
        time = %context.time,
        session_start_time = %context.session_start_time,
        elapsed_time = %context.elapsed_time,
        "Prompt context assembled"
    );

    let rendered = template.render(&context);
    info!(
        rendered_length = rendered.len(),
        format = ?args.format,
        "Prompt rendered"
    );

    match args.format {
        OutputFormat::Text => Ok(rendered),
        OutputFormat::Json => serde_json::to_string_pretty(&system_message(&rendered))
            .context("failed to serialize system message"),
        OutputFormat::Request => {
            let model = args.model.as_deref().unwrap_or(&config.persona.model);
            serde_json::to_string_pretty(&persona_request(model, &rendered))
                .context("failed to serialize request")
        }
    }
}

/// テンプレートを読み込む。パス未指定なら組み込みの Haru テンプレート。
/// 欠けているスロットは警告のみ。
fn load_template(path: Option<&Path>) -> Result<PromptTemplate> {
    let Some(path) = path else {
        return Ok(haru_template());
    };

    let template = parse_template_file(path)?;
    for slot in template.missing_slots() {
        warn!(path = %path.display(), slot = %slot, "Template does not use slot");
        haru_warn(&format!("{} does not use {slot}", path.display()));
    }
    info!(path = %path.display(), "Custom template loaded");
    Ok(template)
}

fn parse_template_file(path: &Path) -> Result<PromptTemplate> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read template {}", path.display()))?;
    PromptTemplate::parse(&text).with_context(|| format!("invalid template {}", path.display()))
}

/// placeholders: スロット名と、それを埋める外部コンポーネントの一覧
pub fn placeholders() -> String {
    Slot::ALL
        .iter()
        .map(|slot| format!("{:<22}{}", slot.to_string(), slot.filled_by()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// check: テンプレートを検証して結果の要約を返す。
/// 未知のプレースホルダーはエラー、欠けているスロットは警告。
pub fn check(path: &Path) -> Result<String> {
    let template = parse_template_file(path)?;
    let missing = template.missing_slots();
    for slot in &missing {
        haru_warn(&format!("{} does not use {slot}", path.display()));
    }

    let used = template.slots().count();
    info!(
        path = %path.display(),
        used,
        missing = missing.len(),
        "Template checked"
    );
    Ok(format!(
        "{}: ok ({used} placeholder{}, {} missing)",
        path.display(),
        if used == 1 { "" } else { "s" },
        missing.len()
    ))
}
