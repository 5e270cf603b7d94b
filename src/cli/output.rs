//! 端末への通知出力
//!
//! 標準出力はプロンプト本文や JSON 専用なので、通知はすべて標準エラーに出す。

use nu_ansi_term::{Color, Style};

use crate::persona::PERSONA_NAME;

fn styled(color: Color, text: &str, is_bold: bool) -> String {
    let style = if is_bold {
        color.bold()
    } else {
        Style::new().fg(color)
    };
    style.paint(text).to_string()
}

pub fn cyan(text: &str) -> String {
    styled(Color::Cyan, text, false)
}

pub fn yellow(text: &str) -> String {
    styled(Color::Yellow, text, false)
}

pub fn white(text: &str) -> String {
    styled(Color::LightGray, text, false)
}

pub fn bold_red(text: &str) -> String {
    styled(Color::LightRed, text, true)
}

/// Haru が話すときに使う共通関数。名前を付けて白色で表示する。
pub fn haru_say(message: &str) {
    eprintln!("{} {}", cyan(&format!("{PERSONA_NAME}:")), white(message));
}

pub fn haru_warn(message: &str) {
    eprintln!("haru: {} {message}", yellow("warning:"));
}

pub fn haru_error(message: &str) {
    eprintln!("haru: {} {message}", bold_red("error:"));
}
