//! セッション時刻の整形
//!
//! セッションの開始・終了は呼び出し側が管理する。このモジュールは
//! 与えられた時刻を `{time}` / `{session_start_time}` / `{elapsed_time}`
//! に入れる文字列へ整形するだけ。

use std::fmt::Write as _;

use anyhow::{bail, Context, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeDelta, TimeZone, Utc};

/// デフォルトの時刻フォーマット
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S %:z";

/// naive な時刻文字列として受け付けるフォーマット
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// セッション開始時刻と表示フォーマットを保持する時計
#[derive(Debug, Clone)]
pub struct SessionClock {
    started_at: DateTime<FixedOffset>,
    time_format: String,
}

impl SessionClock {
    /// `time_format` が strftime として不正な場合はエラー。
    pub fn new(started_at: DateTime<FixedOffset>, time_format: &str) -> Result<Self> {
        validate_time_format(time_format)?;
        Ok(Self {
            started_at,
            time_format: time_format.to_string(),
        })
    }

    pub fn started_at(&self) -> DateTime<FixedOffset> {
        self.started_at
    }

    /// 表示に使うオフセット（開始時刻のオフセット）
    pub fn offset(&self) -> FixedOffset {
        *self.started_at.offset()
    }

    /// 時刻を時計のオフセットに変換して整形する。
    pub fn format_time(&self, at: DateTime<FixedOffset>) -> String {
        at.with_timezone(&self.offset())
            .format(&self.time_format)
            .to_string()
    }

    pub fn session_start_time(&self) -> String {
        self.format_time(self.started_at)
    }

    /// 開始から `now` までの経過時間
    pub fn elapsed(&self, now: DateTime<FixedOffset>) -> String {
        format_elapsed(now.signed_duration_since(self.started_at))
    }
}

/// strftime フォーマット文字列を検証する。
///
/// パースできても出力できない指定子（`%#z` など）があるため、
/// 実際に時刻を 1 つ整形して確かめる。
pub fn validate_time_format(format: &str) -> Result<()> {
    if format.is_empty() {
        bail!("time format must not be empty");
    }
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        bail!("invalid time format `{format}`");
    }

    let sample = Utc::now().fixed_offset();
    let mut out = String::new();
    if write!(out, "{}", sample.format(format)).is_err() {
        bail!("time format `{format}` cannot be used for display");
    }
    Ok(())
}

/// 経過時間を人間向けの文字列にする。
///
/// - 1 分未満（負値を含む）: `just now`
/// - それ以外: 最上位の単位と、0 でなければその次の単位 + `ago`
///   （例: `5 minutes ago`, `2 hours 5 minutes ago`, `3 days 1 hour ago`）
pub fn format_elapsed(delta: TimeDelta) -> String {
    let total_minutes = delta.num_minutes();
    if total_minutes < 1 {
        return "just now".to_string();
    }

    let units = [
        (total_minutes / (24 * 60), "day"),
        ((total_minutes / 60) % 24, "hour"),
        (total_minutes % 60, "minute"),
    ];

    let parts: Vec<String> = units
        .iter()
        .skip_while(|(value, _)| *value == 0)
        .take(2)
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| plural(*value, unit))
        .collect();

    format!("{} ago", parts.join(" "))
}

fn plural(value: i64, unit: &str) -> String {
    if value == 1 {
        format!("1 {unit}")
    } else {
        format!("{value} {unit}s")
    }
}

/// タイムスタンプ文字列をパースする。
///
/// RFC 3339 を優先し、オフセットのない `YYYY-MM-DD HH:MM[:SS]` は
/// `offset` のローカル時刻として解釈する。
pub fn parse_timestamp(input: &str, offset: FixedOffset) -> Result<DateTime<FixedOffset>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt);
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return offset
                .from_local_datetime(&naive)
                .single()
                .with_context(|| format!("ambiguous timestamp `{input}`"));
        }
    }

    bail!("unrecognized timestamp `{input}` (expected RFC 3339 or `YYYY-MM-DD HH:MM[:SS]`)")
}

/// 設定のオフセット（時間単位）を解決する。未設定ならシステムのローカルオフセット。
pub fn resolve_offset(utc_offset_hours: Option<i32>) -> Result<FixedOffset> {
    match utc_offset_hours {
        Some(hours) => hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .with_context(|| format!("UTC offset out of range: {hours} hours")),
        None => Ok(*Local::now().offset()),
    }
}

/// 指定オフセットでの現在時刻
pub fn now_in(offset: FixedOffset) -> DateTime<FixedOffset> {
    Local::now().with_timezone(&offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn elapsed_under_a_minute_is_just_now() {
        assert_eq!(format_elapsed(TimeDelta::zero()), "just now");
        assert_eq!(format_elapsed(TimeDelta::seconds(59)), "just now");
    }

    #[test]
    fn elapsed_negative_is_just_now() {
        assert_eq!(format_elapsed(TimeDelta::minutes(-30)), "just now");
    }

    #[test]
    fn elapsed_singular_and_plural() {
        assert_eq!(format_elapsed(TimeDelta::minutes(1)), "1 minute ago");
        assert_eq!(format_elapsed(TimeDelta::minutes(5)), "5 minutes ago");
        assert_eq!(format_elapsed(TimeDelta::hours(1)), "1 hour ago");
    }

    #[test]
    fn elapsed_uses_two_most_significant_units() {
        assert_eq!(format_elapsed(TimeDelta::minutes(125)), "2 hours 5 minutes ago");
        assert_eq!(
            format_elapsed(TimeDelta::days(3) + TimeDelta::hours(1) + TimeDelta::minutes(40)),
            "3 days 1 hour ago"
        );
    }

    #[test]
    fn elapsed_skips_zero_second_unit() {
        assert_eq!(format_elapsed(TimeDelta::days(1) + TimeDelta::minutes(5)), "1 day ago");
    }

    #[test]
    fn clock_formats_in_its_offset() {
        let clock =
            SessionClock::new(at("2026-10-19T08:30:00+09:00"), DEFAULT_TIME_FORMAT).unwrap();
        assert_eq!(clock.session_start_time(), "2026-10-19 08:30:00 +09:00");
        // UTC の時刻も開始時刻のオフセットで表示する
        assert_eq!(
            clock.format_time(at("2026-10-19T00:00:00Z")),
            "2026-10-19 09:00:00 +09:00"
        );
        assert_eq!(clock.elapsed(at("2026-10-19T00:00:00Z")), "30 minutes ago");
    }

    #[test]
    fn clock_rejects_invalid_format() {
        assert!(SessionClock::new(at("2026-10-19T08:30:00+09:00"), "%Q").is_err());
        assert!(SessionClock::new(at("2026-10-19T08:30:00+09:00"), "").is_err());
    }

    #[test]
    fn clock_rejects_parse_only_format() {
        // %#z はパースには使えるが出力はできない
        let err = SessionClock::new(at("2026-10-19T08:30:00+09:00"), "%#z").unwrap_err();
        assert!(err.to_string().contains("%#z"));
        assert!(validate_time_format("%Y-%m-%d %#z").is_err());
        assert!(validate_time_format(DEFAULT_TIME_FORMAT).is_ok());
    }

    #[test]
    fn parse_rfc3339_keeps_offset() {
        let dt = parse_timestamp("2026-10-19T08:30:00-05:00", jst()).unwrap();
        assert_eq!(dt.offset().local_minus_utc(), -5 * 3600);
    }

    #[test]
    fn parse_naive_uses_given_offset() {
        let dt = parse_timestamp("2026-10-19 08:30", jst()).unwrap();
        assert_eq!(dt, at("2026-10-19T08:30:00+09:00"));

        let dt = parse_timestamp(" 2026-10-19T08:30:15 ", jst()).unwrap();
        assert_eq!(dt, at("2026-10-19T08:30:15+09:00"));
    }

    #[test]
    fn parse_rejects_garbage() {
        let err = parse_timestamp("yesterday", jst()).unwrap_err();
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn resolve_offset_from_hours() {
        assert_eq!(resolve_offset(Some(9)).unwrap(), jst());
        assert_eq!(resolve_offset(Some(-3)).unwrap().local_minus_utc(), -3 * 3600);
        assert!(resolve_offset(Some(30)).is_err());
        assert!(resolve_offset(Some(1_000_000)).is_err());
        assert!(resolve_offset(Some(i32::MIN)).is_err());
        assert!(resolve_offset(None).is_ok());
    }
}
