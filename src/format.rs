//! Display formatting helpers
//!
//! Pure functions converting raw values (dates, byte counts, phone numbers,
//! currency amounts) into display strings for table and notification output.
//! None of these touch any state; missing or unparseable input renders as
//! `"-"` rather than an error.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

/// Placeholder rendered for absent or invalid values.
const PLACEHOLDER: &str = "-";

/// Formats a UTC timestamp as `YYYY-MM-DD HH:MM:SS`, or date-only when
/// `with_time` is false. `None` renders as `"-"`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use tradectl::format::format_date;
///
/// let ts = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 0).unwrap();
/// assert_eq!(format_date(Some(ts), true), "2024-03-07 09:05:00");
/// assert_eq!(format_date(Some(ts), false), "2024-03-07");
/// assert_eq!(format_date(None, true), "-");
/// ```
pub fn format_date(date: Option<DateTime<Utc>>, with_time: bool) -> String {
    match date {
        None => PLACEHOLDER.to_string(),
        Some(d) if with_time => d.format("%Y-%m-%d %H:%M:%S").to_string(),
        Some(d) => d.format("%Y-%m-%d").to_string(),
    }
}

/// Formats a byte count using binary units (B through TB) with two decimals.
///
/// # Examples
///
/// ```
/// use tradectl::format::format_file_size;
///
/// assert_eq!(format_file_size(0), "0 B");
/// assert_eq!(format_file_size(1536), "1.50 KB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let exponent = ((bytes as f64).ln() / 1024_f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = bytes as f64 / 1024_f64.powi(exponent as i32);
    format!("{:.2} {}", value, UNITS[exponent])
}

/// Formats a number with thousands separators and a fixed number of
/// decimals.
///
/// # Examples
///
/// ```
/// use tradectl::format::format_number;
///
/// assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
/// assert_eq!(format_number(-1200.5, 1), "-1,200.5");
/// ```
pub fn format_number(num: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, num.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };

    let mut grouped = String::new();
    let digits: Vec<char> = int_part.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let sign = if num < 0.0 { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Formats a ratio as a percentage string, e.g. `0.1234` -> `"12.34%"`.
pub fn format_percent(num: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, num * 100.0)
}

/// Formats a monetary amount with a currency symbol and thousands
/// separators. Unknown currency codes fall back to `CODE amount`.
///
/// # Examples
///
/// ```
/// use tradectl::format::format_money;
///
/// assert_eq!(format_money(1234.5, "CNY"), "¥1,234.50");
/// assert_eq!(format_money(99.9, "USD"), "$99.90");
/// assert_eq!(format_money(10.0, "CHF"), "CHF 10.00");
/// ```
pub fn format_money(amount: f64, currency: &str) -> String {
    let symbol = match currency {
        "CNY" | "RMB" => "¥",
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        _ => return format!("{} {}", currency, format_number(amount, 2)),
    };
    format!("{}{}", symbol, format_number(amount, 2))
}

/// Formats a duration in seconds as `Nd Nh Nm Ns`, omitting zero parts.
/// Zero renders as `"-"` since an absent duration is indistinguishable from
/// an unset one upstream.
///
/// # Examples
///
/// ```
/// use tradectl::format::format_duration;
///
/// assert_eq!(format_duration(90061), "1d 1h 1m 1s");
/// assert_eq!(format_duration(3600), "1h");
/// assert_eq!(format_duration(0), "-");
/// ```
pub fn format_duration(seconds: u64) -> String {
    if seconds == 0 {
        return PLACEHOLDER.to_string();
    }

    let days = seconds / 86_400;
    let hours = (seconds % 86_400) / 3_600;
    let minutes = (seconds % 3_600) / 60;
    let secs = seconds % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{}d", days));
    }
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if secs > 0 {
        parts.push(format!("{}s", secs));
    }
    parts.join(" ")
}

/// Visual classification of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    Success,
    Info,
    Warning,
    Primary,
    Danger,
}

/// A display-ready status label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub text: String,
    pub kind: BadgeKind,
}

impl StatusBadge {
    fn new(text: &str, kind: BadgeKind) -> Self {
        Self {
            text: text.to_string(),
            kind,
        }
    }
}

/// Maps a raw status value to a display badge. Entries in `overrides` win
/// over the built-in map; unknown statuses render verbatim as `Info`.
pub fn format_status(status: &str, overrides: &HashMap<&str, StatusBadge>) -> StatusBadge {
    if let Some(badge) = overrides.get(status) {
        return badge.clone();
    }
    match status {
        "active" => StatusBadge::new("Active", BadgeKind::Success),
        "inactive" => StatusBadge::new("Disabled", BadgeKind::Info),
        "pending" => StatusBadge::new("Pending", BadgeKind::Warning),
        "processing" => StatusBadge::new("Processing", BadgeKind::Primary),
        "completed" => StatusBadge::new("Completed", BadgeKind::Success),
        "failed" => StatusBadge::new("Failed", BadgeKind::Danger),
        "deleted" => StatusBadge::new("Deleted", BadgeKind::Info),
        other => StatusBadge::new(other, BadgeKind::Info),
    }
}

/// A postal address with optional components, rendered most-general first.
#[derive(Debug, Clone, Default)]
pub struct Address {
    pub province: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub street: Option<String>,
    pub detail: Option<String>,
}

/// Joins the present components of an address with spaces; an entirely empty
/// address renders as `"-"`.
pub fn format_address(address: &Address) -> String {
    let parts: Vec<&str> = [
        address.province.as_deref(),
        address.city.as_deref(),
        address.district.as_deref(),
        address.street.as_deref(),
        address.detail.as_deref(),
    ]
    .into_iter()
    .flatten()
    .filter(|p| !p.is_empty())
    .collect();

    if parts.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        parts.join(" ")
    }
}

/// Formats an 11-digit mobile number. Masked: `138****5678`; unmasked:
/// `138 1234 5678`. Inputs that do not clean to 11 digits are returned
/// unchanged; empty input renders as `"-"`.
///
/// # Examples
///
/// ```
/// use tradectl::format::format_phone;
///
/// assert_eq!(format_phone("13812345678", false), "138 1234 5678");
/// assert_eq!(format_phone("13812345678", true), "138****5678");
/// assert_eq!(format_phone("12345", true), "12345");
/// ```
pub fn format_phone(phone: &str, mask: bool) -> String {
    if phone.is_empty() {
        return PLACEHOLDER.to_string();
    }

    let cleaned: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if cleaned.len() != 11 {
        return phone.to_string();
    }

    if mask {
        format!("{}****{}", &cleaned[..3], &cleaned[7..])
    } else {
        format!("{} {} {}", &cleaned[..3], &cleaned[3..7], &cleaned[7..])
    }
}

/// Formats an 18-character national ID (17 digits plus a digit or `X`
/// checksum). Masked: first 6 and last 4 visible; unmasked: grouped
/// `6 4 4 4`. Anything else is returned unchanged.
pub fn format_id_card(id_card: &str, mask: bool) -> String {
    if id_card.is_empty() {
        return PLACEHOLDER.to_string();
    }

    let cleaned: String = id_card.chars().filter(|c| !c.is_whitespace()).collect();
    let valid = cleaned.len() == 18
        && cleaned.chars().take(17).all(|c| c.is_ascii_digit())
        && cleaned
            .chars()
            .last()
            .is_some_and(|c| c.is_ascii_digit() || c == 'X' || c == 'x');
    if !valid {
        return id_card.to_string();
    }

    if mask {
        format!("{}********{}", &cleaned[..6], &cleaned[14..])
    } else {
        format!(
            "{} {} {} {}",
            &cleaned[..6],
            &cleaned[6..10],
            &cleaned[10..14],
            &cleaned[14..]
        )
    }
}

/// Formats a bank card number of at least 16 digits. Masked: first and last
/// four visible; unmasked: grouped in fours. Input that is not all digits,
/// or is shorter, is returned unchanged.
pub fn format_bank_card(card_no: &str, mask: bool) -> String {
    if card_no.is_empty() {
        return PLACEHOLDER.to_string();
    }

    let cleaned: String = card_no.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.len() < 16 || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return card_no.to_string();
    }

    if mask {
        return format!(
            "{} **** **** {}",
            &cleaned[..4],
            &cleaned[cleaned.len() - 4..]
        );
    }

    let grouped: Vec<String> = cleaned
        .as_bytes()
        .chunks(4)
        .map(|chunk| String::from_utf8_lossy(chunk).to_string())
        .collect();
    grouped.join(" ")
}

/// Truncates a long filename to roughly `max_length` characters, keeping the
/// extension and eliding the middle: `very-long-na...me-here.txt`.
pub fn format_filename(filename: &str, max_length: usize) -> String {
    if filename.is_empty() {
        return PLACEHOLDER.to_string();
    }

    let chars: Vec<char> = filename.chars().collect();
    if chars.len() <= max_length {
        return filename.to_string();
    }

    let (stem, ext) = match filename.rfind('.') {
        Some(pos) if pos > 0 => (&filename[..pos], Some(&filename[pos + 1..])),
        _ => (filename, None),
    };

    let stem_chars: Vec<char> = stem.chars().collect();
    let half = max_length.saturating_sub(5) / 2;
    let head: String = stem_chars.iter().take(half).collect();
    let tail: String = stem_chars
        .iter()
        .skip(stem_chars.len().saturating_sub(half))
        .collect();

    match ext {
        Some(ext) => format!("{}...{}.{}", head, tail, ext),
        None => format!("{}...{}", head, tail),
    }
}
