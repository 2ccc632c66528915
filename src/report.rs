use chrono::{DateTime, Duration, FixedOffset, Timelike};

use crate::config::Config;
use crate::tenki::StarryDay;

/// Maximum bar length of the cloud-cover graph, in glyphs.
pub const MAX_BAR: usize = 20;

const NO_DATA: &str = "データなし";

/// ASCII to full-width substitution table. Applied to the hour and percent
/// fields so columns line up in proportional-font notification viewers.
const ZENKAKU: [(char, char); 14] = [
    ('0', '０'),
    ('1', '１'),
    ('2', '２'),
    ('3', '３'),
    ('4', '４'),
    ('5', '５'),
    ('6', '６'),
    ('7', '７'),
    ('8', '８'),
    ('9', '９'),
    ('%', '％'),
    ('(', '（'),
    (')', '）'),
    (' ', '　'),
];

/// One hourly forecast sample. Cloud cover is clamped to 0-100 at
/// construction, so out-of-range upstream values cannot overflow the bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlySample {
    pub time: DateTime<FixedOffset>,
    pub cloud_cover: u8,
}

impl HourlySample {
    pub fn new(time: DateTime<FixedOffset>, cloud_cover: i64) -> Self {
        Self {
            time,
            cloud_cover: cloud_cover.clamp(0, 100) as u8,
        }
    }
}

/// The interval from local sunset to the following local sunrise.
///
/// If the end timestamp does not sort after the start (both given as clock
/// times on the same calendar date), the end is advanced by one day.
#[derive(Debug, Clone, Copy)]
pub struct NightWindow {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

impl NightWindow {
    pub fn new(sunset: DateTime<FixedOffset>, sunrise_next: DateTime<FixedOffset>) -> Self {
        let end = if sunrise_next <= sunset {
            sunrise_next + Duration::days(1)
        } else {
            sunrise_next
        };
        Self { start: sunset, end }
    }

    /// A sample dated on the window start's day whose time-of-day is earlier
    /// than the start's belongs to the following calendar day; shift it
    /// forward for comparison only. Samples already carrying another date
    /// are compared as-is. Returns the comparison timestamp and whether it
    /// was shifted.
    fn adjust(&self, t: DateTime<FixedOffset>) -> (DateTime<FixedOffset>, bool) {
        if t.date_naive() == self.start.date_naive() && t.time() < self.start.time() {
            (t + Duration::days(1), true)
        } else {
            (t, false)
        }
    }
}

/// Returns the samples falling inside the night window, sorted ascending by
/// their date-corrected timestamp, at most one per hour of day (first
/// occurrence wins). `None` when nothing falls inside the window, so the
/// caller can substitute the no-data line instead of an empty graph.
pub fn select_night_samples(
    samples: &[HourlySample],
    window: &NightWindow,
) -> Option<Vec<HourlySample>> {
    let mut picked: Vec<(DateTime<FixedOffset>, bool, HourlySample)> = samples
        .iter()
        .map(|s| {
            let (adjusted, shifted) = window.adjust(s.time);
            (adjusted, shifted, *s)
        })
        .filter(|(adjusted, _, _)| *adjusted >= window.start && *adjusted <= window.end)
        .collect();
    // a sample carrying the real date sorts ahead of one shifted onto the
    // same instant; the stable sort keeps the earlier input sample in front
    // of a plain duplicate
    picked.sort_by_key(|(adjusted, shifted, _)| (*adjusted, *shifted));

    let mut seen = [false; 24];
    let mut selected = Vec::with_capacity(picked.len());
    for (_, _, sample) in picked {
        let hour = sample.time.hour() as usize;
        if !seen[hour] {
            seen[hour] = true;
            selected.push(sample);
        }
    }

    if selected.is_empty() {
        None
    } else {
        Some(selected)
    }
}

fn to_zenkaku(s: &str) -> String {
    s.chars()
        .map(|c| {
            ZENKAKU
                .iter()
                .find(|(ascii, _)| *ascii == c)
                .map_or(c, |(_, zen)| *zen)
        })
        .collect()
}

/// Percent label right-aligned to three cells with full-width spaces:
/// 0-9 get two pad cells, 10-99 one, 100 none.
fn pad_percent(val: u8) -> String {
    let pad = if val < 10 {
        "　　"
    } else if val < 100 {
        "　"
    } else {
        ""
    };
    format!("{pad}{}％", to_zenkaku(&val.to_string()))
}

/// Renders the night cloud-cover block, one line per selected hour:
/// zero-padded hour, padded percent, proportional bar of up to
/// [`MAX_BAR`] glyphs. `None` or an empty slice renders the no-data line.
pub fn render_cloud_graph(samples: Option<&[HourlySample]>) -> String {
    let Some(samples) = samples.filter(|s| !s.is_empty()) else {
        return NO_DATA.to_string();
    };
    samples
        .iter()
        .map(|s| {
            let hour = to_zenkaku(&format!("{:02}", s.time.hour()));
            let bar = "▮".repeat(s.cloud_cover as usize * MAX_BAR / 100);
            format!("{hour}時（{}）: {bar}", pad_percent(s.cloud_cover))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Everything the notification body needs, gathered by the fetchers.
pub struct ReportContext<'a> {
    pub now: DateTime<FixedOffset>,
    pub today: &'a StarryDay,
    pub tomorrow: &'a StarryDay,
    pub rain_today: &'a str,
    pub rain_tomorrow: &'a str,
    pub moon_age: f64,
    pub sunset: DateTime<FixedOffset>,
    pub sunrise_next: DateTime<FixedOffset>,
    pub night: Option<&'a [HourlySample]>,
}

pub fn build_message(config: &Config, ctx: &ReportContext) -> String {
    let location = &config.location_name;
    let mut lines = Vec::new();
    lines.push(format!("🌌 {location}の天体観測情報（自動）"));
    lines.push(format!("📅 {}", ctx.now.format("%Y-%m-%d (%a)")));
    lines.push(format!(
        "【今日】 指数: {} / 降水: {} / {}",
        ctx.today.index, ctx.rain_today, ctx.today.comment
    ));
    lines.push(format!(
        "【明日】 指数: {} / 降水: {} / {}",
        ctx.tomorrow.index, ctx.rain_tomorrow, ctx.tomorrow.comment
    ));
    lines.push(format!("🌙 月齢: {:.1}日", ctx.moon_age));
    lines.push(format!(
        "🕗 今日の日没（{location}）: {}",
        ctx.sunset.format("%H:%M")
    ));
    lines.push(format!(
        "🌅 明日の日の出（{location}）: {}",
        ctx.sunrise_next.format("%H:%M")
    ));
    lines.push(String::new());
    lines.push(format!(
        "☁️ 夜間雲量予報（{}〜{}）",
        ctx.sunset.format("%H:%M"),
        ctx.sunrise_next.format("%H:%M")
    ));
    lines.push(render_cloud_graph(ctx.night));
    lines.push(String::new());
    lines.push(format!("🔗 星空指数: {}", config.starry_url));
    lines.push(format!("🔗 天気: {}", config.weather_url));
    lines.push(format!("🔗 雲量(元データ): {}", config.open_meteo_url()));
    lines.push(String::new());
    lines.join("\n")
}
