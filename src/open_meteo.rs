use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use reqwest::blocking::{Client, Response};
use serde::Deserialize;

use crate::report::HourlySample;

/// Open-Meteo forecast response: parallel hourly arrays for cloud cover and
/// the daily sunrise/sunset lists.
#[derive(Deserialize, Debug, Default)]
pub struct Forecast {
    hourly: Hourly,
    daily: Daily,
}

#[derive(Deserialize, Debug, Default)]
struct Hourly {
    time: Vec<String>,
    cloudcover: Vec<i64>,
}

#[derive(Deserialize, Debug, Default)]
struct Daily {
    sunrise: Vec<String>,
    sunset: Vec<String>,
}

impl Forecast {
    pub fn from_open_meteo(url: &str) -> Result<Self, reqwest::Error> {
        get_web_json(url)?.error_for_status()?.json()
    }

    /// Today's sunset and tomorrow's sunrise. Anything missing from the
    /// daily block is an upstream error.
    pub fn sun_times(&self, tz: FixedOffset) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let sunset = self
            .daily
            .sunset
            .first()
            .context("open-meteo response is missing today's sunset")?;
        let sunrise = self
            .daily
            .sunrise
            .get(1)
            .context("open-meteo response is missing tomorrow's sunrise")?;
        Ok((parse_local(sunset, tz)?, parse_local(sunrise, tz)?))
    }

    /// The hourly time and cloudcover arrays zipped into samples. Timestamps
    /// that fail to parse abort the whole fetch rather than reaching the
    /// selector.
    pub fn hourly_samples(&self, tz: FixedOffset) -> Result<Vec<HourlySample>> {
        self.hourly
            .time
            .iter()
            .zip(&self.hourly.cloudcover)
            .map(|(t, &cover)| Ok(HourlySample::new(parse_local(t, tz)?, cover)))
            .collect()
    }
}

/// Open-Meteo returns naive local timestamps when queried with a named
/// timezone; an explicit offset is also accepted for robustness.
fn parse_local(t: &str, tz: FixedOffset) -> Result<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(t) {
        return Ok(dt.with_timezone(&tz));
    }
    let naive = NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M")
        .with_context(|| format!("bad open-meteo timestamp: {t}"))?;
    naive
        .and_local_timezone(tz)
        .single()
        .with_context(|| format!("ambiguous local timestamp: {t}"))
}

fn get_web_json(url: &str) -> Result<Response, reqwest::Error> {
    let client = Client::builder().user_agent("hoshizora").build()?;
    client.get(url).send()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn jst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    const BODY: &str = r#"{
        "hourly": {
            "time": ["2024-03-10T00:00", "2024-03-10T01:00", "2024-03-10T02:00"],
            "cloudcover": [25, 110, -3]
        },
        "daily": {
            "sunrise": ["2024-03-10T06:01", "2024-03-11T05:59"],
            "sunset": ["2024-03-10T17:48", "2024-03-11T17:49"]
        }
    }"#;

    #[test]
    fn parses_forecast_and_clamps_cover() {
        let forecast: Forecast = serde_json::from_str(BODY).unwrap();
        let samples = forecast.hourly_samples(jst()).unwrap();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].cloud_cover, 25);
        assert_eq!(samples[1].cloud_cover, 100);
        assert_eq!(samples[2].cloud_cover, 0);
        assert_eq!(samples[0].time.hour(), 0);
        assert_eq!(samples[0].time.offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn sun_times_take_today_sunset_and_tomorrow_sunrise() {
        let forecast: Forecast = serde_json::from_str(BODY).unwrap();
        let (sunset, sunrise) = forecast.sun_times(jst()).unwrap();
        assert_eq!(sunset.format("%Y-%m-%d %H:%M").to_string(), "2024-03-10 17:48");
        assert_eq!(sunrise.format("%Y-%m-%d %H:%M").to_string(), "2024-03-11 05:59");
    }

    #[test]
    fn missing_tomorrow_sunrise_is_an_error() {
        let body = r#"{
            "hourly": {"time": [], "cloudcover": []},
            "daily": {"sunrise": ["2024-03-10T06:01"], "sunset": ["2024-03-10T17:48"]}
        }"#;
        let forecast: Forecast = serde_json::from_str(body).unwrap();
        assert!(forecast.sun_times(jst()).is_err());
    }

    #[test]
    fn offset_bearing_timestamps_are_accepted() {
        let dt = parse_local("2024-03-10T17:48:00+09:00", jst()).unwrap();
        assert_eq!(dt.hour(), 17);
    }
}
