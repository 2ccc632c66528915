use chrono::FixedOffset;

/// All location- and endpoint-specific settings, passed in explicitly
/// instead of living in module-level constants.
#[derive(Debug, Clone)]
pub struct Config {
    /// ntfy.sh topic the report is posted to.
    pub topic: String,
    /// Location name used in the report headline.
    pub location_name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// tenki.jp starry-sky index page.
    pub starry_url: String,
    /// tenki.jp daily weather page (precipitation probability).
    pub weather_url: String,
}

impl Config {
    /// Defaults for Sagamihara, Kanagawa.
    pub fn sagamihara() -> Self {
        Self {
            topic: "HoshizoraChecker-Sagamihara".to_string(),
            location_name: "相模原".to_string(),
            latitude: 35.5714,
            longitude: 139.3733,
            starry_url: "https://tenki.jp/indexes/starry_sky/3/17/4620/14150/".to_string(),
            weather_url: "https://tenki.jp/forecast/3/17/4620/14150/".to_string(),
        }
    }

    /// Open-Meteo query for hourly cloud cover plus daily sunrise/sunset,
    /// all in JST.
    pub fn open_meteo_url(&self) -> String {
        format!(
            "https://api.open-meteo.com/v1/forecast\
             ?latitude={}&longitude={}\
             &hourly=cloudcover\
             &daily=sunrise,sunset\
             &timezone=Asia%2FTokyo",
            self.latitude, self.longitude
        )
    }
}

/// The fixed local time zone (UTC+9) every timestamp in this tool uses.
pub fn jst() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).unwrap()
}
