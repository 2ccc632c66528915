use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use log::info;

mod cli;
mod config;
mod moon;
mod notify;
mod open_meteo;
mod report;
mod schedule;
mod tenki;

use crate::config::Config;
use crate::open_meteo::Forecast;
use crate::report::{build_message, select_night_samples, NightWindow, ReportContext};

fn main() -> Result<()> {
    env_logger::init();
    let args = cli::Args::parse();
    let config = Config::sagamihara();
    let tz = config::jst();
    let now = Utc::now().with_timezone(&tz);

    let forecast = Forecast::from_open_meteo(&config.open_meteo_url())
        .context("open-meteo request failed")?;
    let (sunset, sunrise_next) = forecast.sun_times(tz)?;

    if !schedule::should_notify(now, sunset, args.force) {
        info!("outside notification window, skipping");
        return Ok(());
    }

    let samples = forecast.hourly_samples(tz)?;
    let window = NightWindow::new(sunset, sunrise_next);
    let night = select_night_samples(&samples, &window);

    let (today, tomorrow) =
        tenki::fetch_starry_index(&config.starry_url).context("starry index fetch failed")?;
    let (rain_today, rain_tomorrow) =
        tenki::fetch_rain_probability(&config.weather_url).context("weather page fetch failed")?;

    let message = build_message(
        &config,
        &ReportContext {
            now,
            today: &today,
            tomorrow: &tomorrow,
            rain_today: &rain_today,
            rain_tomorrow: &rain_tomorrow,
            moon_age: moon::moon_age(now),
            sunset,
            sunrise_next,
            night: night.as_deref(),
        },
    );

    if args.dry_run {
        println!("{message}");
    } else {
        notify::send(&config.topic, &message).context("ntfy push failed")?;
        info!("notification sent");
    }

    Ok(())
}
