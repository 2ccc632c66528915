use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};

/// Starry-sky index and weather comment for one day on tenki.jp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StarryDay {
    pub index: String,
    pub comment: String,
}

impl StarryDay {
    fn unknown() -> Self {
        Self {
            index: "?".to_string(),
            comment: String::new(),
        }
    }
}

/// Starry-sky index for today and tomorrow. The page structure shifts from
/// time to time, so missing pieces degrade to "?" instead of failing.
pub fn fetch_starry_index(url: &str) -> Result<(StarryDay, StarryDay), reqwest::Error> {
    Ok(parse_starry_index(&get_web_text(url)?))
}

/// Precipitation probability for today and tomorrow, "?" when not found.
pub fn fetch_rain_probability(url: &str) -> Result<(String, String), reqwest::Error> {
    Ok(parse_rain_probability(&get_web_text(url)?))
}

fn get_web_text(url: &str) -> Result<String, reqwest::Error> {
    let client = Client::builder().user_agent("hoshizora").build()?;
    client.get(url).send()?.error_for_status()?.text()
}

fn parse_starry_index(html: &str) -> (StarryDay, StarryDay) {
    let doc = Html::parse_document(html);
    let day_sel = Selector::parse(".index-table-day").unwrap();
    let point_sel = Selector::parse(".index-point-telop").unwrap();
    let telop_sel = Selector::parse(".weather-telop").unwrap();

    let mut days = doc.select(&day_sel).take(2).map(|day| {
        let index = day
            .select(&point_sel)
            .next()
            .map(|el| {
                let text = element_text(el);
                text.replace("指数", "").replace(':', "").trim().to_string()
            })
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "?".to_string());
        let comment = day
            .select(&telop_sel)
            .next()
            .map(element_text)
            .unwrap_or_default();
        StarryDay { index, comment }
    });

    let today = days.next().unwrap_or_else(StarryDay::unknown);
    let tomorrow = days.next().unwrap_or_else(StarryDay::unknown);
    (today, tomorrow)
}

fn parse_rain_probability(html: &str) -> (String, String) {
    let doc = Html::parse_document(html);
    let block_sel = Selector::parse("section, article, div").unwrap();
    let title_sel = Selector::parse("h2, h3, p, h4").unwrap();
    let cell_sel = Selector::parse("td, span, p, li, div").unwrap();

    let mut today = None;
    let mut tomorrow = None;
    for block in doc.select(&block_sel) {
        let Some(title) = block.select(&title_sel).next().map(element_text) else {
            continue;
        };
        if today.is_none() && title.contains("今日") {
            today = block.select(&cell_sel).map(element_text).find(|t| is_percent(t));
        }
        if tomorrow.is_none() && title.contains("明日") {
            tomorrow = block.select(&cell_sel).map(element_text).find(|t| is_percent(t));
        }
        if today.is_some() && tomorrow.is_some() {
            break;
        }
    }

    (
        today.unwrap_or_else(|| "?".to_string()),
        tomorrow.unwrap_or_else(|| "?".to_string()),
    )
}

fn is_percent(text: &str) -> bool {
    text.strip_suffix('%')
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
