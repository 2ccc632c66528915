use reqwest::blocking::Client;

const NTFY_BASE_URL: &str = "https://ntfy.sh";

/// POSTs the report body to the ntfy.sh topic. The body is the raw UTF-8
/// text; ntfy delivers it as the notification message.
pub fn send(topic: &str, body: &str) -> Result<(), reqwest::Error> {
    let client = Client::builder().user_agent("hoshizora").build()?;
    client
        .post(format!("{NTFY_BASE_URL}/{topic}"))
        .body(body.to_string())
        .send()?
        .error_for_status()?;
    Ok(())
}
